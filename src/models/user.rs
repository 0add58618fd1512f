//! User model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// User account held in the record store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Unique across all users (exact match)
    pub email: String,
    /// Argon2id PHC string. Empty for accounts that cannot log in.
    #[serde(default)]
    pub password_hash: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    /// Incremented on every recorded visit
    #[serde(default)]
    pub visit_count: u32,
    /// Incremented on every submitted review
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub is_business: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public profile returned by auth endpoints.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub visit_count: u32,
    pub review_count: u32,
    pub badges: Vec<String>,
    pub is_business: bool,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            bio: user.bio.clone(),
            visit_count: user.visit_count,
            review_count: user.review_count,
            badges: user.badges.clone(),
            is_business: user.is_business,
        }
    }
}
