//! Business promotions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Promotion run by a business account for one of its cafés.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Promotion {
    pub id: String,
    /// Owning business user
    pub business_id: String,
    pub cafe_id: String,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Promotion {
    /// Active and within its date range (both ends inclusive).
    pub fn is_running(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.start_date <= now && self.end_date >= now
    }
}
