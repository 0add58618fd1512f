//! Server-side session record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maps an opaque bearer token to a user until `expires_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}
