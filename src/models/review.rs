//! Review model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A submitted review. Never edited after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub cafe_id: String,
    pub user_id: String,
    /// 1..=5
    pub rating_coffee: u8,
    /// 1..=5
    pub rating_seating: u8,
    /// 1..=5
    pub rating_noise: u8,
    /// 1..=5
    pub rating_environment: u8,
    pub text: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub helpful: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Mean of this review's four components (unrounded).
    pub fn mean_rating(&self) -> f64 {
        (self.rating_coffee as f64
            + self.rating_seating as f64
            + self.rating_noise as f64
            + self.rating_environment as f64)
            / 4.0
    }
}
