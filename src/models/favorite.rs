//! Favorite cafés.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's favorite café. At most one per (user_id, cafe_id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    pub id: String,
    pub user_id: String,
    pub cafe_id: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_row_deserializes() {
        let fav: Favorite = serde_json::from_str(
            r#"{
                "id": "fav-1",
                "user_id": "user-1",
                "cafe_id": "cafe-1",
                "created_at": "2024-10-15T00:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(fav.cafe_id, "cafe-1");
        assert_eq!(fav.created_at.to_rfc3339(), "2024-10-15T00:00:00+00:00");
    }
}
