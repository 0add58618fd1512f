// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Initial store contents loaded from a JSON file.

use crate::db::MemoryDb;
use crate::models::{BusyTime, Cafe, Favorite, Post, Promotion, Review, User, Visit};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Rows to load at startup. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub users: Vec<User>,
    pub cafes: Vec<Cafe>,
    pub reviews: Vec<Review>,
    pub visits: Vec<Visit>,
    pub favorites: Vec<Favorite>,
    pub busy_times: Vec<BusyTime>,
    pub promotions: Vec<Promotion>,
    pub posts: Vec<Post>,
}

impl SeedData {
    /// Load seed rows from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SeedError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| SeedError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load seed rows from a JSON string.
    pub fn load_from_json(json_data: &str) -> Result<Self, SeedError> {
        serde_json::from_str(json_data).map_err(|e| SeedError::ParseError(e.to_string()))
    }

    /// Copy every row into `db`, overwriting rows with the same id.
    pub fn apply(self, db: &MemoryDb) {
        let cafes = self.cafes.len();
        let users = self.users.len();
        db.write(|t| {
            self.users.into_iter().for_each(|r| {
                t.users.set(r);
            });
            self.cafes.into_iter().for_each(|r| {
                t.cafes.set(r);
            });
            self.reviews.into_iter().for_each(|r| {
                t.reviews.set(r);
            });
            self.visits.into_iter().for_each(|r| {
                t.visits.set(r);
            });
            self.favorites.into_iter().for_each(|r| {
                t.favorites.set(r);
            });
            // Visits look buckets up by slot-derived id; one row per slot.
            self.busy_times.into_iter().for_each(|mut r| {
                r.id = BusyTime::bucket_id(&r.cafe_id, r.day_of_week, r.hour);
                t.busy_times.set(r);
            });
            self.promotions.into_iter().for_each(|r| {
                t.promotions.set(r);
            });
            self.posts.into_iter().for_each(|r| {
                t.posts.set(r);
            });
        });
        tracing::info!(users, cafes, "Seed data loaded");
    }
}

/// Errors from seed loading.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse seed JSON: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_seed_loads() {
        let seed = SeedData::load_from_json(
            r#"{
                "cafes": [{
                    "id": "cafe-9",
                    "name": "Quiet Corner",
                    "address": "321 Clement St",
                    "latitude": 37.7829,
                    "longitude": -122.4664,
                    "description": null,
                    "hours": null,
                    "image": "",
                    "tags": ["quiet"],
                    "owner_id": null,
                    "created_at": "2024-03-10T00:00:00Z",
                    "updated_at": "2024-10-25T00:00:00Z"
                }]
            }"#,
        )
        .unwrap();

        let db = MemoryDb::new();
        seed.apply(&db);
        assert_eq!(db.get_cafe("cafe-9").map(|c| c.name), Some("Quiet Corner".to_string()));
        assert_eq!(db.read(|t| t.users.len()), 0);
    }

    #[test]
    fn test_busy_time_ids_are_rebuilt_from_slot() {
        let seed = SeedData::load_from_json(
            r#"{
                "busy_times": [{
                    "id": "bt-1",
                    "cafe_id": "cafe-1",
                    "day_of_week": 3,
                    "hour": 3,
                    "busy_level": 70,
                    "sample_count": 4,
                    "updated_at": "2024-10-28T00:00:00Z"
                }]
            }"#,
        )
        .unwrap();

        let db = MemoryDb::new();
        seed.apply(&db);
        let (ids, level) = db.read(|t| {
            (
                t.busy_times.values().map(|b| b.id.clone()).collect::<Vec<_>>(),
                t.busy_times.get("busy-cafe-1-3-3").map(|b| b.busy_level),
            )
        });
        assert_eq!(ids, vec!["busy-cafe-1-3-3".to_string()]);
        assert_eq!(level, Some(70));
    }

    #[test]
    fn test_invalid_seed_is_parse_error() {
        assert!(matches!(
            SeedData::load_from_json("{\"cafes\": 3}"),
            Err(SeedError::ParseError(_))
        ));
    }

    #[test]
    fn test_bundled_seed_file_loads() {
        let seed = SeedData::load_from_file("data/seed.json").expect("data/seed.json should parse");
        assert!(!seed.cafes.is_empty());
        assert!(seed.users.iter().any(|u| u.is_business));
    }
}
