//! Favorite cafés per user.

use crate::db::{new_id, MemoryDb};
use crate::error::AppError;
use crate::models::Favorite;
use crate::services::ratings::average_review_rating;
use crate::time_utils::format_utc_rfc3339;
use chrono::Utc;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteView {
    pub id: String,
    pub user_id: String,
    pub cafe_id: String,
    pub created_at: String,
}

/// Favorite joined with its café and a single-number rating.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    pub id: String,
    pub cafe_id: String,
    pub cafe_name: String,
    pub cafe_address: String,
    pub cafe_image: String,
    pub cafe_tags: Vec<String>,
    pub average_rating: f64,
    pub total_reviews: u32,
    pub created_at: String,
}

#[derive(Clone)]
pub struct FavoriteService {
    db: MemoryDb,
}

impl FavoriteService {
    pub fn new(db: MemoryDb) -> Self {
        Self { db }
    }

    /// Add a favorite; `Conflict` if already present.
    pub fn add(&self, user_id: &str, cafe_id: &str) -> Result<FavoriteView, AppError> {
        let favorite = self.db.add_favorite_unique(Favorite {
            id: new_id("fav"),
            user_id: user_id.to_string(),
            cafe_id: cafe_id.to_string(),
            created_at: Utc::now(),
        })?;

        tracing::info!(user_id, cafe_id, "Favorite added");
        Ok(FavoriteView {
            id: favorite.id,
            user_id: favorite.user_id,
            cafe_id: favorite.cafe_id,
            created_at: format_utc_rfc3339(favorite.created_at),
        })
    }

    /// Remove a favorite; `NotFound` if absent.
    pub fn remove(&self, user_id: &str, cafe_id: &str) -> Result<(), AppError> {
        self.db.remove_favorite(user_id, cafe_id)?;
        tracing::info!(user_id, cafe_id, "Favorite removed");
        Ok(())
    }

    pub fn check(&self, user_id: &str, cafe_id: &str) -> bool {
        self.db
            .read(|t| t.find_favorite(user_id, cafe_id).is_some())
    }

    /// The user's favorites, oldest first. Favorites of deleted cafés are skipped.
    pub fn list(&self, user_id: &str) -> Vec<FavoriteEntry> {
        self.db.read(|t| {
            let mut favorites = t.favorites_by_user(user_id);
            favorites.sort_by(|a, b| a.created_at.cmp(&b.created_at));

            favorites
                .into_iter()
                .filter_map(|fav| {
                    let cafe = t.cafes.get(&fav.cafe_id)?;
                    let reviews = t.reviews_for_cafe(&cafe.id);
                    Some(FavoriteEntry {
                        id: fav.id.clone(),
                        cafe_id: cafe.id.clone(),
                        cafe_name: cafe.name.clone(),
                        cafe_address: cafe.address.clone(),
                        cafe_image: cafe.image.clone(),
                        cafe_tags: cafe.tags.clone(),
                        average_rating: average_review_rating(&reviews),
                        total_reviews: reviews.len() as u32,
                        created_at: format_utc_rfc3339(fav.created_at),
                    })
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SeedData;

    fn service() -> (MemoryDb, FavoriteService) {
        let db = MemoryDb::new();
        SeedData::load_from_file("data/seed.json").unwrap().apply(&db);
        (db.clone(), FavoriteService::new(db))
    }

    #[test]
    fn test_add_remove_check_cycle() {
        let (_, favorites) = service();
        assert!(!favorites.check("user-1", "cafe-2"));

        favorites.add("user-1", "cafe-2").unwrap();
        assert!(favorites.check("user-1", "cafe-2"));
        assert!(matches!(
            favorites.add("user-1", "cafe-2"),
            Err(AppError::Conflict(_))
        ));

        favorites.remove("user-1", "cafe-2").unwrap();
        assert!(!favorites.check("user-1", "cafe-2"));
        assert!(matches!(
            favorites.remove("user-1", "cafe-2"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_add_unknown_cafe_is_not_found() {
        let (_, favorites) = service();
        assert!(matches!(
            favorites.add("user-1", "cafe-nope"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_enriches_and_skips_missing_cafes() {
        let (db, favorites) = service();
        db.write(|t| {
            t.favorites.set(Favorite {
                id: "fav-orphan".to_string(),
                user_id: "user-1".to_string(),
                cafe_id: "cafe-gone".to_string(),
                created_at: Utc::now(),
            });
        });

        let list = favorites.list("user-1");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].cafe_name, "The Brew Lab");
        // review-1 components 5/4/5/5
        assert_eq!(list[0].average_rating, 4.8);
        assert_eq!(list[0].total_reviews, 1);
    }
}
