//! Owner-facing café analytics.

use crate::db::MemoryDb;
use crate::error::AppError;
use crate::models::CafeStats;
use crate::services::ratings::average_review_rating;
use crate::time_utils::count_since;
use chrono::{DateTime, Duration, Utc};

const WEEK_DAYS: i64 = 7;
const MONTH_DAYS: i64 = 30;

#[derive(Clone)]
pub struct AnalyticsService {
    db: MemoryDb,
}

impl AnalyticsService {
    pub fn new(db: MemoryDb) -> Self {
        Self { db }
    }

    /// Visit, review and content counts for a café the caller owns.
    pub fn cafe_stats(&self, user_id: &str, cafe_id: &str) -> Result<CafeStats, AppError> {
        self.cafe_stats_at(user_id, cafe_id, Utc::now())
    }

    fn cafe_stats_at(
        &self,
        user_id: &str,
        cafe_id: &str,
        now: DateTime<Utc>,
    ) -> Result<CafeStats, AppError> {
        self.db.read(|t| {
            let cafe = t.require_owned_cafe(user_id, cafe_id, "view analytics")?;

            let week = Duration::days(WEEK_DAYS);
            let month = Duration::days(MONTH_DAYS);
            let visits = t.visits_for_cafe(cafe_id);
            let reviews = t.reviews_for_cafe(cafe_id);
            let visit_times = || visits.iter().map(|v| v.visit_time);
            let review_times = || reviews.iter().map(|r| r.created_at);

            Ok(CafeStats {
                cafe_id: cafe.id.clone(),
                cafe_name: cafe.name.clone(),
                total_visits: visits.len() as u32,
                total_reviews: reviews.len() as u32,
                average_rating: average_review_rating(&reviews),
                visits_this_week: count_since(visit_times(), now, week) as u32,
                visits_this_month: count_since(visit_times(), now, month) as u32,
                reviews_this_week: count_since(review_times(), now, week) as u32,
                reviews_this_month: count_since(review_times(), now, month) as u32,
                active_promotions: t.active_promotions_for_cafe(cafe_id).len() as u32,
                total_posts: t.posts_for_cafe(cafe_id).len() as u32,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SeedData;
    use chrono::TimeZone;

    fn service() -> AnalyticsService {
        let db = MemoryDb::new();
        SeedData::load_from_file("data/seed.json").unwrap().apply(&db);
        AnalyticsService::new(db)
    }

    #[test]
    fn test_windows_relative_to_now() {
        let analytics = service();
        // visit-1 at 2024-10-27T09:30Z, review-1 at 2024-10-20
        let now = Utc.with_ymd_and_hms(2024, 10, 28, 12, 0, 0).unwrap();
        let stats = analytics.cafe_stats_at("user-2", "cafe-1", now).unwrap();

        assert_eq!(stats.cafe_name, "The Brew Lab");
        assert_eq!(stats.total_visits, 1);
        assert_eq!(stats.visits_this_week, 1);
        assert_eq!(stats.total_reviews, 1);
        assert_eq!(stats.reviews_this_week, 0);
        assert_eq!(stats.reviews_this_month, 1);
        assert_eq!(stats.average_rating, 4.8);
        assert_eq!(stats.total_posts, 1);
        assert_eq!(stats.active_promotions, 0);
    }

    #[test]
    fn test_counts_active_flag_not_dates() {
        let analytics = service();
        let stats = analytics.cafe_stats("user-2", "cafe-2").unwrap();
        // promo-1 ended in 2024 but is still flagged active
        assert_eq!(stats.active_promotions, 1);
    }

    #[test]
    fn test_requires_owning_business() {
        let analytics = service();
        assert!(matches!(
            analytics.cafe_stats("user-1", "cafe-1"),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            analytics.cafe_stats("user-2", "cafe-4"),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            analytics.cafe_stats("user-2", "cafe-nope"),
            Err(AppError::NotFound(_))
        ));
    }
}
