//! Review submission and paginated review listings.

use crate::db::{new_id, MemoryDb, Tables};
use crate::error::AppError;
use crate::models::Review;
use crate::services::pagination::{paginate, Page, PageParams};
use crate::time_utils::format_utc_rfc3339;
use chrono::Utc;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// The four 1–5 rating components of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/generated/")
)]
pub struct ReviewRatings {
    #[validate(range(min = 1, max = 5))]
    pub coffee: u8,
    #[validate(range(min = 1, max = 5))]
    pub seating: u8,
    #[validate(range(min = 1, max = 5))]
    pub noise: u8,
    #[validate(range(min = 1, max = 5))]
    pub environment: u8,
}

/// Body of `POST /api/reviews`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    #[validate(length(min = 1))]
    pub cafe_id: String,
    #[validate(nested)]
    pub ratings: ReviewRatings,
    #[validate(length(min = 10, message = "Review must be at least 10 characters"))]
    pub text: String,
    #[serde(default)]
    pub images: Vec<String>,
}

/// A review with its author's display fields.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    pub id: String,
    pub cafe_id: String,
    /// Only present on per-user listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cafe_name: Option<String>,
    pub user_id: String,
    pub user_name: String,
    pub user_avatar: String,
    pub ratings: ReviewRatings,
    pub text: String,
    pub images: Vec<String>,
    pub helpful: u32,
    pub created_at: String,
}

impl ReviewView {
    fn build(review: &Review, tables: &Tables, with_cafe: bool) -> Self {
        let (user_name, user_avatar) = tables.author_of(&review.user_id);
        Self {
            id: review.id.clone(),
            cafe_id: review.cafe_id.clone(),
            cafe_name: with_cafe.then(|| tables.cafe_label(&review.cafe_id).0),
            user_id: review.user_id.clone(),
            user_name,
            user_avatar,
            ratings: ReviewRatings {
                coffee: review.rating_coffee,
                seating: review.rating_seating,
                noise: review.rating_noise,
                environment: review.rating_environment,
            },
            text: review.text.clone(),
            images: review.images.clone(),
            helpful: review.helpful,
            created_at: format_utc_rfc3339(review.created_at),
        }
    }
}

#[derive(Clone)]
pub struct ReviewService {
    db: MemoryDb,
}

impl ReviewService {
    pub fn new(db: MemoryDb) -> Self {
        Self { db }
    }

    /// Validate and store a review, bumping the author's review count.
    pub fn create(&self, user_id: &str, input: NewReview) -> Result<ReviewView, AppError> {
        input.validate()?;
        let now = Utc::now();

        let review = self.db.record_review_atomic(Review {
            id: new_id("review"),
            cafe_id: input.cafe_id,
            user_id: user_id.to_string(),
            rating_coffee: input.ratings.coffee,
            rating_seating: input.ratings.seating,
            rating_noise: input.ratings.noise,
            rating_environment: input.ratings.environment,
            text: input.text,
            images: input.images,
            helpful: 0,
            created_at: now,
            updated_at: now,
        })?;

        tracing::info!(
            review_id = %review.id,
            cafe_id = %review.cafe_id,
            user_id,
            "Review created"
        );
        Ok(self.db.read(|t| ReviewView::build(&review, t, false)))
    }

    /// Reviews of a café, newest first.
    pub fn by_cafe(&self, cafe_id: &str, page: PageParams) -> Result<Page<ReviewView>, AppError> {
        page.validate()?;
        Ok(self.db.read(|t| {
            let reviews = newest_first(t.reviews_for_cafe(cafe_id));
            let page = paginate(reviews, page);
            Page {
                items: page
                    .items
                    .into_iter()
                    .map(|r| ReviewView::build(r, t, false))
                    .collect(),
                total: page.total,
                has_more: page.has_more,
            }
        }))
    }

    /// Reviews written by a user, newest first, with café names.
    pub fn by_user(&self, user_id: &str, page: PageParams) -> Result<Page<ReviewView>, AppError> {
        page.validate()?;
        Ok(self.db.read(|t| {
            let reviews = newest_first(t.reviews_by_user(user_id));
            let page = paginate(reviews, page);
            Page {
                items: page
                    .items
                    .into_iter()
                    .map(|r| ReviewView::build(r, t, true))
                    .collect(),
                total: page.total,
                has_more: page.has_more,
            }
        }))
    }
}

fn newest_first(mut reviews: Vec<&Review>) -> Vec<&Review> {
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
    reviews
}
