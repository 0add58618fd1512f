//! Rating aggregation over a café's reviews.

use crate::models::{CafeRatings, Review};
use crate::services::geo::round1;

/// Average each component across `reviews`, then average the four means.
///
/// Every value is rounded to one decimal. An empty slice yields all zeros.
pub fn aggregate_ratings<R>(reviews: &[R]) -> CafeRatings
where
    R: AsRef<Review>,
{
    if reviews.is_empty() {
        return CafeRatings::default();
    }

    let n = reviews.len() as f64;
    let mean = |field: fn(&Review) -> u8| {
        reviews
            .iter()
            .map(|r| field(r.as_ref()) as f64)
            .sum::<f64>()
            / n
    };

    let coffee = mean(|r: &Review| r.rating_coffee);
    let seating = mean(|r: &Review| r.rating_seating);
    let noise = mean(|r: &Review| r.rating_noise);
    let environment = mean(|r: &Review| r.rating_environment);
    let overall = (coffee + seating + noise + environment) / 4.0;

    CafeRatings {
        overall: round1(overall),
        coffee: round1(coffee),
        seating: round1(seating),
        noise: round1(noise),
        environment: round1(environment),
        total_reviews: reviews.len() as u32,
    }
}

/// Mean of each review's own four-component mean, rounded to one decimal.
///
/// This is the single-number score shown on favorites and owner analytics.
pub fn average_review_rating<R>(reviews: &[R]) -> f64
where
    R: AsRef<Review>,
{
    if reviews.is_empty() {
        return 0.0;
    }
    let total: f64 = reviews.iter().map(|r| r.as_ref().mean_rating()).sum();
    round1(total / reviews.len() as f64)
}

impl AsRef<Review> for Review {
    fn as_ref(&self) -> &Review {
        self
    }
}
