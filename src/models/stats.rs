//! Derived rating and analytics views.
//!
//! Nothing here is stored: ratings are recomputed from the review set on
//! every read, and café analytics from the visit/review/promotion/post logs.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Per-café rating averages, each rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct CafeRatings {
    /// Mean of the four component means
    pub overall: f64,
    pub coffee: f64,
    pub seating: f64,
    pub noise: f64,
    pub environment: f64,
    pub total_reviews: u32,
}

impl Default for CafeRatings {
    fn default() -> Self {
        Self {
            overall: 0.0,
            coffee: 0.0,
            seating: 0.0,
            noise: 0.0,
            environment: 0.0,
            total_reviews: 0,
        }
    }
}

impl CafeRatings {
    /// Every component set to the same value (used for external places).
    pub fn uniform(value: f64, total_reviews: u32) -> Self {
        Self {
            overall: value,
            coffee: value,
            seating: value,
            noise: value,
            environment: value,
            total_reviews,
        }
    }
}

/// Owner-facing analytics for one café.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct CafeStats {
    pub cafe_id: String,
    pub cafe_name: String,

    // ─── Totals ──────────────────────────────────────────────────
    pub total_visits: u32,
    pub total_reviews: u32,
    /// Mean of per-review means, one decimal
    pub average_rating: f64,

    // ─── Windows ─────────────────────────────────────────────────
    pub visits_this_week: u32,
    pub visits_this_month: u32,
    pub reviews_this_week: u32,
    pub reviews_this_month: u32,

    // ─── Content ─────────────────────────────────────────────────
    pub active_promotions: u32,
    pub total_posts: u32,
}
