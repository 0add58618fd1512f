//! Review routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::services::pagination::PageParams;
use crate::services::reviews::{NewReview, ReviewView};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/cafes/{id}/reviews", get(reviews_by_cafe))
        .route("/api/users/{id}/reviews", get(reviews_by_user))
}

pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/reviews", post(create_review))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsResponse {
    pub reviews: Vec<ReviewView>,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total: usize,
    pub has_more: bool,
}

async fn create_review(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(body), _): WithRejection<Json<NewReview>, AppError>,
) -> Result<Json<ReviewView>> {
    Ok(Json(state.reviews.create(&user.user_id, body)?))
}

async fn reviews_by_cafe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    WithRejection(Query(page), _): WithRejection<Query<PageParams>, AppError>,
) -> Result<Json<ReviewsResponse>> {
    let page = state.reviews.by_cafe(&id, page)?;
    Ok(Json(ReviewsResponse {
        reviews: page.items,
        total: page.total,
        has_more: page.has_more,
    }))
}

async fn reviews_by_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    WithRejection(Query(page), _): WithRejection<Query<PageParams>, AppError>,
) -> Result<Json<ReviewsResponse>> {
    let page = state.reviews.by_user(&id, page)?;
    Ok(Json(ReviewsResponse {
        reviews: page.items,
        total: page.total,
        has_more: page.has_more,
    }))
}
