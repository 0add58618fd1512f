//! Promotion routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::services::promotions::{NewPromotion, PromotionView};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/cafes/{id}/promotions", get(promotions_by_cafe))
}

pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/promotions", post(create_promotion))
        .route("/api/promotions/mine", get(my_promotions))
}

async fn create_promotion(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(body), _): WithRejection<Json<NewPromotion>, AppError>,
) -> Result<Json<PromotionView>> {
    Ok(Json(state.promotions.create(&user.user_id, body)?))
}

async fn promotions_by_cafe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<Vec<PromotionView>> {
    Json(state.promotions.by_cafe(&id))
}

async fn my_promotions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<PromotionView>>> {
    Ok(Json(state.promotions.by_business(&user.user_id)?))
}
