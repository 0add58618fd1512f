//! Owner analytics route.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::CafeStats;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use std::sync::Arc;

pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/analytics/cafes/{id}", get(cafe_stats))
}

async fn cafe_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<CafeStats>> {
    tracing::debug!(user_id = %user.user_id, cafe_id = %id, "Fetching café analytics");
    Ok(Json(state.analytics.cafe_stats(&user.user_id, &id)?))
}
