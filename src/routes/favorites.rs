//! Favorite routes (all authenticated).

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::routes::auth::SuccessResponse;
use crate::services::favorites::{FavoriteEntry, FavoriteView};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/favorites", get(list_favorites))
        .route(
            "/api/favorites/{cafe_id}",
            get(check_favorite)
                .post(add_favorite)
                .delete(remove_favorite),
        )
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteCheck {
    pub is_favorite: bool,
}

async fn list_favorites(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Json<Vec<FavoriteEntry>> {
    Json(state.favorites.list(&user.user_id))
}

async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(cafe_id): Path<String>,
) -> Result<Json<FavoriteView>> {
    Ok(Json(state.favorites.add(&user.user_id, &cafe_id)?))
}

async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(cafe_id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    state.favorites.remove(&user.user_id, &cafe_id)?;
    Ok(Json(SuccessResponse { success: true }))
}

async fn check_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(cafe_id): Path<String>,
) -> Json<FavoriteCheck> {
    Json(FavoriteCheck {
        is_favorite: state.favorites.check(&user.user_id, &cafe_id),
    })
}
