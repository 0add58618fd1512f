//! Post routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::services::pagination::PageParams;
use crate::services::posts::{NewPost, PostView};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/posts", get(feed))
}

pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/posts", post(create_post))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub posts: Vec<PostView>,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total: usize,
    pub has_more: bool,
}

async fn create_post(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(body), _): WithRejection<Json<NewPost>, AppError>,
) -> Result<Json<PostView>> {
    Ok(Json(state.posts.create(&user.user_id, body)?))
}

async fn feed(
    State(state): State<Arc<AppState>>,
    WithRejection(Query(page), _): WithRejection<Query<PageParams>, AppError>,
) -> Result<Json<FeedResponse>> {
    let page = state.posts.feed(page)?;
    Ok(Json(FeedResponse {
        posts: page.items,
        total: page.total,
        has_more: page.has_more,
    }))
}
