//! Visit routes (all authenticated).

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::services::pagination::PageParams;
use crate::services::visits::{NewVisit, VisitHistoryEntry, VisitView};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/visits", get(my_visits).post(create_visit))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct VisitsResponse {
    pub visits: Vec<VisitHistoryEntry>,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total: usize,
    pub has_more: bool,
}

async fn create_visit(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(body), _): WithRejection<Json<NewVisit>, AppError>,
) -> Result<Json<VisitView>> {
    Ok(Json(state.visits.create(&user.user_id, body)?))
}

async fn my_visits(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Query(page), _): WithRejection<Query<PageParams>, AppError>,
) -> Result<Json<VisitsResponse>> {
    let page = state.visits.by_user(&user.user_id, page)?;
    Ok(Json(VisitsResponse {
        visits: page.items,
        total: page.total,
        has_more: page.has_more,
    }))
}
