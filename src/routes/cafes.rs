// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public café queries.

use crate::error::{AppError, Result};
use crate::services::cafes::{
    BusyTimesView, CafeView, NearbyQuery, SearchQuery, TimeRange, VisitorCount,
};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/cafes", get(list_cafes))
        .route("/api/cafes/nearby", get(nearby))
        .route("/api/cafes/search", get(search))
        .route("/api/cafes/{id}", get(cafe_by_id))
        .route("/api/cafes/{id}/busy-times", get(busy_times))
        .route("/api/cafes/{id}/visitors", get(visitor_count))
}

async fn list_cafes(State(state): State<Arc<AppState>>) -> Json<Vec<CafeView>> {
    Json(state.cafes.list())
}

async fn nearby(
    State(state): State<Arc<AppState>>,
    WithRejection(Query(params), _): WithRejection<Query<NearbyQuery>, AppError>,
) -> Result<Json<Vec<CafeView>>> {
    Ok(Json(state.cafes.nearby(&params).await?))
}

async fn search(
    State(state): State<Arc<AppState>>,
    WithRejection(Query(params), _): WithRejection<Query<SearchQuery>, AppError>,
) -> Result<Json<Vec<CafeView>>> {
    tracing::debug!(query = %params.query, tags = ?params.tags, "Searching cafés");
    Ok(Json(state.cafes.search(&params)?))
}

async fn cafe_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CafeView>> {
    Ok(Json(state.cafes.by_id(&id)?))
}

async fn busy_times(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<BusyTimesView> {
    Json(state.cafes.busy_times(&id))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VisitorParams {
    #[serde(default)]
    time_range: TimeRange,
}

async fn visitor_count(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    WithRejection(Query(params), _): WithRejection<Query<VisitorParams>, AppError>,
) -> Json<VisitorCount> {
    Json(state.cafes.visitor_count(&id, params.time_range))
}
