// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use brewmap::config::Config;
use brewmap::db::{MemoryDb, SeedData};
use brewmap::routes::create_router;
use brewmap::services::PlacesClient;
use brewmap::AppState;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Seeded store: Sarah (user-1), the Java House business (user-2), four SF cafés.
#[allow(dead_code)]
pub fn seeded_db() -> MemoryDb {
    let db = MemoryDb::new();
    SeedData::load_from_file("data/seed.json")
        .expect("seed file should parse")
        .apply(&db);
    db
}

/// Create a test app over the seed data with no external places lookup.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    create_test_app_with_places(None)
}

#[allow(dead_code)]
pub fn create_test_app_with_places(
    places: Option<Arc<dyn PlacesClient>>,
) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(Config::test_default(), seeded_db(), places));
    (create_router(state.clone()), state)
}

/// Issue a session for an existing user without going through login.
#[allow(dead_code)]
pub fn token_for(state: &AppState, user_id: &str) -> String {
    state
        .sessions
        .create_session(user_id)
        .expect("session should be issued")
        .token
}

/// Build a request with an optional bearer token and JSON body.
#[allow(dead_code)]
pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Send one request and decode the JSON body (`Null` if empty).
#[allow(dead_code)]
pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}
