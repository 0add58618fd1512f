// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Brewmap API Server
//!
//! Serves café discovery, reviews, visits and business tools over an
//! in-memory store, optionally seeded from a JSON file.

use brewmap::{
    config::Config,
    db::{MemoryDb, SeedData},
    services::{GooglePlacesClient, PlacesClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Brewmap API");

    let db = MemoryDb::new();
    if let Some(path) = &config.seed_path {
        tracing::info!(path = %path, "Loading seed data");
        SeedData::load_from_file(path)?.apply(&db);
    }

    let places: Option<Arc<dyn PlacesClient>> = match &config.places_api_key {
        Some(key) => {
            tracing::info!(
                timeout_ms = config.places_timeout.as_millis() as u64,
                "Places lookup enabled"
            );
            let client: Arc<dyn PlacesClient> = Arc::new(GooglePlacesClient::new(key.clone()));
            Some(client)
        }
        None => {
            tracing::info!("No PLACES_API_KEY set, nearby search is local-only");
            None
        }
    };

    // Build shared state
    let port = config.port;
    let state = Arc::new(AppState::new(config, db, places));

    // Build router
    let app = brewmap::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for directive in ["brewmap=debug", "info"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
