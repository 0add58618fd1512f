// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Brewmap: find, review and track cafés.
//!
//! This crate provides the backend API: nearby and text search over an
//! in-memory café store, reviews with derived ratings, visits and busy
//! times, favorites, business promotions, posts and owner analytics.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::MemoryDb;
use services::{
    AccountService, AnalyticsService, CafeService, FavoriteService, PasswordHasher,
    PlacesClient, PostService, PromotionService, ReviewService, SessionService, VisitService,
};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: MemoryDb,
    pub sessions: SessionService,
    pub accounts: AccountService,
    pub cafes: CafeService,
    pub reviews: ReviewService,
    pub visits: VisitService,
    pub favorites: FavoriteService,
    pub promotions: PromotionService,
    pub posts: PostService,
    pub analytics: AnalyticsService,
}

impl AppState {
    /// Wire every service over one store. `places` augments nearby search.
    pub fn new(config: Config, db: MemoryDb, places: Option<Arc<dyn PlacesClient>>) -> Self {
        let sessions = SessionService::new(db.clone(), config.session_ttl_days);
        let mut cafes = CafeService::new(db.clone());
        if let Some(places) = places {
            cafes = cafes.with_places(places, config.places_timeout);
        }

        Self {
            accounts: AccountService::new(db.clone(), sessions.clone(), PasswordHasher::new()),
            reviews: ReviewService::new(db.clone()),
            visits: VisitService::new(db.clone()),
            favorites: FavoriteService::new(db.clone()),
            promotions: PromotionService::new(db.clone()),
            posts: PostService::new(db.clone()),
            analytics: AnalyticsService::new(db.clone()),
            sessions,
            cafes,
            config,
            db,
        }
    }
}
