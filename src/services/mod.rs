// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod accounts;
pub mod analytics;
pub mod cafes;
pub mod favorites;
pub mod geo;
pub mod pagination;
pub mod password;
pub mod places;
pub mod posts;
pub mod promotions;
pub mod ratings;
pub mod reviews;
pub mod session;
pub mod visits;

pub use accounts::AccountService;
pub use analytics::AnalyticsService;
pub use cafes::CafeService;
pub use favorites::FavoriteService;
pub use password::PasswordHasher;
pub use places::{GooglePlacesClient, PlacesClient, PlacesError};
pub use posts::PostService;
pub use promotions::PromotionService;
pub use reviews::ReviewService;
pub use session::SessionService;
pub use visits::VisitService;
