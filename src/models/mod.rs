// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod busy_time;
pub mod cafe;
pub mod favorite;
pub mod post;
pub mod promotion;
pub mod review;
pub mod session;
pub mod stats;
pub mod user;
pub mod visit;

pub use busy_time::BusyTime;
pub use cafe::Cafe;
pub use favorite::Favorite;
pub use post::{MediaType, Post};
pub use promotion::Promotion;
pub use review::Review;
pub use session::Session;
pub use stats::{CafeRatings, CafeStats};
pub use user::{User, UserProfile};
pub use visit::Visit;
