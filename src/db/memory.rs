// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory record store with typed operations.
//!
//! Provides:
//! - Tables for every entity, guarded by one `RwLock`
//! - Scan-based finders over those tables
//! - Atomic read-modify-write operations (visits, reviews, favorites, signup)
//! - A lock-free session map keyed by token

use crate::db::Table;
use crate::error::AppError;
use crate::models::{
    BusyTime, Cafe, Favorite, Post, Promotion, Review, Session, User, Visit,
};
use chrono::Utc;
use dashmap::DashMap;
use std::sync::{Arc, PoisonError, RwLock};

pub const UNKNOWN_USER: &str = "Unknown User";
pub const UNKNOWN_CAFE: &str = "Unknown Café";

/// Every entity table. Only reachable through [`MemoryDb::read`] / [`MemoryDb::write`].
#[derive(Debug, Default)]
pub struct Tables {
    pub users: Table<User>,
    pub cafes: Table<Cafe>,
    pub reviews: Table<Review>,
    pub visits: Table<Visit>,
    pub favorites: Table<Favorite>,
    pub busy_times: Table<BusyTime>,
    pub promotions: Table<Promotion>,
    pub posts: Table<Post>,
}

impl Tables {
    // ─── Finders ─────────────────────────────────────────────────

    pub fn find_user_by_email(&self, email: &str) -> Option<&User> {
        self.users.find_one(|u| u.email == email)
    }

    pub fn reviews_for_cafe(&self, cafe_id: &str) -> Vec<&Review> {
        self.reviews.find(|r| r.cafe_id == cafe_id)
    }

    pub fn reviews_by_user(&self, user_id: &str) -> Vec<&Review> {
        self.reviews.find(|r| r.user_id == user_id)
    }

    pub fn visits_for_cafe(&self, cafe_id: &str) -> Vec<&Visit> {
        self.visits.find(|v| v.cafe_id == cafe_id)
    }

    pub fn visits_by_user(&self, user_id: &str) -> Vec<&Visit> {
        self.visits.find(|v| v.user_id == user_id)
    }

    pub fn favorites_by_user(&self, user_id: &str) -> Vec<&Favorite> {
        self.favorites.find(|f| f.user_id == user_id)
    }

    pub fn find_favorite(&self, user_id: &str, cafe_id: &str) -> Option<&Favorite> {
        self.favorites
            .find_one(|f| f.user_id == user_id && f.cafe_id == cafe_id)
    }

    /// Promotions for a café that are flagged active (dates not checked).
    pub fn active_promotions_for_cafe(&self, cafe_id: &str) -> Vec<&Promotion> {
        self.promotions
            .find(|p| p.cafe_id == cafe_id && p.is_active)
    }

    pub fn promotions_by_business(&self, business_id: &str) -> Vec<&Promotion> {
        self.promotions.find(|p| p.business_id == business_id)
    }

    pub fn posts_for_cafe(&self, cafe_id: &str) -> Vec<&Post> {
        self.posts.find(|p| p.cafe_id == cafe_id)
    }

    pub fn busy_times_for_cafe(&self, cafe_id: &str) -> Vec<&BusyTime> {
        self.busy_times.find(|b| b.cafe_id == cafe_id)
    }

    // ─── Display Lookups ─────────────────────────────────────────

    /// (name, avatar) of a user, with placeholders for missing rows.
    pub fn author_of(&self, user_id: &str) -> (String, String) {
        match self.users.get(user_id) {
            Some(u) => (u.name.clone(), u.avatar.clone().unwrap_or_default()),
            None => (UNKNOWN_USER.to_string(), String::new()),
        }
    }

    /// (name, image) of a café, with placeholders for missing rows.
    pub fn cafe_label(&self, cafe_id: &str) -> (String, String) {
        match self.cafes.get(cafe_id) {
            Some(c) => (c.name.clone(), c.image.clone()),
            None => (UNKNOWN_CAFE.to_string(), String::new()),
        }
    }

    /// A café that the business user `user_id` owns.
    ///
    /// `action` completes the Forbidden messages, e.g. "create promotions".
    pub fn require_owned_cafe(
        &self,
        user_id: &str,
        cafe_id: &str,
        action: &str,
    ) -> Result<&Cafe, AppError> {
        if !self.require_user(user_id)?.is_business {
            return Err(AppError::Forbidden(format!(
                "Only business accounts can {}",
                action
            )));
        }
        let cafe = self.require_cafe(cafe_id)?;
        if cafe.owner_id.as_deref() != Some(user_id) {
            return Err(AppError::Forbidden(format!(
                "You can only {} for your own cafés",
                action
            )));
        }
        Ok(cafe)
    }

    pub(crate) fn require_cafe(&self, cafe_id: &str) -> Result<&Cafe, AppError> {
        self.cafes
            .get(cafe_id)
            .ok_or_else(|| AppError::NotFound(format!("Café {} not found", cafe_id)))
    }

    pub(crate) fn require_user(&self, user_id: &str) -> Result<&User, AppError> {
        self.users
            .get(user_id)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
    }
}

/// Record store handle. Cheap to clone; clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryDb {
    tables: Arc<RwLock<Tables>>,
    sessions: Arc<DashMap<String, Session>>,
}

impl MemoryDb {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` under the shared read lock.
    pub fn read<R>(&self, f: impl FnOnce(&Tables) -> R) -> R {
        let guard = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run `f` as a single critical section under the write lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> R {
        let mut guard = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    // ─── User Operations ─────────────────────────────────────────

    pub fn get_user(&self, user_id: &str) -> Option<User> {
        self.read(|t| t.users.get(user_id).cloned())
    }

    /// Insert a new user, failing with `Conflict` if the email is taken.
    pub fn insert_user_unique(&self, user: User) -> Result<User, AppError> {
        self.write(|t| {
            if t.find_user_by_email(&user.email).is_some() {
                return Err(AppError::Conflict(
                    "User with this email already exists".to_string(),
                ));
            }
            t.users.set(user.clone());
            Ok(user)
        })
    }

    // ─── Cafe Operations ─────────────────────────────────────────

    pub fn get_cafe(&self, cafe_id: &str) -> Option<Cafe> {
        self.read(|t| t.cafes.get(cafe_id).cloned())
    }

    pub fn upsert_cafe(&self, cafe: Cafe) {
        self.write(|t| {
            t.cafes.set(cafe);
        });
    }

    // ─── Visit Operations ────────────────────────────────────────

    /// Append a visit, bump the visitor's counter and upsert the busy-time bucket.
    ///
    /// Preconditions are checked before any write, so a failed call leaves
    /// the store untouched.
    pub fn record_visit_atomic(&self, visit: Visit) -> Result<Visit, AppError> {
        let now = Utc::now();
        self.write(|t| {
            t.require_cafe(&visit.cafe_id)?;
            t.require_user(&visit.user_id)?;

            let (day, hour) = BusyTime::slot_of(visit.visit_time);
            let bucket_id = BusyTime::bucket_id(&visit.cafe_id, day, hour);
            match t.busy_times.get_mut(&bucket_id) {
                Some(bucket) => {
                    bucket.sample_count += 1;
                    bucket.updated_at = now;
                }
                None => {
                    t.busy_times
                        .set(BusyTime::first_sample(&visit.cafe_id, day, hour, now));
                }
            }

            if let Some(user) = t.users.get_mut(&visit.user_id) {
                user.visit_count += 1;
                user.updated_at = now;
            }

            t.visits.set(visit.clone());
            Ok(visit)
        })
    }

    // ─── Review Operations ───────────────────────────────────────

    /// Append a review and bump the author's review counter.
    pub fn record_review_atomic(&self, review: Review) -> Result<Review, AppError> {
        let now = Utc::now();
        self.write(|t| {
            t.require_cafe(&review.cafe_id)?;
            t.require_user(&review.user_id)?;

            if let Some(user) = t.users.get_mut(&review.user_id) {
                user.review_count += 1;
                user.updated_at = now;
            }

            t.reviews.set(review.clone());
            Ok(review)
        })
    }

    // ─── Favorite Operations ─────────────────────────────────────

    /// Add a favorite. At most one per (user, café).
    pub fn add_favorite_unique(&self, favorite: Favorite) -> Result<Favorite, AppError> {
        self.write(|t| {
            t.require_cafe(&favorite.cafe_id)?;
            if t.find_favorite(&favorite.user_id, &favorite.cafe_id).is_some() {
                return Err(AppError::Conflict(
                    "Café is already in favorites".to_string(),
                ));
            }
            t.favorites.set(favorite.clone());
            Ok(favorite)
        })
    }

    pub fn remove_favorite(&self, user_id: &str, cafe_id: &str) -> Result<Favorite, AppError> {
        self.write(|t| {
            let id = t
                .find_favorite(user_id, cafe_id)
                .map(|f| f.id.clone())
                .ok_or_else(|| AppError::NotFound("Favorite not found".to_string()))?;
            t.favorites
                .delete(&id)
                .ok_or_else(|| AppError::NotFound("Favorite not found".to_string()))
        })
    }

    // ─── Session Operations ──────────────────────────────────────

    pub fn get_session(&self, token: &str) -> Option<Session> {
        self.sessions.get(token).map(|s| s.value().clone())
    }

    pub fn set_session(&self, session: Session) {
        self.sessions.insert(session.token.clone(), session);
    }

    /// Remove a session. Returns whether one existed.
    pub fn delete_session(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
