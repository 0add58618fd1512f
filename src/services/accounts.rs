// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Signup and login.
//!
//! Both issue a session through [`SessionService`]; logout and `me` work
//! directly off the authenticated request.

use crate::db::{new_id, MemoryDb};
use crate::error::AppError;
use crate::models::{User, UserProfile};
use crate::services::password::PasswordHasher;
use crate::services::session::SessionService;
use crate::time_utils::format_utc_rfc3339;
use chrono::Utc;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[serde(default)]
    pub is_business: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Profile plus a freshly issued bearer token.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserProfile,
    pub token: String,
    pub expires_at: String,
}

#[derive(Clone)]
pub struct AccountService {
    db: MemoryDb,
    sessions: SessionService,
    passwords: PasswordHasher,
}

impl AccountService {
    pub fn new(db: MemoryDb, sessions: SessionService, passwords: PasswordHasher) -> Self {
        Self {
            db,
            sessions,
            passwords,
        }
    }

    /// Register a user and log them in. `Conflict` if the email is taken.
    pub async fn signup(&self, input: SignupRequest) -> Result<AuthResponse, AppError> {
        input.validate()?;
        let password_hash = self.hash(input.password).await?;
        let now = Utc::now();

        let user = self.db.insert_user_unique(User {
            id: new_id("user"),
            avatar: Some(format!("https://i.pravatar.cc/150?u={}", input.email)),
            name: input.name,
            email: input.email,
            password_hash,
            bio: None,
            visit_count: 0,
            review_count: 0,
            badges: vec![],
            is_business: input.is_business,
            created_at: now,
            updated_at: now,
        })?;

        tracing::info!(user_id = %user.id, is_business = user.is_business, "User signed up");
        self.issue(&user)
    }

    /// Check credentials. Unknown email and wrong password fail identically.
    pub async fn login(&self, input: LoginRequest) -> Result<AuthResponse, AppError> {
        input.validate()?;

        let user = self
            .db
            .read(|t| t.find_user_by_email(&input.email).cloned())
            .ok_or(AppError::InvalidCredentials)?;

        if !self
            .verify(input.password, user.password_hash.clone())
            .await?
        {
            tracing::info!(user_id = %user.id, "Login rejected");
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "User logged in");
        self.issue(&user)
    }

    pub fn logout(&self, token: &str) {
        self.sessions.delete_session(token);
    }

    pub fn me(&self, user_id: &str) -> Result<UserProfile, AppError> {
        self.db
            .get_user(user_id)
            .map(|u| UserProfile::from(&u))
            .ok_or(AppError::Unauthorized)
    }

    // Argon2 costs tens of milliseconds; keep it off the async workers.
    async fn hash(&self, password: String) -> Result<String, AppError> {
        let passwords = self.passwords.clone();
        tokio::task::spawn_blocking(move || passwords.hash_password(&password))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Hashing task failed: {}", e)))?
    }

    async fn verify(&self, password: String, hash: String) -> Result<bool, AppError> {
        let passwords = self.passwords.clone();
        tokio::task::spawn_blocking(move || passwords.verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Verification task failed: {}", e)))?
    }

    fn issue(&self, user: &User) -> Result<AuthResponse, AppError> {
        let session = self.sessions.create_session(&user.id)?;
        Ok(AuthResponse {
            user: UserProfile::from(user),
            token: session.token,
            expires_at: format_utc_rfc3339(session.expires_at),
        })
    }
}
