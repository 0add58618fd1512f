// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Opaque bearer-token sessions.
//!
//! Tokens are random, carry no claims, and are only meaningful as keys into
//! the session map. Expiry is checked lazily on every validation.

use crate::db::{new_id, to_base36, MemoryDb};
use crate::error::AppError;
use crate::models::Session;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use ring::rand::{SecureRandom, SystemRandom};

const TOKEN_BYTES: usize = 32;

/// A freshly issued token and its expiry.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues, validates and revokes sessions.
#[derive(Clone)]
pub struct SessionService {
    db: MemoryDb,
    ttl: Duration,
    rng: SystemRandom,
}

impl SessionService {
    pub fn new(db: MemoryDb, ttl_days: i64) -> Self {
        Self {
            db,
            ttl: Duration::days(ttl_days),
            rng: SystemRandom::new(),
        }
    }

    /// Create a session for `user_id` expiring `ttl` from now.
    pub fn create_session(&self, user_id: &str) -> Result<IssuedSession, AppError> {
        let now = Utc::now();
        let token = self.generate_token(now)?;
        let expires_at = now + self.ttl;

        self.db.set_session(Session {
            id: new_id("session"),
            user_id: user_id.to_string(),
            token: token.clone(),
            expires_at,
            created_at: now,
        });

        tracing::debug!(user_id, "Session created");
        Ok(IssuedSession { token, expires_at })
    }

    /// Resolve a token to its user id.
    ///
    /// Returns `None` for unknown tokens. Expired sessions also return `None`
    /// and are removed.
    pub fn validate_session(&self, token: &str) -> Option<String> {
        self.validate_session_at(token, Utc::now())
    }

    fn validate_session_at(&self, token: &str, now: DateTime<Utc>) -> Option<String> {
        let session = self.db.get_session(token)?;
        if session.is_expired(now) {
            self.db.delete_session(token);
            tracing::debug!(user_id = %session.user_id, "Expired session purged");
            return None;
        }
        Some(session.user_id)
    }

    /// Revoke a token. Unknown tokens are a no-op.
    pub fn delete_session(&self, token: &str) {
        self.db.delete_session(token);
    }

    /// 256 random bits (base64url) followed by the issue time in base36.
    fn generate_token(&self, now: DateTime<Utc>) -> Result<String, AppError> {
        let mut bytes = [0u8; TOKEN_BYTES];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("System RNG unavailable")))?;
        Ok(format!(
            "{}{}",
            URL_SAFE_NO_PAD.encode(bytes),
            to_base36(now.timestamp_millis().max(0) as u64)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> SessionService {
        SessionService::new(MemoryDb::new(), 30)
    }

    #[test]
    fn test_create_then_validate() {
        let sessions = service();
        let issued = sessions.create_session("user-1").unwrap();

        assert_eq!(
            sessions.validate_session(&issued.token),
            Some("user-1".to_string())
        );
        let ttl = issued.expires_at - Utc::now();
        assert!(ttl > Duration::days(29) && ttl <= Duration::days(30));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let sessions = service();
        let issued = sessions.create_session("user-1").unwrap();

        sessions.delete_session(&issued.token);
        assert_eq!(sessions.validate_session(&issued.token), None);
        sessions.delete_session(&issued.token);
        sessions.delete_session("never-issued");
    }

    #[test]
    fn test_expired_session_is_purged() {
        let db = MemoryDb::new();
        let sessions = SessionService::new(db.clone(), 30);
        let issued = sessions.create_session("user-1").unwrap();

        let later = issued.expires_at + Duration::seconds(1);
        assert_eq!(sessions.validate_session_at(&issued.token, later), None);
        assert!(db.get_session(&issued.token).is_none());
    }

    #[test]
    fn test_tokens_are_unique_and_multiple_sessions_coexist() {
        let sessions = service();
        let a = sessions.create_session("user-1").unwrap();
        let b = sessions.create_session("user-1").unwrap();

        assert_ne!(a.token, b.token);
        assert!(a.token.len() > 43);
        assert!(sessions.validate_session(&a.token).is_some());
        assert!(sessions.validate_session(&b.token).is_some());
    }

    #[test]
    fn test_unknown_token_is_anonymous() {
        assert_eq!(service().validate_session("garbage"), None);
    }
}
