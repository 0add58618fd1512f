// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer-session authentication middleware.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Authenticated user resolved from the session token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    /// The bearer token that authenticated this request (used by logout)
    pub token: String,
}

/// Pull the token out of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(value: &str) -> Option<&str> {
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Middleware that requires a live session.
///
/// Missing header → `Unauthorized`; unknown or expired token →
/// `InvalidToken`; token whose user no longer exists → `Unauthorized`.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .map(String::from)
        .ok_or(AppError::Unauthorized)?;

    let user_id = state
        .sessions
        .validate_session(&token)
        .ok_or(AppError::InvalidToken)?;

    if state.db.get_user(&user_id).is_none() {
        tracing::warn!(user_id = %user_id, "Session refers to a missing user");
        return Err(AppError::Unauthorized);
    }

    request
        .extensions_mut()
        .insert(AuthUser { user_id, token });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc123"), Some("abc123"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Basic abc123"), None);
        assert_eq!(bearer_token("abc123"), None);
    }
}
