// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Visit log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Append-only visit log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visit {
    pub id: String,
    pub user_id: String,
    pub cafe_id: String,
    /// When the user was at the café (caller-supplied or request time)
    pub visit_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
