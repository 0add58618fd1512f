// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Café model and tag matching.

use chrono::{DateTime, Utc};
use geo::Point;
use serde::{Deserialize, Serialize};

/// A café with its location and descriptive metadata.
///
/// Cafés are read-only from the API; they arrive through the seed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cafe {
    pub id: String,
    pub name: String,
    pub address: String,
    /// Degrees, WGS84
    pub latitude: f64,
    /// Degrees, WGS84
    pub longitude: f64,
    pub description: Option<String>,
    /// Free-form opening hours ("7am - 9pm daily")
    pub hours: Option<String>,
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub verified: bool,
    /// Business user that manages this café
    pub owner_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cafe {
    /// Location as a geo point (x = longitude, y = latitude).
    pub fn location(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    /// True if any requested tag equals one of this café's tags, ignoring case.
    ///
    /// An empty request matches every café.
    pub fn has_any_tag(&self, requested: &[String]) -> bool {
        requested.is_empty() || tags_intersect(&self.tags, requested)
    }

    /// Case-insensitive substring match on name, address, description or tags.
    pub fn matches_text(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.address.to_lowercase().contains(&query)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&query))
            || self.tags.iter().any(|t| t.to_lowercase().contains(&query))
    }
}

/// Exact case-insensitive intersection of two tag lists.
///
/// Case folding is Unicode-aware, the same as [`Cafe::matches_text`].
pub fn tags_intersect(tags: &[String], requested: &[String]) -> bool {
    let have: Vec<String> = tags.iter().map(|t| t.to_lowercase()).collect();
    requested.iter().any(|want| {
        let want = want.trim().to_lowercase();
        have.iter().any(|h| *h == want)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cafe(tags: &[&str]) -> Cafe {
        Cafe {
            id: "cafe-1".to_string(),
            name: "The Brew Lab".to_string(),
            address: "123 Main St, San Francisco".to_string(),
            latitude: 37.7749,
            longitude: -122.4194,
            description: Some("Quiet study spaces".to_string()),
            hours: None,
            image: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            verified: false,
            owner_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_tag_match_is_exact_and_case_insensitive() {
        let c = cafe(&["study", "WiFi"]);
        assert!(c.has_any_tag(&["wifi".to_string()]));
        assert!(c.has_any_tag(&["nope".to_string(), "STUDY".to_string()]));
        assert!(!c.has_any_tag(&["stud".to_string()]));
        assert!(c.has_any_tag(&[]));
    }

    #[test]
    fn test_tag_match_folds_non_ascii_case() {
        let c = cafe(&["Café", "Crème"]);
        assert!(c.has_any_tag(&["CAFÉ".to_string()]));
        assert!(c.has_any_tag(&[" crème ".to_string()]));
        assert!(c.matches_text("CAFÉ"));
        assert!(!c.has_any_tag(&["cafe".to_string()]));
    }

    #[test]
    fn test_text_match_covers_all_fields() {
        let c = cafe(&["laptop-friendly"]);
        assert!(c.matches_text("brew"));
        assert!(c.matches_text("MAIN ST"));
        assert!(c.matches_text("study"));
        assert!(c.matches_text("laptop"));
        assert!(!c.matches_text("karaoke"));
    }

    #[test]
    fn test_location_axis_order() {
        let p = cafe(&[]).location();
        assert_eq!(p.x(), -122.4194);
        assert_eq!(p.y(), 37.7749);
    }
}
