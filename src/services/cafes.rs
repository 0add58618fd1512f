// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Café queries: nearby, search, lookup, busy times, visitor counts.

use crate::db::{MemoryDb, Tables};
use crate::error::AppError;
use crate::models::cafe::tags_intersect;
use crate::models::{Cafe, CafeRatings};
use crate::services::geo::{distance_miles, round1, METERS_PER_MILE};
use crate::services::places::{Place, PlacesClient};
use crate::services::ratings::aggregate_ratings;
use crate::time_utils::start_of_day;
use chrono::{DateTime, Duration, Utc};
use geo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

const DEFAULT_RADIUS_MILES: f64 = 10.0;
const DEFAULT_LIMIT: usize = 20;
/// External places closer than this to a same-named local café are duplicates.
const DUPLICATE_RADIUS_MILES: f64 = 0.1;
const FALLBACK_PLACE_RATING: f64 = 4.0;
const FALLBACK_PLACE_IMAGE: &str =
    "https://images.unsplash.com/photo-1501339847302-ac426a4a7cbb?w=800";

fn default_radius() -> f64 {
    DEFAULT_RADIUS_MILES
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

/// Split a comma-separated tag list, dropping blanks.
pub fn parse_tags(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

// ─── Inputs ──────────────────────────────────────────────────

/// Nearby search parameters.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NearbyQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[serde(default = "default_radius")]
    #[validate(range(min = 1.0, max = 50.0))]
    pub radius_miles: f64,
    /// Comma-separated; a café matches if it has any of them
    pub tags: Option<String>,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: usize,
}

impl NearbyQuery {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius_miles: DEFAULT_RADIUS_MILES,
            tags: None,
            limit: DEFAULT_LIMIT,
        }
    }

    fn check(&self) -> Result<(), AppError> {
        if !(self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.radius_miles.is_finite())
        {
            return Err(AppError::Validation(
                "Coordinates and radius must be finite numbers".to_string(),
            ));
        }
        self.validate()?;
        Ok(())
    }
}

/// Free-text search parameters.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(length(min = 1, message = "Query must not be empty"))]
    pub query: String,
    pub tags: Option<String>,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: usize,
}

/// Window for visitor counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Today,
    Week,
    Month,
    #[default]
    All,
}

impl TimeRange {
    /// Earliest counted timestamp, or `None` for no lower bound.
    pub fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TimeRange::Today => Some(start_of_day(now)),
            TimeRange::Week => Some(now - Duration::days(7)),
            TimeRange::Month => Some(now - Duration::days(30)),
            TimeRange::All => None,
        }
    }
}

// ─── Outputs ─────────────────────────────────────────────────

/// Café with derived ratings and, for geo queries, its distance.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct CafeView {
    pub id: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: Option<String>,
    pub hours: Option<String>,
    pub image: String,
    pub tags: Vec<String>,
    pub verified: bool,
    pub ratings: CafeRatings,
    /// Miles from the query origin, one decimal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl CafeView {
    fn from_cafe(cafe: &Cafe, tables: &Tables) -> Self {
        Self {
            id: cafe.id.clone(),
            name: cafe.name.clone(),
            address: cafe.address.clone(),
            latitude: cafe.latitude,
            longitude: cafe.longitude,
            description: cafe.description.clone(),
            hours: cafe.hours.clone(),
            image: cafe.image.clone(),
            tags: cafe.tags.clone(),
            verified: cafe.verified,
            ratings: aggregate_ratings(&tables.reviews_for_cafe(&cafe.id)),
            distance: None,
        }
    }

    fn from_place(place: Place, distance: f64) -> Self {
        let tags = place_tags(&place);
        let total = place.user_ratings_total.unwrap_or(0);
        let rating = round1(place.rating.unwrap_or(FALLBACK_PLACE_RATING));
        Self {
            description: Some(format!("A cozy café located at {}", place.vicinity)),
            hours: Some("Mon-Sun: 7:00 AM - 7:00 PM".to_string()),
            image: place
                .photo_url
                .unwrap_or_else(|| FALLBACK_PLACE_IMAGE.to_string()),
            verified: total > 50,
            ratings: CafeRatings::uniform(rating, total),
            distance: Some(round1(distance)),
            id: place.place_id,
            name: place.name,
            address: place.vicinity,
            latitude: place.latitude,
            longitude: place.longitude,
            tags,
        }
    }
}

/// Derive display tags from a provider's place types and popularity.
fn place_tags(place: &Place) -> Vec<String> {
    let has = |t: &str| place.types.iter().any(|pt| pt == t);
    let mut tags = Vec::new();

    if has("cafe") {
        tags.push("Coffee");
    }
    if has("restaurant") {
        tags.push("Food");
    }
    if has("bakery") {
        tags.push("Pastries");
    }
    if has("bar") {
        tags.push("Social");
    }
    if place.rating.is_some_and(|r| r >= 4.5) {
        tags.push("Popular");
    }
    if place.user_ratings_total.unwrap_or(0) > 100 {
        tags.extend(["WiFi", "Seating"]);
    }
    if tags.is_empty() {
        tags.extend(["Coffee", "Chill"]);
    }

    tags.into_iter().map(String::from).collect()
}

/// 7×24 busy-level grid; `busy_times[day][hour]`, day 0 = Sunday.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct BusyTimesView {
    pub cafe_id: String,
    pub busy_times: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct VisitorCount {
    pub cafe_id: String,
    pub total_visits: u32,
    pub unique_visitors: u32,
    pub time_range: TimeRange,
}

// ─── Service ─────────────────────────────────────────────────

/// Read-side café queries over the store, optionally augmented by a places provider.
#[derive(Clone)]
pub struct CafeService {
    db: MemoryDb,
    places: Option<Arc<dyn PlacesClient>>,
    places_timeout: std::time::Duration,
}

impl CafeService {
    pub fn new(db: MemoryDb) -> Self {
        Self {
            db,
            places: None,
            places_timeout: std::time::Duration::from_secs(3),
        }
    }

    /// Attach an external places provider, bounded by `timeout` per call.
    pub fn with_places(
        mut self,
        places: Arc<dyn PlacesClient>,
        timeout: std::time::Duration,
    ) -> Self {
        self.places = Some(places);
        self.places_timeout = timeout;
        self
    }

    /// Cafés within `radius_miles` of the origin, nearest first.
    pub async fn nearby(&self, query: &NearbyQuery) -> Result<Vec<CafeView>, AppError> {
        query.check()?;
        let origin = Point::new(query.longitude, query.latitude);
        let tags = parse_tags(query.tags.as_deref());

        let mut results = self.nearby_local(origin, query.radius_miles, &tags, query.limit);

        if let Some(external) = self.fetch_places(query).await {
            let known: Vec<(String, Point<f64>)> = results
                .iter()
                .map(|c| (c.name.to_lowercase(), Point::new(c.longitude, c.latitude)))
                .collect();

            let extra = external.into_iter().filter_map(|place| {
                let location = Point::new(place.longitude, place.latitude);
                let distance = distance_miles(origin, location);
                let duplicate = known.iter().any(|(name, at)| {
                    *name == place.name.to_lowercase()
                        && distance_miles(*at, location) < DUPLICATE_RADIUS_MILES
                });
                (distance <= query.radius_miles && !duplicate)
                    .then(|| CafeView::from_place(place, distance))
            });

            results.extend(extra.filter(|c| tags.is_empty() || tags_intersect(&c.tags, &tags)));
            results.sort_by(|a, b| {
                a.distance
                    .unwrap_or(f64::MAX)
                    .total_cmp(&b.distance.unwrap_or(f64::MAX))
            });
            results.truncate(query.limit);
        }

        tracing::debug!(
            latitude = query.latitude,
            longitude = query.longitude,
            radius_miles = query.radius_miles,
            count = results.len(),
            "Nearby search"
        );
        Ok(results)
    }

    /// Local-store half of nearby search.
    pub fn nearby_local(
        &self,
        origin: Point<f64>,
        radius_miles: f64,
        tags: &[String],
        limit: usize,
    ) -> Vec<CafeView> {
        self.db.read(|t| {
            let mut within: Vec<(f64, &Cafe)> = t
                .cafes
                .values()
                .map(|cafe| (distance_miles(origin, cafe.location()), cafe))
                .filter(|(distance, _)| *distance <= radius_miles)
                .collect();
            within.sort_by(|a, b| a.0.total_cmp(&b.0));

            within
                .into_iter()
                .filter(|(_, cafe)| cafe.has_any_tag(tags))
                .take(limit)
                .map(|(distance, cafe)| CafeView {
                    distance: Some(round1(distance)),
                    ..CafeView::from_cafe(cafe, t)
                })
                .collect()
        })
    }

    /// Ask the places provider, degrading every failure to `None`.
    async fn fetch_places(&self, query: &NearbyQuery) -> Option<Vec<Place>> {
        let places = self.places.as_ref()?;
        let radius_meters = query.radius_miles * METERS_PER_MILE;
        let call = places.find_places_near(query.latitude, query.longitude, radius_meters);

        match tokio::time::timeout(self.places_timeout, call).await {
            Ok(Ok(found)) => Some(found),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Places lookup failed, using local results");
                None
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.places_timeout.as_millis() as u64,
                    "Places lookup timed out, using local results"
                );
                None
            }
        }
    }

    /// Case-insensitive text search over name, address, description and tags.
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<CafeView>, AppError> {
        query.validate()?;
        let tags = parse_tags(query.tags.as_deref());

        Ok(self.db.read(|t| {
            let mut matches: Vec<&Cafe> = t
                .cafes
                .find(|c| c.matches_text(&query.query) && c.has_any_tag(&tags));
            matches.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
            matches
                .into_iter()
                .take(query.limit)
                .map(|c| CafeView::from_cafe(c, t))
                .collect()
        }))
    }

    /// Every café, by name.
    pub fn list(&self) -> Vec<CafeView> {
        self.db.read(|t| {
            let mut all: Vec<&Cafe> = t.cafes.values().collect();
            all.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
            all.into_iter().map(|c| CafeView::from_cafe(c, t)).collect()
        })
    }

    pub fn by_id(&self, cafe_id: &str) -> Result<CafeView, AppError> {
        self.db.read(|t| {
            t.cafes
                .get(cafe_id)
                .map(|c| CafeView::from_cafe(c, t))
                .ok_or_else(|| AppError::NotFound(format!("Café {} not found", cafe_id)))
        })
    }

    /// Busy-level grid; slots without a bucket read as 0.
    pub fn busy_times(&self, cafe_id: &str) -> BusyTimesView {
        let mut grid = vec![vec![0u8; 24]; 7];
        self.db.read(|t| {
            for bucket in t.busy_times_for_cafe(cafe_id) {
                if let Some(slot) = grid
                    .get_mut(bucket.day_of_week as usize)
                    .and_then(|day| day.get_mut(bucket.hour as usize))
                {
                    *slot = bucket.busy_level;
                }
            }
        });
        BusyTimesView {
            cafe_id: cafe_id.to_string(),
            busy_times: grid,
        }
    }

    /// Total and distinct-user visit counts within `range`.
    pub fn visitor_count(&self, cafe_id: &str, range: TimeRange) -> VisitorCount {
        let cutoff = range.cutoff(Utc::now());
        self.db.read(|t| {
            let visits: Vec<_> = t
                .visits_for_cafe(cafe_id)
                .into_iter()
                .filter(|v| cutoff.map_or(true, |c| v.visit_time >= c))
                .collect();
            let unique: HashSet<&str> = visits.iter().map(|v| v.user_id.as_str()).collect();
            VisitorCount {
                cafe_id: cafe_id.to_string(),
                total_visits: visits.len() as u32,
                unique_visitors: unique.len() as u32,
                time_range: range,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::places::PlacesError;
    use futures_util::future::BoxFuture;

    fn place(id: &str, name: &str, lat: f64, lng: f64, types: &[&str]) -> Place {
        Place {
            place_id: id.to_string(),
            name: name.to_string(),
            vicinity: "Somewhere St".to_string(),
            latitude: lat,
            longitude: lng,
            rating: Some(4.7),
            user_ratings_total: Some(120),
            types: types.iter().map(|t| t.to_string()).collect(),
            photo_url: None,
        }
    }

    struct FixedPlaces(Vec<Place>);

    impl PlacesClient for FixedPlaces {
        fn find_places_near(
            &self,
            _latitude: f64,
            _longitude: f64,
            _radius_meters: f64,
        ) -> BoxFuture<'_, Result<Vec<Place>, PlacesError>> {
            let places = self.0.clone();
            Box::pin(async move { Ok(places) })
        }
    }

    struct FailingPlaces;

    impl PlacesClient for FailingPlaces {
        fn find_places_near(
            &self,
            _latitude: f64,
            _longitude: f64,
            _radius_meters: f64,
        ) -> BoxFuture<'_, Result<Vec<Place>, PlacesError>> {
            Box::pin(async { Err(PlacesError::Status("OVER_QUERY_LIMIT".to_string())) })
        }
    }

    struct SlowPlaces;

    impl PlacesClient for SlowPlaces {
        fn find_places_near(
            &self,
            _latitude: f64,
            _longitude: f64,
            _radius_meters: f64,
        ) -> BoxFuture<'_, Result<Vec<Place>, PlacesError>> {
            Box::pin(async {
                tokio::time::sleep(std::time::Duration::from_secs(60)).await;
                Ok(vec![])
            })
        }
    }

    fn seeded_db() -> MemoryDb {
        let db = MemoryDb::new();
        crate::db::SeedData::load_from_file("data/seed.json")
            .unwrap()
            .apply(&db);
        db
    }

    #[test]
    fn test_place_tags() {
        let tags = place_tags(&place("p", "X", 0.0, 0.0, &["cafe", "bakery"]));
        assert_eq!(tags, vec!["Coffee", "Pastries", "Popular", "WiFi", "Seating"]);

        let mut bare = place("p", "X", 0.0, 0.0, &["store"]);
        bare.rating = None;
        bare.user_ratings_total = None;
        assert_eq!(place_tags(&bare), vec!["Coffee", "Chill"]);
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags(Some(" study, ,quiet ")), vec!["study", "quiet"]);
        assert!(parse_tags(None).is_empty());
    }

    #[tokio::test]
    async fn test_external_places_are_merged_by_distance() {
        let service = CafeService::new(seeded_db()).with_places(
            Arc::new(FixedPlaces(vec![
                place("g-near", "Corner Beans", 37.7750, -122.4195, &["cafe"]),
                place("g-far", "Far Away Cafe", 40.7128, -74.0060, &["cafe"]),
                // Same name and spot as a local café: dropped
                place("g-dup", "The Brew Lab", 37.7749, -122.4194, &["cafe"]),
            ])),
            std::time::Duration::from_secs(1),
        );

        let results = service
            .nearby(&NearbyQuery::new(37.7749, -122.4194))
            .await
            .unwrap();

        let ids: Vec<&str> = results.iter().map(|c| c.id.as_str()).collect();
        assert!(ids.contains(&"g-near"));
        assert!(!ids.contains(&"g-far"));
        assert!(!ids.contains(&"g-dup"));
        assert_eq!(ids[0], "cafe-1");

        let distances: Vec<f64> = results.iter().filter_map(|c| c.distance).collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn test_failing_places_degrade_to_local() {
        let service = CafeService::new(seeded_db())
            .with_places(Arc::new(FailingPlaces), std::time::Duration::from_secs(1));
        let results = service
            .nearby(&NearbyQuery::new(37.7749, -122.4194))
            .await
            .unwrap();
        assert_eq!(results.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_places_time_out_to_local() {
        let service = CafeService::new(seeded_db())
            .with_places(Arc::new(SlowPlaces), std::time::Duration::from_millis(50));
        let results = service
            .nearby(&NearbyQuery::new(37.7749, -122.4194))
            .await
            .unwrap();
        assert_eq!(results.len(), 4);
    }

    #[test]
    fn test_time_range_cutoffs() {
        let now = Utc::now();
        assert_eq!(TimeRange::All.cutoff(now), None);
        assert_eq!(TimeRange::Week.cutoff(now), Some(now - Duration::days(7)));
        assert_eq!(TimeRange::Month.cutoff(now), Some(now - Duration::days(30)));
        assert!(TimeRange::Today.cutoff(now).is_some_and(|c| c <= now));
    }
}
