// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! External places lookup (Google Places Nearby Search).
//!
//! The lookup is optional: nearby search always works from the local store,
//! and any failure here degrades to local-only results.

use futures_util::future::BoxFuture;
use serde::Deserialize;

/// A café-like place reported by an external provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub place_id: String,
    pub name: String,
    pub vicinity: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub types: Vec<String>,
    pub photo_url: Option<String>,
}

/// Narrow interface to a places provider.
pub trait PlacesClient: Send + Sync {
    fn find_places_near(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: f64,
    ) -> BoxFuture<'_, Result<Vec<Place>, PlacesError>>;
}

/// Errors from the places provider.
#[derive(Debug, thiserror::Error)]
pub enum PlacesError {
    #[error("Places request failed: {0}")]
    Request(String),

    #[error("Places API returned status {0}")]
    Status(String),
}

/// Google Places API client.
#[derive(Clone)]
pub struct GooglePlacesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GooglePlacesClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: "https://maps.googleapis.com/maps/api/place".to_string(),
            api_key,
        }
    }

    async fn nearby_search(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: f64,
    ) -> Result<Vec<Place>, PlacesError> {
        let url = format!("{}/nearbysearch/json", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("location", format!("{},{}", latitude, longitude)),
                ("radius", format!("{:.0}", radius_meters)),
                ("type", "cafe".to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| PlacesError::Request(e.to_string()))?;

        let body: NearbySearchResponse = response
            .error_for_status()
            .map_err(|e| PlacesError::Request(e.to_string()))?
            .json()
            .await
            .map_err(|e| PlacesError::Request(e.to_string()))?;

        self.convert_response(body)
    }

    fn convert_response(&self, body: NearbySearchResponse) -> Result<Vec<Place>, PlacesError> {
        if body.status != "OK" && body.status != "ZERO_RESULTS" {
            return Err(PlacesError::Status(body.status));
        }

        let places: Vec<Place> = body
            .results
            .into_iter()
            .filter(|r| r.business_status.as_deref() != Some("CLOSED_PERMANENTLY"))
            .map(|r| Place {
                photo_url: r.photos.first().map(|p| self.photo_url(&p.photo_reference)),
                place_id: r.place_id,
                name: r.name,
                vicinity: r.vicinity,
                latitude: r.geometry.location.lat,
                longitude: r.geometry.location.lng,
                rating: r.rating,
                user_ratings_total: r.user_ratings_total,
                types: r.types,
            })
            .collect();

        tracing::debug!(count = places.len(), "Places API results");
        Ok(places)
    }

    fn photo_url(&self, reference: &str) -> String {
        format!(
            "{}/photo?maxwidth=800&photo_reference={}&key={}",
            self.base_url, reference, self.api_key
        )
    }
}

impl PlacesClient for GooglePlacesClient {
    fn find_places_near(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: f64,
    ) -> BoxFuture<'_, Result<Vec<Place>, PlacesError>> {
        Box::pin(self.nearby_search(latitude, longitude, radius_meters))
    }
}

// ─── Wire Types ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    #[serde(default)]
    results: Vec<PlaceResult>,
    status: String,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    place_id: String,
    name: String,
    #[serde(default)]
    vicinity: String,
    geometry: PlaceGeometry,
    rating: Option<f64>,
    user_ratings_total: Option<u32>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    photos: Vec<PlacePhoto>,
    business_status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaceGeometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct PlacePhoto {
    photo_reference: String,
}
