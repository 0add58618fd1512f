// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Great-circle distance between coordinates.

use geo::Point;

/// Earth radius used for all distance math, in miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

pub const METERS_PER_MILE: f64 = 1609.34;

/// Haversine distance in miles between two points (x = longitude, y = latitude).
///
/// Symmetric, zero for identical points, never negative, and bounded by
/// half the circumference at [`EARTH_RADIUS_MILES`].
pub fn distance_miles(a: Point<f64>, b: Point<f64>) -> f64 {
    let (lat1, lat2) = (a.y().to_radians(), b.y().to_radians());
    let d_lat = (b.y() - a.y()).to_radians();
    let d_lon = (b.x() - a.x()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair outside [0, 1] for antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_MILES * c
}

/// Convenience form taking raw degrees.
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    distance_miles(Point::new(lon1, lat1), Point::new(lon2, lat2))
}

/// Round to one decimal place, halves away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
