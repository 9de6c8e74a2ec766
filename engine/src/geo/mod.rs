//! Great-circle geometry
//!
//! Distances between market coordinates are computed with the haversine
//! formula over a spherical Earth. Good to well under 0.5% for continental
//! lane lengths, which is far finer than the pricing model's own resolution.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in statute miles
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// A geographic point in decimal degrees
///
/// # Example
/// ```
/// use trip_econ_core_rs::geo::GeoPoint;
///
/// let toronto = GeoPoint::new(43.70, -79.42);
/// assert_eq!(toronto.lat, 43.70);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude, degrees north
    pub lat: f64,
    /// Longitude, degrees east (negative = west)
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Haversine great-circle distance between two points, in statute miles
///
/// # Example
/// ```
/// use trip_econ_core_rs::geo::{great_circle_miles, GeoPoint};
///
/// let toronto = GeoPoint::new(43.70, -79.42);
/// let chicago = GeoPoint::new(41.88, -87.63);
/// let d = great_circle_miles(toronto, chicago);
/// assert!(d > 400.0 && d < 500.0);
/// ```
pub fn great_circle_miles(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_MILES * h.sqrt().asin()
}
