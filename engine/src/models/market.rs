//! Market and lane types
//!
//! A market is a fixed freight origin/destination region (e.g. GTA, CHI)
//! with declared coordinates and demand/cost indices. A lane is an ordered
//! origin→destination pair of markets.

use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// Country a market sits in (drives the cross-border premium)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Country {
    Ca,
    Us,
}

/// One freight market with its declared pricing indices
///
/// Index conventions:
/// - `outbound_tightness` and `inbound_rejection` are load-board style
///   indices in `[0, 1]`, centered at 0.5 (balanced market).
/// - `cost_index` is a cost-of-living index around 1.0.
/// - `produce_months` / `slow_months` are calendar month numbers (1-12).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    /// Canonical 3-letter market code
    pub code: String,

    /// Display name
    pub name: String,

    /// Fixed representative coordinates
    pub location: GeoPoint,

    /// Country (cross-border lanes carry a flat premium)
    pub country: Country,

    /// Outbound capacity tightness index, [0, 1]
    pub outbound_tightness: f64,

    /// Inbound load rejection index, [0, 1]
    pub inbound_rejection: f64,

    /// Cost-of-living index, ~1.0
    pub cost_index: f64,

    /// Months with produce-season volume out of this market
    #[serde(default)]
    pub produce_months: Vec<u32>,

    /// Declared slow-season months
    #[serde(default)]
    pub slow_months: Vec<u32>,
}

impl Market {
    /// Whether this market prices as "northern" for the winter premium
    pub fn is_northern(&self) -> bool {
        self.location.lat >= 43.5
    }
}

/// A computed synthetic lane quote
///
/// Carries the normalized codes and the great-circle distance so a caller
/// can render the quote without re-resolving the lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneQuote {
    /// Normalized origin market code
    pub origin: String,

    /// Normalized destination market code
    pub destination: String,

    /// Rate per mile, clamped to the model's band and rounded to cents
    pub rate_per_mile: f64,

    /// Labeled rate source (override source, or hash-picked synthetic label)
    pub source: String,

    /// Great-circle lane distance in miles (post min-clamp)
    pub distance_miles: f64,
}

/// An explicit lane-level rate override, returned verbatim when present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneOverride {
    /// Rate per mile to return as-is
    pub rate_per_mile: f64,

    /// Source label to return as-is
    pub source: String,
}

/// Canonical key for an ordered lane, used for override/adjustment lookup
/// and as the stable hash input for deterministic noise
pub fn lane_key(origin: &str, destination: &str) -> String {
    format!("{}:{}", origin, destination)
}
