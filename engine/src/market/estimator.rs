//! Synthetic lane rate model
//!
//! Eleven ordered steps, per the pricing model's definition:
//!
//! ```text
//!  1. Explicit lane override → returned verbatim
//!  2. Great-circle distance, min-clamped to 50 mi
//!  3. Base rate: 1.55 + 1.18·e^(−distance/420)
//!  4. Demand adjustment (origin tightness, destination rejection)
//!  5. Cost-of-living differential (destination − origin)
//!  6. +0.28 cross-border premium
//!  7. Seasonal adjustment (winter / produce / slow months)
//!  8. Directional manual lane adjustment
//!  9. Regional balance term
//! 10. Deterministic hash noise in [−0.03, 0.03]
//! 11. Clamp to [1.45, 4.25], round to cents
//! ```

use crate::geo::great_circle_miles;
use crate::market::codes::normalize_market_code;
use crate::market::directory::MarketDirectory;
use crate::market::noise::{noise_offset, source_label};
use crate::market::MarketError;
use crate::models::market::{lane_key, LaneQuote, Market};
use chrono::{DateTime, Datelike, Utc};

/// Lower clamp of the synthetic rate band, $/mi
pub const RATE_FLOOR: f64 = 1.45;

/// Upper clamp of the synthetic rate band, $/mi
pub const RATE_CEILING: f64 = 4.25;

/// Minimum lane distance fed into the model, miles
///
/// Short intra-market hops otherwise blow up the decaying base curve.
pub const MIN_LANE_MILES: f64 = 50.0;

// Curve constants calibrated against posted per-mile lane rates
const BASE_RATE_FLOOR: f64 = 1.55;
const BASE_RATE_SHORT_HAUL_LIFT: f64 = 1.18;
const BASE_RATE_DECAY_MILES: f64 = 420.0;

const CROSS_BORDER_PREMIUM: f64 = 0.28;

const DEMAND_TIGHTNESS_WEIGHT: f64 = 0.55;
const DEMAND_REJECTION_WEIGHT: f64 = 0.40;
const COST_OF_LIVING_WEIGHT: f64 = 0.30;
const REGIONAL_BALANCE_WEIGHT: f64 = 0.10;

const WINTER_NORTHERN_PREMIUM: f64 = 0.06;
const PRODUCE_ORIGIN_PREMIUM: f64 = 0.04;
const PRODUCE_DESTINATION_PREMIUM: f64 = 0.09;
const SLOW_SEASON_DISCOUNT: f64 = 0.03;

const WINTER_MONTHS: [u32; 3] = [12, 1, 2];

/// Estimate a synthetic competitive rate for an ordered lane
///
/// Pure over its inputs; `now` supplies the season and nothing else, so a
/// fixed lane and a fixed `now` always return the identical quote,
/// including the source label.
///
/// # Example
/// ```
/// use trip_econ_core_rs::market::{estimate_market_rate, MarketDirectory};
/// use chrono::{TimeZone, Utc};
///
/// let dir = MarketDirectory::standard();
/// let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
///
/// // Explicit override, returned verbatim
/// let quote = estimate_market_rate("Toronto", "Chicago", &dir, now).unwrap();
/// assert_eq!(quote.rate_per_mile, 2.21);
/// assert_eq!(quote.source, "DAT RateView");
/// ```
pub fn estimate_market_rate(
    origin_text: &str,
    destination_text: &str,
    directory: &MarketDirectory,
    now: DateTime<Utc>,
) -> Result<LaneQuote, MarketError> {
    let origin_code = normalize_market_code(directory, origin_text)?;
    let destination_code = normalize_market_code(directory, destination_text)?;

    // Codes normalize only to directory entries, so both lookups hold.
    let origin = directory
        .market(&origin_code)
        .ok_or_else(|| MarketError::UnknownMarket {
            input: origin_text.to_string(),
        })?;
    let destination =
        directory
            .market(&destination_code)
            .ok_or_else(|| MarketError::UnknownMarket {
                input: destination_text.to_string(),
            })?;

    // Step 1: explicit override bypasses the model entirely; distance is
    // computed only to populate the quote
    if let Some(o) = directory.lane_override(&origin_code, &destination_code) {
        let distance =
            great_circle_miles(origin.location, destination.location).max(MIN_LANE_MILES);
        return Ok(LaneQuote {
            origin: origin_code,
            destination: destination_code,
            rate_per_mile: o.rate_per_mile,
            source: o.source.clone(),
            distance_miles: round_miles(distance),
        });
    }

    let distance = great_circle_miles(origin.location, destination.location).max(MIN_LANE_MILES);
    let key = lane_key(&origin_code, &destination_code);
    let month = now.month();

    let mut rate = base_rate(distance);
    rate += demand_adjustment(origin, destination);
    rate += COST_OF_LIVING_WEIGHT * (destination.cost_index - origin.cost_index);
    if origin.country != destination.country {
        rate += CROSS_BORDER_PREMIUM;
    }
    rate += seasonal_adjustment(origin, destination, month);
    rate += directory.lane_adjustment(&origin_code, &destination_code);
    rate += regional_balance(origin, destination);
    rate += noise_offset(&key);

    let rate = round_cents(rate.clamp(RATE_FLOOR, RATE_CEILING));

    Ok(LaneQuote {
        origin: origin_code,
        destination: destination_code,
        rate_per_mile: rate,
        source: source_label(&key).to_string(),
        distance_miles: round_miles(distance),
    })
}

/// Decaying base curve: short hauls price high per mile, long hauls
/// asymptote toward the floor
fn base_rate(distance_miles: f64) -> f64 {
    BASE_RATE_FLOOR + BASE_RATE_SHORT_HAUL_LIFT * (-distance_miles / BASE_RATE_DECAY_MILES).exp()
}

/// Tight origins and rejection-heavy destinations both push rates up;
/// indices are centered at 0.5 (balanced)
fn demand_adjustment(origin: &Market, destination: &Market) -> f64 {
    DEMAND_TIGHTNESS_WEIGHT * (origin.outbound_tightness - 0.5)
        + DEMAND_REJECTION_WEIGHT * (destination.inbound_rejection - 0.5)
}

/// Winter premium for northern ends, produce-month premium (weighted
/// toward the destination), slow-season discount
fn seasonal_adjustment(origin: &Market, destination: &Market, month: u32) -> f64 {
    let mut adj = 0.0;

    if WINTER_MONTHS.contains(&month) {
        if origin.is_northern() {
            adj += WINTER_NORTHERN_PREMIUM;
        }
        if destination.is_northern() {
            adj += WINTER_NORTHERN_PREMIUM;
        }
    }

    if origin.produce_months.contains(&month) {
        adj += PRODUCE_ORIGIN_PREMIUM;
    }
    if destination.produce_months.contains(&month) {
        adj += PRODUCE_DESTINATION_PREMIUM;
    }

    if origin.slow_months.contains(&month) {
        adj -= SLOW_SEASON_DISCOUNT;
    }
    if destination.slow_months.contains(&month) {
        adj -= SLOW_SEASON_DISCOUNT;
    }

    adj
}

/// Small term favoring lanes that relieve a tightness/rejection imbalance
fn regional_balance(origin: &Market, destination: &Market) -> f64 {
    REGIONAL_BALANCE_WEIGHT * (destination.outbound_tightness - origin.inbound_rejection)
}

fn round_cents(rate: f64) -> f64 {
    (rate * 100.0).round() / 100.0
}

fn round_miles(distance: f64) -> f64 {
    (distance * 10.0).round() / 10.0
}
