//! Delay risk estimation
//!
//! Derives an ETA and a bounded delay-risk score from geographic distance
//! and a delivery commitment window.
//!
//! # Null vs zero
//!
//! Three states a caller must keep apart:
//! - insufficient geographic data → `None` (no estimate at all)
//! - ETA computed but no window end → [`DelayRisk::Unknown`]
//! - a computed score → [`DelayRisk::Known`], always in [0, 1]
//!
//! "Unknown risk" is never reported as 0% risk.

use crate::geo::{great_circle_miles, GeoPoint};
use crate::market::codes::normalize_market_code;
use crate::market::directory::MarketDirectory;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Fixed average road speed used for ETA derivation, mph
pub const AVERAGE_ROAD_SPEED_MPH: f64 = 47.0;

/// Floor on a synthesized scheduling window span, minutes
const MIN_SYNTHESIZED_SPAN_MINUTES: f64 = 60.0;

/// Destination facts for one trip's final stop
///
/// Explicit coordinates win; otherwise the market text is normalized the
/// same way lane quoting normalizes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DestinationFacts {
    /// Explicit stop coordinates, when the stop record carries them
    pub coordinates: Option<GeoPoint>,

    /// Free-text market/city of the stop, used as fallback
    pub market_text: Option<String>,
}

/// Delivery commitment window (either bound may be missing)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryWindow {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// Delay risk score, tagged so "unknown" stays distinct from 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DelayRisk {
    /// Computed score
    Known {
        /// Minutes between ETA and window end; negative = already late
        slack_minutes: i64,
        /// Risk fraction in [0, 1]; 1 = window already blown
        score: f64,
    },

    /// ETA exists but no window end to score against
    Unknown,
}

/// Computed delay outlook for one trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelayEstimate {
    /// Projected arrival
    pub eta: DateTime<Utc>,

    /// Great-circle distance used, miles
    pub distance_miles: f64,

    /// Drive time at the fixed average speed, minutes
    pub travel_minutes: f64,

    /// Risk score or unknown
    pub risk: DelayRisk,
}

/// Estimate ETA and delay risk for a unit heading to a destination
///
/// Returns `None` when either side's coordinates cannot be resolved -
/// missing data is not zero risk.
///
/// # Example
/// ```
/// use trip_econ_core_rs::market::MarketDirectory;
/// use trip_econ_core_rs::risk::{estimate_delay_risk, DelayRisk, DeliveryWindow, DestinationFacts};
/// use chrono::{Duration, TimeZone, Utc};
///
/// let dir = MarketDirectory::standard();
/// let now = Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap();
/// let destination = DestinationFacts {
///     coordinates: None,
///     market_text: Some("Chicago".to_string()),
/// };
/// let window = DeliveryWindow {
///     start: Some(now),
///     end: Some(now + Duration::hours(24)),
/// };
///
/// let estimate = estimate_delay_risk("Toronto", &destination, &window, &dir, now).unwrap();
/// assert!(matches!(estimate.risk, DelayRisk::Known { .. }));
/// ```
pub fn estimate_delay_risk(
    unit_home_base: &str,
    destination: &DestinationFacts,
    window: &DeliveryWindow,
    directory: &MarketDirectory,
    now: DateTime<Utc>,
) -> Option<DelayEstimate> {
    let origin = resolve_market_point(directory, unit_home_base)?;
    let dest = destination
        .coordinates
        .or_else(|| resolve_market_point(directory, destination.market_text.as_deref()?))?;

    let distance_miles = great_circle_miles(origin, dest);
    let travel_minutes = distance_miles / AVERAGE_ROAD_SPEED_MPH * 60.0;
    let eta = now + Duration::seconds((travel_minutes * 60.0) as i64);

    let risk = match window.end {
        None => DelayRisk::Unknown,
        Some(end) => score_against_window(eta, travel_minutes, window.start, end, now),
    };

    Some(DelayEstimate {
        eta,
        distance_miles: round1(distance_miles),
        travel_minutes: round1(travel_minutes),
        risk,
    })
}

/// Slack-based scoring against the window end
///
/// An elapsed window or non-positive slack is maximum risk. Otherwise the
/// slack is normalized against the window's own span (or a synthesized
/// span of twice the travel time when no start exists).
fn score_against_window(
    eta: DateTime<Utc>,
    travel_minutes: f64,
    start: Option<DateTime<Utc>>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> DelayRisk {
    let slack = end - eta;
    let slack_minutes = slack.num_minutes();

    // Lateness is judged on the full duration; num_minutes truncates
    // toward zero, which would call a 30-second cushion "already late"
    if end <= now || slack.num_seconds() <= 0 {
        return DelayRisk::Known {
            slack_minutes,
            score: 1.0,
        };
    }

    let span_minutes = match start {
        Some(start) if start < end => (end - start).num_minutes() as f64,
        _ => (2.0 * travel_minutes).max(MIN_SYNTHESIZED_SPAN_MINUTES),
    };

    let slack_f = slack.num_seconds() as f64 / 60.0;
    let score = 1.0 - slack_f.min(span_minutes) / span_minutes;

    DelayRisk::Known {
        slack_minutes,
        score: score.clamp(0.0, 1.0),
    }
}

fn resolve_market_point(directory: &MarketDirectory, text: &str) -> Option<GeoPoint> {
    let code = normalize_market_code(directory, text).ok()?;
    Some(directory.market(&code)?.location)
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dir() -> MarketDirectory {
        MarketDirectory::standard()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap()
    }

    fn to_chicago() -> DestinationFacts {
        DestinationFacts {
            coordinates: None,
            market_text: Some("Chicago".to_string()),
        }
    }

    #[test]
    fn test_unresolvable_destination_is_none() {
        let destination = DestinationFacts {
            coordinates: None,
            market_text: Some("Narnia".to_string()),
        };
        let result =
            estimate_delay_risk("GTA", &destination, &DeliveryWindow::default(), &dir(), now());
        assert_eq!(result, None);
    }

    #[test]
    fn test_unresolvable_home_base_is_none() {
        let result =
            estimate_delay_risk("nowhere", &to_chicago(), &DeliveryWindow::default(), &dir(), now());
        assert_eq!(result, None);
    }

    #[test]
    fn test_missing_window_end_gives_eta_with_unknown_risk() {
        let estimate =
            estimate_delay_risk("GTA", &to_chicago(), &DeliveryWindow::default(), &dir(), now())
                .unwrap();
        assert!(estimate.eta > now());
        assert_eq!(estimate.risk, DelayRisk::Unknown);
    }

    #[test]
    fn test_elapsed_window_is_maximum_risk() {
        let window = DeliveryWindow {
            start: None,
            end: Some(now() - chrono::Duration::hours(2)),
        };
        let estimate =
            estimate_delay_risk("GTA", &to_chicago(), &window, &dir(), now()).unwrap();
        match estimate.risk {
            DelayRisk::Known {
                slack_minutes,
                score,
            } => {
                assert_eq!(score, 1.0);
                assert!(slack_minutes < 0, "already late means negative slack");
            }
            DelayRisk::Unknown => panic!("expected a known score"),
        }
    }

    #[test]
    fn test_generous_window_scores_low() {
        // ~435 mi at 47 mph is just over 9 hours of driving
        let window = DeliveryWindow {
            start: Some(now()),
            end: Some(now() + chrono::Duration::hours(96)),
        };
        let estimate =
            estimate_delay_risk("GTA", &to_chicago(), &window, &dir(), now()).unwrap();
        match estimate.risk {
            DelayRisk::Known { score, .. } => {
                assert!(score < 0.2, "score {}", score);
                assert!(score >= 0.0);
            }
            DelayRisk::Unknown => panic!("expected a known score"),
        }
    }

    #[test]
    fn test_tight_window_scores_high() {
        let window = DeliveryWindow {
            start: Some(now()),
            end: Some(now() + chrono::Duration::hours(10)),
        };
        let estimate =
            estimate_delay_risk("GTA", &to_chicago(), &window, &dir(), now()).unwrap();
        match estimate.risk {
            DelayRisk::Known { score, .. } => assert!(score > 0.8, "score {}", score),
            DelayRisk::Unknown => panic!("expected a known score"),
        }
    }

    #[test]
    fn test_sub_minute_slack_is_not_already_late() {
        // ETA lands 30 seconds inside the window; whole-minute truncation
        // must not turn that cushion into maximum risk
        let eta = now() + chrono::Duration::hours(9);
        let end = eta + chrono::Duration::seconds(30);
        let risk = score_against_window(eta, 540.0, Some(now()), end, now());
        match risk {
            DelayRisk::Known {
                slack_minutes,
                score,
            } => {
                assert_eq!(slack_minutes, 0);
                assert!(score < 1.0, "score {}", score);
                assert!(score > 0.99);
            }
            DelayRisk::Unknown => panic!("expected a known score"),
        }
    }

    #[test]
    fn test_explicit_coordinates_win_over_market_text() {
        // Coordinates say "next door", text says Chicago
        let destination = DestinationFacts {
            coordinates: Some(GeoPoint::new(43.71, -79.43)),
            market_text: Some("Chicago".to_string()),
        };
        let estimate = estimate_delay_risk(
            "GTA",
            &destination,
            &DeliveryWindow::default(),
            &dir(),
            now(),
        )
        .unwrap();
        assert!(estimate.distance_miles < 5.0);
    }

    #[test]
    fn test_synthesized_span_when_no_window_start() {
        let window = DeliveryWindow {
            start: None,
            end: Some(now() + chrono::Duration::hours(12)),
        };
        let estimate =
            estimate_delay_risk("GTA", &to_chicago(), &window, &dir(), now()).unwrap();
        // Travel ~557 min, slack ~163 min, span = 2×travel; risk well inside (0, 1)
        match estimate.risk {
            DelayRisk::Known { score, .. } => {
                assert!(score > 0.0 && score < 1.0, "score {}", score)
            }
            DelayRisk::Unknown => panic!("expected a known score"),
        }
    }
}
