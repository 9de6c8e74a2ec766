//! Market directory
//!
//! The lookup table the estimator consumes: markets with fixed coordinates
//! and indices, free-text aliases, explicit lane overrides, and directional
//! manual adjustments. Handed in by the host; [`MarketDirectory::standard`]
//! carries the built-in North American set.

use crate::geo::GeoPoint;
use crate::models::market::{lane_key, Country, LaneOverride, Market};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Markets, aliases, overrides, and manual adjustments for lane pricing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketDirectory {
    /// Canonical code → market facts
    pub markets: HashMap<String, Market>,

    /// Cleaned free text (city names, airport codes) → canonical code
    pub aliases: HashMap<String, String>,

    /// Lane key → explicit override, returned verbatim
    pub overrides: HashMap<String, LaneOverride>,

    /// Lane key → directional manual rate adjustment ($/mi, signed)
    pub adjustments: HashMap<String, f64>,
}

impl MarketDirectory {
    /// Look up a market by canonical code
    pub fn market(&self, code: &str) -> Option<&Market> {
        self.markets.get(code)
    }

    /// Explicit override for an ordered lane, if declared
    pub fn lane_override(&self, origin: &str, destination: &str) -> Option<&LaneOverride> {
        self.overrides.get(&lane_key(origin, destination))
    }

    /// Directional manual adjustment for an ordered lane (0 when none)
    pub fn lane_adjustment(&self, origin: &str, destination: &str) -> f64 {
        self.adjustments
            .get(&lane_key(origin, destination))
            .copied()
            .unwrap_or(0.0)
    }

    /// Built-in North American market set
    ///
    /// Indices are the model's declared facts, not live feed values; they
    /// are tuned so balanced lanes price near the middle of the band.
    pub fn standard() -> Self {
        let mut dir = Self::default();

        let markets = [
            // code, name, lat, lon, country, tightness, rejection, cost
            ("GTA", "Greater Toronto", 43.70, -79.42, Country::Ca, 0.58, 0.44, 1.08),
            ("MTL", "Montreal", 45.50, -73.57, Country::Ca, 0.52, 0.48, 1.02),
            ("WPG", "Winnipeg", 49.90, -97.14, Country::Ca, 0.47, 0.56, 0.93),
            ("CAL", "Calgary", 51.05, -114.07, Country::Ca, 0.50, 0.52, 1.04),
            ("VAN", "Vancouver", 49.25, -123.12, Country::Ca, 0.55, 0.60, 1.22),
            ("CHI", "Chicago", 41.88, -87.63, Country::Us, 0.62, 0.38, 1.06),
            ("NYC", "New York", 40.71, -74.01, Country::Us, 0.44, 0.66, 1.28),
            ("ATL", "Atlanta", 33.75, -84.39, Country::Us, 0.64, 0.36, 0.99),
            ("DAL", "Dallas-Fort Worth", 32.78, -96.80, Country::Us, 0.60, 0.40, 0.98),
            ("LAX", "Los Angeles", 34.05, -118.24, Country::Us, 0.66, 0.42, 1.24),
            ("SEA", "Seattle", 47.61, -122.33, Country::Us, 0.53, 0.55, 1.18),
            ("DEN", "Denver", 39.74, -104.99, Country::Us, 0.49, 0.58, 1.07),
            ("MIA", "Miami", 25.76, -80.19, Country::Us, 0.57, 0.62, 1.10),
            ("ELP", "El Paso", 31.76, -106.49, Country::Us, 0.54, 0.50, 0.90),
            ("MSP", "Minneapolis", 44.98, -93.27, Country::Us, 0.51, 0.47, 1.01),
            ("KCY", "Kansas City", 39.10, -94.58, Country::Us, 0.55, 0.45, 0.95),
            ("HOU", "Houston", 29.76, -95.37, Country::Us, 0.59, 0.43, 0.97),
            ("DET", "Detroit", 42.33, -83.05, Country::Us, 0.50, 0.53, 0.96),
        ];

        for (code, name, lat, lon, country, tightness, rejection, cost) in markets {
            dir.markets.insert(
                code.to_string(),
                Market {
                    code: code.to_string(),
                    name: name.to_string(),
                    location: GeoPoint::new(lat, lon),
                    country,
                    outbound_tightness: tightness,
                    inbound_rejection: rejection,
                    cost_index: cost,
                    produce_months: vec![],
                    slow_months: vec![],
                },
            );
        }

        // Seasonal declarations
        dir.set_produce_months("MIA", &[11, 12, 1, 2, 3, 4]);
        dir.set_produce_months("LAX", &[4, 5, 6, 7]);
        dir.set_produce_months("ATL", &[5, 6, 7]);
        dir.set_produce_months("ELP", &[8, 9, 10]);
        dir.set_slow_months("WPG", &[1, 2]);
        dir.set_slow_months("MTL", &[1, 2]);
        dir.set_slow_months("DEN", &[7, 8]);

        // Free-text aliases (cleaned form: uppercase, alphanumeric only)
        let aliases = [
            ("TORONTO", "GTA"),
            ("MISSISSAUGA", "GTA"),
            ("BRAMPTON", "GTA"),
            ("YYZ", "GTA"),
            ("MONTREAL", "MTL"),
            ("YUL", "MTL"),
            ("WINNIPEG", "WPG"),
            ("CALGARY", "CAL"),
            ("YYC", "CAL"),
            ("VANCOUVER", "VAN"),
            ("CHICAGO", "CHI"),
            ("ORD", "CHI"),
            ("JOLIET", "CHI"),
            ("NEWYORK", "NYC"),
            ("NEWARK", "NYC"),
            ("JFK", "NYC"),
            ("ATLANTA", "ATL"),
            ("DALLAS", "DAL"),
            ("FORTWORTH", "DAL"),
            ("DFW", "DAL"),
            ("LOSANGELES", "LAX"),
            ("SEATTLE", "SEA"),
            ("TACOMA", "SEA"),
            ("DENVER", "DEN"),
            ("MIAMI", "MIA"),
            ("ELPASO", "ELP"),
            ("MINNEAPOLIS", "MSP"),
            ("STPAUL", "MSP"),
            ("KANSASCITY", "KCY"),
            ("HOUSTON", "HOU"),
            ("DETROIT", "DET"),
        ];
        for (alias, code) in aliases {
            dir.aliases.insert(alias.to_string(), code.to_string());
        }

        // Explicit lane overrides (contracted or externally sourced rates)
        dir.overrides.insert(
            lane_key("GTA", "CHI"),
            LaneOverride {
                rate_per_mile: 2.21,
                source: "DAT RateView".to_string(),
            },
        );
        dir.overrides.insert(
            lane_key("GTA", "MTL"),
            LaneOverride {
                rate_per_mile: 2.05,
                source: "contract tariff".to_string(),
            },
        );

        // Directional manual adjustments ($/mi)
        dir.adjustments.insert(lane_key("WPG", "VAN"), 0.10);
        dir.adjustments.insert(lane_key("CHI", "GTA"), 0.06);
        dir.adjustments.insert(lane_key("NYC", "CHI"), -0.05);

        dir
    }

    fn set_produce_months(&mut self, code: &str, months: &[u32]) {
        if let Some(market) = self.markets.get_mut(code) {
            market.produce_months = months.to_vec();
        }
    }

    fn set_slow_months(&mut self, code: &str, months: &[u32]) {
        if let Some(market) = self.markets.get_mut(code) {
            market.slow_months = months.to_vec();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_markets_have_unique_codes() {
        let dir = MarketDirectory::standard();
        assert!(dir.markets.len() >= 18);
        for (code, market) in &dir.markets {
            assert_eq!(code, &market.code);
        }
    }

    #[test]
    fn test_aliases_point_to_real_markets() {
        let dir = MarketDirectory::standard();
        for code in dir.aliases.values() {
            assert!(dir.markets.contains_key(code), "dangling alias {}", code);
        }
    }

    #[test]
    fn test_gta_chi_override_declared() {
        let dir = MarketDirectory::standard();
        let o = dir.lane_override("GTA", "CHI").unwrap();
        assert_eq!(o.rate_per_mile, 2.21);
        assert_eq!(o.source, "DAT RateView");
    }

    #[test]
    fn test_unknown_lane_adjustment_is_zero() {
        let dir = MarketDirectory::standard();
        assert_eq!(dir.lane_adjustment("MIA", "SEA"), 0.0);
    }
}
