//! Rate settings and the rate-table snapshot
//!
//! A rate setting is one named numeric configuration value, scoped by a
//! category (a driver classification, a zone, or one of the sentinels
//! `"global"`, `"*"`, `"weekly"`). The engine never writes settings; it
//! indexes the flat snapshot the host hands it on each calculation.
//!
//! # Invariants
//!
//! - The `(key, category)` pair is unique in the source of truth. If a
//!   snapshot carries duplicates anyway, the last one wins on indexing.
//! - Values are fixed-precision `Decimal`, never floats.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One named numeric configuration value
///
/// # Example
/// ```
/// use trip_econ_core_rs::models::rate::RateSetting;
/// use rust_decimal::Decimal;
///
/// let setting = RateSetting {
///     key: "pickup_fee".to_string(),
///     category: "global".to_string(),
///     value: Decimal::new(3000, 2), // $30.00
///     unit: "$/event".to_string(),
/// };
/// assert_eq!(setting.key, "pickup_fee");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSetting {
    /// Cost category identifier (e.g. `base_wage_cpm`, `pickup_fee`)
    pub key: String,

    /// Scope: driver classification, zone, or a sentinel category
    pub category: String,

    /// Fixed-precision value
    pub value: Decimal,

    /// Display-only unit label (e.g. `$/mi`, `$/event`, `%`)
    #[serde(default)]
    pub unit: String,
}

/// Flat `(key, category) -> value` snapshot of all rate settings
///
/// Built once per calculation from the collaborator's stored settings.
/// Read-only once constructed. Indexed key-first so the JSON form is a
/// plain nested object.
///
/// # Example
/// ```
/// use trip_econ_core_rs::models::rate::{RateSetting, RateTable};
/// use rust_decimal::Decimal;
///
/// let table = RateTable::from_settings(vec![RateSetting {
///     key: "fuel_cpm".to_string(),
///     category: "company".to_string(),
///     value: Decimal::new(62, 2),
///     unit: "$/mi".to_string(),
/// }]);
/// assert_eq!(table.get("fuel_cpm", "company"), Some(Decimal::new(62, 2)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    entries: HashMap<String, HashMap<String, Decimal>>,
}

impl RateTable {
    /// Index a flat list of settings into the lookup table
    ///
    /// Duplicate `(key, category)` pairs: last write wins.
    pub fn from_settings(settings: Vec<RateSetting>) -> Self {
        let mut entries: HashMap<String, HashMap<String, Decimal>> = HashMap::new();
        for s in settings {
            entries.entry(s.key).or_default().insert(s.category, s.value);
        }
        Self { entries }
    }

    /// Parse a JSON snapshot (array of settings) as delivered by the host
    ///
    /// # Example
    /// ```
    /// use trip_econ_core_rs::models::rate::RateTable;
    ///
    /// let json = r#"[{"key":"pickup_fee","category":"global","value":"30"}]"#;
    /// let table = RateTable::from_json_snapshot(json).unwrap();
    /// assert!(table.get("pickup_fee", "global").is_some());
    /// ```
    pub fn from_json_snapshot(json: &str) -> serde_json::Result<Self> {
        let settings: Vec<RateSetting> = serde_json::from_str(json)?;
        Ok(Self::from_settings(settings))
    }

    /// Exact single-pair lookup, no fallback
    pub fn get(&self, key: &str, category: &str) -> Option<Decimal> {
        self.entries.get(key)?.get(category).copied()
    }

    /// Iterate all `(key, category, value)` entries
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, Decimal)> {
        self.entries.iter().flat_map(|(k, by_cat)| {
            by_cat.iter().map(move |(c, v)| (k.as_str(), c.as_str(), *v))
        })
    }

    /// Number of indexed settings
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
