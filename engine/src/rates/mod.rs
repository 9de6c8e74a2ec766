//! Rate resolution
//!
//! Every cost component looks rates up through one ordered fallback chain:
//! exact `(key, category)` → `(key, "global")` → `(key, "*")`. Nothing
//! falls back further. A required rate that resolves nowhere fails loudly -
//! a silently-zeroed missing rate is indistinguishable from a deliberately
//! zero rate, which is worse than an error.
//!
//! # Contract
//!
//! - `resolve` / `resolve_chain`: fail with [`RateError::MissingRate`]
//!   listing every category tried.
//! - `resolve_optional`: exact single-pair probe, no fallback; used to
//!   detect whether a category-specific override exists at all.
//! - `weekly_overhead_total`: sums the `"weekly"` sentinel category, where
//!   absence means "not applicable", not an error.

use crate::models::rate::RateTable;
use rust_decimal::Decimal;
use thiserror::Error;

/// Fixed rate-key vocabulary
///
/// Keys and categories are known strings, not user-authored expressions.
pub mod keys {
    /// Base driver wage, $/mi
    pub const BASE_WAGE_CPM: &str = "base_wage_cpm";

    /// Wage uplift percentages, resolved under the global category, as
    /// fractions (0.04 = 4%)
    pub const BENEFITS_PCT: &str = "benefits_pct";
    pub const PERFORMANCE_PCT: &str = "performance_pct";
    pub const SAFETY_PCT: &str = "safety_pct";
    pub const STEP_PCT: &str = "step_pct";

    /// Rolling cost components, $/mi
    pub const FUEL_CPM: &str = "fuel_cpm";
    pub const TRUCK_MAINTENANCE_CPM: &str = "truck_maintenance_cpm";
    pub const TRAILER_MAINTENANCE_CPM: &str = "trailer_maintenance_cpm";

    /// Per-event fees, $/event
    pub const BORDER_CROSSING_FEE: &str = "border_crossing_fee";
    pub const PICKUP_FEE: &str = "pickup_fee";
    pub const DELIVERY_FEE: &str = "delivery_fee";
    pub const DROP_HOOK_FEE: &str = "drop_hook_fee";
}

/// Sentinel categories
pub mod categories {
    /// Applies to every classification unless a specific category overrides
    pub const GLOBAL: &str = "global";

    /// Wildcard, the last fallback
    pub const WILDCARD: &str = "*";

    /// Shared weekly overheads, summed by the fixed-cost allocator
    pub const WEEKLY: &str = "weekly";
}

/// Rate resolution failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RateError {
    /// No value for `key` under any tried category, global, or wildcard
    #[error("no rate for key {key:?} (tried categories {tried:?})")]
    MissingRate { key: String, tried: Vec<String> },
}

/// Resolve `key` trying each category in order, then global, then wildcard
///
/// The fallback sequence is explicit so call sites with layered categories
/// (e.g. zone-specific wage contracts) can state their whole chain in one
/// place.
///
/// # Example
/// ```
/// use trip_econ_core_rs::models::rate::{RateSetting, RateTable};
/// use trip_econ_core_rs::rates::{resolve_chain, categories};
/// use rust_decimal::Decimal;
///
/// let table = RateTable::from_settings(vec![RateSetting {
///     key: "fuel_cpm".to_string(),
///     category: categories::GLOBAL.to_string(),
///     value: Decimal::new(62, 2),
///     unit: String::new(),
/// }]);
///
/// // Category-specific value absent, global fallback answers.
/// let rate = resolve_chain(&table, "fuel_cpm", &["owner_operator"]).unwrap();
/// assert_eq!(rate, Decimal::new(62, 2));
/// ```
pub fn resolve_chain(
    table: &RateTable,
    key: &str,
    categories_in_order: &[&str],
) -> Result<Decimal, RateError> {
    let mut tried = Vec::with_capacity(categories_in_order.len() + 2);

    for category in categories_in_order
        .iter()
        .copied()
        .chain([categories::GLOBAL, categories::WILDCARD])
    {
        if let Some(value) = table.get(key, category) {
            return Ok(value);
        }
        tried.push(category.to_string());
    }

    Err(RateError::MissingRate {
        key: key.to_string(),
        tried,
    })
}

/// Resolve `key` under one category with the standard fallback chain
pub fn resolve(table: &RateTable, key: &str, category: &str) -> Result<Decimal, RateError> {
    resolve_chain(table, key, &[category])
}

/// Exact single-pair probe with no fallback
///
/// Used to detect category-specific overrides, e.g. "is there a
/// rent-and-run fuel rate, or should rent-and-run use the company rate?"
pub fn resolve_optional(table: &RateTable, key: &str, category: &str) -> Option<Decimal> {
    table.get(key, category)
}

/// Sum of every setting under the `"weekly"` sentinel category
///
/// An empty weekly category is 0 - absence means "no shared overhead
/// configured", not a missing rate.
pub fn weekly_overhead_total(table: &RateTable) -> Decimal {
    table
        .iter()
        .filter(|(_, category, _)| *category == categories::WEEKLY)
        .map(|(_, _, value)| value)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rate::RateSetting;

    fn table(entries: &[(&str, &str, i64)]) -> RateTable {
        RateTable::from_settings(
            entries
                .iter()
                .map(|(k, c, cents)| RateSetting {
                    key: k.to_string(),
                    category: c.to_string(),
                    value: Decimal::new(*cents, 2),
                    unit: String::new(),
                })
                .collect(),
        )
    }

    #[test]
    fn test_exact_category_wins_over_global() {
        let t = table(&[
            ("fuel_cpm", "owner_operator", 75),
            ("fuel_cpm", "global", 62),
        ]);
        assert_eq!(
            resolve(&t, "fuel_cpm", "owner_operator").unwrap(),
            Decimal::new(75, 2)
        );
    }

    #[test]
    fn test_wildcard_is_last_resort() {
        let t = table(&[("fuel_cpm", "*", 55)]);
        assert_eq!(
            resolve(&t, "fuel_cpm", "company").unwrap(),
            Decimal::new(55, 2)
        );
    }

    #[test]
    fn test_missing_rate_lists_tried_categories() {
        let t = table(&[]);
        let err = resolve_chain(&t, "base_wage_cpm", &["owner_operator:ON"]).unwrap_err();
        assert_eq!(
            err,
            RateError::MissingRate {
                key: "base_wage_cpm".to_string(),
                tried: vec![
                    "owner_operator:ON".to_string(),
                    "global".to_string(),
                    "*".to_string(),
                ],
            }
        );
    }

    #[test]
    fn test_resolve_optional_does_not_fall_back() {
        let t = table(&[("fuel_cpm", "global", 62)]);
        assert_eq!(resolve_optional(&t, "fuel_cpm", "rent_and_run"), None);
        assert_eq!(
            resolve_optional(&t, "fuel_cpm", "global"),
            Some(Decimal::new(62, 2))
        );
    }

    #[test]
    fn test_weekly_overhead_sums_only_weekly_category() {
        let t = table(&[
            ("insurance_weekly", "weekly", 40000),
            ("admin_weekly", "weekly", 25000),
            ("fuel_cpm", "global", 62),
        ]);
        assert_eq!(weekly_overhead_total(&t), Decimal::new(65000, 2));
    }

    #[test]
    fn test_weekly_overhead_empty_is_zero() {
        let t = table(&[("fuel_cpm", "global", 62)]);
        assert_eq!(weekly_overhead_total(&t), Decimal::ZERO);
    }
}
