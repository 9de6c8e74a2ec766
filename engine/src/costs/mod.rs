//! Trip cost engine
//!
//! Combines the per-mile cost components into a full [`CostBreakdown`]:
//!
//! ```text
//! wage CPM     = base wage × (1 + benefits% + performance% + safety% + step%)
//! rolling CPM  = fuel + truck maintenance + trailer maintenance
//! add-on CPM   = Σ(event count × fee) ÷ miles
//! fixed CPM    = weekly overheads ÷ tractor-week mileage basis
//! total CPM    = wage + rolling + add-on + fixed
//! total cost   = total CPM × miles
//! profit       = revenue − total cost        (unknown revenue → unknown)
//! margin       = profit ÷ revenue            (unknown/zero revenue → unknown)
//! ```
//!
//! # Critical Invariants
//!
//! 1. miles = 0 is a defined all-zero result, never a division error
//! 2. A required rate missing under every fallback category is fatal
//!    ([`RateError::MissingRate`]), never a silent zero
//! 3. Unknown revenue produces `profit`/`margin` of `None`, never 0

pub mod breakdown;
pub mod fixed;

use crate::models::costs::CostBreakdown;
use crate::models::rate::RateTable;
use crate::models::trip::{TripFacts, UnitFacts};
use crate::rates::RateError;
use rust_decimal::Decimal;

pub use breakdown::{addon_cost_per_mile, rolling_cost_per_mile, wage_cost_per_mile};
pub use fixed::fixed_cost_per_mile;

/// Compute the full cost breakdown for one trip
///
/// This is the per-trip recalculation entry point: the three rate-driven
/// components and the fixed-cost allocation are computed together and fed
/// into the margin math.
///
/// # Example
/// ```
/// use trip_econ_core_rs::costs::compute_cost_breakdown;
/// use trip_econ_core_rs::models::rate::{RateSetting, RateTable};
/// use trip_econ_core_rs::models::trip::{DriverClass, EventCounts, TripFacts, UnitFacts};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let rate = |key: &str, category: &str, value: Decimal| RateSetting {
///     key: key.to_string(),
///     category: category.to_string(),
///     value,
///     unit: String::new(),
/// };
/// let table = RateTable::from_settings(vec![
///     rate("base_wage_cpm", "company", Decimal::new(55, 2)),
///     rate("benefits_pct", "global", Decimal::ZERO),
///     rate("performance_pct", "global", Decimal::ZERO),
///     rate("safety_pct", "global", Decimal::ZERO),
///     rate("step_pct", "global", Decimal::ZERO),
///     rate("fuel_cpm", "company", Decimal::new(62, 2)),
///     rate("truck_maintenance_cpm", "global", Decimal::new(12, 2)),
///     rate("trailer_maintenance_cpm", "global", Decimal::new(6, 2)),
///     rate("border_crossing_fee", "global", Decimal::from(45)),
///     rate("pickup_fee", "global", Decimal::from(30)),
///     rate("delivery_fee", "global", Decimal::from(30)),
///     rate("drop_hook_fee", "global", Decimal::from(25)),
/// ]);
///
/// let trip = TripFacts {
///     driver_class: DriverClass::Company,
///     zone: "ON".to_string(),
///     miles: Decimal::from(300),
///     events: EventCounts { pickups: 1, deliveries: 1, ..Default::default() },
///     unit_id: "T-104".to_string(),
///     week_start: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
///     revenue: Some(Decimal::from(900)),
/// };
///
/// let breakdown = compute_cost_breakdown(&trip, &UnitFacts::default(), &table).unwrap();
/// assert_eq!(breakdown.addon_cpm, Decimal::new(20, 2)); // (30+30)/300
/// assert!(breakdown.profit.is_some());
/// ```
pub fn compute_cost_breakdown(
    trip: &TripFacts,
    unit: &UnitFacts,
    table: &RateTable,
) -> Result<CostBreakdown, RateError> {
    // Zero-mile trips are a defined zero-cost result; no rate is resolved
    // and no division is attempted.
    if trip.miles <= Decimal::ZERO {
        return Ok(zero_mile_breakdown(trip.revenue));
    }

    let wage_cpm = wage_cost_per_mile(trip, table)?;
    let rolling_cpm = rolling_cost_per_mile(trip, table)?;
    let addon_cpm = addon_cost_per_mile(trip, table)?;
    let fixed_cpm = fixed_cost_per_mile(trip, unit, table);

    let total_cpm = wage_cpm + rolling_cpm + addon_cpm + fixed_cpm;
    let total_cost = (total_cpm * trip.miles).round_dp(2);

    let (profit, margin) = profit_and_margin(trip.revenue, total_cost);

    Ok(CostBreakdown {
        wage_cpm,
        rolling_cpm,
        addon_cpm,
        fixed_cpm,
        total_cpm,
        total_cost,
        profit,
        margin,
    })
}

/// Margin math: profit and margin stay unknown unless revenue is known
/// (and, for margin, non-zero)
fn profit_and_margin(
    revenue: Option<Decimal>,
    total_cost: Decimal,
) -> (Option<Decimal>, Option<Decimal>) {
    match revenue {
        None => (None, None),
        Some(revenue) => {
            let profit = revenue - total_cost;
            let margin = if revenue.is_zero() {
                None
            } else {
                Some((profit / revenue).round_dp(4))
            };
            (Some(profit), margin)
        }
    }
}

fn zero_mile_breakdown(revenue: Option<Decimal>) -> CostBreakdown {
    let (profit, margin) = profit_and_margin(revenue, Decimal::ZERO);
    CostBreakdown {
        profit,
        margin,
        ..CostBreakdown::default()
    }
}
