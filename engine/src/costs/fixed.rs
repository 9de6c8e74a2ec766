//! Fixed cost allocation
//!
//! A tractor's weekly fixed cost plus the shared weekly overheads are
//! spread across the miles that tractor actually ran in the trip's week
//! (Monday-anchored). The allocation basis is whatever mileage is logged
//! at calculation time; once more trips land later in the week, earlier
//! recalculations are not redistributed.

use crate::models::rate::RateTable;
use crate::models::trip::{monday_of_week, TripFacts, UnitFacts};
use crate::rates::weekly_overhead_total;
use rust_decimal::Decimal;

/// Allocated fixed cost per mile for this trip
///
/// ```text
/// overheads = Σ(weekly-category settings) + unit weekly fixed cost
/// basis     = Σ miles logged for this unit in this trip's Monday week
/// fixed CPM = overheads ÷ basis   (0 when the basis is 0)
/// ```
///
/// A zero basis happens legitimately for the first trip of a tractor-week
/// before any mileage is committed; it yields 0, never a division error.
pub fn fixed_cost_per_mile(trip: &TripFacts, unit: &UnitFacts, table: &RateTable) -> Decimal {
    let overheads =
        weekly_overhead_total(table) + unit.weekly_fixed_cost.unwrap_or(Decimal::ZERO);

    let basis = week_mileage_basis(trip, unit);

    if basis <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        (overheads / basis).round_dp(4)
    }
}

/// Total miles logged for the trip's tractor in the trip's Monday week
fn week_mileage_basis(trip: &TripFacts, unit: &UnitFacts) -> Decimal {
    let week = monday_of_week(trip.week_start);

    unit.mileage_log
        .iter()
        .filter(|entry| entry.unit_id == trip.unit_id)
        .filter(|entry| monday_of_week(entry.week_start) == week)
        .map(|entry| entry.miles)
        .sum()
}
