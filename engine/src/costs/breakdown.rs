//! Per-mile cost components driven by the rate table
//!
//! Wage and rolling are true per-mile rates; add-on is a per-trip total of
//! event fees amortized over the trip's miles, so a short trip with many
//! stops carries a much higher add-on CPM than a long one with the same
//! stops.

use crate::models::rate::RateTable;
use crate::models::trip::{DriverClass, TripFacts};
use crate::rates::{keys, resolve, resolve_optional, RateError};
use rust_decimal::Decimal;

/// Wage category for a trip
///
/// Owner-operators are paid on zone-specific contracts, so their base wage
/// resolves under the compound `"owner_operator:{zone}"` category. Other
/// classifications resolve under the classification alone.
fn wage_category(trip: &TripFacts) -> String {
    match trip.driver_class {
        DriverClass::OwnerOperator => {
            format!("{}:{}", trip.driver_class.category(), trip.zone)
        }
        _ => trip.driver_class.category().to_string(),
    }
}

/// Driver wage cost per mile
///
/// Base wage for the classification, uplifted by the four global wage
/// percentages (benefits, performance, safety, step), each a fraction:
///
/// ```text
/// wage CPM = base × (1 + benefits + performance + safety + step)
/// ```
pub fn wage_cost_per_mile(trip: &TripFacts, table: &RateTable) -> Result<Decimal, RateError> {
    use crate::rates::categories::GLOBAL;

    let base = resolve(table, keys::BASE_WAGE_CPM, &wage_category(trip))?;

    let uplift = resolve(table, keys::BENEFITS_PCT, GLOBAL)?
        + resolve(table, keys::PERFORMANCE_PCT, GLOBAL)?
        + resolve(table, keys::SAFETY_PCT, GLOBAL)?
        + resolve(table, keys::STEP_PCT, GLOBAL)?;

    Ok((base * (Decimal::ONE + uplift)).round_dp(4))
}

/// Fuel cost per mile for a trip's classification
///
/// Owner-operators buy their own fuel and carry their own rate.
/// Rent-and-run uses a rent-and-run override when one exists, otherwise
/// the company rate.
fn fuel_cost_per_mile(trip: &TripFacts, table: &RateTable) -> Result<Decimal, RateError> {
    match trip.driver_class {
        DriverClass::OwnerOperator => {
            resolve(table, keys::FUEL_CPM, DriverClass::OwnerOperator.category())
        }
        DriverClass::RentAndRun => {
            match resolve_optional(table, keys::FUEL_CPM, DriverClass::RentAndRun.category()) {
                Some(rate) => Ok(rate),
                None => resolve(table, keys::FUEL_CPM, DriverClass::Company.category()),
            }
        }
        DriverClass::Company => resolve(table, keys::FUEL_CPM, DriverClass::Company.category()),
    }
}

/// Rolling cost per mile: fuel + truck maintenance + trailer maintenance
pub fn rolling_cost_per_mile(trip: &TripFacts, table: &RateTable) -> Result<Decimal, RateError> {
    let class = trip.driver_class.category();

    let fuel = fuel_cost_per_mile(trip, table)?;
    let truck = resolve(table, keys::TRUCK_MAINTENANCE_CPM, class)?;
    let trailer = resolve(table, keys::TRAILER_MAINTENANCE_CPM, class)?;

    Ok((fuel + truck + trailer).round_dp(4))
}

/// Add-on cost per mile: per-event fees amortized over trip miles
///
/// Defined as a total cost first, then divided by miles. A trip with no
/// miles has nothing to amortize over, so its add-on CPM is zero.
pub fn addon_cost_per_mile(trip: &TripFacts, table: &RateTable) -> Result<Decimal, RateError> {
    if trip.miles <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    let class = trip.driver_class.category();
    let events = &trip.events;

    let total = Decimal::from(events.border_crossings)
        * resolve(table, keys::BORDER_CROSSING_FEE, class)?
        + Decimal::from(events.pickups) * resolve(table, keys::PICKUP_FEE, class)?
        + Decimal::from(events.deliveries) * resolve(table, keys::DELIVERY_FEE, class)?
        + Decimal::from(events.drop_hooks) * resolve(table, keys::DROP_HOOK_FEE, class)?;

    Ok((total / trip.miles).round_dp(4))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rate::RateSetting;
    use crate::models::trip::EventCounts;
    use chrono::NaiveDate;

    fn table(entries: &[(&str, &str, &str)]) -> RateTable {
        RateTable::from_settings(
            entries
                .iter()
                .map(|(k, c, v)| RateSetting {
                    key: k.to_string(),
                    category: c.to_string(),
                    value: v.parse::<Decimal>().unwrap(),
                    unit: String::new(),
                })
                .collect(),
        )
    }

    fn trip(class: DriverClass, zone: &str, miles: i64) -> TripFacts {
        TripFacts {
            driver_class: class,
            zone: zone.to_string(),
            miles: Decimal::from(miles),
            events: EventCounts::default(),
            unit_id: "T-1".to_string(),
            week_start: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            revenue: None,
        }
    }

    #[test]
    fn test_wage_uplift_applied() {
        let t = table(&[
            ("base_wage_cpm", "company", "0.50"),
            ("benefits_pct", "global", "0.04"),
            ("performance_pct", "global", "0.02"),
            ("safety_pct", "global", "0.01"),
            ("step_pct", "global", "0.03"),
        ]);
        let wage = wage_cost_per_mile(&trip(DriverClass::Company, "ON", 300), &t).unwrap();
        // 0.50 × 1.10
        assert_eq!(wage, "0.55".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_owner_operator_wage_uses_zone_category() {
        let t = table(&[
            ("base_wage_cpm", "owner_operator:MB", "1.10"),
            ("base_wage_cpm", "global", "0.50"),
            ("benefits_pct", "global", "0"),
            ("performance_pct", "global", "0"),
            ("safety_pct", "global", "0"),
            ("step_pct", "global", "0"),
        ]);
        let wage = wage_cost_per_mile(&trip(DriverClass::OwnerOperator, "MB", 300), &t).unwrap();
        assert_eq!(wage, "1.10".parse::<Decimal>().unwrap());

        // Unconfigured zone falls through to global
        let wage = wage_cost_per_mile(&trip(DriverClass::OwnerOperator, "SK", 300), &t).unwrap();
        assert_eq!(wage, "0.50".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_rent_and_run_fuel_falls_back_to_company() {
        let t = table(&[
            ("fuel_cpm", "company", "0.62"),
            ("truck_maintenance_cpm", "global", "0.12"),
            ("trailer_maintenance_cpm", "global", "0.06"),
        ]);
        let rolling =
            rolling_cost_per_mile(&trip(DriverClass::RentAndRun, "ON", 300), &t).unwrap();
        assert_eq!(rolling, "0.80".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_rent_and_run_fuel_override_wins() {
        let t = table(&[
            ("fuel_cpm", "company", "0.62"),
            ("fuel_cpm", "rent_and_run", "0.70"),
            ("truck_maintenance_cpm", "global", "0.12"),
            ("trailer_maintenance_cpm", "global", "0.06"),
        ]);
        let rolling =
            rolling_cost_per_mile(&trip(DriverClass::RentAndRun, "ON", 300), &t).unwrap();
        assert_eq!(rolling, "0.88".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_addon_amortized_over_miles() {
        let t = table(&[
            ("border_crossing_fee", "global", "45"),
            ("pickup_fee", "global", "30"),
            ("delivery_fee", "global", "30"),
            ("drop_hook_fee", "global", "25"),
        ]);
        let mut short = trip(DriverClass::Company, "ON", 300);
        short.events = EventCounts {
            pickups: 1,
            deliveries: 1,
            ..Default::default()
        };
        assert_eq!(
            addon_cost_per_mile(&short, &t).unwrap(),
            "0.20".parse::<Decimal>().unwrap()
        );

        // Same events over a longer trip dilute the CPM
        let mut long = short.clone();
        long.miles = Decimal::from(1200);
        assert_eq!(
            addon_cost_per_mile(&long, &t).unwrap(),
            "0.05".parse::<Decimal>().unwrap()
        );
    }

    #[test]
    fn test_addon_on_zero_mile_trip_is_zero() {
        let t = table(&[
            ("border_crossing_fee", "global", "45"),
            ("pickup_fee", "global", "30"),
            ("delivery_fee", "global", "30"),
            ("drop_hook_fee", "global", "25"),
        ]);
        let mut deadhead = trip(DriverClass::Company, "ON", 0);
        deadhead.events = EventCounts {
            pickups: 1,
            deliveries: 1,
            ..Default::default()
        };
        assert_eq!(addon_cost_per_mile(&deadhead, &t).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_missing_fee_is_fatal() {
        let t = table(&[("pickup_fee", "global", "30")]);
        let mut trip = trip(DriverClass::Company, "ON", 300);
        trip.events.border_crossings = 1;
        assert!(addon_cost_per_mile(&trip, &t).is_err());
    }
}
