//! Trip and unit facts
//!
//! Inputs to a single trip cost calculation. These are normalized records
//! handed in by the persistence collaborator; the engine never loads them
//! itself.
//!
//! # Invariants
//!
//! - `miles >= 0`. A zero-mile trip is legal: every per-mile component is
//!   defined as zero, never a division error.
//! - Driver classification is one of exactly three mutually exclusive kinds.
//! - `revenue: None` means "unknown", which stays distinct from a revenue of
//!   zero all the way through the margin math.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Driver classification
///
/// Determines which rate categories a trip's wage and fuel components
/// resolve under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverClass {
    /// Employed company driver
    Company,

    /// Owner-operator running their own tractor
    OwnerOperator,

    /// Rent-and-run: rents a company tractor, paid like a contractor
    RentAndRun,
}

impl DriverClass {
    /// Rate category name for this classification
    pub fn category(&self) -> &'static str {
        match self {
            DriverClass::Company => "company",
            DriverClass::OwnerOperator => "owner_operator",
            DriverClass::RentAndRun => "rent_and_run",
        }
    }
}

/// Counts of discrete billable events on a trip
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCounts {
    /// International border crossings
    pub border_crossings: u32,

    /// Pickup stops
    pub pickups: u32,

    /// Delivery stops
    pub deliveries: u32,

    /// Drop-and-hook operations
    pub drop_hooks: u32,
}

/// Inputs to one trip cost calculation
///
/// # Example
/// ```
/// use trip_econ_core_rs::models::trip::{DriverClass, EventCounts, TripFacts};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
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
/// assert_eq!(trip.driver_class.category(), "company");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripFacts {
    /// Driver classification
    pub driver_class: DriverClass,

    /// Zone or home-base string (used for owner-operator wage scoping)
    pub zone: String,

    /// Total trip miles
    pub miles: Decimal,

    /// Billable event counts
    pub events: EventCounts,

    /// Assigned tractor identifier
    pub unit_id: String,

    /// Date anchoring which 7-day window this trip shares fixed costs with
    pub week_start: NaiveDate,

    /// Trip revenue; `None` = unknown (distinct from zero)
    pub revenue: Option<Decimal>,
}

/// One logged mileage record for fixed-cost allocation
///
/// The collaborator supplies every trip mileage record it has logged for the
/// relevant tractor; the allocator filters by unit and Monday-anchored week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MileageEntry {
    /// Tractor the miles were run on
    pub unit_id: String,

    /// Week anchor of the logged trip
    pub week_start: NaiveDate,

    /// Miles logged
    pub miles: Decimal,
}

/// Tractor-level facts for fixed-cost allocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitFacts {
    /// The unit's own declared weekly fixed cost; `None` treated as 0
    pub weekly_fixed_cost: Option<Decimal>,

    /// Mileage log known at calculation time (no retroactive redistribution)
    pub mileage_log: Vec<MileageEntry>,
}

/// Snap a date back to the Monday of its ISO week
///
/// Two trips share a fixed-cost window exactly when their `week_start`
/// dates snap to the same Monday.
///
/// # Example
/// ```
/// use trip_econ_core_rs::models::trip::monday_of_week;
/// use chrono::NaiveDate;
///
/// let thursday = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// assert_eq!(monday_of_week(thursday), monday);
/// assert_eq!(monday_of_week(monday), monday);
/// ```
pub fn monday_of_week(date: NaiveDate) -> NaiveDate {
    let days_from_monday = date.weekday().num_days_from_monday() as i64;
    date - Duration::days(days_from_monday)
}
