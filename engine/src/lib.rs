//! Trip Economics & Market Rate Engine
//!
//! Deterministic computation core for fleet trip economics: cost
//! breakdowns, profit/margin projection, synthetic market lane pricing,
//! and delay-risk scoring.
//!
//! # Architecture
//!
//! - **models**: Domain types (rate table, trip facts, breakdowns, markets)
//! - **rates**: Fallback-chain rate resolution
//! - **costs**: Cost breakdown calculator, fixed-cost allocator, margin math
//! - **market**: Synthetic market rate estimator
//! - **risk**: ETA and delay-risk estimator
//! - **geo**: Great-circle distance
//!
//! # Critical Invariants
//!
//! 1. All money values are `Decimal`; the geographic models use f64 and
//!    never feed the monetary path
//! 2. Every entry point is a pure function of its inputs: no I/O, no
//!    caching, no shared mutable state, no external random state
//! 3. Unknown values (margin, risk) stay tagged as unknown; they are never
//!    collapsed into zero

// Module declarations
pub mod costs;
pub mod geo;
pub mod market;
pub mod models;
pub mod rates;
pub mod risk;

// Re-exports for convenience
pub use costs::compute_cost_breakdown;
pub use geo::{great_circle_miles, GeoPoint};
pub use market::{
    estimate_market_rate, normalize_market_code, MarketDirectory, MarketError, RATE_CEILING,
    RATE_FLOOR,
};
pub use models::{
    costs::CostBreakdown,
    market::{lane_key, Country, LaneOverride, LaneQuote, Market},
    rate::{RateSetting, RateTable},
    trip::{monday_of_week, DriverClass, EventCounts, MileageEntry, TripFacts, UnitFacts},
};
pub use rates::{resolve, resolve_chain, resolve_optional, weekly_overhead_total, RateError};
pub use risk::{
    estimate_delay_risk, DelayEstimate, DelayRisk, DeliveryWindow, DestinationFacts,
    AVERAGE_ROAD_SPEED_MPH,
};
