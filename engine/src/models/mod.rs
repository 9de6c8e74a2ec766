//! Domain models
//!
//! Plain data types shared across the engine:
//! - `rate`: rate settings and the flat rate-table snapshot
//! - `trip`: trip facts, driver classification, event counts, unit facts
//! - `costs`: the computed cost breakdown
//! - `market`: market definitions, the market directory, lane quotes
//!
//! CRITICAL: All money values are `rust_decimal::Decimal`. The market and
//! delay models, which are continuous geographic math, use `f64` and never
//! feed back into the monetary cost path.

pub mod costs;
pub mod market;
pub mod rate;
pub mod trip;
