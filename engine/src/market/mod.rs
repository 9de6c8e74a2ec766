//! Market rate estimator
//!
//! Synthetic competitive lane pricing. Independent of the rate resolver:
//! given two market texts and a directory of market facts, it produces a
//! rate-per-mile and a labeled source.
//!
//! # Determinism
//!
//! The model contains no external random state. The "noise" that keeps
//! lanes from pricing on a perfectly smooth curve is derived from a SHA-256
//! hash of the lane key, so the same lane in the same season always prices
//! identically - across calls, processes, and machines.
//!
//! # Failure mode
//!
//! Market text that cannot be normalized to a known code is
//! [`MarketError::UnknownMarket`]. The caller shows "no rate available";
//! the engine never fabricates a number for an unknown lane.

pub mod codes;
pub mod directory;
pub mod estimator;
pub mod noise;

pub use codes::normalize_market_code;
pub use directory::MarketDirectory;
pub use estimator::{estimate_market_rate, RATE_CEILING, RATE_FLOOR};

use thiserror::Error;

/// Market/lane resolution failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MarketError {
    /// Input text could not be normalized to any known market code
    #[error("unknown market {input:?}")]
    UnknownMarket { input: String },
}
