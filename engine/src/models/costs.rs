//! Computed cost breakdown
//!
//! Output of a trip recalculation. Not persisted by the engine; the host
//! snapshots it downstream if it wants history.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-mile cost components and derived totals for one trip
///
/// `profit` and `margin` are `None` when revenue is unknown - an unknown
/// margin and a zero margin are different states and stay distinguishable
/// downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Driver wage cost per mile, including percentage uplifts
    pub wage_cpm: Decimal,

    /// Fuel + truck maintenance + trailer maintenance per mile
    pub rolling_cpm: Decimal,

    /// Per-event fees amortized over trip miles
    pub addon_cpm: Decimal,

    /// Allocated share of weekly fixed costs per mile
    pub fixed_cpm: Decimal,

    /// Sum of the four per-mile components
    pub total_cpm: Decimal,

    /// `total_cpm` × trip miles
    pub total_cost: Decimal,

    /// Revenue − total cost; `None` when revenue is unknown
    pub profit: Option<Decimal>,

    /// Profit ÷ revenue; `None` when revenue is unknown or zero
    pub margin: Option<Decimal>,
}
