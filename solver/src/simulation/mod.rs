//! Monte-Carlo estimation for dice expressions.
//!
//! - [`engine`]: Core sampling (roll an expression N times, estimate odds
//!   and averages)
//!
//! Used where the exact engine does not apply: sums of non-exploding dice
//! and mixed exploding/non-exploding expressions.

pub mod engine;

pub use engine::{
    average_roll, average_roll_default, estimate_at_least, roll_expr, AverageEstimate,
    OddsEstimate, RollOutcome, SimulationConfig,
};
