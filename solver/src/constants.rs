//! Engine constants and default simulation step counts.
//!
//! The step counts are defaults for [`crate::simulation::SimulationConfig`];
//! callers (binaries, HTTP server, tests) override them per run rather than
//! relying on module-level globals.

/// Smallest legal die: a die needs at least 2 faces for "rolled its maximum"
/// to be a proper explosion trigger. A 1-sided exploding die re-rolls forever.
pub const MIN_DIE_SIDES: u32 = 2;

/// Rolls used when estimating the average value of a dice expression.
pub const DICE_AVERAGES_SIMULATION_STEPS: usize = 30_000;

/// Base sample size for success-odds estimation.
pub const SUCCESS_ODDS_BASE_SIMULATION_STEPS: usize = 5_000_000;

/// Hard ceiling for the extension phase that hunts for a first success when
/// the base sample produced none. Results may still round to 0%.
pub const SUCCESS_ODDS_MAXIMUM_SIMULATION_STEPS: usize = 50_000_000;

/// Decimal places when printing averages.
pub const AVERAGES_PRECISION: usize = 2;

/// Decimal places when printing success percentages.
pub const PERCENTAGES_PRECISION: usize = 4;

/// Fewer successes than this flags an estimate as statistically shaky.
pub const LOW_SUCCESS_COUNT: u64 = 10;

/// Default PRNG seed for reproducible simulation runs.
pub const DEFAULT_SIMULATION_SEED: u64 = 42;
