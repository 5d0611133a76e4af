//! Sampling engine — rolls a dice expression N times and aggregates.
//!
//! Two estimators:
//!
//! - [`estimate_at_least`]: success odds vs a target. Resolves trivial
//!   cases first (target at or below the guaranteed minimum, target above a
//!   finite maximum), then samples a rayon-parallel base phase with
//!   per-chunk seeds (deterministic for a fixed config), then — if no
//!   success appeared — keeps rolling sequentially until a first success or
//!   the configured ceiling. Very low success rates may still round to 0.
//! - [`average_roll`]: mean total and mean explosion-chains per roll.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::constants::{
    DEFAULT_SIMULATION_SEED, DICE_AVERAGES_SIMULATION_STEPS, LOW_SUCCESS_COUNT,
    SUCCESS_ODDS_BASE_SIMULATION_STEPS, SUCCESS_ODDS_MAXIMUM_SIMULATION_STEPS,
};
use crate::types::DiceExpr;

/// Steps per rayon work unit in the base phase.
const CHUNK_STEPS: usize = 65_536;

/// Explicit knobs for a simulation run.
#[derive(Clone, Copy, Debug)]
pub struct SimulationConfig {
    /// Base sample size for odds estimation.
    pub base_steps: usize,
    /// Ceiling for the first-success extension phase.
    pub max_steps: usize,
    /// PRNG seed; a fixed seed makes the whole run reproducible.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            base_steps: SUCCESS_ODDS_BASE_SIMULATION_STEPS,
            max_steps: SUCCESS_ODDS_MAXIMUM_SIMULATION_STEPS,
            seed: DEFAULT_SIMULATION_SEED,
        }
    }
}

/// One sampled rollout of an expression.
#[derive(Clone, Copy, Debug)]
pub struct RollOutcome {
    /// Total including all explosions and the modifier.
    pub total: i32,
    /// Number of dice whose chain exploded at least once.
    pub explosions: u32,
}

/// Result of an odds estimation run.
#[derive(Clone, Copy, Debug)]
pub struct OddsEstimate {
    /// Estimated probability of meeting or beating the target.
    pub odds: f64,
    /// Rolls actually taken (0 when resolved by a trivial bound).
    pub steps: usize,
    /// Successful rolls observed.
    pub successes: u64,
    /// Whether the extension phase past the base sample was needed.
    pub long_simulation: bool,
    /// Whether fewer than [`LOW_SUCCESS_COUNT`] successes were seen.
    pub low_success_rate: bool,
}

/// Result of an averaging run.
#[derive(Clone, Copy, Debug)]
pub struct AverageEstimate {
    /// Mean total per roll.
    pub mean: f64,
    /// Mean number of exploded die-chains per roll.
    pub explosions_per_roll: f64,
}

/// Roll a full expression once: every die in every group, chasing explosion
/// chains, plus the modifier.
pub fn roll_expr(expr: &DiceExpr, rng: &mut SmallRng) -> RollOutcome {
    let mut total = 0i32;
    let mut explosions = 0u32;
    for group in &expr.dice {
        let sides = group.sides as i32;
        for _ in 0..group.count {
            let mut roll = rng.random_range(1..=sides);
            total += roll;
            let mut chained = false;
            while group.exploding && roll == sides {
                roll = rng.random_range(1..=sides);
                total += roll;
                chained = true;
            }
            if chained {
                explosions += 1;
            }
        }
    }
    RollOutcome {
        total: total + expr.modifier,
        explosions,
    }
}

/// Estimate the probability that `expr` totals at least `target`.
pub fn estimate_at_least(expr: &DiceExpr, target: i32, config: SimulationConfig) -> OddsEstimate {
    // Trivial bounds first, as plain probability values.
    if target <= expr.lower_limit() {
        return OddsEstimate {
            odds: 1.0,
            steps: 0,
            successes: 0,
            long_simulation: false,
            low_success_rate: false,
        };
    }
    if let Some(upper) = expr.upper_limit() {
        if target > upper {
            return OddsEstimate {
                odds: 0.0,
                steps: 0,
                successes: 0,
                long_simulation: false,
                low_success_rate: false,
            };
        }
    }

    // Base phase: fixed-size chunks, one derived seed per chunk. Summing u64
    // success counts keeps the result independent of rayon scheduling.
    let base_steps = config.base_steps.max(1);
    let num_chunks = base_steps.div_ceil(CHUNK_STEPS);
    let mut successes: u64 = (0..num_chunks)
        .into_par_iter()
        .map(|chunk| {
            let mut rng = SmallRng::seed_from_u64(config.seed.wrapping_add(chunk as u64));
            let steps = CHUNK_STEPS.min(base_steps - chunk * CHUNK_STEPS);
            let mut hits = 0u64;
            for _ in 0..steps {
                if roll_expr(expr, &mut rng).total >= target {
                    hits += 1;
                }
            }
            hits
        })
        .sum();

    // Extension phase: hunt for a first success so rare events don't report
    // a flat zero within the ceiling.
    let mut steps = base_steps;
    let mut long_simulation = false;
    if successes == 0 && steps < config.max_steps {
        long_simulation = true;
        let mut rng = SmallRng::seed_from_u64(config.seed.wrapping_add(num_chunks as u64));
        while successes == 0 && steps < config.max_steps {
            if roll_expr(expr, &mut rng).total >= target {
                successes += 1;
            }
            steps += 1;
        }
    }

    OddsEstimate {
        odds: successes as f64 / steps as f64,
        steps,
        successes,
        long_simulation,
        low_success_rate: successes < LOW_SUCCESS_COUNT,
    }
}

/// Estimate the mean total and mean explosions of `expr` over `steps` rolls.
pub fn average_roll(expr: &DiceExpr, steps: usize, seed: u64) -> AverageEstimate {
    let steps = steps.max(1);
    let num_chunks = steps.div_ceil(CHUNK_STEPS);
    let (total_sum, explosion_sum) = (0..num_chunks)
        .into_par_iter()
        .map(|chunk| {
            let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(chunk as u64));
            let n = CHUNK_STEPS.min(steps - chunk * CHUNK_STEPS);
            let mut totals = 0i64;
            let mut explosions = 0u64;
            for _ in 0..n {
                let outcome = roll_expr(expr, &mut rng);
                totals += outcome.total as i64;
                explosions += outcome.explosions as u64;
            }
            (totals, explosions)
        })
        .reduce(|| (0i64, 0u64), |a, b| (a.0 + b.0, a.1 + b.1));

    AverageEstimate {
        mean: total_sum as f64 / steps as f64,
        explosions_per_roll: explosion_sum as f64 / steps as f64,
    }
}

/// Convenience: averaging run with the default step count and seed.
pub fn average_roll_default(expr: &DiceExpr) -> AverageEstimate {
    average_roll(expr, DICE_AVERAGES_SIMULATION_STEPS, DEFAULT_SIMULATION_SEED)
}
