//! Method selection: strongest applicable estimator for one expression.
//!
//! Per-query dispatch shared by the binaries and the HTTP API:
//!
//! | Expression shape | Method |
//! |------------------|--------|
//! | No dice, or every die exploding | exact enumeration |
//! | One lone non-exploding die | discrete-uniform closed form |
//! | Anything else | Monte-Carlo simulation |
//!
//! The modifier is folded into the target before the exact/closed paths
//! (`effective_target = target - modifier`); the simulation path adds the
//! modifier to every sampled total instead, which is equivalent.

use crate::closed_form::flat_die_at_least;
use crate::enumeration::probability_at_least;
use crate::simulation::{estimate_at_least, OddsEstimate, SimulationConfig};
use crate::types::DiceExpr;

/// How a probability was computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OddsMethod {
    /// Exhaustive rollout enumeration.
    Exact,
    /// Single-die discrete-uniform tail.
    ClosedForm,
    /// Monte-Carlo sampling.
    Simulation,
}

impl OddsMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            OddsMethod::Exact => "exact",
            OddsMethod::ClosedForm => "closed_form",
            OddsMethod::Simulation => "simulation",
        }
    }
}

/// A computed probability plus how it was obtained.
#[derive(Clone, Copy, Debug)]
pub struct OddsReport {
    /// Probability of meeting or beating the target.
    pub probability: f64,
    /// Which estimator produced it.
    pub method: OddsMethod,
    /// Sampling details when the method was [`OddsMethod::Simulation`].
    pub estimate: Option<OddsEstimate>,
}

/// Probability that `expr` totals at least `target`, by the strongest
/// applicable method. `target` is the raw target; modifier folding happens
/// here.
pub fn compute_odds(
    expr: &DiceExpr,
    target: i32,
    config: SimulationConfig,
) -> Result<OddsReport, String> {
    let effective_target = target - expr.modifier;

    if expr.is_all_exploding() {
        // Covers the empty-dice degenerate case too.
        let probability = probability_at_least(&expr.die_sizes(), effective_target)?;
        return Ok(OddsReport {
            probability,
            method: OddsMethod::Exact,
            estimate: None,
        });
    }

    if expr.dice.len() == 1 && expr.dice[0].count == 1 {
        let probability = flat_die_at_least(expr.dice[0].sides, effective_target);
        return Ok(OddsReport {
            probability,
            method: OddsMethod::ClosedForm,
            estimate: None,
        });
    }

    let estimate = estimate_at_least(expr, target, config);
    Ok(OddsReport {
        probability: estimate.odds,
        method: OddsMethod::Simulation,
        estimate: Some(estimate),
    })
}
