//! Exact exploding-dice probability by exhaustive rollout enumeration.
//!
//! The engine starts from a synthetic state in which every die has "just
//! rolled its own maximum" (forcing a first real roll of all dice), then
//! recursively expands every way the currently-exploding subset can resolve:
//!
//! 1. Collect `remaining`: the dice whose latest face equalled their size.
//!    Empty → dead-end leaf, the branch can never grow again.
//! 2. Walk the cartesian product of `1..=sides` over `remaining` with an
//!    odometer over a scratch buffer (no per-level materialization of the
//!    full product). Each of the `k = Π sides` combinations carries
//!    conditional probability `1/k`.
//! 3. A combination whose running total reaches the target is a terminal
//!    **success leaf** — whatever its component dice might have gone on to
//!    roll cannot un-cross the target. Anything short of the target recurses.
//!
//! Termination needs no artificial depth cap: every live branch adds at
//! least 1 to its running total per level, so no branch survives past
//! `target` levels, and sibling probabilities always partition the parent's
//! mass exactly.
//!
//! Success leaves are disjoint paths of one probability tree, so the overall
//! probability is their **sum**. For combining *independent* alternatives
//! (separate pools where any one may beat the target) use
//! [`probability_of_any`] instead.
//!
//! Probabilities for extreme targets can underflow f64 — that is a precision
//! limitation of the representation, not an error, and is deliberately not
//! guarded against.

use crate::constants::MIN_DIE_SIDES;
use crate::types::FaceRoll;

/// A fully-resolved rollout branch whose running total reached the target.
#[derive(Clone, Debug)]
pub struct SuccessLeaf {
    /// Absolute probability of this exact rollout sequence occurring,
    /// within the full sample space of all rolls.
    pub probability: f64,
    /// Running total at the moment the target was first met or beaten.
    pub total: i32,
    /// The final combination of (die, face) rolls, the one that crossed.
    pub faces: Vec<FaceRoll>,
    /// Prior combinations on this branch, oldest first, excluding the
    /// synthetic configuration entry.
    pub history: Vec<Vec<FaceRoll>>,
}

/// One partial rollout during enumeration. Children are constructed fresh
/// from their parent; a state is never mutated after construction.
struct RolloutState {
    /// Probability that this exact partial sequence occurs.
    probability: f64,
    /// Sum of all real die faces rolled so far (0 in the synthetic state).
    total: i32,
    /// Most recent combination; in the synthetic state, every die is marked
    /// as having rolled its maximum so that all dice roll at least once.
    faces: Vec<FaceRoll>,
    /// Past combinations, oldest first.
    history: Vec<Vec<FaceRoll>>,
}

/// Probability that the sum of the given exploding dice, including all
/// explosions, is at least `target`.
///
/// Each entry of `dice` is a die size (faces valued `1..=size`, uniform).
/// Sizes below [`MIN_DIE_SIDES`] are a domain error. An empty dice list is a
/// degenerate case: certain success for `target <= 0`, certain failure
/// otherwise. A target at or below the number of dice is guaranteed (every
/// face is at least 1) and short-circuits to exactly 1.0.
///
/// The result is deterministic: identical inputs produce bit-identical
/// output.
pub fn probability_at_least(dice: &[u32], target: i32) -> Result<f64, String> {
    validate_dice(dice)?;
    if dice.is_empty() {
        return Ok(if target <= 0 { 1.0 } else { 0.0 });
    }
    if target <= dice.len() as i32 {
        return Ok(1.0);
    }
    let leaves = enumerate_success_leaves(dice, target);
    Ok(leaves.iter().map(|leaf| leaf.probability).sum())
}

/// Every target-crossing rollout for the given dice and target, with per-leaf
/// probability, final total, final face combination, and branch history.
///
/// Introspection companion to [`probability_at_least`]; the sum of the leaf
/// probabilities is the overall success probability.
pub fn success_rollouts(dice: &[u32], target: i32) -> Result<Vec<SuccessLeaf>, String> {
    validate_dice(dice)?;
    if dice.is_empty() {
        return Ok(Vec::new());
    }
    Ok(enumerate_success_leaves(dice, target))
}

/// Probability that at least one of several independent events occurs:
/// `1 - Π(1 - p_i)`.
///
/// Correct only for independent events — e.g. alternative dice pools rolled
/// separately, any one of which may beat the target. Not for the disjoint
/// leaves of a single rollout tree; those sum directly.
pub fn probability_of_any(probabilities: &[f64]) -> f64 {
    1.0 - probabilities.iter().map(|p| 1.0 - p).product::<f64>()
}

fn validate_dice(dice: &[u32]) -> Result<(), String> {
    for &sides in dice {
        if sides < MIN_DIE_SIDES {
            return Err(format!(
                "die must have at least {} sides, got {}",
                MIN_DIE_SIDES, sides
            ));
        }
    }
    Ok(())
}

/// Build the synthetic initial state and collect all success leaves.
fn enumerate_success_leaves(dice: &[u32], target: i32) -> Vec<SuccessLeaf> {
    let initial = RolloutState {
        probability: 1.0,
        total: 0,
        faces: dice
            .iter()
            .map(|&sides| FaceRoll { sides, face: sides })
            .collect(),
        history: Vec::new(),
    };
    let mut leaves = Vec::new();
    explore(target, &initial, &mut leaves);
    leaves
}

/// Expand one state: re-roll every die that showed its maximum, recording
/// target-crossing combinations and recursing into the rest.
fn explore(target: i32, state: &RolloutState, leaves: &mut Vec<SuccessLeaf>) {
    let remaining: Vec<u32> = state
        .faces
        .iter()
        .filter(|f| f.exploded())
        .map(|f| f.sides)
        .collect();
    // Dead-end leaf: nothing exploded, the total can never grow again.
    if remaining.is_empty() {
        return;
    }

    // Children inherit the branch history plus this state's own combination.
    // The synthetic state (total == 0) is configuration, not a real roll, and
    // is not recorded.
    let history: Vec<Vec<FaceRoll>> = if state.total == 0 {
        Vec::new()
    } else {
        let mut h = Vec::with_capacity(state.history.len() + 1);
        h.extend(state.history.iter().cloned());
        h.push(state.faces.clone());
        h
    };

    // Equally likely combinations: conditional probability 1/k each, so the
    // sibling masses partition the parent's probability exactly.
    let k: f64 = remaining.iter().map(|&sides| sides as f64).product();
    let child_probability = state.probability / k;

    // Odometer over the cartesian product of 1..=sides per remaining die,
    // reusing one scratch buffer across all k combinations.
    let mut faces: Vec<FaceRoll> = remaining
        .iter()
        .map(|&sides| FaceRoll { sides, face: 1 })
        .collect();
    loop {
        let rolled: i32 = faces.iter().map(|f| f.face as i32).sum();
        let total = state.total + rolled;
        if total >= target {
            // Terminal success: the target is met regardless of any further
            // explosions a component die might have produced.
            leaves.push(SuccessLeaf {
                probability: child_probability,
                total,
                faces: faces.clone(),
                history: history.clone(),
            });
        } else {
            let child = RolloutState {
                probability: child_probability,
                total,
                faces: faces.clone(),
                history: history.clone(),
            };
            explore(target, &child, leaves);
        }

        // Advance the odometer; done once every position has wrapped.
        let mut i = 0;
        loop {
            if i == faces.len() {
                return;
            }
            if faces[i].face < faces[i].sides {
                faces[i].face += 1;
                break;
            }
            faces[i].face = 1;
            i += 1;
        }
    }
}
