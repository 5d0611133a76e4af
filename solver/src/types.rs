//! Core data structures shared across the engine, parser, and simulator.
//!
//! The central types are [`FaceRoll`] — one die paired with its most recent
//! face, the unit the exact engine branches on — and [`DiceExpr`], the parsed
//! form of a dice string like `2d6e+3`.

use std::fmt;

/// One die and the face it just showed: `(sides, face)` with `1 <= face <= sides`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceRoll {
    /// Number of faces on the die.
    pub sides: u32,
    /// The face rolled this step.
    pub face: u32,
}

impl FaceRoll {
    /// Whether this roll showed the die's maximum face and must be re-rolled.
    #[inline(always)]
    pub fn exploded(&self) -> bool {
        self.face == self.sides
    }
}

/// A homogeneous group of dice from a dice string: `NdM` with an optional `e`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DieGroup {
    /// Number of dice in the group (N), at least 1.
    pub count: u32,
    /// Faces per die (M), at least 1 (at least 2 when exploding).
    pub sides: u32,
    /// Whether each die in the group explodes on its maximum face.
    pub exploding: bool,
}

impl fmt::Display for DieGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d{}{}",
            self.count,
            self.sides,
            if self.exploding { "e" } else { "" }
        )
    }
}

/// A parsed dice expression: dice groups plus a flat modifier.
///
/// The modifier is never consumed by the probability engines — callers fold it
/// into the target first (`effective_target = target - modifier`).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct DiceExpr {
    /// Dice groups in notation order.
    pub dice: Vec<DieGroup>,
    /// Net modifier, may be negative.
    pub modifier: i32,
}

impl DiceExpr {
    /// Total number of individual dice across all groups.
    pub fn num_dice(&self) -> u32 {
        self.dice.iter().map(|g| g.count).sum()
    }

    /// Guaranteed minimum roll: every die shows a 1, plus the modifier.
    pub fn lower_limit(&self) -> i32 {
        self.num_dice() as i32 + self.modifier
    }

    /// Maximum attainable roll, or `None` when any group explodes
    /// (explosions make the true maximum unbounded).
    pub fn upper_limit(&self) -> Option<i32> {
        if self.dice.iter().any(|g| g.exploding) {
            return None;
        }
        Some(
            self.dice
                .iter()
                .map(|g| (g.count * g.sides) as i32)
                .sum::<i32>()
                + self.modifier,
        )
    }

    /// Whether every die in the expression explodes.
    pub fn is_all_exploding(&self) -> bool {
        self.dice.iter().all(|g| g.exploding)
    }

    /// Flattened per-die size list, one entry per individual die, in order.
    pub fn die_sizes(&self) -> Vec<u32> {
        let mut sizes = Vec::with_capacity(self.num_dice() as usize);
        for g in &self.dice {
            for _ in 0..g.count {
                sizes.push(g.sides);
            }
        }
        sizes
    }
}

impl fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, g) in self.dice.iter().enumerate() {
            if i > 0 {
                write!(f, "+")?;
            }
            write!(f, "{}", g)?;
        }
        if self.dice.is_empty() {
            return write!(f, "{}", self.modifier);
        }
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{}", m),
            m => write!(f, "{}", m),
        }
    }
}
