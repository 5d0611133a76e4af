//! Closed-form averages and single-die tail probabilities.
//!
//! Exact formulas that skip enumeration entirely where one exists:
//! per-die averages (geometric series for exploding dice) and the tail
//! probability of a single die, flat or exploding. Multi-die *sums* have no
//! simple closed tail form — that is what [`crate::enumeration`] and
//! [`crate::simulation`] are for.

use crate::types::DiceExpr;

/// Average of a standard die: `sides / 2 + 0.5`.
pub fn average_flat_die(sides: u32) -> f64 {
    sides as f64 / 2.0 + 0.5
}

/// Average of an exploding die.
///
/// The explosion chain forms a geometric series that collapses to
/// `(flat average) * sides / (sides - 1)`.
pub fn average_exploding_die(sides: u32) -> f64 {
    average_flat_die(sides) * sides as f64 / (sides as f64 - 1.0)
}

/// Average value of a whole dice expression, modifier included.
pub fn average_of_expr(expr: &DiceExpr) -> f64 {
    let dice: f64 = expr
        .dice
        .iter()
        .map(|g| {
            let per_die = if g.exploding {
                average_exploding_die(g.sides)
            } else {
                average_flat_die(g.sides)
            };
            g.count as f64 * per_die
        })
        .sum();
    dice + expr.modifier as f64
}

/// Probability that a single non-exploding die rolls at least `target`:
/// the discrete-uniform tail `(sides - target + 1) / sides`, clamped to [0, 1].
pub fn flat_die_at_least(sides: u32, target: i32) -> f64 {
    let n = sides as f64;
    ((n - target as f64 + 1.0) / n).clamp(0.0, 1.0)
}

/// Probability that a single exploding die totals at least `target`.
///
/// Reaching `target` needs `floor((target-1) / sides)` consecutive maximum
/// faces, then a final face beating the leftover:
///
/// `(1/n)^floor((t-1)/n) * (1 - ((t-1) mod n) / n)`
pub fn exploding_die_at_least(sides: u32, target: i32) -> f64 {
    if target <= 1 {
        return 1.0; // every chain totals at least 1
    }
    let n = sides as f64;
    let t_minus_one = (target - 1) as f64;
    let chain = (t_minus_one / n).floor();
    let leftover = t_minus_one - chain * n;
    (1.0 / n).powi(chain as i32) * (1.0 - leftover / n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DieGroup;

    #[test]
    fn flat_average() {
        assert!((average_flat_die(6) - 3.5).abs() < 1e-12);
        assert!((average_flat_die(4) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn exploding_average() {
        // d6e: 3.5 * 6/5 = 4.2
        assert!((average_exploding_die(6) - 4.2).abs() < 1e-12);
        // d2e: 1.5 * 2 = 3
        assert!((average_exploding_die(2) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn expr_average_sums_groups_and_modifier() {
        let expr = DiceExpr {
            dice: vec![
                DieGroup {
                    count: 2,
                    sides: 6,
                    exploding: true,
                },
                DieGroup {
                    count: 1,
                    sides: 4,
                    exploding: false,
                },
            ],
            modifier: 3,
        };
        assert!((average_of_expr(&expr) - (2.0 * 4.2 + 2.5 + 3.0)).abs() < 1e-12);
    }

    #[test]
    fn flat_tail() {
        assert!((flat_die_at_least(6, 3) - 4.0 / 6.0).abs() < 1e-12);
        assert_eq!(flat_die_at_least(6, 7), 0.0);
        assert_eq!(flat_die_at_least(6, -2), 1.0);
    }

    #[test]
    fn exploding_tail() {
        // First roll suffices while target <= sides.
        assert!((exploding_die_at_least(6, 6) - 1.0 / 6.0).abs() < 1e-12);
        // Target 7 on a d6: roll the 6, then anything.
        assert!((exploding_die_at_least(6, 7) - 1.0 / 6.0).abs() < 1e-12);
        // d4 vs 6: roll the 4, then at least 2.
        assert!((exploding_die_at_least(4, 6) - 3.0 / 16.0).abs() < 1e-12);
        assert_eq!(exploding_die_at_least(8, 0), 1.0);
    }
}
