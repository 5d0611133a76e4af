//! Property-based tests for the engine, closed forms, and parser.

use proptest::prelude::*;

use explodice::closed_form::{exploding_die_at_least, flat_die_at_least};
use explodice::enumeration::{probability_at_least, probability_of_any};
use explodice::parse::parse_dice_string;
use explodice::types::{DiceExpr, DieGroup};

/// Strategy: a small exploding-dice set (kept small so enumeration stays fast).
fn dice_strategy() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(2..=6u32, 0..=3)
}

/// Strategy: targets around the interesting region.
fn target_strategy() -> impl Strategy<Value = i32> {
    -5..=15i32
}

/// Strategy: a well-formed dice expression for round-trip tests.
fn expr_strategy() -> impl Strategy<Value = DiceExpr> {
    (
        prop::collection::vec((1..=3u32, 2..=10u32, any::<bool>()), 1..=3),
        -10..=10i32,
    )
        .prop_map(|(groups, modifier)| DiceExpr {
            dice: groups
                .into_iter()
                .map(|(count, sides, exploding)| DieGroup {
                    count,
                    sides,
                    exploding,
                })
                .collect(),
            modifier,
        })
}

proptest! {
    // 1. Probabilities stay in [0, 1]
    #[test]
    fn probability_in_unit_interval(dice in dice_strategy(), target in target_strategy()) {
        let p = probability_at_least(&dice, target).unwrap();
        prop_assert!((0.0..=1.0).contains(&p), "p={} for {:?} vs {}", p, dice, target);
    }

    // 2. Pure function: identical inputs, bit-identical outputs
    #[test]
    fn engine_is_idempotent(dice in dice_strategy(), target in target_strategy()) {
        let a = probability_at_least(&dice, target).unwrap();
        let b = probability_at_least(&dice, target).unwrap();
        prop_assert_eq!(a.to_bits(), b.to_bits());
    }

    // 3. Raising the target never raises the probability
    #[test]
    fn monotone_in_target(dice in dice_strategy(), target in -5..=14i32) {
        let lower = probability_at_least(&dice, target).unwrap();
        let higher = probability_at_least(&dice, target + 1).unwrap();
        prop_assert!(
            higher <= lower + 1e-15,
            "p({})={} > p({})={}", target + 1, higher, target, lower
        );
    }

    // 4. Guaranteed minimum: target <= number of dice is certain
    #[test]
    fn guaranteed_minimum_is_one(dice in prop::collection::vec(2..=6u32, 1..=4)) {
        let target = dice.len() as i32;
        prop_assert_eq!(probability_at_least(&dice, target).unwrap(), 1.0);
    }

    // 5. With at least one die, no finite target has probability zero
    #[test]
    fn finite_targets_stay_positive(sides in 2..=6u32, target in 1..=15i32) {
        let p = probability_at_least(&[sides], target).unwrap();
        prop_assert!(p > 0.0, "d{} vs {} returned 0", sides, target);
    }

    // 6. In-range single die matches the discrete-uniform tail
    //    (an exploding die only differs from a flat one past its own size)
    #[test]
    fn single_die_in_range_tail(sides in 2..=9u32, offset in 0u32..8) {
        let target = 1 + (offset % sides) as i32; // 1..=sides
        let p = probability_at_least(&[sides], target).unwrap();
        let tail = (sides as f64 - target as f64 + 1.0) / sides as f64;
        prop_assert!((p - tail).abs() < 1e-12, "d{} vs {}: {} != {}", sides, target, p, tail);
        prop_assert!((flat_die_at_least(sides, target) - tail).abs() < 1e-12);
    }

    // 7. Engine agrees with the exploding closed form beyond the die size too
    #[test]
    fn single_die_matches_closed_form(sides in 2..=6u32, target in 1..=18i32) {
        let p = probability_at_least(&[sides], target).unwrap();
        let formula = exploding_die_at_least(sides, target);
        prop_assert!((p - formula).abs() < 1e-9, "d{} vs {}: {} != {}", sides, target, p, formula);
    }

    // 8. Complement-rule combiner stays in bounds and dominates each input
    #[test]
    fn any_combiner_bounds(probs in prop::collection::vec(0.0..=1.0f64, 1..=5)) {
        let combined = probability_of_any(&probs);
        let max = probs.iter().cloned().fold(0.0f64, f64::max);
        prop_assert!(combined >= max - 1e-12);
        prop_assert!(combined <= 1.0 + 1e-12);
    }

    // 9. Parser round-trips its own rendering
    #[test]
    fn parse_display_round_trip(expr in expr_strategy()) {
        let rendered = expr.to_string();
        let reparsed = parse_dice_string(&rendered).unwrap();
        prop_assert_eq!(reparsed, expr, "via '{}'", rendered);
    }

    // 10. Parser never panics, whatever the input
    #[test]
    fn parse_never_panics(input in "[0-9de+ -]{0,12}") {
        let _ = parse_dice_string(&input);
    }
}
