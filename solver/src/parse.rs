//! Dice-string parser: `"2d6e+3-1"` → [`DiceExpr`].
//!
//! Grammar: `+`-separated tokens after rewriting every `-` to `+-` (so
//! subtraction is addition of a negative modifier — dice themselves cannot be
//! subtracted). A token containing `d` is a dice group `NdM`, with a trailing
//! `e` marking the group as exploding; any other token is an integer
//! modifier. Multiple modifiers accumulate.

use crate::constants::MIN_DIE_SIDES;
use crate::types::{DiceExpr, DieGroup};

/// Parse a dice string such as `2d6e+3`, `3d4-1`, or `1d8e+2d6`.
///
/// Rejected inputs: empty strings, malformed counts/sides, zero-count or
/// zero-sided groups, and exploding groups with fewer than
/// [`MIN_DIE_SIDES`] sides (a 1-sided exploding die re-rolls forever).
pub fn parse_dice_string(input: &str) -> Result<DiceExpr, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("empty dice string".to_string());
    }

    let rewritten = trimmed.replace('-', "+-");
    let mut dice = Vec::new();
    let mut modifier = 0i32;

    for token in rewritten.split('+') {
        if token.is_empty() {
            return Err(format!("malformed dice string: '{}'", trimmed));
        }
        if let Some(d_pos) = token.find('d') {
            dice.push(parse_die_group(token, d_pos, trimmed)?);
        } else {
            let value: i32 = token
                .parse()
                .map_err(|_| format!("invalid modifier '{}' in '{}'", token, trimmed))?;
            modifier += value;
        }
    }

    Ok(DiceExpr { dice, modifier })
}

fn parse_die_group(token: &str, d_pos: usize, input: &str) -> Result<DieGroup, String> {
    let count_str = &token[..d_pos];
    let mut sides_str = &token[d_pos + 1..];

    let exploding = sides_str.ends_with('e');
    if exploding {
        sides_str = &sides_str[..sides_str.len() - 1];
    }

    let count: u32 = count_str
        .parse()
        .map_err(|_| format!("invalid die count '{}' in '{}'", count_str, input))?;
    let sides: u32 = sides_str
        .parse()
        .map_err(|_| format!("invalid die sides '{}' in '{}'", sides_str, input))?;

    if count == 0 {
        return Err(format!("die count must be positive in '{}'", input));
    }
    if sides == 0 {
        return Err(format!("die sides must be positive in '{}'", input));
    }
    if exploding && sides < MIN_DIE_SIDES {
        return Err(format!(
            "exploding die needs at least {} sides in '{}'",
            MIN_DIE_SIDES, input
        ));
    }

    Ok(DieGroup {
        count,
        sides,
        exploding,
    })
}
