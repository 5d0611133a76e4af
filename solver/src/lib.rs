//! # Explodice — Exploding-Dice Odds Engine
//!
//! Computes the exact probability that a set of exploding dice beats a target
//! number by **exhaustively enumerating every distinct rollout**, rather than
//! approximating it by sampling.
//!
//! An exploding die is re-rolled (and the new result added) whenever it shows
//! its maximum face, recursively. The outcome space is therefore unbounded in
//! principle, but the probability mass of still-exploding branches shrinks
//! geometrically, so for any finite target the enumeration terminates with a
//! finite set of target-crossing rollouts.
//!
//! ## Module map
//!
//! | Concern | Module | Description |
//! |---------|--------|-------------|
//! | Exact engine | [`enumeration`] | Recursive rollout enumeration, success-leaf collection |
//! | Closed forms | [`closed_form`] | Single-die averages and tail probabilities |
//! | Notation | [`parse`] | Dice-string parser (`"2d6e+3"` → [`types::DiceExpr`]) |
//! | Sampling | [`simulation`] | Monte-Carlo estimator for expressions the exact engine does not cover |
//! | Dispatch | [`odds`] | Strongest applicable method per query |
//! | HTTP API | [`server`] | Stateless axum endpoints for odds/average queries |
//!
//! ## Choosing exact vs simulated
//!
//! The exact engine consumes an ordered list of die sizes where *every* die
//! explodes. A lone non-exploding die is handled by closed form; mixed or
//! multi-die non-exploding expressions fall back to Monte-Carlo. The binaries
//! and the HTTP API pick the strongest applicable method per query and report
//! which one was used.

pub mod closed_form;
pub mod constants;
pub mod enumeration;
pub mod env_config;
pub mod odds;
pub mod parse;
pub mod server;
pub mod simulation;
pub mod types;
