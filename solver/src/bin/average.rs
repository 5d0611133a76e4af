//! Average roll of dice expressions: closed form vs simulation.
//!
//! Prints the exact per-die closed-form average alongside a sampled
//! estimate with the mean number of explosion chains per roll.

use std::time::Instant;

use explodice::closed_form::average_of_expr;
use explodice::constants::{AVERAGES_PRECISION, DICE_AVERAGES_SIMULATION_STEPS};
use explodice::parse::parse_dice_string;
use explodice::simulation::average_roll;

struct Args {
    dice: Vec<String>,
    steps: usize,
    seed: u64,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut dice: Vec<String> = Vec::new();
    let mut steps = DICE_AVERAGES_SIMULATION_STEPS;
    let mut seed = 42u64;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--steps" => {
                i += 1;
                if i < args.len() {
                    steps = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --steps value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --seed value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--help" | "-h" => {
                println!("Usage: average [--steps N] [--seed S] <dice>...");
                std::process::exit(0);
            }
            other => {
                dice.push(other.to_string());
            }
        }
        i += 1;
    }

    if dice.is_empty() {
        eprintln!("No dice expressions given");
        eprintln!("Usage: average [--steps N] [--seed S] <dice>...");
        std::process::exit(1);
    }

    Args { dice, steps, seed }
}

fn main() {
    let args = parse_args();
    explodice::env_config::init_rayon_threads();

    let t_start = Instant::now();
    for dice_string in &args.dice {
        let expr = match parse_dice_string(dice_string) {
            Ok(e) => e,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        };
        let estimate = average_roll(&expr, args.steps, args.seed);
        println!(
            "Average roll for {}: {:.*} (closed form {:.*})",
            expr,
            AVERAGES_PRECISION,
            estimate.mean,
            AVERAGES_PRECISION,
            average_of_expr(&expr)
        );
        println!(
            "Average number of explosions for {}: {:.*}",
            expr, AVERAGES_PRECISION, estimate.explosions_per_roll
        );
        println!();
    }
    println!("Done in {:.3}s ({} steps per expression)", t_start.elapsed().as_secs_f64(), args.steps);
}
