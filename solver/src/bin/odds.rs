//! Probability that dice expressions beat a target number.
//!
//! Each expression is evaluated with the strongest applicable method
//! (exact enumeration, closed form, or simulation). Multiple expressions
//! are treated as independent alternatives — separate pools where any one
//! may beat the target — and combined with the complement rule.

use std::time::Instant;

use explodice::constants::PERCENTAGES_PRECISION;
use explodice::enumeration::probability_of_any;
use explodice::odds::compute_odds;
use explodice::parse::parse_dice_string;
use explodice::simulation::SimulationConfig;

struct Args {
    dice: Vec<String>,
    target: i32,
    steps: Option<usize>,
    seed: u64,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut dice: Vec<String> = Vec::new();
    let mut target: Option<i32> = None;
    let mut steps: Option<usize> = None;
    let mut seed = 42u64;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--target" => {
                i += 1;
                if i < args.len() {
                    target = Some(args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --target value: {}", args[i]);
                        std::process::exit(1);
                    }));
                }
            }
            "--steps" => {
                i += 1;
                if i < args.len() {
                    steps = Some(args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --steps value: {}", args[i]);
                        std::process::exit(1);
                    }));
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
                print_usage();
                std::process::exit(0);
            }
            other => {
                dice.push(other.to_string());
            }
        }
        i += 1;
    }

    let target = target.unwrap_or_else(|| {
        eprintln!("Missing required --target");
        print_usage();
        std::process::exit(1);
    });
    if dice.is_empty() {
        eprintln!("No dice expressions given");
        print_usage();
        std::process::exit(1);
    }

    Args {
        dice,
        target,
        steps,
        seed,
    }
}

fn print_usage() {
    println!("Usage: odds --target T [--steps N] [--seed S] <dice>...");
    println!();
    println!("  <dice>     one or more expressions like 2d6e+3 or 1d8-1;");
    println!("             several expressions are independent alternatives");
    println!("  --target   number to meet or beat");
    println!("  --steps    base simulation steps for non-exact expressions");
    println!("  --seed     simulation seed (default 42)");
}

fn format_percentage(probability: f64) -> String {
    format!("{:.*}%", PERCENTAGES_PRECISION, probability * 100.0)
}

fn main() {
    let args = parse_args();
    explodice::env_config::init_rayon_threads();

    let mut config = SimulationConfig {
        seed: args.seed,
        ..SimulationConfig::default()
    };
    if let Some(steps) = args.steps {
        config.base_steps = steps;
        config.max_steps = config.max_steps.max(steps);
    }

    let t_start = Instant::now();
    let mut alternatives: Vec<f64> = Vec::new();

    for dice_string in &args.dice {
        let expr = match parse_dice_string(dice_string) {
            Ok(e) => e,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        };
        let report = match compute_odds(&expr, args.target, config) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        };

        println!(
            "{} TN {}: {} chance of success ({})",
            expr,
            args.target,
            format_percentage(report.probability),
            report.method.as_str()
        );
        if report.probability > 0.0 {
            println!("  1 in {:.0}", 1.0 / report.probability);
        } else {
            println!("  1 in ∞");
        }
        if let Some(estimate) = report.estimate {
            if estimate.long_simulation {
                println!(
                    "  WARNING: more than {} steps were needed to find a success; results may be inaccurate",
                    config.base_steps
                );
            }
            if estimate.low_success_rate {
                println!("  WARNING: very low success rates may not be accurate or consistent");
            }
        }
        alternatives.push(report.probability);
    }

    if alternatives.len() > 1 {
        let combined = probability_of_any(&alternatives);
        println!();
        println!(
            "Any of {} alternatives vs TN {}: {}",
            alternatives.len(),
            args.target,
            format_percentage(combined)
        );
    }

    println!();
    println!("Done in {:.3}s", t_start.elapsed().as_secs_f64());
}
