//! Axum HTTP server: stateless odds and average queries.
//!
//! Every endpoint parses its dice string per request and computes from
//! scratch — there is no shared mutable state, only the run-wide
//! [`ServerConfig`] shared as `Arc` across async handlers.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/odds` | Probability that a dice expression beats a target |
//! | GET | `/average` | Closed-form and simulated average of an expression |

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};

use crate::closed_form::average_of_expr;
use crate::constants::DICE_AVERAGES_SIMULATION_STEPS;
use crate::odds::compute_odds;
use crate::parse::parse_dice_string;
use crate::simulation::{average_roll, SimulationConfig};

/// Run-wide knobs for the server's sampling fallbacks.
#[derive(Clone, Copy, Debug)]
pub struct ServerConfig {
    /// Simulation knobs for `/odds` fallback sampling.
    pub simulation: SimulationConfig,
    /// Rolls used by `/average`'s simulated estimate.
    pub average_steps: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            average_steps: DICE_AVERAGES_SIMULATION_STEPS,
        }
    }
}

pub type AppState = Arc<ServerConfig>;

pub fn create_router(config: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health_check))
        .route("/odds", get(handle_get_odds))
        .route("/average", get(handle_get_average))
        .layer(cors)
        .with_state(config)
}

// ── Request types ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct OddsQuery {
    dice: String,
    target: i32,
}

#[derive(Deserialize)]
struct AverageQuery {
    dice: String,
}

fn error_response(status: StatusCode, msg: &str) -> (StatusCode, Json<serde_json::Value>) {
    (status, Json(serde_json::json!({ "error": msg })))
}

// ── GET handlers ────────────────────────────────────────────────────

async fn handle_health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "OK" }))
}

async fn handle_get_odds(
    State(config): State<AppState>,
    Query(params): Query<OddsQuery>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let expr = parse_dice_string(&params.dice)
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, &e))?;

    let report = compute_odds(&expr, params.target, config.simulation)
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, &e))?;

    let mut body = serde_json::json!({
        "dice": expr.to_string(),
        "target": params.target,
        "probability": report.probability,
        "method": report.method.as_str(),
    });
    if let Some(estimate) = report.estimate {
        body["steps"] = estimate.steps.into();
        body["successes"] = estimate.successes.into();
        let mut warnings = Vec::new();
        if estimate.long_simulation {
            warnings.push("extended simulation was needed to find a success");
        }
        if estimate.low_success_rate {
            warnings.push("very low success rates may not be accurate or consistent");
        }
        if !warnings.is_empty() {
            body["warnings"] = warnings.into();
        }
    }
    Ok(Json(body))
}

async fn handle_get_average(
    State(config): State<AppState>,
    Query(params): Query<AverageQuery>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let expr = parse_dice_string(&params.dice)
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, &e))?;

    let estimate = average_roll(&expr, config.average_steps, config.simulation.seed);

    Ok(Json(serde_json::json!({
        "dice": expr.to_string(),
        "closed_form": average_of_expr(&expr),
        "simulated": estimate.mean,
        "explosions_per_roll": estimate.explosions_per_roll,
    })))
}
