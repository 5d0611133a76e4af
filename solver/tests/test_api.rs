//! Integration tests for the HTTP API endpoints.
//!
//! Uses axum's oneshot pattern (via tower::ServiceExt) — no TCP binding
//! needed. Simulation step counts are dialled down so the sampling fallback
//! stays fast; seeds are fixed so estimates are stable.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use explodice::server::{create_router, ServerConfig};
use explodice::simulation::SimulationConfig;

fn app() -> axum::Router {
    create_router(Arc::new(ServerConfig {
        simulation: SimulationConfig {
            base_steps: 20_000,
            max_steps: 100_000,
            seed: 42,
        },
        average_steps: 20_000,
    }))
}

/// Parse response body as JSON.
async fn body_json(body: Body) -> serde_json::Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(path: &str) -> (StatusCode, serde_json::Value) {
    let resp = app()
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    (status, body_json(resp.into_body()).await)
}

// ── GET /health ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_returns_200() {
    let (status, json) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "OK");
}

// ── GET /odds ────────────────────────────────────────────────────────

#[tokio::test]
async fn odds_exploding_uses_exact_engine() {
    let (status, json) = get("/odds?dice=1d6e&target=7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["method"], "exact");
    let p = json["probability"].as_f64().unwrap();
    assert!((p - 1.0 / 6.0).abs() < 1e-12);
    assert!(json.get("steps").is_none());
}

#[tokio::test]
async fn odds_folds_modifier_into_target() {
    // 2d6e+3 vs 5 is certain: two dice and a +3 can never total under 5.
    let (status, json) = get("/odds?dice=2d6e%2B3&target=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["method"], "exact");
    assert_eq!(json["probability"].as_f64().unwrap(), 1.0);
    assert_eq!(json["dice"], "2d6e+3");
}

#[tokio::test]
async fn odds_lone_flat_die_uses_closed_form() {
    let (status, json) = get("/odds?dice=1d6&target=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["method"], "closed_form");
    let p = json["probability"].as_f64().unwrap();
    assert!((p - 4.0 / 6.0).abs() < 1e-12);
}

#[tokio::test]
async fn odds_flat_pair_falls_back_to_simulation() {
    // P(2d6 >= 7) = 21/36.
    let (status, json) = get("/odds?dice=2d6&target=7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["method"], "simulation");
    let p = json["probability"].as_f64().unwrap();
    assert!((p - 21.0 / 36.0).abs() < 0.02);
    assert!(json["steps"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn odds_rejects_bad_dice_string() {
    let (status, json) = get("/odds?dice=2d6x&target=7").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn odds_requires_target() {
    let resp = app()
        .oneshot(
            Request::get("/odds?dice=2d6e")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ── GET /average ─────────────────────────────────────────────────────

#[tokio::test]
async fn average_reports_closed_form_and_simulation() {
    let (status, json) = get("/average?dice=1d6e").await;
    assert_eq!(status, StatusCode::OK);
    let closed = json["closed_form"].as_f64().unwrap();
    assert!((closed - 4.2).abs() < 1e-12);
    let simulated = json["simulated"].as_f64().unwrap();
    assert!((simulated - 4.2).abs() < 0.2);
    let explosions = json["explosions_per_roll"].as_f64().unwrap();
    assert!((explosions - 1.0 / 6.0).abs() < 0.03);
}

#[tokio::test]
async fn average_rejects_bad_dice_string() {
    let (status, json) = get("/average?dice=nope").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}
