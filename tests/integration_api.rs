//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use ran_energy_twin::api::{AppState, router};
use ran_energy_twin::pipeline::{PipelineOrchestrator, PowerModel};

/// Runs the reference topology over three hours and returns the API state.
fn build_api_state() -> Arc<AppState> {
    let topology = common::reference_topology();
    let ru = common::series(&[(0, [0.2, 0.6]), (1, [0.5, 0.5]), (2, [0.0, 0.0])]);
    let output = PipelineOrchestrator::new(&topology, PowerModel::default())
        .run(&ru)
        .unwrap();
    Arc::new(AppState::new(&topology, output))
}

async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
    let app = router(build_api_state());
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn total_power_matches_pipeline() {
    let (status, json) = get("/total-power").await;
    assert_eq!(status, StatusCode::OK);
    let totals: Vec<f64> = json
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["total_w"].as_f64())
        .collect();
    assert_eq!(totals, vec![1120.0, 1190.0, 840.0]);
}

#[tokio::test]
async fn total_power_range_is_inclusive() {
    let (status, json) =
        get("/total-power?from=2024-01-01T01:00:00Z&to=2024-01-01T02:00:00Z").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn ru_utilization_columns_follow_topology_order() {
    let (status, json) = get("/utilization/ru").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["node_ids"][0], "O-RAN-RU-1");
    assert_eq!(json["node_ids"][1], "O-RAN-RU-2");
    assert_eq!(json["rows"][1]["values"][0], 0.5);
}

#[tokio::test]
async fn topology_lists_supports() {
    let (status, json) = get("/topology").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cu_count"], 1);
    let cu = &json["nodes"][0];
    assert_eq!(cu["type"], "CU");
    assert_eq!(cu["supports"][0], "O-RAN-DU-1");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = router(build_api_state());
    let req = Request::builder()
        .uri("/state")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
