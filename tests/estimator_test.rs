mod common;

use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{request, test_app};

use obralink_backend::config::estimator_conf::EstimatorConfig;
use obralink_backend::util::estimator::{Estimator, EstimatorError, HttpEstimator};

fn estimator_for(server: &MockServer) -> HttpEstimator {
    HttpEstimator::new(EstimatorConfig {
        url: format!("{}/estimate", server.uri()),
        timeout_secs: 2,
    })
    .unwrap()
}

#[tokio::test]
async fn test_estimate_parses_service_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/estimate"))
        .and(body_json(json!({
            "description": "Fix door",
            "category": "general",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"aiEstimate": 150.0})))
        .mount(&server)
        .await;

    let estimator = estimator_for(&server);
    let estimate = estimator.estimate("Fix door", "general").await.unwrap();
    assert_eq!(estimate, 150.0);
}

#[tokio::test]
async fn test_estimate_maps_non_2xx_to_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/estimate"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let estimator = estimator_for(&server);
    match estimator.estimate("Fix door", "general").await {
        Err(EstimatorError::Status(503)) => {}
        other => panic!("expected Status(503), got {other:?}"),
    }
}

#[tokio::test]
async fn test_estimate_rejects_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/estimate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let estimator = estimator_for(&server);
    match estimator.estimate("Fix door", "general").await {
        Err(EstimatorError::InvalidResponse(_)) => {}
        other => panic!("expected InvalidResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn test_job_creation_survives_estimation_service_outage() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/estimate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = test_app(Arc::new(estimator_for(&server)) as Arc<dyn Estimator>);
    let (status, body) = request(
        &app.router,
        "POST",
        "/jobs/create",
        Some(json!({"description": "Fix door", "user_id": "user1"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["aiEstimate"], 0.0);
    assert_eq!(body["status"], "published");
}

#[tokio::test]
async fn test_job_creation_uses_live_estimate_when_service_is_healthy() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/estimate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"aiEstimate": 275.5})))
        .mount(&server)
        .await;

    let app = test_app(Arc::new(estimator_for(&server)) as Arc<dyn Estimator>);
    let (status, body) = request(
        &app.router,
        "POST",
        "/jobs/create",
        Some(json!({"description": "Rewire the kitchen", "user_id": "user1"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["aiEstimate"], 275.5);
}
