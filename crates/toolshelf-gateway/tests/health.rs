//! Integration tests for the health endpoint and routing fallbacks.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, seeded_app};

#[tokio::test]
async fn health_check_returns_ok() {
    let (app, _) = seeded_app();
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let (app, _) = seeded_app();
    let response = get(app, "/api/does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
