// ABOUTME: Integration tests for health endpoints and the shared middleware stack
// ABOUTME: Verifies liveness, readiness, request id propagation and CORS headers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use common::mock_router;
use helpers::axum_test::AxumTestRequest;
use serde_json::Value;

#[tokio::test]
async fn test_health_endpoint() {
    let response = AxumTestRequest::get("/health").send(mock_router()).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn test_ready_endpoint_names_food_source() {
    let response = AxumTestRequest::get("/ready").send(mock_router()).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["food_source"], "mock");
    assert_eq!(body["environment"], "testing");
}

#[tokio::test]
async fn test_request_id_generated_when_absent() {
    let response = AxumTestRequest::get("/health").send(mock_router()).await;

    let request_id = response.header("x-request-id").unwrap();
    assert!(request_id.starts_with("req_"));
}

#[tokio::test]
async fn test_request_id_propagated_when_present() {
    let response = AxumTestRequest::get("/health")
        .header("x-request-id", "client-123")
        .send(mock_router())
        .await;

    assert_eq!(response.header("x-request-id").as_deref(), Some("client-123"));
}

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    let response = AxumTestRequest::get("/health")
        .header("origin", "https://app.example.com")
        .send(mock_router())
        .await;

    assert_eq!(
        response.header("access-control-allow-origin").as_deref(),
        Some("*")
    );
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let response = AxumTestRequest::get("/api/unknown").send(mock_router()).await;

    assert_eq!(response.status(), 404);
}
