// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Endpoint tests for GET /info

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use fabstir_embedding_node::api::create_app;
use tower::util::ServiceExt; // for `oneshot`

use super::support::{body_json, state_with_model, state_without_model, STUB_DIMENSION};

fn info_request() -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri("/info")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_info_reports_model_capabilities() {
    let app = create_app(state_with_model());

    let response = app.oneshot(info_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["model_name"], "stub-model");
    assert_eq!(body["max_seq_length"], 512);
    assert_eq!(body["embedding_dimension"], STUB_DIMENSION);
}

#[tokio::test]
async fn test_info_without_model_answers_service_unavailable() {
    let app = create_app(state_without_model());

    let response = app.oneshot(info_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Model not loaded");
}
