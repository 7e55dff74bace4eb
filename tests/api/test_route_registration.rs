// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Route registration tests
//!
//! Verifies the router wires exactly three routes with the right methods and
//! that CORS headers are emitted for cross-origin callers.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use fabstir_embedding_node::api::create_app;
use tower::util::ServiceExt; // for `oneshot`

use super::support::state_with_model;

fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_app(state_with_model());

    let response = app
        .oneshot(request(Method::GET, "/does-not-exist"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_embed_rejects_get() {
    let app = create_app(state_with_model());

    let response = app.oneshot(request(Method::GET, "/embed")).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_health_rejects_post() {
    let app = create_app(state_with_model());

    let response = app.oneshot(request(Method::POST, "/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_info_rejects_post() {
    let app = create_app(state_with_model());

    let response = app.oneshot(request(Method::POST, "/info")).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_cors_headers_present_for_cross_origin_requests() {
    let app = create_app(state_with_model());

    let mut req = request(Method::GET, "/health");
    req.headers_mut()
        .insert("origin", "http://example.com".parse().unwrap());

    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .map(|v| v.to_str().unwrap()),
        Some("*")
    );
}
