// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::embed::embed_handler;
use super::handlers::{health_handler, info_handler};
use crate::embeddings::EmbeddingModel;

/// Process-wide state shared by all request handlers.
///
/// The model handle is set once at startup and never replaced, so concurrent
/// reads need no locking. `None` means the service is still degraded (health
/// reports unhealthy, embed/info answer 503).
#[derive(Clone)]
pub struct AppState {
    pub model: Option<Arc<dyn EmbeddingModel>>,
}

impl AppState {
    /// State with a loaded model handle
    pub fn new(model: Arc<dyn EmbeddingModel>) -> Self {
        Self { model: Some(model) }
    }

    /// State without a model, every model-backed route answers 503
    pub fn without_model() -> Self {
        Self { model: None }
    }
}

/// Builds the service router: three routes sharing the model handle, with
/// permissive CORS and request tracing.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/embed", post(embed_handler))
        .route("/info", get(info_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the listener and serves until Ctrl-C.
pub async fn start_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}
