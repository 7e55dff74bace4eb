// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

/// Response body for GET /health
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

/// Response body for GET /info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResponse {
    pub model_name: String,
    pub max_seq_length: usize,
    pub embedding_dimension: usize,
}

/// GET /health handler
///
/// "healthy"/200 when the model handle is set, "unhealthy"/503 otherwise.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    if state.model.is_some() {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unhealthy".to_string(),
            }),
        )
    }
}

/// GET /info handler
///
/// Reports the serving model's name, maximum sequence length, and embedding
/// dimension via the model's capability queries.
pub async fn info_handler(
    State(state): State<AppState>,
) -> Result<Json<InfoResponse>, ApiError> {
    let Some(model) = state.model.as_ref() else {
        return Err(ApiError::ModelNotLoaded);
    };

    Ok(Json(InfoResponse {
        model_name: model.model_name().to_string(),
        max_seq_length: model.max_seq_length(),
        embedding_dimension: model.dimension(),
    }))
}
