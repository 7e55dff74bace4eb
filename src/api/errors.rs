// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON body for every error response: `{"error": <message>}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

/// API failure cases. The wire shape is always `{"error": <message>}` with
/// the status code below; there is no finer-grained error taxonomy.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// Malformed or incomplete request body
    #[error("{0}")]
    InvalidRequest(String),

    /// The model handle is not set
    #[error("Model not loaded")]
    ModelNotLoaded,

    /// Any failure during encoding, surfaced with the underlying message
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// The exact message for a request body without an `inputs` field
    pub fn missing_inputs() -> Self {
        ApiError::InvalidRequest("Missing 'inputs' field".to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ModelNotLoaded => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_response())).into_response()
    }
}
