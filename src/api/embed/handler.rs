// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /embed HTTP handler
//!
//! Order of checks mirrors the service contract: model availability first
//! (503), then body validation (400), then encoding (500 on any failure).

use crate::api::embed::{EmbedRequest, EmbedResponse};
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use axum::extract::State;
use axum::Json;
use tracing::error;

/// POST /embed handler
///
/// Accepts `{"inputs": <string | [string,...]>}` and answers with
/// `{"embeddings": ..., "model": <dimension>}`. A single input string yields
/// one flat vector; a sequence yields one vector per input in input order.
///
/// The body arrives as an `Option<Json<Value>>` so that an unparsable or
/// absent body follows the same missing-field path as an empty object.
pub async fn embed_handler(
    State(state): State<AppState>,
    body: Option<Json<serde_json::Value>>,
) -> Result<Json<EmbedResponse>, ApiError> {
    let Some(model) = state.model.clone() else {
        return Err(ApiError::ModelNotLoaded);
    };

    let request = match body {
        Some(Json(value)) => EmbedRequest::from_value(&value)?,
        None => return Err(ApiError::missing_inputs()),
    };

    let single_input = request.inputs.is_single();
    let texts = request.inputs.into_batch();

    let vectors = model.embed_batch(&texts).await.map_err(|e| {
        error!("Error generating embeddings: {}", e);
        ApiError::Internal(e.to_string())
    })?;

    Ok(Json(EmbedResponse::new(
        vectors,
        single_input,
        model.dimension(),
    )))
}
