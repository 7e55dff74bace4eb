// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Shared helpers for API endpoint tests
//!
//! Provides a deterministic in-memory embedding model so the HTTP surface can
//! be exercised without real model weights. Vector values derive from the
//! input text length, making input order observable in responses.

use anyhow::Result;
use async_trait::async_trait;
use fabstir_embedding_node::api::AppState;
use fabstir_embedding_node::embeddings::EmbeddingModel;
use std::sync::Arc;

/// Dimension of the stub model's vectors
pub const STUB_DIMENSION: usize = 8;

/// Deterministic stand-in for the ONNX model
pub struct StubEmbeddingModel {
    dimension: usize,
    fail_with: Option<String>,
}

impl StubEmbeddingModel {
    pub fn new() -> Self {
        Self {
            dimension: STUB_DIMENSION,
            fail_with: None,
        }
    }

    /// A model whose embed_batch always fails with the given message
    pub fn failing(message: &str) -> Self {
        Self {
            dimension: STUB_DIMENSION,
            fail_with: Some(message.to_string()),
        }
    }
}

#[async_trait]
impl EmbeddingModel for StubEmbeddingModel {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if let Some(message) = &self.fail_with {
            anyhow::bail!("{}", message);
        }

        Ok(texts
            .iter()
            .map(|text| vec![text.len() as f32; self.dimension])
            .collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn max_seq_length(&self) -> usize {
        512
    }

    fn model_name(&self) -> &str {
        "stub-model"
    }
}

pub fn state_with_model() -> AppState {
    AppState::new(Arc::new(StubEmbeddingModel::new()))
}

pub fn state_with_failing_model(message: &str) -> AppState {
    AppState::new(Arc::new(StubEmbeddingModel::failing(message)))
}

pub fn state_without_model() -> AppState {
    AppState::without_model()
}

/// Collects a response body into a JSON value
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body is not valid JSON")
}
