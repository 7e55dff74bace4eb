// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! EmbedResponse types for POST /embed
//!
//! A single-string request answers with one flat vector; an array request
//! answers with a sequence of vectors in input order. The `model` field
//! carries the embedding dimension, kept for compatibility with existing
//! callers of the service.

use serde::{Deserialize, Serialize};

/// The `embeddings` field: one vector for a single input, a sequence of
/// vectors for a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingsPayload {
    Single(Vec<f32>),
    Batch(Vec<Vec<f32>>),
}

/// Response body for POST /embed
///
/// # Example
/// ```json
/// {"embeddings": [0.1, 0.2, ...], "model": 384}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedResponse {
    pub embeddings: EmbeddingsPayload,

    /// Embedding dimension of the serving model
    pub model: usize,
}

impl EmbedResponse {
    /// Builds the response, flattening a one-element batch when the caller
    /// sent a single string.
    pub fn new(vectors: Vec<Vec<f32>>, single_input: bool, dimension: usize) -> Self {
        let embeddings = if single_input {
            EmbeddingsPayload::Single(vectors.into_iter().next().unwrap_or_default())
        } else {
            EmbeddingsPayload::Batch(vectors)
        };

        Self {
            embeddings,
            model: dimension,
        }
    }
}
