// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding model abstraction and ONNX-backed implementation
//!
//! The HTTP handlers talk to an [`EmbeddingModel`] trait object so the model
//! capabilities (dimension, max sequence length, name) are explicit queries
//! with defined defaults rather than attribute probing.

pub mod model_files;
pub mod onnx_model;

pub use model_files::ModelFiles;
pub use onnx_model::OnnxEmbeddingModel;

use anyhow::Result;
use async_trait::async_trait;

/// Fallback embedding dimension when the model does not report one
pub const DEFAULT_EMBEDDING_DIMENSION: usize = 384;

/// Fallback maximum sequence length when the tokenizer does not report one
pub const DEFAULT_MAX_SEQ_LENGTH: usize = 512;

/// Fallback model name when the handle does not carry one
pub const UNKNOWN_MODEL_NAME: &str = "unknown";

/// A loaded, ready-to-use embedding model.
///
/// Implementations encode batches of strings into fixed-length vectors and
/// answer capability queries. Capabilities the underlying model does not
/// expose fall back to the defaults above.
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    /// Encodes a batch of texts, returning one vector per input in input order
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Output dimension of this model (default 384 if unreported)
    fn dimension(&self) -> usize;

    /// Maximum input sequence length in tokens (default 512 if unreported)
    fn max_seq_length(&self) -> usize;

    /// Model name (default "unknown" if the handle carries none)
    fn model_name(&self) -> &str;
}
