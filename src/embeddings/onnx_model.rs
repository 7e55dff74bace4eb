// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX Embedding Model Wrapper
//!
//! Wraps ONNX Runtime for running sentence transformer models such as
//! all-MiniLM-L6-v2.
//!
//! Features:
//! - ONNX model loading from disk (CPU execution provider)
//! - BERT tokenization with padding to the longest sequence in a batch
//! - Batch embedding generation in one inference call
//! - Attention-mask-weighted mean pooling over token embeddings
//! - Embedding dimension detected from a probe inference at load time

use crate::embeddings::{
    EmbeddingModel, DEFAULT_EMBEDDING_DIMENSION, DEFAULT_MAX_SEQ_LENGTH, UNKNOWN_MODEL_NAME,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use ndarray::{Array2, ArrayViewD, Axis};
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokenizers::{Encoding, Tokenizer};
use tracing::info;

/// ONNX-based sentence embedding model
///
/// The model outputs token-level embeddings `[batch, seq_len, hidden]`; the
/// wrapper applies mean pooling to produce one sentence vector per input.
/// The hidden size observed during the load-time probe inference becomes the
/// reported embedding dimension.
///
/// # Thread Safety
/// The session is wrapped in `Arc<Mutex>` (ONNX Runtime sessions require
/// exclusive access to run); the handle itself is `Clone` and cheap to share
/// across request handlers.
#[derive(Clone)]
pub struct OnnxEmbeddingModel {
    /// ONNX Runtime session
    session: Arc<Mutex<Session>>,

    /// BERT tokenizer
    tokenizer: Arc<Tokenizer>,

    /// Configured model name, None when blank
    name: Option<String>,

    /// Hidden size observed during the load-time probe inference
    reported_dimension: Option<usize>,

    /// Maximum sequence length from the tokenizer's truncation parameters
    reported_max_seq_length: Option<usize>,
}

impl std::fmt::Debug for OnnxEmbeddingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxEmbeddingModel")
            .field("name", &self.name)
            .field("reported_dimension", &self.reported_dimension)
            .field("reported_max_seq_length", &self.reported_max_seq_length)
            .finish_non_exhaustive()
    }
}

impl OnnxEmbeddingModel {
    /// Creates a new ONNX embedding model from disk paths
    ///
    /// Loads the session and tokenizer, then runs one probe inference to
    /// confirm the output is `[batch, seq_len, hidden]` and to record the
    /// hidden size as the embedding dimension.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Model or tokenizer file is not found or invalid
    /// - ONNX Runtime initialization fails
    /// - The probe inference fails or outputs an unexpected shape
    pub async fn new<P: AsRef<Path>>(
        model_name: impl Into<String>,
        model_path: P,
        tokenizer_path: P,
    ) -> Result<Self> {
        let model_name = model_name.into();
        let model_path = model_path.as_ref();
        let tokenizer_path = tokenizer_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("ONNX model file not found: {}", model_path.display());
        }
        if !tokenizer_path.exists() {
            anyhow::bail!("Tokenizer file not found: {}", tokenizer_path.display());
        }

        let session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(4)
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .with_context(|| {
                format!("Failed to load ONNX model from {}", model_path.display())
            })?;

        let tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;

        let reported_max_seq_length = tokenizer.get_truncation().map(|params| params.max_length);

        let name = if model_name.trim().is_empty() {
            None
        } else {
            Some(model_name)
        };

        let mut model = Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            name,
            reported_dimension: None,
            reported_max_seq_length,
        };

        // Probe inference validates the output layout and detects the
        // embedding dimension instead of trusting a configured value.
        let probe_input = vec!["embedding dimension probe".to_string()];
        let probe = model
            .run_encodings(&model.encode_texts(&probe_input)?)
            .context("Model probe inference failed")?;
        model.reported_dimension = probe.first().map(|embedding| embedding.len());

        info!(
            "Embedding model {} ready ({} dimensions, max {} tokens)",
            model.model_name(),
            model.dimension(),
            model.max_seq_length()
        );

        Ok(model)
    }

    /// Generates embeddings for a batch of texts
    ///
    /// Tokenizes all texts, pads to the longest sequence, runs one batched
    /// inference, and mean-pools per input. Returns one vector per input in
    /// input order; an empty slice yields an empty result.
    pub async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let encodings = self.encode_texts(texts)?;
        let embeddings = self.run_encodings(&encodings)?;

        if let Some(expected) = self.reported_dimension {
            for (index, embedding) in embeddings.iter().enumerate() {
                if embedding.len() != expected {
                    anyhow::bail!(
                        "Unexpected embedding dimension at index {}: {} (expected {})",
                        index,
                        embedding.len(),
                        expected
                    );
                }
            }
        }

        Ok(embeddings)
    }

    /// Generates the embedding for a single text
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings.pop().context("Model returned no embedding")
    }

    /// Output dimension of this model, defaulting to 384 when unreported
    pub fn dimension(&self) -> usize {
        self.reported_dimension
            .unwrap_or(DEFAULT_EMBEDDING_DIMENSION)
    }

    /// Maximum input sequence length, defaulting to 512 when the tokenizer
    /// carries no truncation parameters
    pub fn max_seq_length(&self) -> usize {
        self.reported_max_seq_length
            .unwrap_or(DEFAULT_MAX_SEQ_LENGTH)
    }

    /// Model name, "unknown" when the handle carries none
    pub fn model_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_MODEL_NAME)
    }

    fn encode_texts(&self, texts: &[String]) -> Result<Vec<Encoding>> {
        texts
            .iter()
            .map(|text| {
                self.tokenizer
                    .encode(text.as_str(), true)
                    .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))
            })
            .collect()
    }

    /// Runs one batched inference over pre-tokenized inputs and mean-pools
    /// each item into a sentence vector.
    fn run_encodings(&self, encodings: &[Encoding]) -> Result<Vec<Vec<f32>>> {
        let batch_size = encodings.len();
        let max_len = encodings
            .iter()
            .map(|encoding| encoding.get_ids().len())
            .max()
            .unwrap_or(0);

        // Pad all sequences to the longest one in the batch
        let mut input_ids = Vec::with_capacity(batch_size * max_len);
        let mut attention_mask = Vec::with_capacity(batch_size * max_len);
        let mut token_type_ids = Vec::with_capacity(batch_size * max_len);

        for encoding in encodings {
            let ids = encoding.get_ids();
            let mask = encoding.get_attention_mask();

            input_ids.extend(ids.iter().map(|&id| id as i64));
            attention_mask.extend(mask.iter().map(|&m| m as i64));
            token_type_ids.extend(std::iter::repeat(0i64).take(ids.len()));

            let padding = max_len - ids.len();
            input_ids.extend(std::iter::repeat(0i64).take(padding));
            attention_mask.extend(std::iter::repeat(0i64).take(padding));
            token_type_ids.extend(std::iter::repeat(0i64).take(padding));
        }

        let mask_for_pooling = attention_mask.clone();

        let input_ids_array = Array2::from_shape_vec((batch_size, max_len), input_ids)
            .context("Failed to create input_ids array")?;
        let attention_mask_array = Array2::from_shape_vec((batch_size, max_len), attention_mask)
            .context("Failed to create attention_mask array")?;
        let token_type_ids_array = Array2::from_shape_vec((batch_size, max_len), token_type_ids)
            .context("Failed to create token_type_ids array")?;

        let mut session = self.session.lock().unwrap();
        let outputs = session.run(ort::inputs![
            "input_ids" => Value::from_array(input_ids_array)?,
            "attention_mask" => Value::from_array(attention_mask_array)?,
            "token_type_ids" => Value::from_array(token_type_ids_array)?
        ])?;

        // Output name varies between exports, the first output holds the
        // token embeddings for the models we run
        let output_array = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;

        let shape = output_array.shape();
        if shape.len() != 3 {
            anyhow::bail!(
                "Model output has unexpected shape {:?} (expected [batch, seq_len, hidden])",
                shape
            );
        }

        let mut embeddings = Vec::with_capacity(batch_size);
        for batch_idx in 0..batch_size {
            let token_embeddings = output_array.index_axis(Axis(0), batch_idx);
            let mask_start = batch_idx * max_len;
            let item_mask = &mask_for_pooling[mask_start..mask_start + max_len];
            embeddings.push(mean_pool(&token_embeddings, item_mask));
        }

        Ok(embeddings)
    }
}

/// Mean pooling over the sequence dimension, weighted by the attention mask
/// so padding tokens do not contribute.
fn mean_pool(token_embeddings: &ArrayViewD<'_, f32>, attention_mask: &[i64]) -> Vec<f32> {
    let seq_len = token_embeddings.shape()[0];
    let hidden = token_embeddings.shape()[1];

    let mut pooled = vec![0.0f32; hidden];
    let mut mask_sum = 0.0f32;

    for i in 0..seq_len {
        let mask_value = attention_mask[i] as f32;
        mask_sum += mask_value;
        for j in 0..hidden {
            pooled[j] += token_embeddings[[i, j]] * mask_value;
        }
    }

    for value in &mut pooled {
        *value /= mask_sum.max(1e-9);
    }

    pooled
}

#[async_trait]
impl EmbeddingModel for OnnxEmbeddingModel {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        OnnxEmbeddingModel::embed_batch(self, texts).await
    }

    fn dimension(&self) -> usize {
        OnnxEmbeddingModel::dimension(self)
    }

    fn max_seq_length(&self) -> usize {
        OnnxEmbeddingModel::max_seq_length(self)
    }

    fn model_name(&self) -> &str {
        OnnxEmbeddingModel::model_name(self)
    }
}
