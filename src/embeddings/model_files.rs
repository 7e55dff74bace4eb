// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Model file resolution
//!
//! Resolves the ONNX model file and tokenizer file for a configured model,
//! either from a local directory (MODEL_DIR) or from the HuggingFace Hub.
//! Hub downloads are cached by hf-hub under its standard cache directory.

use crate::config::ServiceConfig;
use anyhow::{Context, Result};
use hf_hub::api::sync::Api;
use std::path::{Path, PathBuf};
use tracing::info;

/// ONNX model file name inside a local model directory
pub const ONNX_MODEL_FILE: &str = "model.onnx";

/// ONNX model path inside a sentence-transformers Hub repo
pub const HUB_ONNX_MODEL_FILE: &str = "onnx/model.onnx";

/// Tokenizer file name
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// Resolved on-disk locations of the model and tokenizer files
#[derive(Debug, Clone)]
pub struct ModelFiles {
    /// Path to the ONNX model file
    pub model_path: PathBuf,

    /// Path to the tokenizer JSON file
    pub tokenizer_path: PathBuf,
}

impl ModelFiles {
    /// Resolves model files for the given configuration.
    ///
    /// A configured local directory takes precedence; otherwise the files are
    /// fetched from the HuggingFace Hub by model identifier.
    pub fn resolve(config: &ServiceConfig) -> Result<Self> {
        match &config.model_dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::fetch(&config.model_name),
        }
    }

    /// Uses model.onnx and tokenizer.json from a local directory.
    ///
    /// # Errors
    /// Returns an error naming the missing file if either is absent.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let model_path = dir.join(ONNX_MODEL_FILE);
        let tokenizer_path = dir.join(TOKENIZER_FILE);

        if !model_path.exists() {
            anyhow::bail!("ONNX model file not found: {}", model_path.display());
        }
        if !tokenizer_path.exists() {
            anyhow::bail!("Tokenizer file not found: {}", tokenizer_path.display());
        }

        Ok(Self {
            model_path,
            tokenizer_path,
        })
    }

    /// Downloads (or reuses cached) model files from the HuggingFace Hub.
    ///
    /// Tries the sentence-transformers repo layout (onnx/model.onnx) first,
    /// then a root-level model.onnx.
    pub fn fetch(model_name: &str) -> Result<Self> {
        info!("Fetching model files for {} from the HuggingFace Hub", model_name);

        let api = Api::new().context("Failed to initialize HuggingFace Hub client")?;
        let repo = api.model(model_name.to_string());

        let model_path = repo
            .get(HUB_ONNX_MODEL_FILE)
            .or_else(|_| repo.get(ONNX_MODEL_FILE))
            .with_context(|| format!("Failed to download ONNX model for {}", model_name))?;
        let tokenizer_path = repo
            .get(TOKENIZER_FILE)
            .with_context(|| format!("Failed to download tokenizer for {}", model_name))?;

        Ok(Self {
            model_path,
            tokenizer_path,
        })
    }
}
