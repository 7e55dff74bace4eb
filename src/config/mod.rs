// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the embedding node

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default embedding model identifier (384-dimensional sentence transformer)
pub const DEFAULT_MODEL_NAME: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Fixed API port, bound on all interfaces
pub const DEFAULT_PORT: u16 = 8580;

/// Configuration for the embedding node
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Model identifier (HuggingFace repo id, e.g. "sentence-transformers/all-MiniLM-L6-v2")
    pub model_name: String,
    /// Optional local directory holding model.onnx + tokenizer.json.
    /// When set, no network access is attempted.
    pub model_dir: Option<PathBuf>,
}

impl ServiceConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            model_name: env::var("MODEL_NAME").unwrap_or_else(|_| DEFAULT_MODEL_NAME.to_string()),
            model_dir: env::var("MODEL_DIR").ok().map(PathBuf::from),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model_name.trim().is_empty() {
            return Err("Model name must not be empty".to_string());
        }
        Ok(())
    }

    /// Address the HTTP server binds: all interfaces, fixed port
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT))
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL_NAME.to_string(),
            model_dir: None,
        }
    }
}
