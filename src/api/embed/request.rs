// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! EmbedRequest type for POST /embed
//!
//! The request body carries a required `inputs` field holding either a single
//! string or an array of strings. Parsing goes through a generic JSON value so
//! a missing field maps to the exact "Missing 'inputs' field" message instead
//! of a framework deserialization error.

use crate::api::ApiError;
use serde::{Deserialize, Serialize};

/// The `inputs` field: one string or a sequence of strings
///
/// # Example
/// ```json
/// {"inputs": "hello world"}
/// {"inputs": ["first", "second"]}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbedInputs {
    /// A single text, normalized to a one-element batch before encoding
    Single(String),
    /// A sequence of texts, encoded in order
    Batch(Vec<String>),
}

impl EmbedInputs {
    /// True when the caller sent one bare string (the response then carries
    /// one flat vector instead of a sequence)
    pub fn is_single(&self) -> bool {
        matches!(self, EmbedInputs::Single(_))
    }

    /// Normalizes into a batch of texts
    pub fn into_batch(self) -> Vec<String> {
        match self {
            EmbedInputs::Single(text) => vec![text],
            EmbedInputs::Batch(texts) => texts,
        }
    }
}

/// Request body for POST /embed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedRequest {
    pub inputs: EmbedInputs,
}

impl EmbedRequest {
    /// Parses a request from a generic JSON body.
    ///
    /// # Errors
    /// - `inputs` absent (or body not an object) → "Missing 'inputs' field"
    /// - `inputs` of the wrong shape → descriptive bad-request error
    pub fn from_value(body: &serde_json::Value) -> Result<Self, ApiError> {
        let inputs = body.get("inputs").ok_or_else(ApiError::missing_inputs)?;

        let inputs: EmbedInputs = serde_json::from_value(inputs.clone()).map_err(|_| {
            ApiError::InvalidRequest(
                "Invalid 'inputs' field: expected a string or an array of strings".to_string(),
            )
        })?;

        Ok(Self { inputs })
    }
}
