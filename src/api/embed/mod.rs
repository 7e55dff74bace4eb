// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding API Module
//!
//! Provides the POST /embed endpoint for generating sentence embeddings.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::embed_handler;
pub use request::{EmbedInputs, EmbedRequest};
pub use response::{EmbedResponse, EmbeddingsPayload};
