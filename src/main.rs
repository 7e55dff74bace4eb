// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use fabstir_embedding_node::{
    api::{start_server, AppState},
    config::ServiceConfig,
    embeddings::{ModelFiles, OnnxEmbeddingModel},
};
use std::{env, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting embedding node...\n");

    let config = ServiceConfig::from_env();
    if let Err(e) = config.validate() {
        eprintln!("❌ Invalid configuration: {}", e);
        std::process::exit(1);
    }

    // Load the model before binding the listener. Any failure here is fatal,
    // the service never serves with a partially-initialized model.
    println!("🧠 Loading embedding model: {}", config.model_name);

    let model_files = match ModelFiles::resolve(&config) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("❌ Failed to resolve model files: {:#}", e);
            std::process::exit(1);
        }
    };

    let model = match OnnxEmbeddingModel::new(
        config.model_name.clone(),
        model_files.model_path.clone(),
        model_files.tokenizer_path.clone(),
    )
    .await
    {
        Ok(model) => model,
        Err(e) => {
            eprintln!("❌ Failed to load model: {:#}", e);
            std::process::exit(1);
        }
    };

    println!(
        "✅ Model {} loaded ({} dimensions, max {} tokens)",
        model.model_name(),
        model.dimension(),
        model.max_seq_length()
    );

    let addr = config.listen_addr();
    let state = AppState::new(Arc::new(model));

    println!("\nAPI Endpoints:");
    println!("  Health:       http://localhost:{}/health", addr.port());
    println!("  Embed:        POST http://localhost:{}/embed", addr.port());
    println!("  Info:         http://localhost:{}/info", addr.port());
    println!("\nPress Ctrl+C to shutdown...\n");

    start_server(state, addr).await
}
