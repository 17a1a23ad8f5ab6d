//! Lading Server
//!
//! HTTP front end for the extraction pipeline: multipart upload, free-text
//! query over the stored results, and export in three formats. Session
//! results live in an in-memory keyed store injected into the handlers.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod query;
pub mod store;

use config::ServerConfig;
use handlers::{create_router, AppState};
use lading_extractor::Extractor;
use lading_llm::GeminiClient;
use query::QueryResponder;
use std::sync::Arc;
use store::ResultStore;
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the HTTP server.
///
/// Builds the provider chain and extraction pipeline from configuration and
/// serves until the process is stopped.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Lading server");
    info!("Bind address: {}", config.bind_addr());

    let api_key = config.resolve_api_key()?;

    // Extraction wants determinism; querying can afford a little warmth.
    let extract_provider = Arc::new(GeminiClient::new(api_key.clone(), config.models.clone()));
    let query_provider = Arc::new(
        GeminiClient::new(api_key, config.models.clone()).with_generation(0.2, 4096),
    );

    let models: Vec<String> = extract_provider.models().to_vec();
    info!("Model chain: {}", models.join(" -> "));

    let state = AppState {
        store: Arc::new(ResultStore::new()),
        extractor: Arc::new(Extractor::new(extract_provider, config.extractor.clone())),
        responder: Arc::new(QueryResponder::new(query_provider)),
        models,
    };

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
