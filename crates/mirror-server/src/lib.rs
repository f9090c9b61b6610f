//! Mirror Server
//!
//! Thin HTTP surface over the verification pipeline: `POST /api/verify` runs
//! one pipeline pass, `GET /health` reports liveness. Everything else lives in
//! the pipeline crates.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use mirror_graph::DkgClient;
use mirror_llm::AsiOracle;
use mirror_pipeline::VerificationPipeline;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

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

/// Start the Mirror HTTP server
///
/// Wires the oracle and DKG clients from config, builds the pipeline, and
/// serves until shutdown. Missing credentials degrade the corresponding
/// pipeline stage rather than failing startup.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Mirror server");
    info!("Bind address: {}", config.bind_addr());

    if config.oracle.api_key.is_empty() {
        warn!("No oracle API key configured; extraction and scoring will fail open");
    }

    let oracle = AsiOracle::new(&config.oracle.api_key, &config.oracle.base_url)
        .with_model(&config.oracle.model);
    let dkg = DkgClient::connect(config.dkg.node_config());

    let pipeline = VerificationPipeline::new(oracle, dkg, config.pipeline.clone());
    let state = AppState {
        pipeline: Arc::new(pipeline),
    };

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Mirror server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
