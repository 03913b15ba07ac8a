//! # PromptLink Orchestration Backend
//!
//! Backend for the PromptLink frontend: fans one chat message out to
//! multiple LLM providers concurrently and aggregates the per-agent results.
//!
//! ## Usage
//!
//! ```bash
//! # Start with defaults (port 5000)
//! promptlink-backend
//!
//! # Override the port and provide credentials
//! PORT=9000 OPENAI_API_KEY=sk-... OPENROUTER_API_KEY=sk-or-... promptlink-backend
//! ```

use promptlink_config::load_config;
use promptlink_providers::AgentRegistry;
use promptlink_server::{AppState, Server};
use promptlink_telemetry::{init_logging, LoggingConfig};
use tracing::{error, info};

/// Application entry point
#[tokio::main]
async fn main() {
    if let Err(e) = init_logging(&LoggingConfig::from_env()) {
        eprintln!("Failed to initialize logging: {e}");
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting PromptLink backend"
    );

    if let Err(e) = run().await {
        error!(error = %e, "Application failed");
        std::process::exit(1);
    }
}

/// Main application logic
async fn run() -> anyhow::Result<()> {
    let config = load_config()?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        frontend_url = %config.frontend_url,
        "Configuration loaded"
    );

    let registry = AgentRegistry::from_config(&config)?;

    let server_config = config.server.clone();
    let state = AppState::builder().config(config).registry(registry).build();

    let server = Server::new(server_config, state);
    server.run().await?;

    Ok(())
}
