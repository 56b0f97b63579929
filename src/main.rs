//! Task API - Main Application Entry Point
//!
//! Boots the service from its environment configuration and serves the
//! liveness endpoint.
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables (and an optional `.env`)
//! 2. Initialize logging, verbose when `DEBUG` is set
//! 3. Build HTTP router with routes and middleware
//! 4. Start server on configured port
//!
//! Any configuration error is fatal to startup.

use task_todo_api::{config::Config, handlers};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first, its DEBUG flag picks the default log level
    let config = Config::from_env()?;

    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable
    let default_level = if config.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .init();

    tracing::info!(
        env = %config.env,
        port = config.port,
        debug = config.debug,
        "Configuration loaded"
    );
    if config.postgres.uri.is_empty() {
        tracing::warn!("POSTGRES_URI is not set; the task store is unavailable");
    }

    let app = handlers::router();

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
