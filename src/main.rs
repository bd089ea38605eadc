//! toolchangelog server entry point.
//!
//! Starts the Axum HTTP server with the REST endpoints.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use toolchangelog::config::{LogFormat, ServiceConfig};
use toolchangelog::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServiceConfig::from_env().context("invalid configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    tracing::info!(
        addr = %config.listen_addr,
        persistence = config.persistence_enabled,
        "starting toolchangelog"
    );

    // Build service layer over the selected store
    let state = server::build_state(&config)
        .await
        .context("failed to initialize storage")?;

    // Build router
    let app = server::build_app(state, &config);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    server::serve(listener, app).await?;

    tracing::info!("server stopped");
    Ok(())
}
