//! HTTP application assembly and serving.
//!
//! [`build_app`] is shared by the binary and the integration tests so both
//! run the same middleware stack.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::{Method, StatusCode, header};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::{AppState, StorageBackend};
use crate::config::ServiceConfig;
use crate::persistence::{ChangelogRepository, PostgresStore, RepositoryError, ToolRepository};

/// Builds the router with CORS, tracing, and timeout layers applied.
pub fn build_app(state: AppState, config: &ServiceConfig) -> Router {
    let cors = match &config.cors_allowed_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.clone())
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE]),
        None => CorsLayer::permissive(),
    };

    api::build_router()
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Selects and prepares the store named by the configuration.
///
/// # Errors
///
/// Returns [`RepositoryError::Storage`] if PostgreSQL is selected and the
/// connection or a migration fails.
pub async fn build_state(config: &ServiceConfig) -> Result<AppState, RepositoryError> {
    if !config.persistence_enabled {
        tracing::warn!("persistence disabled; data lives in memory only");
        return Ok(AppState::in_memory());
    }

    let store = Arc::new(PostgresStore::connect(config).await?);
    if config.database_run_migrations {
        store.migrate().await?;
        tracing::info!("database migrations applied");
    }
    let tools: Arc<dyn ToolRepository> = Arc::clone(&store) as Arc<dyn ToolRepository>;
    let entries: Arc<dyn ChangelogRepository> = store;
    Ok(AppState::new(tools, entries, StorageBackend::Postgres))
}

/// Serves `app` on `listener` until Ctrl-C.
///
/// # Errors
///
/// Returns an I/O error if the server fails.
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "cannot listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
