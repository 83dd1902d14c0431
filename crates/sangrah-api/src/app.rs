//! Application builder and server loop.

use std::time::Duration;

use axum::Router;
use tracing::{error, info, warn};

use sangrah_core::config::AppConfig;
use sangrah_core::error::AppError;
use sangrah_database::Stores;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application over the given stores.
pub fn build_app(config: AppConfig, stores: Stores) -> Router {
    build_router(AppState::new(config, stores))
}

/// Runs the HTTP server until Ctrl+C or SIGTERM, then drains in-flight
/// requests for up to `server.shutdown_grace_seconds`.
pub async fn run_server(config: AppConfig, stores: Stores) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let app = build_app(config, stores.clone());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(%addr, "e-Sangrah server listening");

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());
    let drained = async {
        server
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))
    };

    tokio::select! {
        result = drained => result?,
        _ = async {
            shutdown_signal().await;
            tokio::time::sleep(grace).await;
        } => {
            warn!(grace_seconds = grace.as_secs(), "Shutdown grace period elapsed, aborting open requests");
        }
    }

    stores.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
