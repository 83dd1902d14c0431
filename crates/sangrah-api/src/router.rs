//! Route definitions for the e-Sangrah HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();
    let server = &config.server;
    let timeout = Duration::from_secs(server.request_timeout_seconds);

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(document_routes())
        .merge(version_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn_with_state(
            timeout,
            middleware::timeout::request_timeout,
        ))
        .layer(DefaultBodyLimit::max(server.max_body_bytes))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors::build_cors_layer(&server.cors))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Live document create, read, edit
fn document_routes() -> Router<AppState> {
    Router::new()
        .route("/documents", post(handlers::document::create_document))
        .route(
            "/documents/{id}",
            get(handlers::document::get_document).patch(handlers::document::update_document),
        )
}

/// Version history
fn version_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/documents/{id}/versions",
            get(handlers::version::list_versions),
        )
        .route(
            "/documents/{id}/versions/latest",
            get(handlers::version::latest_version),
        )
        .route(
            "/documents/{id}/versions/compare",
            get(handlers::version::compare_versions),
        )
        .route(
            "/documents/{id}/versions/{number}",
            get(handlers::version::get_version),
        )
        .route(
            "/documents/{id}/versions/{number}/restore",
            post(handlers::version::restore_version),
        )
}
