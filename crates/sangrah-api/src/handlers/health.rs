//! Health check handler.

use axum::Json;
use axum::extract::State;

use sangrah_core::config::StoreBackend;
use sangrah_core::error::AppError;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<HealthResponse>>> {
    if !state.stores.versions.health_check().await? {
        return Err(AppError::service_unavailable("Version store is not answering").into());
    }

    let backend = match state.config.versioning.backend {
        StoreBackend::Postgres => "postgres",
        StoreBackend::Memory => "memory",
    };

    Ok(Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: backend.to_string(),
    })))
}
