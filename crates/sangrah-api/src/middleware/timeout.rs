//! Per-request deadline.

use std::time::Duration;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use sangrah_core::error::AppError;

use crate::error::ApiError;

/// Fails the request with `503` if the handler does not finish in time.
pub async fn request_timeout(
    State(limit): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => ApiError(AppError::service_unavailable(format!(
            "Request did not complete within {}s",
            limit.as_secs()
        )))
        .into_response(),
    }
}
