//! Version history handlers: list, view, compare and restore.

use axum::Json;
use axum::extract::{Path, Query, State};
use validator::Validate;

use crate::dto::request::{CompareParams, RestoreVersionRequest};
use crate::dto::response::PaginatedResponse;
use crate::error::ApiResult;
use crate::extractors::path::{parse_document_id, parse_version_number};
use crate::extractors::{Actor, PaginationParams};
use crate::state::AppState;

/// GET /api/documents/{id}/versions?page=&per_page=
pub async fn list_versions(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<serde_json::Value>> {
    let document_id = parse_document_id(&id)?;
    let page = state
        .version_service
        .page_request(params.page, params.per_page)?;

    let versions = state
        .version_service
        .list_versions(document_id, &page)
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": PaginatedResponse::from(versions),
    })))
}

/// GET /api/documents/{id}/versions/latest
pub async fn latest_version(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let version = state
        .version_service
        .latest_version(parse_document_id(&id)?)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": version })))
}

/// GET /api/documents/{id}/versions/{number}
pub async fn get_version(
    State(state): State<AppState>,
    Path((id, number)): Path<(String, String)>,
) -> ApiResult<Json<serde_json::Value>> {
    let version = state
        .version_service
        .view_version(parse_document_id(&id)?, parse_version_number(&number)?)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": version })))
}

/// GET /api/documents/{id}/versions/compare?from=&to=
pub async fn compare_versions(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<CompareParams>,
) -> ApiResult<Json<serde_json::Value>> {
    params.validate()?;

    let changes = state
        .version_service
        .compare_versions(parse_document_id(&id)?, params.from, params.to)
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "from": params.from,
            "to": params.to,
            "changes": changes,
        }
    })))
}

/// POST /api/documents/{id}/versions/{number}/restore
pub async fn restore_version(
    State(state): State<AppState>,
    actor: Actor,
    Path((id, number)): Path<(String, String)>,
    Json(req): Json<RestoreVersionRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    req.validate()?;

    let outcome = state
        .version_service
        .restore_version(
            &actor,
            parse_document_id(&id)?,
            parse_version_number(&number)?,
            req.notes.as_deref(),
        )
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": outcome })))
}
