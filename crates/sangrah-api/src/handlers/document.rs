//! Document create, read and edit handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use crate::dto::request::{CreateDocumentRequest, UpdateDocumentRequest};
use crate::error::ApiResult;
use crate::extractors::Actor;
use crate::extractors::path::parse_document_id;
use crate::state::AppState;

/// POST /api/documents
pub async fn create_document(
    State(state): State<AppState>,
    actor: Actor,
    Json(req): Json<CreateDocumentRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    req.validate()?;

    let created = state
        .document_service
        .create_document(&actor, req.into_input())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "data": created })),
    ))
}

/// GET /api/documents/{id}
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let document = state
        .document_service
        .get_document(parse_document_id(&id)?)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": document })))
}

/// PATCH /api/documents/{id}
pub async fn update_document(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
    Json(req): Json<UpdateDocumentRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    req.validate()?;
    let document_id = parse_document_id(&id)?;
    let (patch, options) = req.into_parts();

    let updated = state
        .document_service
        .update_document(&actor, document_id, patch, options)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": updated })))
}
