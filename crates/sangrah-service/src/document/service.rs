//! Document create and edit, recording a version for each change.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use sangrah_core::error::AppError;
use sangrah_core::result::AppResult;
use sangrah_core::types::id::DocumentId;
use sangrah_database::store::DocumentStore;
use sangrah_entity::document::{CreateDocument, Document, DocumentPatch};
use sangrah_entity::version::{ChangeType, DocumentVersion, TrackedState};

use crate::context::RequestContext;
use crate::version::{EditOptions, VersionService};

/// Reason recorded on a document's first version.
const INITIAL_REASON: &str = "Initial version";

/// A saved document together with the version its save produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpdate {
    /// The document as stored.
    pub document: Document,
    /// The version recording this save.
    pub version: DocumentVersion,
}

/// Manages live documents.
#[derive(Debug, Clone)]
pub struct DocumentService {
    /// Document store.
    documents: Arc<dyn DocumentStore>,
    /// Version history.
    versions: Arc<VersionService>,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(documents: Arc<dyn DocumentStore>, versions: Arc<VersionService>) -> Self {
        Self {
            documents,
            versions,
        }
    }

    /// Create a document and record its first version.
    pub async fn create_document(
        &self,
        ctx: &RequestContext,
        input: CreateDocument,
    ) -> AppResult<DocumentUpdate> {
        if input.title.trim().is_empty() {
            return Err(AppError::validation("Document title must not be empty"));
        }

        let mut input = input;
        if input.owner_id.is_none() {
            input.owner_id = ctx.actor;
        }

        let document = input.into_document(ctx.request_time);

        let (document, version) = self
            .versions
            .record_version_on_edit(
                ctx,
                document.id,
                None,
                &document,
                EditOptions {
                    change_type: Some(ChangeType::Major),
                    change_reason: Some(INITIAL_REASON.to_string()),
                },
            )
            .await?;

        info!(
            document_id = %document.id,
            actor_id = ?ctx.actor,
            "Document created"
        );

        Ok(DocumentUpdate { document, version })
    }

    /// Fetch a live document.
    pub async fn get_document(&self, document_id: DocumentId) -> AppResult<Document> {
        self.documents
            .find_by_id(document_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Document {document_id} not found")))
    }

    /// Apply a partial update and record the resulting version.
    pub async fn update_document(
        &self,
        ctx: &RequestContext,
        document_id: DocumentId,
        patch: DocumentPatch,
        options: EditOptions,
    ) -> AppResult<DocumentUpdate> {
        if patch.title.as_ref().is_some_and(|t| t.trim().is_empty()) {
            return Err(AppError::validation("Document title must not be empty"));
        }

        let mut document = self.get_document(document_id).await?;
        let old_state = TrackedState::capture(&document);

        if !document.apply_patch(patch) {
            return Err(AppError::validation("No fields to update"));
        }
        document.updated_at = ctx.request_time;

        let (document, version) = self
            .versions
            .record_version_on_edit(ctx, document_id, Some(&old_state), &document, options)
            .await?;

        Ok(DocumentUpdate { document, version })
    }
}
