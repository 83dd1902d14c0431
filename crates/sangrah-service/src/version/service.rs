//! Version history: recording, viewing, comparing and restoring.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use sangrah_core::error::AppError;
use sangrah_core::result::AppResult;
use sangrah_core::types::id::DocumentId;
use sangrah_core::types::pagination::{PageRequest, PageResponse};
use sangrah_database::store::{DocumentStore, DocumentWrite, VersionStore};
use sangrah_entity::document::Document;
use sangrah_entity::version::{
    ChangeType, DocumentVersion, FieldChange, NewDocumentVersion, TrackedState, next_label,
};

use crate::context::RequestContext;

use super::describer::describe_changes;
use super::detector::detect_changes;
use super::restore::apply_snapshot;
use super::snapshot::build_snapshot;

/// Optional knobs for recording an edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditOptions {
    /// Bump the cosmetic label of the previous version.
    #[serde(default)]
    pub change_type: Option<ChangeType>,
    /// Use this reason instead of the generated summary.
    #[serde(default)]
    pub change_reason: Option<String>,
}

/// Result of restoring a document to an earlier version.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreOutcome {
    /// The live document after the restore.
    pub document: Document,
    /// The version recording the restore.
    pub version: DocumentVersion,
    /// What the restore changed on the live document.
    pub changes: Vec<FieldChange>,
    /// One-line summary of `changes`.
    pub summary: String,
}

/// Manages the version history of documents.
#[derive(Debug, Clone)]
pub struct VersionService {
    /// Live documents.
    documents: Arc<dyn DocumentStore>,
    /// Version history.
    versions: Arc<dyn VersionStore>,
    /// Page size when a listing does not ask for one.
    default_page_size: u64,
}

impl VersionService {
    /// Creates a new version service.
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        versions: Arc<dyn VersionStore>,
        default_page_size: u64,
    ) -> Self {
        Self {
            documents,
            versions,
            default_page_size,
        }
    }

    /// Build a page request, falling back to the configured page size.
    ///
    /// Page numbers past the addressable range are a `Validation` error.
    pub fn page_request(
        &self,
        page: Option<u64>,
        page_size: Option<u64>,
    ) -> AppResult<PageRequest> {
        PageRequest::try_new(
            page.unwrap_or(1),
            page_size.unwrap_or(self.default_page_size),
        )
    }

    /// Save `new_document` and record the version capturing it, as one
    /// unit of work.
    ///
    /// `old_state` is the tracked state before the edit, or `None` for a
    /// document's first version, in which case the document is inserted
    /// rather than overwritten.
    pub async fn record_version_on_edit(
        &self,
        ctx: &RequestContext,
        document_id: DocumentId,
        old_state: Option<&TrackedState>,
        new_document: &Document,
        options: EditOptions,
    ) -> AppResult<(Document, DocumentVersion)> {
        if new_document.id != document_id {
            return Err(AppError::validation(format!(
                "Document {} does not match version target {document_id}",
                new_document.id
            )));
        }

        let changes = detect_changes(old_state, &TrackedState::capture(new_document));
        let change_reason = match options.change_reason.as_deref().map(str::trim) {
            Some(reason) if !reason.is_empty() => reason.to_string(),
            _ => describe_changes(&changes),
        };

        let version_label = match options.change_type {
            Some(change_type) => {
                let previous = self.versions.latest_version(document_id).await?;
                let previous_label = previous.as_ref().and_then(|v| v.version_label.as_deref());
                Some(next_label(previous_label, change_type))
            }
            None => None,
        };

        let write = match old_state {
            Some(_) => DocumentWrite::Update,
            None => DocumentWrite::Create,
        };

        let (document, version) = self
            .versions
            .save_with_version(
                write,
                new_document,
                NewDocumentVersion {
                    document_id,
                    snapshot: build_snapshot(new_document),
                    change_reason,
                    created_by: ctx.actor,
                    version_label,
                },
            )
            .await?;

        info!(
            document_id = %document_id,
            version = version.version_number,
            actor_id = ?ctx.actor,
            changes = changes.len(),
            "Version recorded"
        );

        Ok((document, version))
    }

    /// Fetch one version of a document.
    pub async fn view_version(
        &self,
        document_id: DocumentId,
        version_number: i32,
    ) -> AppResult<DocumentVersion> {
        self.versions
            .get_version(document_id, version_number)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Version {version_number} of document {document_id} not found"
                ))
            })
    }

    /// List versions of a document, newest first.
    pub async fn list_versions(
        &self,
        document_id: DocumentId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<DocumentVersion>> {
        self.versions.list_versions(document_id, page).await
    }

    /// The most recent version of a document.
    pub async fn latest_version(&self, document_id: DocumentId) -> AppResult<DocumentVersion> {
        self.versions
            .latest_version(document_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Document {document_id} has no versions"))
            })
    }

    /// What changed between two versions of the same document.
    pub async fn compare_versions(
        &self,
        document_id: DocumentId,
        from: i32,
        to: i32,
    ) -> AppResult<Vec<FieldChange>> {
        let from_snapshot = self.view_version(document_id, from).await?.decode_snapshot()?;
        let to_snapshot = self.view_version(document_id, to).await?.decode_snapshot()?;

        Ok(detect_changes(
            Some(&TrackedState::from_snapshot(&from_snapshot)),
            &TrackedState::from_snapshot(&to_snapshot),
        ))
    }

    /// Restore a document to an earlier version.
    ///
    /// The restore is recorded as a new version; no existing version is
    /// modified or removed.
    pub async fn restore_version(
        &self,
        ctx: &RequestContext,
        document_id: DocumentId,
        version_number: i32,
        notes: Option<&str>,
    ) -> AppResult<RestoreOutcome> {
        let target = self.view_version(document_id, version_number).await?;
        let snapshot = target.decode_snapshot()?;

        let mut document = self
            .documents
            .find_by_id(document_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Document {document_id} not found")))?;
        let old_state = TrackedState::capture(&document);

        apply_snapshot(&mut document, &snapshot)?;
        document.updated_at = ctx.request_time;

        let changes = detect_changes(Some(&old_state), &TrackedState::capture(&document));
        let summary = describe_changes(&changes);

        let change_reason = match notes.map(str::trim) {
            Some(notes) if !notes.is_empty() => {
                format!("Restored to version {version_number}: {notes}")
            }
            _ => format!("Restored to version {version_number}"),
        };

        let snapshot = build_snapshot(&document);
        let (document, version) = self
            .versions
            .save_with_version(
                DocumentWrite::Update,
                &document,
                NewDocumentVersion {
                    document_id,
                    snapshot,
                    change_reason,
                    created_by: ctx.actor,
                    version_label: None,
                },
            )
            .await?;

        info!(
            document_id = %document_id,
            restored_from = version_number,
            version = version.version_number,
            actor_id = ?ctx.actor,
            summary = %summary,
            "Document restored"
        );

        Ok(RestoreOutcome {
            document,
            version,
            changes,
            summary,
        })
    }
}
