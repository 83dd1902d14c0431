//! Document version entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sangrah_core::result::AppResult;
use sangrah_core::types::id::{DocumentId, DocumentVersionId, UserId};

use crate::document::FileRef;

use super::snapshot::VersionSnapshot;

/// A persisted, numbered snapshot of a document. Read-only once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DocumentVersion {
    /// Unique version record identifier.
    pub id: DocumentVersionId,
    /// The document this version belongs to.
    pub document_id: DocumentId,
    /// Sequential version number, unique per document and starting at 1.
    pub version_number: i32,
    /// Optional cosmetic label such as `"1.1"`. Unrelated to `version_number`.
    pub version_label: Option<String>,
    /// When this version was recorded.
    pub created_at: DateTime<Utc>,
    /// The acting user, absent for system-triggered versions.
    pub created_by: Option<UserId>,
    /// Human-readable description of what changed.
    pub change_reason: String,
    /// The snapshot payload.
    pub snapshot: serde_json::Value,
    /// File references valid at this version.
    #[sqlx(json)]
    pub files: Vec<FileRef>,
}

impl DocumentVersion {
    /// Decode the stored snapshot payload.
    pub fn decode_snapshot(&self) -> AppResult<VersionSnapshot> {
        VersionSnapshot::from_payload(&self.snapshot)
    }
}

/// Data required to append a new version.
///
/// The store allocates `version_number`, `id` and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocumentVersion {
    /// The owning document.
    pub document_id: DocumentId,
    /// The snapshot to persist.
    pub snapshot: VersionSnapshot,
    /// Description of the change.
    pub change_reason: String,
    /// Acting user.
    pub created_by: Option<UserId>,
    /// Optional cosmetic label.
    pub version_label: Option<String>,
}

impl NewDocumentVersion {
    /// Build the record for an allocated version number.
    pub fn into_version(
        self,
        version_number: i32,
        created_at: DateTime<Utc>,
    ) -> AppResult<DocumentVersion> {
        Ok(DocumentVersion {
            id: DocumentVersionId::new(),
            document_id: self.document_id,
            version_number,
            version_label: self.version_label,
            created_at,
            created_by: self.created_by,
            change_reason: self.change_reason,
            snapshot: self.snapshot.to_payload()?,
            files: self.snapshot.files,
        })
    }
}
