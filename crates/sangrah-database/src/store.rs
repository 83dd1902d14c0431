//! Persistence traits for documents and version history.

use async_trait::async_trait;

use sangrah_core::result::AppResult;
use sangrah_core::types::id::DocumentId;
use sangrah_core::types::pagination::{PageRequest, PageResponse};
use sangrah_entity::document::Document;
use sangrah_entity::version::{DocumentVersion, NewDocumentVersion};

/// Read access to live document records.
///
/// Writes go through [`VersionStore::save_with_version`] so that a live
/// document never changes without a version recording it.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a document by ID.
    async fn find_by_id(&self, id: DocumentId) -> AppResult<Option<Document>>;
}

/// How [`VersionStore::save_with_version`] writes the live document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentWrite {
    /// Insert a new document. Fails with `Conflict` if the ID is taken.
    Create,
    /// Overwrite an existing document. Fails with `NotFound` if it is missing.
    Update,
}

/// Append-only storage for document versions.
///
/// Implementations must guarantee that two records for the same document
/// never share a version number, even when appends race.
#[async_trait]
pub trait VersionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Write the live document and append the version recording it, as one
    /// unit: either both are stored or neither is.
    ///
    /// The version number is the highest existing one plus one, or 1.
    /// Version-number collisions are retried internally a bounded number of
    /// times and then surface as `Conflict`.
    async fn save_with_version(
        &self,
        write: DocumentWrite,
        document: &Document,
        version: NewDocumentVersion,
    ) -> AppResult<(Document, DocumentVersion)>;

    /// Fetch one version of a document.
    async fn get_version(
        &self,
        document_id: DocumentId,
        version_number: i32,
    ) -> AppResult<Option<DocumentVersion>>;

    /// List versions of a document, highest version number first.
    async fn list_versions(
        &self,
        document_id: DocumentId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<DocumentVersion>>;

    /// The version with the highest number, if any exist.
    async fn latest_version(&self, document_id: DocumentId) -> AppResult<Option<DocumentVersion>>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
