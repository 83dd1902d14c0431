//! In-memory version store using a Tokio mutex per document.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::info;

use sangrah_core::error::AppError;
use sangrah_core::result::AppResult;
use sangrah_core::types::id::DocumentId;
use sangrah_core::types::pagination::{PageRequest, PageResponse};
use sangrah_entity::document::Document;
use sangrah_entity::version::{DocumentVersion, NewDocumentVersion};

use crate::memory::MemoryDocumentStore;
use crate::store::{DocumentWrite, VersionStore};

/// Version history of one document, ascending by version number.
type History = Arc<Mutex<Vec<DocumentVersion>>>;

/// In-memory version store.
///
/// Saves for the same document are serialized on that document's mutex,
/// so allocation never collides and never needs a retry. The live
/// document is written under the same lock, after every step that can
/// fail, so it never gets ahead of its history. Saves for different
/// documents proceed independently.
#[derive(Debug, Clone, Default)]
pub struct MemoryVersionStore {
    histories: Arc<DashMap<DocumentId, History>>,
    documents: MemoryDocumentStore,
}

impl MemoryVersionStore {
    /// Create an empty store that writes live documents into `documents`.
    pub fn with_documents(documents: MemoryDocumentStore) -> Self {
        Self {
            histories: Arc::default(),
            documents,
        }
    }

    /// The history handle for a document, created on first use.
    ///
    /// The map guard is released before returning so the caller can await
    /// the mutex without blocking other documents' shards.
    fn history(&self, document_id: DocumentId) -> History {
        self.histories
            .entry(document_id)
            .or_insert_with(|| Arc::new(Mutex::new(Vec::new())))
            .value()
            .clone()
    }

    fn existing(&self, document_id: DocumentId) -> Option<History> {
        self.histories
            .get(&document_id)
            .map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl VersionStore for MemoryVersionStore {
    async fn save_with_version(
        &self,
        write: DocumentWrite,
        document: &Document,
        version: NewDocumentVersion,
    ) -> AppResult<(Document, DocumentVersion)> {
        if document.id != version.document_id {
            return Err(AppError::validation(format!(
                "Version for document {} cannot be saved with document {}",
                version.document_id, document.id
            )));
        }

        let history = self.history(version.document_id);
        let mut versions = history.lock().await;

        let next = versions.last().map_or(1, |latest| latest.version_number + 1);
        let record = version.into_version(next, Utc::now())?;
        let saved = match write {
            DocumentWrite::Create => self.documents.insert(document)?,
            DocumentWrite::Update => self.documents.replace(document)?,
        };
        versions.push(record.clone());

        info!(
            document_id = %record.document_id,
            version = record.version_number,
            "Document version appended"
        );
        Ok((saved, record))
    }

    async fn get_version(
        &self,
        document_id: DocumentId,
        version_number: i32,
    ) -> AppResult<Option<DocumentVersion>> {
        let Some(history) = self.existing(document_id) else {
            return Ok(None);
        };
        let versions = history.lock().await;
        Ok(versions
            .iter()
            .find(|v| v.version_number == version_number)
            .cloned())
    }

    async fn list_versions(
        &self,
        document_id: DocumentId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<DocumentVersion>> {
        let Some(history) = self.existing(document_id) else {
            return Ok(PageResponse::new(Vec::new(), page.page, page.page_size, 0));
        };
        let versions = history.lock().await;
        Ok(PageResponse::from_ordered(
            versions.iter().rev().cloned(),
            page,
        ))
    }

    async fn latest_version(&self, document_id: DocumentId) -> AppResult<Option<DocumentVersion>> {
        let Some(history) = self.existing(document_id) else {
            return Ok(None);
        };
        let versions = history.lock().await;
        Ok(versions.last().cloned())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use sangrah_core::error::ErrorKind;
    use sangrah_entity::document::{CreateDocument, DocumentStatus};
    use sangrah_entity::version::VersionSnapshot;

    use crate::store::DocumentStore;

    fn document() -> Document {
        CreateDocument {
            title: "Board minutes".to_string(),
            ..CreateDocument::default()
        }
        .into_document(Utc::now())
    }

    fn new_version(document_id: DocumentId, reason: &str) -> NewDocumentVersion {
        NewDocumentVersion {
            document_id,
            snapshot: VersionSnapshot {
                description: None,
                metadata: Default::default(),
                tags: vec![reason.to_string()],
                compliance: Default::default(),
                files: Vec::new(),
                signature: None,
                project: None,
                department: None,
                project_manager: None,
                document_donor: None,
                document_vendor: None,
                status: DocumentStatus::Draft,
                link: None,
                comment: None,
                document_date: None,
                created_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            },
            change_reason: reason.to_string(),
            created_by: None,
            version_label: None,
        }
    }

    /// A store holding one created document at version 1.
    async fn seeded() -> (MemoryVersionStore, Document) {
        let store = MemoryVersionStore::default();
        let doc = document();
        store
            .save_with_version(DocumentWrite::Create, &doc, new_version(doc.id, "created"))
            .await
            .unwrap();
        (store, doc)
    }

    async fn edit(store: &MemoryVersionStore, doc: &Document, reason: &str) -> DocumentVersion {
        store
            .save_with_version(DocumentWrite::Update, doc, new_version(doc.id, reason))
            .await
            .unwrap()
            .1
    }

    #[tokio::test]
    async fn test_sequential_saves_number_from_one() {
        let (store, doc) = seeded().await;
        assert_eq!(edit(&store, &doc, "two").await.version_number, 2);
        assert_eq!(edit(&store, &doc, "three").await.version_number, 3);

        let other = document();
        let (_, first) = store
            .save_with_version(DocumentWrite::Create, &other, new_version(other.id, "new"))
            .await
            .unwrap();
        assert_eq!(first.version_number, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves_are_a_permutation() {
        let (store, doc) = seeded().await;

        let tasks = (0..20).map(|i| {
            let store = store.clone();
            let doc = doc.clone();
            tokio::spawn(async move {
                store
                    .save_with_version(
                        DocumentWrite::Update,
                        &doc,
                        new_version(doc.id, &format!("edit {i}")),
                    )
                    .await
            })
        });

        let mut numbers: Vec<i32> = futures::future::join_all(tasks)
            .await
            .into_iter()
            .map(|joined| joined.unwrap().unwrap().1.version_number)
            .collect();
        numbers.sort_unstable();
        assert_eq!(numbers, (2..=21).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_failed_document_write_appends_nothing() {
        let store = MemoryVersionStore::default();
        let missing = document();

        let err = store
            .save_with_version(DocumentWrite::Update, &missing, new_version(missing.id, "x"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(store.latest_version(missing.id).await.unwrap().is_none());

        let (store, doc) = seeded().await;
        let err = store
            .save_with_version(DocumentWrite::Create, &doc, new_version(doc.id, "again"))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(store.latest_version(doc.id).await.unwrap().unwrap().version_number, 1);
    }

    #[tokio::test]
    async fn test_mismatched_document_is_rejected() {
        let (store, doc) = seeded().await;
        let mut other = doc.clone();
        other.comment = Some("changed".to_string());

        let err = store
            .save_with_version(DocumentWrite::Update, &other, new_version(DocumentId::new(), "x"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(store.latest_version(doc.id).await.unwrap().unwrap().version_number, 1);
    }

    #[tokio::test]
    async fn test_shared_document_map_sees_saves() {
        let documents = MemoryDocumentStore::new();
        let store = MemoryVersionStore::with_documents(documents.clone());
        let mut doc = document();
        store
            .save_with_version(DocumentWrite::Create, &doc, new_version(doc.id, "created"))
            .await
            .unwrap();

        doc.comment = Some("reviewed".to_string());
        edit(&store, &doc, "reviewed").await;

        let live = documents.find_by_id(doc.id).await.unwrap().unwrap();
        assert_eq!(live.comment.as_deref(), Some("reviewed"));
    }

    #[tokio::test]
    async fn test_list_is_descending_and_paged() {
        let (store, doc) = seeded().await;
        for _ in 0..4 {
            edit(&store, &doc, "edit").await;
        }

        let first = store
            .list_versions(doc.id, &PageRequest::new(1, 2))
            .await
            .unwrap();
        let numbers: Vec<i32> = first.items.iter().map(|v| v.version_number).collect();
        assert_eq!(numbers, vec![5, 4]);
        assert_eq!(first.total_items, 5);
        assert!(first.has_next);

        let last = store
            .list_versions(doc.id, &PageRequest::new(3, 2))
            .await
            .unwrap();
        assert_eq!(last.items.len(), 1);
        assert_eq!(last.items[0].version_number, 1);
    }

    #[tokio::test]
    async fn test_unknown_document_has_no_history() {
        let store = MemoryVersionStore::default();
        let doc = DocumentId::new();
        assert!(store.latest_version(doc).await.unwrap().is_none());
        assert!(store.get_version(doc, 1).await.unwrap().is_none());
        let page = store
            .list_versions(doc, &PageRequest::default())
            .await
            .unwrap();
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn test_latest_and_get() {
        let (store, doc) = seeded().await;
        edit(&store, &doc, "two").await;

        let latest = store.latest_version(doc.id).await.unwrap().unwrap();
        assert_eq!(latest.version_number, 2);
        assert_eq!(latest.change_reason, "two");

        let first = store.get_version(doc.id, 1).await.unwrap().unwrap();
        assert_eq!(first.change_reason, "created");
        assert!(store.get_version(doc.id, 3).await.unwrap().is_none());
    }
}
