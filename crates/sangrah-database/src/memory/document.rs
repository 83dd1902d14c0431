//! In-memory document store.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use sangrah_core::error::AppError;
use sangrah_core::result::AppResult;
use sangrah_core::types::id::DocumentId;
use sangrah_entity::document::Document;

use crate::store::DocumentStore;

/// Document store backed by a concurrent map.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: Arc<DashMap<DocumentId, Document>>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new document. `Conflict` if the ID is taken.
    pub(crate) fn insert(&self, document: &Document) -> AppResult<Document> {
        match self.documents.entry(document.id) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Document {} already exists",
                document.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(document.clone());
                Ok(document.clone())
            }
        }
    }

    /// Overwrite an existing document. `NotFound` if it is missing.
    pub(crate) fn replace(&self, document: &Document) -> AppResult<Document> {
        let mut stored = self
            .documents
            .get_mut(&document.id)
            .ok_or_else(|| AppError::not_found(format!("Document {} not found", document.id)))?;
        *stored = document.clone();
        Ok(document.clone())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_by_id(&self, id: DocumentId) -> AppResult<Option<Document>> {
        Ok(self.documents.get(&id).map(|entry| entry.value().clone()))
    }
}
