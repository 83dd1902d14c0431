//! Document version repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::info;

use sangrah_core::error::{AppError, ErrorKind};
use sangrah_core::result::AppResult;
use sangrah_core::types::id::{DocumentId, DocumentVersionId};
use sangrah_core::types::pagination::{PageRequest, PageResponse};
use sangrah_entity::document::Document;
use sangrah_entity::version::{DocumentVersion, NewDocumentVersion};

use crate::connection::ping;
use crate::repositories::document::{insert_document, update_document};
use crate::retry::retry_on_conflict;
use crate::store::{DocumentWrite, VersionStore};

/// Unique constraint on `(document_id, version_number)`.
const VERSION_NUMBER_KEY: &str = "document_versions_document_id_version_number_key";
/// Foreign key from a version to its document.
const DOCUMENT_FK: &str = "document_versions_document_id_fkey";
/// Foreign key from a counter row to its document.
const COUNTER_DOCUMENT_FK: &str = "document_version_counters_document_id_fkey";

/// Repository for the append-only `document_versions` table.
#[derive(Debug, Clone)]
pub struct DocumentVersionRepository {
    pool: PgPool,
    max_append_retries: u32,
}

impl DocumentVersionRepository {
    /// Create a new version repository.
    pub fn new(pool: PgPool, max_append_retries: u32) -> Self {
        Self {
            pool,
            max_append_retries,
        }
    }

    /// One write-allocate-insert attempt, in a single transaction.
    ///
    /// The document write locks the document's row, and the counter upsert
    /// then locks its counter, so concurrent saves for the same document
    /// queue behind each other until commit. The counter never falls behind
    /// the highest stored number, which keeps it correct for rows written
    /// before it existed. Dropping the transaction before commit rolls
    /// back both writes.
    async fn try_save(
        &self,
        write: DocumentWrite,
        document: &Document,
        version: &NewDocumentVersion,
        payload: &serde_json::Value,
    ) -> AppResult<(Document, DocumentVersion)> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let saved = match write {
            DocumentWrite::Create => insert_document(&mut *tx, document).await?,
            DocumentWrite::Update => update_document(&mut *tx, document).await?,
        };

        let version_number: i32 = sqlx::query_scalar(
            "INSERT INTO document_version_counters (document_id, last_version) \
             VALUES ($1, (SELECT COALESCE(MAX(version_number), 0) + 1 \
                          FROM document_versions WHERE document_id = $1)) \
             ON CONFLICT (document_id) DO UPDATE SET last_version = GREATEST( \
                 document_version_counters.last_version + 1, EXCLUDED.last_version) \
             RETURNING last_version",
        )
        .bind(version.document_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| classify_write_error(e, version.document_id, "allocate version number"))?;

        let record = sqlx::query_as::<_, DocumentVersion>(
            "INSERT INTO document_versions \
             (id, document_id, version_number, version_label, created_by, change_reason, snapshot, files) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(DocumentVersionId::new())
        .bind(version.document_id)
        .bind(version_number)
        .bind(&version.version_label)
        .bind(version.created_by)
        .bind(&version.change_reason)
        .bind(payload)
        .bind(Json(&version.snapshot.files))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| classify_write_error(e, version.document_id, "insert version"))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit version", e)
        })?;

        Ok((saved, record))
    }
}

#[async_trait]
impl VersionStore for DocumentVersionRepository {
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
        let payload = version.snapshot.to_payload()?;

        let (saved, record) = retry_on_conflict(version.document_id, self.max_append_retries, || {
            self.try_save(write, document, &version, &payload)
        })
        .await?;

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
        sqlx::query_as::<_, DocumentVersion>(
            "SELECT * FROM document_versions WHERE document_id = $1 AND version_number = $2",
        )
        .bind(document_id)
        .bind(version_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find version", e))
    }

    async fn list_versions(
        &self,
        document_id: DocumentId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<DocumentVersion>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM document_versions WHERE document_id = $1")
                .bind(document_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count versions", e)
                })?;

        let versions = sqlx::query_as::<_, DocumentVersion>(
            "SELECT * FROM document_versions WHERE document_id = $1 \
             ORDER BY version_number DESC LIMIT $2 OFFSET $3",
        )
        .bind(document_id)
        .bind(i64::try_from(page.limit()).unwrap_or(i64::MAX))
        .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list versions", e))?;

        Ok(PageResponse::new(
            versions,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn latest_version(&self, document_id: DocumentId) -> AppResult<Option<DocumentVersion>> {
        sqlx::query_as::<_, DocumentVersion>(
            "SELECT * FROM document_versions WHERE document_id = $1 \
             ORDER BY version_number DESC LIMIT 1",
        )
        .bind(document_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find latest version", e))
    }

    async fn health_check(&self) -> AppResult<bool> {
        ping(&self.pool).await
    }
}

/// Map a write failure to the error kind callers act on.
fn classify_write_error(err: sqlx::Error, document_id: DocumentId, action: &str) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        match db_err.constraint() {
            Some(VERSION_NUMBER_KEY) => {
                return AppError::with_source(
                    ErrorKind::Conflict,
                    format!("Version number already taken for document {document_id}"),
                    err,
                );
            }
            Some(DOCUMENT_FK) | Some(COUNTER_DOCUMENT_FK) => {
                return AppError::not_found(format!("Document {document_id} not found"));
            }
            _ => {}
        }
    }
    AppError::with_source(ErrorKind::Database, format!("Failed to {action}"), err)
}
