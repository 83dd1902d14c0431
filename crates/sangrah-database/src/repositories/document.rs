//! Document repository implementation.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};

use sangrah_core::error::{AppError, ErrorKind};
use sangrah_core::result::AppResult;
use sangrah_core::types::id::DocumentId;
use sangrah_entity::document::Document;

use crate::store::DocumentStore;

/// Repository for live document records.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for DocumentRepository {
    async fn find_by_id(&self, id: DocumentId) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find document", e))
    }
}

/// Insert a document on the given connection.
pub(crate) async fn insert_document(
    conn: &mut PgConnection,
    document: &Document,
) -> AppResult<Document> {
    sqlx::query_as::<_, Document>(
        "INSERT INTO documents (id, title, owner_id, description, metadata, tags, compliance, \
         status, project, department, project_manager, document_donor, document_vendor, \
         link, comment, document_date, files, signature, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
         $17, $18, $19, $20) RETURNING *",
    )
    .bind(document.id)
    .bind(&document.title)
    .bind(document.owner_id)
    .bind(&document.description)
    .bind(Json(&document.metadata))
    .bind(&document.tags)
    .bind(Json(&document.compliance))
    .bind(document.status)
    .bind(document.project)
    .bind(document.department)
    .bind(document.project_manager)
    .bind(document.document_donor)
    .bind(document.document_vendor)
    .bind(&document.link)
    .bind(&document.comment)
    .bind(document.document_date)
    .bind(Json(&document.files))
    .bind(Json(&document.signature))
    .bind(document.created_at)
    .bind(document.updated_at)
    .fetch_one(conn)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("documents_pkey") => {
            AppError::conflict(format!("Document {} already exists", document.id))
        }
        _ => AppError::with_source(ErrorKind::Database, "Failed to create document", e),
    })
}

/// Overwrite a document on the given connection. `NotFound` if it is missing.
///
/// The row stays locked until the surrounding transaction ends.
pub(crate) async fn update_document(
    conn: &mut PgConnection,
    document: &Document,
) -> AppResult<Document> {
    sqlx::query_as::<_, Document>(
        "UPDATE documents SET title = $2, owner_id = $3, description = $4, metadata = $5, \
         tags = $6, compliance = $7, status = $8, project = $9, department = $10, \
         project_manager = $11, document_donor = $12, document_vendor = $13, link = $14, \
         comment = $15, document_date = $16, files = $17, signature = $18, updated_at = $19 \
         WHERE id = $1 RETURNING *",
    )
    .bind(document.id)
    .bind(&document.title)
    .bind(document.owner_id)
    .bind(&document.description)
    .bind(Json(&document.metadata))
    .bind(&document.tags)
    .bind(Json(&document.compliance))
    .bind(document.status)
    .bind(document.project)
    .bind(document.department)
    .bind(document.project_manager)
    .bind(document.document_donor)
    .bind(document.document_vendor)
    .bind(&document.link)
    .bind(&document.comment)
    .bind(document.document_date)
    .bind(Json(&document.files))
    .bind(Json(&document.signature))
    .bind(document.updated_at)
    .fetch_optional(conn)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update document", e))?
    .ok_or_else(|| AppError::not_found(format!("Document {} not found", document.id)))
}
