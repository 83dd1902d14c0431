//! Store selection for the configured backend.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use sangrah_core::config::{AppConfig, StoreBackend, VersioningConfig};
use sangrah_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::{MemoryDocumentStore, MemoryVersionStore};
use crate::migration::run_migrations;
use crate::repositories::{DocumentRepository, DocumentVersionRepository};
use crate::store::{DocumentStore, VersionStore};

/// The document and version stores a deployment runs on.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Live documents.
    pub documents: Arc<dyn DocumentStore>,
    /// Version history.
    pub versions: Arc<dyn VersionStore>,
    /// The pool behind the stores, when backed by PostgreSQL.
    pub pool: Option<DatabasePool>,
}

impl Stores {
    /// Fresh process-local stores.
    pub fn memory() -> Self {
        let documents = MemoryDocumentStore::new();
        Self {
            versions: Arc::new(MemoryVersionStore::with_documents(documents.clone())),
            documents: Arc::new(documents),
            pool: None,
        }
    }

    /// PostgreSQL-backed stores sharing one pool.
    pub fn postgres(pool: DatabasePool, versioning: &VersioningConfig) -> Self {
        let pg: PgPool = pool.pool().clone();
        Self {
            documents: Arc::new(DocumentRepository::new(pg.clone())),
            versions: Arc::new(DocumentVersionRepository::new(
                pg,
                versioning.max_append_retries,
            )),
            pool: Some(pool),
        }
    }

    /// Build the stores selected by `versioning.backend`.
    ///
    /// For PostgreSQL this connects and, when `database.run_migrations` is
    /// set, applies pending migrations first.
    pub async fn connect(config: &AppConfig) -> AppResult<Self> {
        match config.versioning.backend {
            StoreBackend::Memory => {
                info!("Using in-memory document and version stores");
                Ok(Self::memory())
            }
            StoreBackend::Postgres => {
                let pool = DatabasePool::connect(&config.database).await?;
                if config.database.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Ok(Self::postgres(pool, &config.versioning))
            }
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
