//! # sangrah-service
//!
//! Business logic for e-Sangrah documents. The [`version`] module holds the
//! pure change detection, summary and snapshot functions plus the
//! [`VersionService`] that records and restores history; [`document`]
//! drives live edits through it.
//!
//! Services take their stores as `Arc<dyn …>` at construction time, so
//! the same logic runs over PostgreSQL or the in-memory backend.

pub mod context;
pub mod document;
pub mod version;

pub use context::RequestContext;
pub use document::{DocumentService, DocumentUpdate};
pub use version::{EditOptions, RestoreOutcome, VersionService};

use std::sync::Arc;

use sangrah_database::Stores;

/// Build both services over one set of stores.
pub fn build_services(
    stores: &Stores,
    default_page_size: u64,
) -> (Arc<DocumentService>, Arc<VersionService>) {
    let versions = Arc::new(VersionService::new(
        stores.documents.clone(),
        stores.versions.clone(),
        default_page_size,
    ));
    let documents = Arc::new(DocumentService::new(
        stores.documents.clone(),
        versions.clone(),
    ));
    (documents, versions)
}
