//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sangrah_core::config::AppConfig;
use sangrah_database::Stores;
use sangrah_service::{DocumentService, VersionService, build_services};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Document and version stores
    pub stores: Stores,
    /// Document create/edit service
    pub document_service: Arc<DocumentService>,
    /// Version history service
    pub version_service: Arc<VersionService>,
}

impl AppState {
    /// Wire the services over `stores`.
    pub fn new(config: AppConfig, stores: Stores) -> Self {
        let (document_service, version_service) =
            build_services(&stores, config.versioning.default_page_size);
        Self {
            config: Arc::new(config),
            stores,
            document_service,
            version_service,
        }
    }
}
