//! Version history configuration.

use serde::{Deserialize, Serialize};

/// Which persistence backend holds documents and their versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// PostgreSQL via sqlx.
    #[default]
    Postgres,
    /// Process-local maps. Single node only; history is lost on restart.
    Memory,
}

/// Settings for version allocation and history listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersioningConfig {
    /// Persistence backend.
    #[serde(default)]
    pub backend: StoreBackend,
    /// How many times an append retries after a version-number collision
    /// before surfacing a conflict.
    #[serde(default = "default_max_append_retries")]
    pub max_append_retries: u32,
    /// Page size used when a history listing does not ask for one.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            max_append_retries: default_max_append_retries(),
            default_page_size: default_page_size(),
        }
    }
}

fn default_max_append_retries() -> u32 {
    3
}

fn default_page_size() -> u64 {
    25
}
