//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

/// Query parameters for paginated endpoints.
///
/// Missing values fall back to page 1 and the configured page size.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page (max: 100).
    pub per_page: Option<u64>,
}
