//! Pagination types for history listings.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Default page size.
pub const DEFAULT_PAGE_SIZE: u64 = 25;
/// Maximum page size.
pub const MAX_PAGE_SIZE: u64 = 100;
/// Highest addressable page. Keeps `offset()` well inside `i64`.
pub const MAX_PAGE: u64 = 1_000_000;

/// Request parameters for paginated queries.
///
/// Pages are addressed by number, so a listing can be resumed from any page
/// without server-side cursor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl PageRequest {
    /// Create a new page request, clamping out-of-range values.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.clamp(1, MAX_PAGE),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Create a page request from caller input.
    ///
    /// Page numbers above [`MAX_PAGE`] are rejected; the page size is clamped.
    pub fn try_new(page: u64, page_size: u64) -> AppResult<Self> {
        if page > MAX_PAGE {
            return Err(AppError::validation(format!(
                "Page {page} is out of range (max {MAX_PAGE})"
            )));
        }
        Ok(Self::new(page, page_size))
    }

    /// Calculate the SQL `OFFSET` value.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Return the SQL `LIMIT` value.
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// Whether there is a next page.
    pub has_next: bool,
    /// Whether there is a previous page.
    pub has_previous: bool,
}

impl<T> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(items: Vec<T>, page: u64, page_size: u64, total_items: u64) -> Self {
        let total_pages = if total_items == 0 {
            1
        } else {
            total_items.div_ceil(page_size.max(1))
        };
        Self {
            items,
            page,
            page_size,
            total_items,
            total_pages,
            has_next: page < total_pages,
            has_previous: page > 1,
        }
    }

    /// Cut one page out of an already ordered, fully materialized list.
    pub fn from_ordered<I>(all: I, request: &PageRequest) -> Self
    where
        I: ExactSizeIterator<Item = T>,
    {
        let total = all.len() as u64;
        let items = all
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(request.limit() as usize)
            .collect();
        Self::new(items, request.page, request.page_size, total)
    }
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps() {
        let req = PageRequest::new(0, 1000);
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_from_ordered_second_page() {
        let req = PageRequest::new(2, 2);
        let page = PageResponse::from_ordered(vec![5, 4, 3, 2, 1].into_iter(), &req);
        assert_eq!(page.items, vec![3, 2]);
        assert_eq!(page.total_items, 5);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next);
        assert!(page.has_previous);
    }

    #[test]
    fn test_empty_has_one_page() {
        let page = PageResponse::<u8>::new(Vec::new(), 1, 25, 0);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next);
    }

    #[test]
    fn test_listing_resumes_from_any_page() {
        let req = PageRequest::new(2, 3);
        let page = PageResponse::from_ordered((1..8).rev(), &req);
        assert_eq!(page.items, vec![4, 3, 2]);
    }

    #[test]
    fn test_huge_page_is_rejected() {
        let err = PageRequest::try_new(u64::MAX, 100).unwrap_err();
        assert!(matches!(err.kind, crate::error::ErrorKind::Validation));
        assert!(PageRequest::try_new(MAX_PAGE + 1, 25).is_err());

        let last = PageRequest::try_new(MAX_PAGE, MAX_PAGE_SIZE).unwrap();
        assert!(i64::try_from(last.offset()).is_ok());
    }

    #[test]
    fn test_offset_never_overflows() {
        let req = PageRequest::new(u64::MAX, u64::MAX);
        assert_eq!(req.page, MAX_PAGE);
        assert_eq!(req.offset(), (MAX_PAGE - 1) * MAX_PAGE_SIZE);

        let raw = PageRequest {
            page: u64::MAX,
            page_size: u64::MAX,
        };
        assert_eq!(raw.offset(), u64::MAX);
        let page = PageResponse::from_ordered(vec![1, 2, 3].into_iter(), &raw);
        assert!(page.items.is_empty());
    }
}
