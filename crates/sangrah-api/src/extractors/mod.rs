//! Custom Axum extractors.

pub mod actor;
pub mod pagination;
pub mod path;

pub use actor::Actor;
pub use pagination::PaginationParams;
