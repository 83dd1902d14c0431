//! PostgreSQL repository implementations.

pub mod document;
pub mod version;

pub use document::DocumentRepository;
pub use version::DocumentVersionRepository;
