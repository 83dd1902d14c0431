//! In-memory stores for single-node deployments and tests.
//!
//! Contents are lost when the process exits.

pub mod document;
pub mod version;

pub use document::MemoryDocumentStore;
pub use version::MemoryVersionStore;
