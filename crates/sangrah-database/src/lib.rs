//! # sangrah-database
//!
//! Persistence for live documents and their version history. The
//! [`store`] traits are implemented twice: by PostgreSQL repositories and
//! by process-local in-memory stores.

pub mod backend;
pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod retry;
pub mod store;

pub use backend::Stores;
pub use connection::DatabasePool;
pub use store::{DocumentStore, DocumentWrite, VersionStore};
