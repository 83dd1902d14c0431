//! Live document services.

pub mod service;

pub use service::{DocumentService, DocumentUpdate};
