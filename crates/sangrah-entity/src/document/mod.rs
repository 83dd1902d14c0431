//! Live document entities.

pub mod compliance;
pub mod file_ref;
pub mod model;
pub mod status;

pub use compliance::Compliance;
pub use file_ref::{FileRef, Signature};
pub use model::{CreateDocument, Document, DocumentPatch};
pub use status::DocumentStatus;
