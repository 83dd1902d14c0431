//! Version history entities.

pub mod label;
pub mod model;
pub mod snapshot;
pub mod tracked;

pub use label::{ChangeType, next_label};
pub use model::{DocumentVersion, NewDocumentVersion};
pub use snapshot::VersionSnapshot;
pub use tracked::{FieldChange, TrackedField, TrackedState};
