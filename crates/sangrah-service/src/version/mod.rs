//! Version history services.

pub mod describer;
pub mod detector;
pub mod restore;
pub mod service;
pub mod snapshot;

pub use describer::describe_changes;
pub use detector::detect_changes;
pub use restore::apply_snapshot;
pub use service::{EditOptions, RestoreOutcome, VersionService};
pub use snapshot::build_snapshot;
