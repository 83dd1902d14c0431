//! Request handlers, grouped by resource.

pub mod document;
pub mod health;
pub mod version;
