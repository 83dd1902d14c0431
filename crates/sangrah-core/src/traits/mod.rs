//! Core traits defined in `sangrah-core` and implemented by other crates.

pub mod reference;

pub use reference::StableId;
