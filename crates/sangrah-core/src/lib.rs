//! # sangrah-core
//!
//! Core crate for e-Sangrah. Contains configuration schemas, typed
//! identifiers, the stable-identifier capability used by version snapshots,
//! pagination types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other e-Sangrah crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
