//! # sangrah-api
//!
//! HTTP API layer for e-Sangrah built on Axum.
//!
//! Exposes document editing and version history over REST, with request
//! logging, CORS, extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
