//! HTTP-level integration tests over the in-memory backend.

mod document_test;
mod helpers;
mod version_test;
