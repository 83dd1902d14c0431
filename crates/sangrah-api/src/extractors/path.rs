//! Typed path parameter helpers.

use sangrah_core::error::AppError;
use sangrah_core::types::id::DocumentId;

/// Parses a document ID from a path segment.
pub fn parse_document_id(s: &str) -> Result<DocumentId, AppError> {
    s.parse()
        .map_err(|_| AppError::validation(format!("Invalid document ID: {s}")))
}

/// Parses a version number from a path segment.
pub fn parse_version_number(s: &str) -> Result<i32, AppError> {
    match s.parse::<i32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AppError::validation(format!(
            "Version number must be a positive integer, got '{s}'"
        ))),
    }
}
