//! Convenience result type alias for e-Sangrah.

use crate::error::AppError;

/// A specialized `Result` type for e-Sangrah operations.
pub type AppResult<T> = Result<T, AppError>;
