//! Convenience result type alias for Hearthbase.

use crate::error::AppError;

/// A specialized `Result` type for Hearthbase operations.
///
/// Hook handlers and terminal continuations both return `AppResult<()>`,
/// so a failure anywhere in a chain surfaces as a single `AppError`.
pub type AppResult<T> = Result<T, AppError>;
