//! Error types for Biblio server

use thiserror::Error;

/// Internal error type for the repository layer.
///
/// Service operations never let these escape: every failure is folded into
/// the error list of the DTO returned to the caller.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type alias for repository operations
pub type AppResult<T> = Result<T, AppError>;
