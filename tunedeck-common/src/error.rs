//! Common error types for Tunedeck

use thiserror::Error;

/// Common result type for Tunedeck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across Tunedeck crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Caller identity required but absent or unverifiable
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Caller is not the owner of the resource
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Uniqueness violation (duplicate track or favorite)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Search provider failure, provider message attached
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
