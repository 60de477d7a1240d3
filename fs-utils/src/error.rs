//! Error types for filesystem utilities.

use thiserror::Error;

/// Result type alias for filesystem operations.
pub type Result<T> = std::result::Result<T, FsError>;

/// Errors that can occur in filesystem utilities.
#[derive(Error, Debug)]
pub enum FsError {
    /// Copy or rename source does not exist.
    #[error("source not found: {0}")]
    SourceNotFound(String),

    /// Destination exists and overwriting was not requested.
    #[error("destination already exists: {0}")]
    DestinationExists(String),

    /// Path does not exist.
    #[error("path not found: {0}")]
    NotFound(String),

    /// Invalid glob pattern.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Directory traversal error.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
