//! Error types for the watch pipeline.

use thiserror::Error;

/// Result type alias for watch operations.
pub type Result<T> = std::result::Result<T, WatchError>;

/// Errors that can occur in the watch pipeline.
#[derive(Error, Debug)]
pub enum WatchError {
    /// Watched directory does not exist.
    #[error("directory not found: {0}")]
    DirectoryNotFound(String),

    /// Watched path exists but is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(String),

    /// Notify error.
    #[error("notify error: {0}")]
    Notify(#[from] notify::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Error raised by the responder; propagated unmodified.
    #[error(transparent)]
    Responder(#[from] anyhow::Error),
}
