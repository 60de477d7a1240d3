//! Error types for scaffolding.

use thiserror::Error;

/// Result type alias for scaffold operations.
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Errors that can occur while scaffolding a project.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// Package names must be snake_case identifiers.
    #[error("invalid package name '{0}': use a snake_case identifier (e.g. meal_planner)")]
    InvalidName(String),

    /// Requested template is not embedded in this build.
    #[error("unknown template '{0}'")]
    TemplateMissing(&'static str),

    /// Filesystem error from the underlying utilities.
    #[error(transparent)]
    Fs(#[from] bedrock_fs_utils::FsError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
