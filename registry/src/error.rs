//! Error types for the registry.

use thiserror::Error;

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors that can occur in the registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No entry registered under the given identifier or alias.
    #[error("no entry registered under '{0}'")]
    NotFound(String),

    /// The requested alias already points at another entry.
    #[error("alias '{0}' is already registered")]
    AliasTaken(String),
}
