//! Error types for permtable

use thiserror::Error;

/// The main error type for permtable operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// The identifier input was empty or whitespace-only when a row was requested
    #[error("Please enter a username or a group name")]
    MissingIdentifier,

    #[error("Invalid row tag '{0}': must be 'TYPE:id' format")]
    InvalidTag(String),

    #[error("Unknown principal type '{0}'")]
    UnknownPrincipalType(String),

    #[error("Unknown access level '{0}'")]
    UnknownAccessLevel(String),

    #[error("Malformed grant '{0}'")]
    MalformedGrant(String),

    #[error("Element '{0}' not found")]
    ElementNotFound(String),

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type alias for permtable operations
pub type Result<T> = std::result::Result<T, MatrixError>;

/// Convert any storage-side error to MatrixError
pub fn err<E: std::error::Error>(e: E) -> MatrixError {
    MatrixError::Storage(e.to_string())
}
