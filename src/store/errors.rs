//! Store error types

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors loading collections from disk
#[derive(Debug, Error)]
pub enum StoreError {
    /// Data file or directory could not be read
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Data file is not a JSON array of objects
    #[error("Malformed collection file '{path}': {reason}")]
    Malformed { path: String, reason: String },
}
