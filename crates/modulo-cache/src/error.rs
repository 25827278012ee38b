//! Cache error types.

use thiserror::Error;

/// Errors that can occur when using the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to perform store operation.
    #[error("Store operation failed: {0}")]
    StoreError(String),

    /// Filesystem failure in a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key cannot be mapped onto the backend.
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

impl CacheError {
    /// Whether the stored bytes were present but unreadable.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, CacheError::SerializeError(_))
    }
}
