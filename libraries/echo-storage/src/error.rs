/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Key cannot be mapped onto the backing medium
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<StorageError> for echo_core::EchoError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(e) => echo_core::EchoError::Io(e),
            StorageError::InvalidKey(key) => echo_core::EchoError::invalid_input(key),
            other => echo_core::EchoError::storage(other.to_string()),
        }
    }
}
