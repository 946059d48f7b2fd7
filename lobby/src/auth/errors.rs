//! Token storage error types.

use thiserror::Error;

/// Token storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the token file failed
    #[error("Token storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored token is not valid UTF-8
    #[error("Stored token is not valid UTF-8")]
    InvalidEncoding,

    /// The store rejected the token value
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

/// Result type for token storage operations
pub type StorageResult<T> = Result<T, StorageError>;
