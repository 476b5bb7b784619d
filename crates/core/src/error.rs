use std::io;

/// Errors that can occur during adaptive-hooks operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for adaptive-hooks operations
pub type Result<T> = std::result::Result<T, Error>;
