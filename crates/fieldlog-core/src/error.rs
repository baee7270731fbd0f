//! Error types for fieldlog-core

use thiserror::Error;

use crate::models::RecordId;

/// Result type alias using fieldlog-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fieldlog-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// The records table could not be opened or created
    #[error("Storage initialization failed: {0}")]
    StorageInit(#[source] rusqlite::Error),

    /// A count or page query failed
    #[error("Failed to read records: {0}")]
    Read(#[source] rusqlite::Error),

    /// A create, update, delete or seed statement failed
    #[error("Failed to write records: {0}")]
    Write(#[source] rusqlite::Error),

    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(RecordId),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error came from the storage engine rather than caller input.
    pub const fn is_storage(&self) -> bool {
        matches!(self, Self::StorageInit(_) | Self::Read(_) | Self::Write(_))
    }
}
