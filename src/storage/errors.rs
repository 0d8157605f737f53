//! Store error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::schema::ValidationError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the user store and the layers above it
#[derive(Debug, Error)]
pub enum StoreError {
    /// Candidate record rejected by the validator
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No record with the given id
    #[error("User not found: {0}")]
    NotFound(String),

    /// Reading or writing the data file failed
    #[error("{message}: {source}")]
    Storage {
        message: String,
        #[source]
        source: io::Error,
    },

    /// The data file exists but does not hold a user collection
    #[error("Data file '{}' is not a valid user collection: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Create a storage error wrapping an I/O failure
    pub fn storage(message: impl Into<String>, source: io::Error) -> Self {
        StoreError::Storage {
            message: message.into(),
            source,
        }
    }

    /// HTTP status for this error; the user routes build their response from it
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::Validation(_) => 400,
            StoreError::NotFound(_) => 404,
            StoreError::Storage { .. } => 500,
            StoreError::Corrupt { .. } => 500,
        }
    }
}
