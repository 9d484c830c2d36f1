//! Error types for the storage boundary

use std::io;

/// Failure reading or writing a persisted JSON file
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl PersistenceError {
    /// The file simply does not exist yet
    pub fn is_not_found(&self) -> bool {
        matches!(self, PersistenceError::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}

pub type Result<T> = std::result::Result<T, PersistenceError>;
