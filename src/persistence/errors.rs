//! # Persistence Errors

use thiserror::Error;

/// Result type for store operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("State file corrupt: {0}")]
    Corrupt(String),

    #[error("Unsupported state format version: {0}")]
    UnsupportedVersion(u8),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl PersistenceError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            PersistenceError::Io(_) => "ACH_STATE_IO",
            PersistenceError::Corrupt(_) => "ACH_STATE_CORRUPT",
            PersistenceError::UnsupportedVersion(_) => "ACH_STATE_VERSION",
            PersistenceError::Unavailable(_) => "ACH_STATE_UNAVAILABLE",
        }
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(e: std::io::Error) -> Self {
        PersistenceError::Io(e.to_string())
    }
}
