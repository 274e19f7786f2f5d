//! Business layer errors

use gatelog_core::CoreError;
use gatelog_persistence::PersistenceError;
use std::path::PathBuf;
use thiserror::Error;

/// Business operation errors
#[derive(Debug, Error)]
pub enum BusinessError {
    // === Configuration errors ===
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // === Wrapped errors ===
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("{0}")]
    Core(#[from] CoreError),
}

/// Result type alias for business operations
pub type BusinessResult<T> = Result<T, BusinessError>;

impl BusinessError {
    /// Operator-recoverable: bad input, nothing changed
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_registration_error())
    }

    /// Storage failed; the action was not committed
    pub fn is_persistence_failure(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}
