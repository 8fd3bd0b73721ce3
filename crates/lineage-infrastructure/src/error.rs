//! Error types for the infrastructure layer.

use lineage_core::VersionedError;
use thiserror::Error;

/// Errors from configuration loading and file-backed storage.
///
/// Versioned decoding and encoding failures pass through unchanged.
#[derive(Error, Debug)]
pub enum InfraError {
    /// A versioned decode or encode failed.
    #[error(transparent)]
    Versioned(#[from] VersionedError),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File locking error.
    #[error("Lock error: {0}")]
    Lock(String),

    /// Invalid codec configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl InfraError {
    /// Returns the versioned error, if this wraps one.
    pub fn as_versioned(&self) -> Option<&VersionedError> {
        match self {
            Self::Versioned(err) => Some(err),
            _ => None,
        }
    }

    /// Check if this error indicates a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(err) if err.kind() == std::io::ErrorKind::NotFound)
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// A type alias for `Result<T, InfraError>`.
pub type Result<T> = std::result::Result<T, InfraError>;
