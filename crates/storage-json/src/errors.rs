//! Storage-specific error types for the JSON file gateway.
//!
//! This module wraps I/O and serde errors and converts them to the
//! transport-agnostic error types defined in `goaltrack_core`.

use goaltrack_core::errors::{Error, GatewayError};
use thiserror::Error;

/// Storage-specific errors.
///
/// These errors are internal to the storage layer and are converted to
/// `goaltrack_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported goals file version {0}")]
    UnsupportedVersion(u32),

    #[error("Goal not found: {0}")]
    NotFound(String),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io { path, source } => Error::Gateway(GatewayError::Unreachable(
                format!("{}: {}", path, source),
            )),
            StorageError::Serialization(e) => {
                Error::Gateway(GatewayError::Malformed(e.to_string()))
            }
            StorageError::UnsupportedVersion(v) => Error::Gateway(GatewayError::Malformed(
                format!("unsupported goals file version {}", v),
            )),
            StorageError::NotFound(id) => Error::Gateway(GatewayError::NotFound(id)),
        }
    }
}

/// Extension trait for converting storage Results to core Results.
pub trait IntoCore<T> {
    fn into_core(self) -> goaltrack_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, StorageError> {
    fn into_core(self) -> goaltrack_core::Result<T> {
        self.map_err(Error::from)
    }
}
