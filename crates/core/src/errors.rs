//! Core error types for Goaltrack.
//!
//! This module defines transport-agnostic error types. Gateway-specific errors
//! (HTTP, file storage, etc.) are converted to these types by the gateway layer.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the goal client.
///
/// No variant is fatal: every failure path hands control back to the caller
/// with local state unchanged.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Gateway operation failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("No active user identifier is set")]
    MissingIdentity,

    /// A detached store operation panicked before producing a result.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Failures reported by a goal gateway.
///
/// Uses `String` for all details so concrete gateways can convert their own
/// error types into this format.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The gateway could not be reached.
    #[error("Gateway unreachable: {0}")]
    Unreachable(String),

    /// The requested goal does not exist on the gateway.
    #[error("Goal not found: {0}")]
    NotFound(String),

    /// The gateway response could not be decoded.
    #[error("Malformed gateway response: {0}")]
    Malformed(String),
}

/// Validation errors for caller input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Goal '{0}' is already persisted")]
    AlreadyPersisted(String),

    #[error("Goal has no identifier")]
    MissingIdentifier,

    #[error("Goal '{0}' is not in the current collection")]
    UnknownGoal(String),

    #[error("Goal belongs to user '{actual}', expected '{expected}'")]
    UserMismatch { expected: String, actual: String },
}
