//! # Error Types
//!
//! Errors raised by the core primitives. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// Top-level error type for `edgevc-core`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A timestamp string was malformed or not in UTC.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A credential identifier was empty or otherwise unusable.
    #[error("invalid credential id: {0}")]
    InvalidCredentialId(String),
}
