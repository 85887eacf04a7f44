//! Error types for mylocation-core.
//!
//! This module defines the errors a location capture can end with.
//!
//! # Handling
//!
//! | Error Type | Typical handling |
//! |------------|------------------|
//! | [`Error::PermissionDenied`] | Tell the user; nothing is saved |
//! | [`Error::PositionUnavailable`] | Log; the receiver has no fix yet |
//! | [`Error::Timeout`] | Log; the fix took longer than allowed |
//! | [`Error::Cancelled`] | Ignore; a clear superseded the capture |
//! | [`Error::Protocol`] | Log; the location daemon sent something unexpected |
//! | [`Error::Io`] | Log; the location daemon is unreachable |
//! | [`Error::InvalidCoordinates`] | Log; the fix was outside the valid range |
//! | [`Error::InvalidConfig`] | Fix the configuration and restart |
//!
//! Only [`Error::PermissionDenied`] is meant to be surfaced to the user as
//! a blocking alert. Nothing here is retried automatically.

use std::time::Duration;

use thiserror::Error;

use mylocation_types::ParseError;

/// Errors that can occur while capturing a position.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The user or platform refused location access.
    #[error("Location permission denied")]
    PermissionDenied,

    /// The provider answered but had no usable position.
    #[error("Position unavailable: {0}")]
    PositionUnavailable(String),

    /// Operation timed out.
    #[error("Operation '{operation}' timed out after {duration:?}")]
    Timeout {
        /// The operation that timed out.
        operation: String,
        /// The timeout duration.
        duration: Duration,
    },

    /// Operation was cancelled.
    #[error("Operation cancelled")]
    Cancelled,

    /// The location daemon sent malformed data.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The fix contained out-of-range coordinates.
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(#[from] ParseError),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Whether this error is a permission refusal.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Error::PermissionDenied)
    }

    /// Whether this error means the capture was superseded.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    /// Create a timeout error for an operation.
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Error::Timeout {
            operation: operation.into(),
            duration,
        }
    }
}

/// Result type alias using mylocation-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;
