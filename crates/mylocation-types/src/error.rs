//! Error types for value parsing in mylocation-types.

use thiserror::Error;

/// Errors that can occur when building or parsing location values.
///
/// This error type is platform-agnostic and does not include
/// provider or storage errors (those belong in mylocation-core and
/// mylocation-store).
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum ParseError {
    /// A coordinate component was outside its valid range.
    #[error("{axis} {value} is out of range ({min} to {max})")]
    OutOfRange {
        axis: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A coordinate component was NaN or infinite.
    #[error("{axis} must be a finite number")]
    NotFinite { axis: &'static str },

    /// Text could not be parsed into a value.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias using mylocation-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
