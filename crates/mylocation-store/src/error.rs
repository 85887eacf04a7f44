//! Error types for mylocation-store.

use std::path::PathBuf;

/// Result type for location store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the location record store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database error from SQLite.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Failed to create database directory.
    #[error("Failed to create database directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors that can occur reading or writing preferences.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    /// IO error.
    #[error("Preference IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to encode the preference file.
    #[error("Preference serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The preference file exists but is not a JSON object of strings.
    #[error("Preference file {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// The backing storage refused the operation.
    #[error("Preference storage unavailable: {0}")]
    Unavailable(String),
}
