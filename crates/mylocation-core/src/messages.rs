//! Message types for UI/worker communication.
//!
//! This module defines the command and event enums exchanged between the
//! screen and the background worker that owns storage and the provider.
//!
//! # Architecture
//!
//! ```text
//! +------------------+     Command      +------------------+
//! |    UI loop       | --------------> |  LocationWorker  |
//! |   (ratatui)      |                 |  (tokio task)    |
//! |                  | <-------------- |                  |
//! +------------------+   ScreenEvent   +------------------+
//! ```
//!
//! - [`Command`]: Messages sent from the UI loop to the background worker
//! - [`ScreenEvent`]: Events sent from the worker back to the UI loop

use mylocation_types::LocationRecord;

/// Commands sent from the UI loop to the background worker.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Ensure the schema exists, then load the list and the theme preference.
    Mount,

    /// Capture the current position and save it.
    Capture,

    /// Delete every saved location. Supersedes an in-flight capture.
    Clear,

    /// Persist the dark-mode preference.
    SetDarkMode(bool),

    /// Shut down the worker.
    Shutdown,
}

/// How a capture ended.
///
/// Exactly one of these is emitted per [`Command::Capture`].
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    /// The fix was stored as this record.
    Saved(LocationRecord),

    /// Location access was refused.
    PermissionDenied,

    /// The provider or the store failed.
    Failed(String),

    /// A clear superseded the capture; nothing was stored.
    Cancelled,
}

impl CaptureOutcome {
    /// Whether the capture produced a stored record.
    pub fn is_saved(&self) -> bool {
        matches!(self, CaptureOutcome::Saved(_))
    }
}

/// Events sent from the background worker to the UI loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenEvent {
    /// Fresh snapshot of all records, newest first.
    LocationsLoaded(Vec<LocationRecord>),

    /// Stored theme preference.
    DarkModeLoaded(bool),

    /// A capture was accepted and is running.
    CaptureStarted,

    /// A capture ended.
    CaptureFinished(CaptureOutcome),

    /// A storage operation failed; the list was left unchanged.
    StorageFailed {
        /// What was being attempted.
        operation: String,
        /// Error message.
        error: String,
    },

    /// Reading or writing the theme preference failed.
    PreferenceFailed {
        /// Error message.
        error: String,
    },
}
