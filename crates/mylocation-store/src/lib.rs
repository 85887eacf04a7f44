//! Local persistence for the mylocation logger.
//!
//! This crate provides SQLite-based storage for captured locations and a
//! small key-value store for the theme preference.
//!
//! # Features
//!
//! - Store each capture with a local timestamp
//! - List records newest first, with an optional limit
//! - Clear every record in one call
//! - Persist the dark-mode flag under the `"@Modo"` key
//!
//! # Example
//!
//! ```no_run
//! use mylocation_store::{LocationStore, PreferenceStore};
//! use mylocation_types::Coordinates;
//!
//! let store = LocationStore::open_default()?;
//! store.insert(Coordinates::new(-23.55052, -46.633308)?)?;
//! for record in store.list_all()? {
//!     println!("{} ({})", record.title(), record.captured_at);
//! }
//!
//! let prefs = PreferenceStore::open_default();
//! println!("dark mode: {}", prefs.load_dark_mode_or_default());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod prefs;
mod schema;
mod store;

pub use error::{Error, PreferenceError, Result};
pub use prefs::{
    DARK_MODE_KEY, FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, PreferenceStore,
};
pub use schema::{LOCATIONS_TABLE, ensure_schema};
pub use store::{LocationStore, TIMESTAMP_FORMAT, format_timestamp};

/// Directory name under the platform data and config directories.
pub const APP_DIR: &str = "mylocation";

/// Default database path following platform conventions.
///
/// - Linux: `~/.local/share/mylocation/locations.db`
/// - macOS: `~/Library/Application Support/mylocation/locations.db`
/// - Windows: `C:\Users\<user>\AppData\Local\mylocation\locations.db`
pub fn default_db_path() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(APP_DIR)
        .join("locations.db")
}

/// Default preference file path.
///
/// - Linux: `~/.config/mylocation/preferences.json`
/// - macOS: `~/Library/Application Support/mylocation/preferences.json`
/// - Windows: `C:\Users\<user>\AppData\Roaming\mylocation\preferences.json`
pub fn default_prefs_path() -> std::path::PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(APP_DIR)
        .join("preferences.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        assert!(default_db_path().ends_with("mylocation/locations.db"));
        assert!(default_prefs_path().ends_with("mylocation/preferences.json"));
    }
}
