//! Theme preference persistence.
//!
//! Preferences live in a flat string key-value store. The only key in use is
//! [`DARK_MODE_KEY`], holding `"true"` or `"false"`.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use mylocation_types::ThemeMode;

use crate::error::PreferenceError;

/// Key under which the dark-mode flag is stored.
pub const DARK_MODE_KEY: &str = "@Modo";

/// A string key-value store.
pub trait KeyValueStore: Send {
    /// Read a value; `Ok(None)` if the key was never written.
    fn get_item(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    /// Write a value, replacing any previous one.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<(), PreferenceError>;
}

/// Key-value store persisted as a JSON object file.
///
/// The file is re-read on every access so that changes made by another
/// process (for example `mylocation theme toggle` while the screen is open)
/// are picked up. Writes go to a temporary file that is then renamed over
/// the original.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform default location.
    pub fn open_default() -> Self {
        Self::new(crate::default_prefs_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(PreferenceError::Io {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| PreferenceError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), PreferenceError> {
        let io_err = |source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let content = serde_json::to_string_pretty(items)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)?;

        debug!(path = %self.path.display(), keys = items.len(), "Wrote preferences");
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), PreferenceError> {
        let mut items = self.read_all()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for Box<K> {
    fn get_item(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), PreferenceError> {
        (**self).remove_item(key)
    }
}

/// In-memory key-value store with failure injection.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    items: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every read fail with [`PreferenceError::Unavailable`].
    #[must_use]
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Make every write fail with [`PreferenceError::Unavailable`].
    #[must_use]
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Pre-populate a key.
    #[must_use]
    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.items.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        if self.fail_reads {
            return Err(PreferenceError::Unavailable("read refused".to_string()));
        }
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        if self.fail_writes {
            return Err(PreferenceError::Unavailable("write refused".to_string()));
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), PreferenceError> {
        if self.fail_writes {
            return Err(PreferenceError::Unavailable("write refused".to_string()));
        }
        self.items.remove(key);
        Ok(())
    }
}

/// Typed access to the theme preference.
#[derive(Debug, Clone)]
pub struct PreferenceStore<K> {
    kv: K,
}

impl<K: KeyValueStore> PreferenceStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    pub fn inner(&self) -> &K {
        &self.kv
    }

    pub fn into_inner(self) -> K {
        self.kv
    }

    /// Stored dark-mode flag. Never written means `false`; any stored value
    /// other than `"true"` also reads as `false`.
    pub fn load_dark_mode(&self) -> Result<bool, PreferenceError> {
        let value = self.kv.get_item(DARK_MODE_KEY)?;
        Ok(value.as_deref() == Some("true"))
    }

    /// Like [`load_dark_mode`](Self::load_dark_mode), but a failed read is
    /// logged and treated as `false`.
    pub fn load_dark_mode_or_default(&self) -> bool {
        self.load_dark_mode().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read dark mode preference, using light");
            false
        })
    }

    /// Persist the dark-mode flag as `"true"` or `"false"`.
    pub fn save_dark_mode(&mut self, dark: bool) -> Result<(), PreferenceError> {
        let value = if dark { "true" } else { "false" };
        self.kv.set_item(DARK_MODE_KEY, value)?;
        debug!(dark, "Saved dark mode preference");
        Ok(())
    }

    /// Stored theme.
    pub fn load_theme(&self) -> Result<ThemeMode, PreferenceError> {
        self.load_dark_mode().map(ThemeMode::from_dark)
    }

    /// Persist a theme.
    pub fn save_theme(&mut self, theme: ThemeMode) -> Result<(), PreferenceError> {
        self.save_dark_mode(theme.is_dark())
    }
}

impl PreferenceStore<FileKeyValueStore> {
    /// Preference store backed by a JSON file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(FileKeyValueStore::new(path))
    }

    /// Preference store at the platform default location.
    pub fn open_default() -> Self {
        Self::new(FileKeyValueStore::open_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_dark_mode_defaults_to_false() {
        let prefs = PreferenceStore::new(MemoryKeyValueStore::new());
        assert!(!prefs.load_dark_mode().unwrap());
        assert_eq!(prefs.load_theme().unwrap(), ThemeMode::Light);
    }

    #[test]
    fn test_dark_mode_round_trip() {
        let mut prefs = PreferenceStore::new(MemoryKeyValueStore::new());

        prefs.save_dark_mode(true).unwrap();
        assert!(prefs.load_dark_mode().unwrap());
        assert_eq!(
            prefs.inner().get_item(DARK_MODE_KEY).unwrap().as_deref(),
            Some("true")
        );

        prefs.save_dark_mode(false).unwrap();
        assert!(!prefs.load_dark_mode().unwrap());
        assert_eq!(
            prefs.inner().get_item(DARK_MODE_KEY).unwrap().as_deref(),
            Some("false")
        );
    }

    #[test]
    fn test_unexpected_value_reads_as_false() {
        let prefs =
            PreferenceStore::new(MemoryKeyValueStore::new().with_item(DARK_MODE_KEY, "yes"));
        assert!(!prefs.load_dark_mode().unwrap());
    }

    #[test]
    fn test_read_failure() {
        let prefs = PreferenceStore::new(MemoryKeyValueStore::new().failing_reads());
        assert!(matches!(
            prefs.load_dark_mode(),
            Err(PreferenceError::Unavailable(_))
        ));
        assert!(!prefs.load_dark_mode_or_default());
    }

    #[test]
    fn test_write_failure() {
        let mut prefs = PreferenceStore::new(MemoryKeyValueStore::new().failing_writes());
        assert!(prefs.save_dark_mode(true).is_err());
    }

    #[test]
    fn test_theme_helpers() {
        let mut prefs = PreferenceStore::new(MemoryKeyValueStore::new());
        prefs.save_theme(ThemeMode::Dark).unwrap();
        assert!(prefs.load_dark_mode().unwrap());
    }

    #[test]
    fn test_file_store_missing_file() {
        let dir = TempDir::new().unwrap();
        let kv = FileKeyValueStore::new(dir.path().join("prefs.json"));
        assert_eq!(kv.get_item(DARK_MODE_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut prefs = PreferenceStore::open(&path);
        prefs.save_dark_mode(true).unwrap();

        let reopened = PreferenceStore::open(&path);
        assert!(reopened.load_dark_mode().unwrap());

        let content = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["@Modo"], "true");
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let mut kv = FileKeyValueStore::new(dir.path().join("prefs.json"));
        kv.set_item("other", "value").unwrap();
        kv.set_item(DARK_MODE_KEY, "true").unwrap();
        kv.remove_item(DARK_MODE_KEY).unwrap();
        kv.remove_item("never-set").unwrap();

        assert_eq!(kv.get_item("other").unwrap().as_deref(), Some("value"));
        assert_eq!(kv.get_item(DARK_MODE_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let prefs = PreferenceStore::open(&path);
        assert!(matches!(
            prefs.load_dark_mode(),
            Err(PreferenceError::Corrupt { .. })
        ));
        assert!(!prefs.load_dark_mode_or_default());
    }

    #[test]
    fn test_boxed_store() {
        let kv: Box<dyn KeyValueStore> = Box::new(MemoryKeyValueStore::new());
        let mut prefs = PreferenceStore::new(kv);
        prefs.save_dark_mode(true).unwrap();
        assert!(prefs.load_dark_mode().unwrap());
    }
}
