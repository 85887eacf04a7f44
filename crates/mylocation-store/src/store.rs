//! Location record store.

use std::path::Path;

use chrono::{DateTime, Local};
use rusqlite::{Connection, OptionalExtension, Row};
use tracing::{debug, info};

use mylocation_types::{Coordinates, LocationRecord};

use crate::error::{Error, Result};
use crate::schema;

/// Format of the `date` column: day-first local time.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Format a local time the way the `date` column stores it.
pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

const SELECT_COLUMNS: &str = "SELECT id, latitude, longitude, date FROM locations";

/// SQLite-backed store of captured locations.
///
/// Owns a single connection for its whole lifetime.
pub struct LocationStore {
    conn: Connection,
}

impl std::fmt::Debug for LocationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationStore")
            .field("path", &self.conn.path())
            .finish()
    }
}

impl LocationStore {
    /// Open or create a database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| Error::CreateDirectory {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        info!("Opening location database at {}", path.display());
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Open the default database location.
    pub fn open_default() -> Result<Self> {
        Self::open(crate::default_db_path())
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Create the table if missing. Idempotent.
    pub fn ensure_schema(&self) -> Result<()> {
        schema::ensure_schema(&self.conn)
    }

    /// Save a fix stamped with the current local time.
    pub fn insert(&self, coords: Coordinates) -> Result<LocationRecord> {
        let captured_at = format_timestamp(&Local::now());
        self.insert_with_timestamp(coords, &captured_at)
    }

    /// Save a fix with caller-supplied timestamp text.
    pub fn insert_with_timestamp(
        &self,
        coords: Coordinates,
        captured_at: &str,
    ) -> Result<LocationRecord> {
        self.conn.execute(
            "INSERT INTO locations (latitude, longitude, date) VALUES (?1, ?2, ?3)",
            rusqlite::params![coords.latitude, coords.longitude, captured_at],
        )?;
        let id = self.conn.last_insert_rowid();

        info!(
            id,
            latitude = coords.latitude,
            longitude = coords.longitude,
            "Saved location"
        );

        Ok(LocationRecord {
            id,
            latitude: coords.latitude,
            longitude: coords.longitude,
            captured_at: captured_at.to_string(),
        })
    }

    /// All records, newest first.
    pub fn list_all(&self) -> Result<Vec<LocationRecord>> {
        let sql = format!("{SELECT_COLUMNS} ORDER BY id DESC");
        debug!("Executing query: {}", sql);

        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map([], row_to_record)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// The newest `limit` records, newest first.
    pub fn list_recent(&self, limit: u32) -> Result<Vec<LocationRecord>> {
        let sql = format!("{SELECT_COLUMNS} ORDER BY id DESC LIMIT ?1");
        debug!("Executing query: {} (limit {})", sql, limit);

        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map([limit], row_to_record)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM locations", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// The most recent record, if any.
    pub fn latest(&self) -> Result<Option<LocationRecord>> {
        let sql = format!("{SELECT_COLUMNS} ORDER BY id DESC LIMIT 1");
        let record = self
            .conn
            .query_row(&sql, [], row_to_record)
            .optional()?;
        Ok(record)
    }

    /// Delete every record. Returns how many were removed.
    ///
    /// Ids keep increasing afterwards; AUTOINCREMENT never reuses them.
    pub fn clear_all(&self) -> Result<usize> {
        let deleted = self.conn.execute("DELETE FROM locations", [])?;
        info!(deleted, "Cleared locations");
        Ok(deleted)
    }
}

// The table has no NOT NULL constraints, so rows written by other tools may
// carry NULLs.
fn row_to_record(row: &Row<'_>) -> rusqlite::Result<LocationRecord> {
    Ok(LocationRecord {
        id: row.get(0)?,
        latitude: row.get::<_, Option<f64>>(1)?.unwrap_or_default(),
        longitude: row.get::<_, Option<f64>>(2)?.unwrap_or_default(),
        captured_at: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
    })
}
