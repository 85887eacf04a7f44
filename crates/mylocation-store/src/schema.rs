//! Database schema.
//!
//! A single table, created on demand. There is no version tracking: the
//! layout has never changed and rows are never rewritten.

use rusqlite::Connection;
use tracing::debug;

use crate::error::Result;

/// Name of the only table.
pub const LOCATIONS_TABLE: &str = "locations";

const CREATE_LOCATIONS: &str = "CREATE TABLE IF NOT EXISTS locations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    latitude REAL,
    longitude REAL,
    date TEXT
)";

/// Create the `locations` table if it does not exist.
///
/// Safe to call any number of times; existing rows are kept.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    debug!("Ensuring {} table exists", LOCATIONS_TABLE);
    conn.execute(CREATE_LOCATIONS, [])?;
    Ok(())
}
