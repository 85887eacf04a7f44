//! Clear command - delete every saved location.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::util::{confirm, open_store};

/// Execute the clear command. Returns the number of deleted rows; nothing is
/// deleted when the prompt is declined.
pub fn cmd_clear(db_path: &Path, yes: bool, quiet: bool) -> Result<usize> {
    let store = open_store(db_path)?;
    let count = store.count()?;

    if count == 0 {
        if !quiet {
            println!("No locations saved.");
        }
        return Ok(0);
    }

    let prompt = format!("Delete all {} saved locations?", count);
    if !confirm(&prompt, yes)? {
        if !quiet {
            println!("Cancelled.");
        }
        return Ok(0);
    }

    let deleted = store.clear_all().context("Failed to clear locations")?;
    info!(deleted, "Cleared locations");
    if !quiet {
        println!("Deleted {} locations.", deleted);
    }
    Ok(deleted)
}
