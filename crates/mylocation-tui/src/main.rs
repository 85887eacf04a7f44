//! Standalone binary for the interactive location screen.
//!
//! Equivalent to running `mylocation` with no command, using the default
//! configuration file. `MYLOCATION_DB` overrides the database path.

use anyhow::Result;

use mylocation_cli::config::{Config, database_from_env};
use mylocation_cli::{logging, tui};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_file(&logging::default_log_path(), false, false)?;

    let config = Config::load(None);
    tui::run(tui::TuiOptions {
        db_path: config.resolve_database(database_from_env()),
        prefs_path: config.resolve_preferences(None),
        provider: config.build_provider(None)?,
        position: config.position_options(None),
    })
    .await
}
