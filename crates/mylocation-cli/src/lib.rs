//! Command-line interface for the mylocation location logger.
//!
//! mylocation captures the current position, stores it with a timestamp in a
//! local SQLite database, and lists the saved positions newest first.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `capture` | Capture the current position and save it |
//! | `list` | List saved locations, newest first |
//! | `clear` | Delete every saved location |
//! | `theme` | Show or change the dark mode preference |
//! | `config` | Manage CLI configuration |
//! | `tui` | Interactive screen (the default with no command) |
//! | `completions` | Generate shell completions |
//!
//! # Position sources
//!
//! - **gpsd** (default): a local or remote gpsd daemon
//! - **fixed**: the position from the configuration file
//! - **simulated**: random points around a base position
//!
//! # Configuration
//!
//! The CLI reads `~/.config/mylocation/config.toml` (or platform equivalent):
//!
//! ```toml
//! no_color = false
//!
//! [location]
//! provider = "gpsd"
//! timeout_secs = 30
//!
//! [location.gpsd]
//! host = "localhost"
//! port = 2947
//! ```
//!
//! # Environment Variables
//!
//! - `MYLOCATION_DB`: Location database path (overridden by `--database`)
//! - `NO_COLOR`: Disable colored output when set
//! - `RUST_LOG`: Log filter
//!
//! # Examples
//!
//! ```bash
//! mylocation capture --provider fixed
//! mylocation list --format csv --output locations.csv
//! mylocation clear --yes
//! mylocation theme toggle
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod format;
pub mod logging;
pub mod util;

// Re-export core dependencies for convenience
pub use mylocation_core;
pub use mylocation_store;
pub use mylocation_types;

// TUI module - publicly exposed for the mylocation-tui crate to use
#[cfg(feature = "tui")]
pub mod tui;
