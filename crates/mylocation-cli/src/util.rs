//! Utility functions for CLI operations.

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use dialoguer::{Confirm, theme::ColorfulTheme};
use indicatif::{ProgressBar, ProgressStyle};

use mylocation_store::{FileKeyValueStore, LocationStore, PreferenceStore};

/// Braille dots animation, shared with the screen spinner.
pub const SPINNER_TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

const SPINNER_TICK_MS: u64 = 80;

/// Spinner shown while waiting for a fix. Hidden when stderr is not a terminal.
pub fn capture_spinner(provider: &str) -> ProgressBar {
    if !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars(SPINNER_TICK_CHARS);

    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.set_message(format!("Waiting for a fix from {}...", provider));
    pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
    pb
}

/// Ask a yes/no question. Returns `Ok(true)` when `assume_yes` is set and
/// `Ok(false)` when there is no terminal to ask on.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }

    if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
        eprintln!("Error: Cannot prompt for confirmation in non-interactive mode.");
        eprintln!("Use --yes to skip confirmation.");
        return Ok(false);
    }

    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}

/// Open the location database, with a readable error.
pub fn open_store(path: &Path) -> Result<LocationStore> {
    LocationStore::open(path)
        .with_context(|| format!("Failed to open location database {}", path.display()))
}

/// Open the preference file.
pub fn open_preferences(path: &Path) -> PreferenceStore<FileKeyValueStore> {
    PreferenceStore::open(path)
}

/// Write output to file or stdout.
pub fn write_output(output: Option<&PathBuf>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }
        None => {
            print!("{}", content);
            io::stdout().flush()?;
        }
    }
    Ok(())
}
