//! Theme command - show or change the dark mode preference.

use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use mylocation_store::{KeyValueStore, PreferenceStore};
use mylocation_types::ThemeMode;

use crate::cli::ThemeAction;
use crate::util::open_preferences;

/// One-line description of a theme.
pub fn theme_line(theme: ThemeMode, no_color: bool) -> String {
    let switch = if theme.is_dark() { "[ON]" } else { "[OFF]" };
    if no_color {
        format!("Dark Mode {}", switch)
    } else if theme.is_dark() {
        format!("Dark Mode {}", switch.green().bold())
    } else {
        format!("Dark Mode {}", switch.dimmed())
    }
}

/// Apply `action` to a preference store and return the resulting theme.
pub fn apply_theme_action<K: KeyValueStore>(
    prefs: &mut PreferenceStore<K>,
    action: ThemeAction,
) -> Result<ThemeMode> {
    let target = match action {
        ThemeAction::Show => {
            return prefs.load_theme().context("Failed to read theme preference");
        }
        ThemeAction::Dark => ThemeMode::Dark,
        ThemeAction::Light => ThemeMode::Light,
        ThemeAction::Toggle => prefs
            .load_theme()
            .context("Failed to read theme preference")?
            .toggle(),
    };
    prefs
        .save_theme(target)
        .context("Failed to save theme preference")?;
    Ok(target)
}

/// Execute the theme command.
pub fn cmd_theme(action: Option<ThemeAction>, prefs_path: &Path, no_color: bool) -> Result<()> {
    let mut prefs = open_preferences(prefs_path);
    let theme = apply_theme_action(&mut prefs, action.unwrap_or(ThemeAction::Show))?;
    println!("{}", theme_line(theme, no_color));
    Ok(())
}
