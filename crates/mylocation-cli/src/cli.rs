//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Where positions come from
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// A gpsd daemon
    #[default]
    Gpsd,
    /// The fixed position from the configuration file
    Fixed,
    /// Random points around the configured base position
    Simulated,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Gpsd => "gpsd",
            Self::Fixed => "fixed",
            Self::Simulated => "simulated",
        };
        f.write_str(name)
    }
}

#[derive(Parser)]
#[command(name = "mylocation")]
#[command(author, version, about = "Capture and log your GPS location", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Location database file
    #[arg(long, global = true, env = "MYLOCATION_DB")]
    pub database: Option<PathBuf>,

    /// Preference file holding the theme
    #[arg(long, global = true)]
    pub preferences: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Capture the current position and save it
    Capture {
        /// Position source (overrides config)
        #[arg(short, long, value_enum)]
        provider: Option<ProviderKind>,

        /// Seconds to wait for a fix (overrides config)
        #[arg(short = 'T', long)]
        timeout: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List saved locations, newest first
    List {
        /// Show at most this many records
        #[arg(short = 'n', long)]
        limit: Option<u32>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Omit header row in CSV output (useful for appending)
        #[arg(long)]
        no_header: bool,

        /// Write output to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete every saved location
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show or change the dark mode preference
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Open the interactive location screen (default)
    Tui {
        /// Position source (overrides config)
        #[arg(short, long, value_enum)]
        provider: Option<ProviderKind>,
    },
}

/// Theme subcommands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch to dark mode
    Dark,
    /// Switch to light mode
    Light,
    /// Flip the current theme
    Toggle,
}

/// Configuration subcommands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
