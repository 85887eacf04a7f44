//! Capture command - take one fix and save it.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use mylocation_core::{Error as CoreError, capture_once};

use crate::cli::{OutputFormat, ProviderKind};
use crate::config::Config;
use crate::format::{FormatOptions, format_record_json, format_records_csv, format_saved_text};
use crate::util::{capture_spinner, open_store, write_output};

/// Arguments for the capture command.
#[derive(Debug, Clone)]
pub struct CaptureArgs {
    pub provider: Option<ProviderKind>,
    pub timeout: Option<u64>,
    pub format: OutputFormat,
    pub quiet: bool,
    pub opts: FormatOptions,
}

/// Execute the capture command.
pub async fn cmd_capture(args: CaptureArgs, db_path: &Path, config: &Config) -> Result<()> {
    let provider = config.build_provider(args.provider)?;
    let options = config.position_options(args.timeout);
    let store = open_store(db_path)?;

    let spinner = if args.quiet {
        indicatif::ProgressBar::hidden()
    } else {
        capture_spinner(provider.name())
    };
    let result = capture_once(&*provider, &options).await;
    spinner.finish_and_clear();

    let coords = match result {
        Ok(coords) => coords,
        Err(CoreError::PermissionDenied) => bail!("Permission denied."),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to get a fix from {}", provider.name()));
        }
    };

    let record = store.insert(coords).context("Failed to save location")?;
    info!(id = record.id, "Location saved");

    let content = match args.format {
        OutputFormat::Text => format_saved_text(&record, &args.opts),
        OutputFormat::Json => format_record_json(&record)?,
        OutputFormat::Csv => format_records_csv(std::slice::from_ref(&record), &args.opts),
    };
    write_output(None, &content)
}
