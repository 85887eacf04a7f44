//! List command - print saved locations, newest first.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_records_csv, format_records_json, format_records_text};
use crate::util::{open_store, write_output};

/// Arguments for the list command.
#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    pub limit: Option<u32>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub opts: FormatOptions,
}

/// Execute the list command.
pub fn cmd_list(args: ListArgs, db_path: &Path) -> Result<()> {
    let store = open_store(db_path)?;
    let records = match args.limit {
        Some(limit) => store.list_recent(limit),
        None => store.list_all(),
    }
    .context("Failed to read locations")?;

    let content = match args.format {
        OutputFormat::Text => format_records_text(&records, &args.opts),
        OutputFormat::Json => format_records_json(&records)?,
        OutputFormat::Csv => format_records_csv(&records, &args.opts),
    };
    write_output(args.output.as_ref(), &content)
}
