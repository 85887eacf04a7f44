//! Output formatting utilities for text, JSON, and CSV output.

use anyhow::Result;
use owo_colors::OwoColorize;

use mylocation_types::LocationRecord;

/// Formatting options for output.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Disable colored output.
    pub no_color: bool,
    /// Omit header row in CSV output.
    pub no_header: bool,
}

impl FormatOptions {
    pub fn new(no_color: bool) -> Self {
        Self {
            no_color,
            no_header: false,
        }
    }

    /// Create with no_header option for CSV output.
    #[must_use]
    pub fn with_no_header(mut self, no_header: bool) -> Self {
        self.no_header = no_header;
        self
    }
}

/// Header row for CSV output.
pub const CSV_HEADER: &str = "id,latitude,longitude,captured_at";

/// Escape a value for CSV output.
pub fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// One record as a single text line.
#[must_use]
pub fn format_record_line(record: &LocationRecord, opts: &FormatOptions) -> String {
    let marker = "\u{25cf}";
    let title = record.title();
    if opts.no_color {
        format!("{} {:>5}  {}  {}", marker, record.id, title, record.captured_at)
    } else {
        format!(
            "{} {:>5}  {}  {}",
            marker.cyan(),
            record.id.dimmed(),
            title.bold(),
            record.captured_at.dimmed()
        )
    }
}

/// Records as text, one per line.
#[must_use]
pub fn format_records_text(records: &[LocationRecord], opts: &FormatOptions) -> String {
    if records.is_empty() {
        return "No locations saved.\n".to_string();
    }

    let mut out = String::new();
    for record in records {
        out.push_str(&format_record_line(record, opts));
        out.push('\n');
    }
    out
}

/// Records as a pretty JSON array.
pub fn format_records_json(records: &[LocationRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)? + "\n")
}

/// Records as CSV.
#[must_use]
pub fn format_records_csv(records: &[LocationRecord], opts: &FormatOptions) -> String {
    let mut out = String::new();
    if !opts.no_header {
        out.push_str(CSV_HEADER);
        out.push('\n');
    }
    for record in records {
        out.push_str(&format!(
            "{},{},{},{}\n",
            record.id,
            record.latitude,
            record.longitude,
            csv_escape(&record.captured_at)
        ));
    }
    out
}

/// A freshly captured record as text.
#[must_use]
pub fn format_saved_text(record: &LocationRecord, opts: &FormatOptions) -> String {
    let heading = if opts.no_color {
        "Saved location".to_string()
    } else {
        "Saved location".green().bold().to_string()
    };
    format!(
        "{} #{}\n  {}\n  {}\n",
        heading,
        record.id,
        record.title(),
        record.captured_at
    )
}

/// A single record as pretty JSON.
pub fn format_record_json(record: &LocationRecord) -> Result<String> {
    Ok(serde_json::to_string_pretty(record)? + "\n")
}
