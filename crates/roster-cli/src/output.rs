//! Shared output layer for pretty/text/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: aligned tables and key/value blocks for humans, tab-separated
//! rows for pipes, or stable JSON.
//!
//! The mode itself is resolved in `roster_core::config::resolve_config`
//! (`--format`/`--json`, then `FORMAT`, then user config, then TTY).

use clap::ValueEnum;
use roster_core::RosterError;
use serde::Serialize;
use std::io::{self, Write};

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 72;

/// Write a horizontal separator used by pretty human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<22} {}", format!("{key}:"), value.as_ref())
}

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-optimized output (tables, sections, visual framing).
    Pretty,
    /// Tab-separated plain text for scripts and pipes.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Text => "text",
            Self::Json => "json",
        }
    }

    /// Map the resolved config value back to a mode. Unknown values fall
    /// back to text.
    pub fn from_resolved(raw: &str) -> Self {
        match raw {
            "pretty" => Self::Pretty,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    /// Returns `true` if JSON output was requested.
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// A value with a detailed single-record view.
///
/// The default human rendering walks the value's JSON object and prints one
/// key/value line per field; nested values are printed as compact JSON.
pub trait Renderable: Serialize {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        let value = serde_json::to_value(self).map_err(io::Error::other)?;
        match value {
            serde_json::Value::Object(fields) => {
                for (key, field) in fields {
                    pretty_kv(w, &key, display_value(&field))?;
                }
                Ok(())
            }
            other => writeln!(w, "{}", display_value(&other)),
        }
    }
}

/// A record that can appear as one row of a listing.
pub trait TableRow: Serialize {
    /// Column headers, in the same order as [`TableRow::cells`].
    fn headers() -> &'static [&'static str]
    where
        Self: Sized;

    fn cells(&self) -> Vec<String>;
}

fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "-".to_string(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) if items.iter().all(serde_json::Value::is_string) => items
            .iter()
            .filter_map(serde_json::Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Render a single item to stdout.
pub fn render_item<R: Renderable>(item: &R, mode: OutputMode) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, item)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => item.render_human(&mut out)?,
    }
    Ok(())
}

/// Render a listing to stdout.
///
/// - JSON: an array of records.
/// - Text: a header line then one tab-separated row per record.
/// - Pretty: an aligned table with a separator and a row count.
pub fn render_list<R: TableRow>(items: &[&R], mode: OutputMode) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, items)?;
            writeln!(out)?;
        }
        OutputMode::Text => {
            if !items.is_empty() {
                writeln!(out, "{}", R::headers().join("\t"))?;
            }
            for item in items {
                writeln!(out, "{}", item.cells().join("\t"))?;
            }
        }
        OutputMode::Pretty => write_table(&mut out, R::headers(), items)?,
    }
    Ok(())
}

fn pad_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn write_table<R: TableRow>(w: &mut dyn Write, headers: &[&str], items: &[&R]) -> io::Result<()> {
    let rows: Vec<Vec<String>> = items.iter().map(|item| item.cells()).collect();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    writeln!(w, "{}", pad_line(headers.iter().copied(), &widths))?;
    pretty_rule(w)?;
    for row in &rows {
        writeln!(w, "{}", pad_line(row.iter().map(String::as_str), &widths))?;
    }
    writeln!(w, "{} record(s)", rows.len())
}

/// Render a serializable value with a custom human renderer.
///
/// In JSON mode the value is serialized with `serde_json`; otherwise
/// `human_fn` writes the text.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            human_fn(value, &mut out)?;
        }
    }
    Ok(())
}

/// A structured error with optional suggestion and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    /// Human-readable error message.
    pub message: String,
    /// Optional suggestion for how to fix the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Machine-readable error code (`E####`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    /// Create a simple error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            error_code: None,
        }
    }
}

impl From<&RosterError> for CliError {
    fn from(err: &RosterError) -> Self {
        let code = err.code();
        Self {
            message: err.to_string(),
            suggestion: code.hint().map(str::to_string),
            error_code: Some(code.code().to_string()),
        }
    }
}

impl From<&anyhow::Error> for CliError {
    fn from(err: &anyhow::Error) -> Self {
        err.chain()
            .find_map(|cause| cause.downcast_ref::<RosterError>())
            .map_or_else(|| Self::new(format!("{err:#}")), Self::from)
    }
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "error": error,
            });
            serde_json::to_writer_pretty(&mut out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            match error.error_code {
                Some(ref code) => writeln!(out, "error[{code}]: {}", error.message)?,
                None => writeln!(out, "error: {}", error.message)?,
            }
            if let Some(ref suggestion) = error.suggestion {
                writeln!(out, "  suggestion: {suggestion}")?;
            }
        }
    }
    Ok(())
}

/// Render a one-line success message for a mutation.
///
/// JSON mode always prints `value`; the human line is skipped when `quiet`.
pub fn render_done<T: Serialize>(
    mode: OutputMode,
    quiet: bool,
    value: &T,
    message: &str,
) -> anyhow::Result<()> {
    if quiet && !mode.is_json() {
        return Ok(());
    }
    render(mode, value, |_, w| writeln!(w, "✓ {message}"))
}
