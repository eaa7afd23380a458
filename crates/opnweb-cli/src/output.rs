//! Table and JSON rendering for command results.

use serde::Serialize;
use tabled::{Table, Tabled};

use crate::cli::OutputFormat;

/// Render a result set in the requested format.
pub fn render<T: Tabled + Serialize>(format: OutputFormat, rows: &[T]) -> String {
    match format {
        OutputFormat::Table if rows.is_empty() => "(no entries)".to_owned(),
        OutputFormat::Table => Table::new(rows).to_string(),
        OutputFormat::Json => {
            serde_json::to_string_pretty(rows).unwrap_or_else(|err| format!("serialization failed: {err}"))
        }
    }
}
