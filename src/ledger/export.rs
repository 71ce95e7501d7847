//! Flattened event rows and the delimited export artifact.

use crate::models::TagEvent;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// CSV header, fixing the column order of exported rows.
pub const CSV_HEADER: &str = "result,label,quarter,opponent,game_date,timestamp_iso";

/// One flattened event record in export column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    /// Outcome, e.g. "Made 2"
    pub result: String,
    /// Button label
    pub label: String,
    /// Quarter, e.g. "Q1"
    pub quarter: String,
    /// Opponent name
    pub opponent: String,
    /// Game date, `YYYY-MM-DD`
    pub game_date: String,
    /// Append timestamp, second-resolution ISO 8601
    pub timestamp_iso: String,
}

impl ExportRow {
    /// Columns in the fixed export order.
    #[must_use]
    pub fn columns(&self) -> [&str; 6] {
        [
            &self.result,
            &self.label,
            &self.quarter,
            &self.opponent,
            &self.game_date,
            &self.timestamp_iso,
        ]
    }
}

/// Flattens the ledger's events into export rows, preserving insertion
/// order. Feeds both the recent-events table and the CSV artifact.
#[must_use]
pub fn export_rows(events: &[TagEvent]) -> Vec<ExportRow> {
    events
        .iter()
        .map(|event| ExportRow {
            result: event.result.to_string(),
            label: event.label.clone(),
            quarter: event.quarter.to_string(),
            opponent: event.opponent.clone(),
            game_date: event.game_date.format("%Y-%m-%d").to_string(),
            timestamp_iso: event.timestamp_iso.clone(),
        })
        .collect()
}

/// Renders the events as a CSV document: header plus one row per event in
/// insertion order, fields quoted per standard delimited-text rules.
#[must_use]
pub fn events_to_csv(events: &[TagEvent]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for row in export_rows(events) {
        let fields: Vec<String> = row.columns().iter().map(|f| escape_field(f)).collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}

/// Writes the CSV artifact to `path`.
pub fn write_csv(events: &[TagEvent], path: &Path) -> Result<()> {
    fs::write(path, events_to_csv(events))
        .with_context(|| format!("Failed to write event export to {}", path.display()))
}

/// Quotes a field when it contains a delimiter, quote, or line break;
/// embedded quotes are doubled.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
