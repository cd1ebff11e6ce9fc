//! Transport normalization — raw feed payload into rows of string columns.
//!
//! The deployment chooses how the spreadsheet is exported: comma-separated
//! text or a tabular JSON payload (an array of row-arrays). Both are reduced
//! to the same `Vec<Vec<String>>` shape here, so the row parser never knows
//! which transport produced a row.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Transport encoding of the schedule feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedFormat {
    /// Comma-separated lines, one row per line.
    #[default]
    Csv,
    /// A JSON array of row-arrays, cells as strings (numbers are stringified).
    Json,
}

/// Normalize a raw payload into rows of trimmed string columns.
///
/// Empty rows are dropped, and a leading header row is skipped when its first
/// column mentions "date" (case-insensitive) — spreadsheet exports disagree
/// about whether they include one.
pub fn normalize_rows(payload: &str, format: FeedFormat) -> Vec<Vec<String>> {
    let mut rows = match format {
        FeedFormat::Csv => csv_rows(payload),
        FeedFormat::Json => json_rows(payload),
    };

    let leading_header = rows
        .first()
        .and_then(|row| row.first())
        .is_some_and(|col| col.to_ascii_lowercase().contains("date"));
    if leading_header {
        rows.remove(0);
    }

    rows
}

/// Split comma-separated text into rows.
///
/// This is a plain comma split, not a CSV tokenizer: a quoted field containing
/// a comma is cut at that comma. The feeds this engine reads never quote
/// commas, and existing deployments depend on the positional column capture,
/// so the limitation stands rather than being fixed underneath them.
fn csv_rows(payload: &str) -> Vec<Vec<String>> {
    payload
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split(',').map(clean_column).collect())
        .collect()
}

/// Strip surrounding whitespace and double quotes from one column.
fn clean_column(col: &str) -> String {
    col.trim().trim_matches('"').trim().to_string()
}

/// Read a tabular JSON payload: an array of row-arrays.
///
/// Non-array payloads and non-array rows contribute no rows. String cells are
/// trimmed; numbers and booleans are stringified; nulls become empty columns.
fn json_rows(payload: &str) -> Vec<Vec<String>> {
    let parsed: Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(err) => {
            if !payload.trim().is_empty() {
                warn!(error = %err, "feed payload is not valid JSON; treating feed as empty");
            }
            return Vec::new();
        }
    };

    let Value::Array(rows) = parsed else {
        warn!("feed payload is JSON but not a table; treating feed as empty");
        return Vec::new();
    };

    rows.into_iter()
        .filter_map(|row| match row {
            Value::Array(cells) if !cells.is_empty() => {
                Some(cells.iter().map(cell_to_string).collect())
            }
            _ => None,
        })
        .collect()
}

fn cell_to_string(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
