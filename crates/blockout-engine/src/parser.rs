//! Row parsing — one feed row into a typed (date, time-spec, reason) triple.
//!
//! The feed is a spreadsheet maintained by hand, so the parser is tolerant
//! about textual shape and strict about meaning: several date and time
//! spellings are accepted, but anything that does not survive calendar
//! validation is rejected outright. Parsing is best-effort and never fails —
//! a row either contributes a [`ParsedRow`] or it contributes nothing.

use chrono::NaiveDate;

use crate::catalog::label_to_minutes;

/// Reason text attached to a block when the feed row leaves the column empty.
pub const DEFAULT_REASON: &str = "Unavailable";

/// Accepted date shapes, tried in order. Month and day tolerate one or two
/// digits in all three.
const DATE_FORMATS: [&str; 3] = ["%m/%d/%Y", "%Y-%m-%d", "%m-%d-%Y"];

/// What the time column of a row asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeSpec {
    /// Block every slot of the date ("ALL DAY", or an empty time column).
    AllDay,
    /// Block every catalog slot between two clock times, inclusive.
    Range {
        start: String,
        end: String,
        /// The normalized range text, kept for reason annotations.
        original: String,
    },
    /// Block a single clock time.
    Single(String),
    /// The column held something, but nothing this parser understands.
    /// The row contributes no blocks.
    Unrecognized,
}

/// A feed row that survived parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub date: NaiveDate,
    pub time: TimeSpec,
    pub reason: String,
}

/// Parse a date column in any of the accepted shapes: `M/D/YYYY`, `YYYY-M-D`,
/// or `M-D-YYYY`.
///
/// Validation is chrono's calendar construction — an impossible date like
/// `2/30/2025` fails to construct and is rejected, never clamped.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

/// Classify a time column.
///
/// Case-insensitive. Empty and "ALL DAY" both mean the whole day; a hyphen
/// splits a range whose two sides must each be a `H:MM AM/PM` clock label;
/// a lone clock label is a single-slot block. Everything else is
/// [`TimeSpec::Unrecognized`].
pub fn parse_time(raw: &str) -> TimeSpec {
    let raw = raw.trim().to_ascii_uppercase();

    if raw.is_empty() || raw == "ALL DAY" {
        return TimeSpec::AllDay;
    }

    if let Some((lhs, rhs)) = raw.split_once('-') {
        let (start, end) = (lhs.trim(), rhs.trim());
        if label_to_minutes(start).is_some() && label_to_minutes(end).is_some() {
            return TimeSpec::Range {
                start: start.to_string(),
                end: end.to_string(),
                original: raw.clone(),
            };
        }
        return TimeSpec::Unrecognized;
    }

    if label_to_minutes(&raw).is_some() {
        return TimeSpec::Single(raw);
    }

    TimeSpec::Unrecognized
}

/// Parse the first three columns of a normalized row.
///
/// Returns `None` when the row has no usable date — the caller skips it.
/// A missing or empty time column means "ALL DAY"; a missing or empty reason
/// column gets [`DEFAULT_REASON`].
pub fn parse_row(cols: &[String]) -> Option<ParsedRow> {
    let date = parse_date(cols.first()?)?;
    let time = parse_time(cols.get(1).map(String::as_str).unwrap_or(""));
    let reason = cols
        .get(2)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_REASON)
        .to_string();

    Some(ParsedRow { date, time, reason })
}
