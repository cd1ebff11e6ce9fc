//! Slot catalog and time-range expansion.
//!
//! A catalog is the fixed, ordered list of bookable time labels shared by every
//! date (e.g. "8:00 AM" through "4:00 PM"). It is deployment configuration:
//! hourly and two-hourly variants of the same booking flow both exist, so the
//! engine takes the list as input and only defaults to the hourly one.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// The hourly nine-slot booking day used when no catalog is configured.
pub const DEFAULT_SLOTS: [&str; 9] = [
    "8:00 AM", "9:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "1:00 PM", "2:00 PM", "3:00 PM",
    "4:00 PM",
];

/// Minutes since midnight for a 12-hour-clock label like "1:00 PM".
///
/// Matching is case-insensitive and tolerates a missing space before the
/// period marker ("1:00pm"). Returns `None` when the label does not parse —
/// `12:00 AM` is minute 0 and `12:00 PM` is minute 720, per the usual
/// 12-hour-clock rules.
pub fn label_to_minutes(label: &str) -> Option<u32> {
    let normalized = label.trim().to_ascii_uppercase();
    let time = NaiveTime::parse_from_str(&normalized, "%I:%M %p").ok()?;
    Some(time.hour() * 60 + time.minute())
}

/// The ordered set of bookable time labels for any day.
///
/// Labels that do not parse as 12-hour-clock times are dropped at
/// construction — the rest of the engine can then assume every catalog entry
/// has a well-defined minute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SlotCatalog {
    labels: Vec<String>,
}

impl SlotCatalog {
    /// Build a catalog from labels, keeping only the ones that parse.
    pub fn new(labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let labels = labels
            .into_iter()
            .map(Into::into)
            .filter(|label| {
                let ok = label_to_minutes(label).is_some();
                if !ok {
                    warn!(%label, "dropping catalog label that is not a clock time");
                }
                ok
            })
            .collect();
        Self { labels }
    }

    /// The labels in catalog order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Resolve a free-form label to the catalog entry at the same clock time.
    ///
    /// This is how single-slot feed rows land on a canonical label: "2:00 pm"
    /// and "02:00 PM" both resolve to the catalog's "2:00 PM". A time with no
    /// catalog entry resolves to `None`.
    pub fn resolve(&self, label: &str) -> Option<&str> {
        let minutes = label_to_minutes(label)?;
        self.labels
            .iter()
            .find(|l| label_to_minutes(l) == Some(minutes))
            .map(String::as_str)
    }

    /// Every catalog slot whose time lies in the inclusive range
    /// `[start_label, end_label]`, in catalog order.
    ///
    /// A boundary that fails to parse yields an empty result rather than an
    /// error — the caller already vetted the gross shape of the range, so a
    /// bad boundary just blocks nothing.
    pub fn expand_range(&self, start_label: &str, end_label: &str) -> Vec<&str> {
        let (Some(start), Some(end)) = (label_to_minutes(start_label), label_to_minutes(end_label))
        else {
            return Vec::new();
        };

        self.labels
            .iter()
            .filter(|label| {
                label_to_minutes(label).is_some_and(|m| m >= start && m <= end)
            })
            .map(String::as_str)
            .collect()
    }
}

impl Default for SlotCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_SLOTS)
    }
}

impl From<Vec<String>> for SlotCatalog {
    fn from(labels: Vec<String>) -> Self {
        Self::new(labels)
    }
}

impl From<SlotCatalog> for Vec<String> {
    fn from(catalog: SlotCatalog) -> Self {
        catalog.labels
    }
}
