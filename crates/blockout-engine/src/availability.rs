//! The availability index, its load/refresh lifecycle, and the query API.
//!
//! This module is what the booking UI talks to: an [`AvailabilityEngine`]
//! owns the feed fetcher, the slot catalog, and the in-memory index of
//! blocked days and blocked (day, slot) pairs. The index is rebuilt wholesale
//! on every load — a row the spreadsheet drops disappears here on the next
//! load, with no incremental-removal bookkeeping to get wrong.
//!
//! Queries are read-only and never touch the network; staleness is governed
//! entirely by whoever calls [`AvailabilityEngine::load`] or
//! [`AvailabilityEngine::refresh`].

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::SlotCatalog;
use crate::feed::{normalize_rows, FeedFormat};
use crate::fetcher::{FeedFetcher, FeedSource, HttpSource};
use crate::parser::{parse_row, ParsedRow, TimeSpec};

fn default_ttl() -> Duration {
    Duration::from_secs(5 * 60)
}

/// Engine configuration: where the feed lives and what a bookable day
/// looks like.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// URL of the exported schedule feed.
    pub feed_url: String,
    /// How long a fetched payload stays fresh. Defaults to five minutes.
    #[serde(default = "default_ttl")]
    pub cache_ttl: Duration,
    /// Transport encoding of the feed.
    #[serde(default)]
    pub format: FeedFormat,
    /// The bookable slot labels for any day.
    #[serde(default)]
    pub catalog: SlotCatalog,
}

impl EngineConfig {
    /// Configuration with the default TTL, CSV transport, and hourly catalog.
    pub fn new(feed_url: impl Into<String>) -> Self {
        Self {
            feed_url: feed_url.into(),
            cache_ttl: default_ttl(),
            format: FeedFormat::default(),
            catalog: SlotCatalog::default(),
        }
    }
}

/// The mutable state: which days and which (day, slot) pairs are blocked,
/// and why.
///
/// Invariants kept by [`apply`](AvailabilityIndex::apply):
/// - `blocked_slots` never holds an empty set — absence of the date key
///   means "no slot-specific blocks";
/// - only catalog labels enter `blocked_slots`;
/// - a date in `blocked_days` dominates whatever `blocked_slots` holds
///   for it.
#[derive(Debug, Default)]
struct AvailabilityIndex {
    blocked_days: BTreeSet<NaiveDate>,
    blocked_slots: BTreeMap<NaiveDate, BTreeSet<String>>,
    reasons: BTreeMap<(NaiveDate, Option<String>), String>,
}

impl AvailabilityIndex {
    fn clear(&mut self) {
        self.blocked_days.clear();
        self.blocked_slots.clear();
        self.reasons.clear();
    }

    fn apply(&mut self, row: ParsedRow, catalog: &SlotCatalog) {
        match row.time {
            TimeSpec::AllDay => {
                self.blocked_days.insert(row.date);
                self.reasons.insert((row.date, None), row.reason);
            }
            TimeSpec::Range {
                start,
                end,
                original,
            } => {
                let slots: Vec<String> = catalog
                    .expand_range(&start, &end)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                if slots.is_empty() {
                    debug!(date = %row.date, range = %original, "range covers no catalog slots");
                    return;
                }
                let blocked = self.blocked_slots.entry(row.date).or_default();
                for slot in slots {
                    blocked.insert(slot.clone());
                    self.reasons.insert(
                        (row.date, Some(slot)),
                        format!("{} ({})", row.reason, original),
                    );
                }
            }
            TimeSpec::Single(label) => {
                // Land on the catalog's canonical label for that clock time;
                // a time with no catalog slot blocks nothing.
                let Some(slot) = catalog.resolve(&label).map(str::to_string) else {
                    debug!(date = %row.date, %label, "single time has no catalog slot");
                    return;
                };
                self.blocked_slots
                    .entry(row.date)
                    .or_default()
                    .insert(slot.clone());
                self.reasons.insert((row.date, Some(slot)), row.reason);
            }
            TimeSpec::Unrecognized => {
                debug!(date = %row.date, "unrecognized time spec; row contributes nothing");
            }
        }
    }
}

/// The availability engine consumed by the booking UI.
///
/// Construct one per feed, `load` it, then query. The lifecycle is explicit:
/// created empty, populated by the first [`load`](Self::load), replaced by
/// every later `load`/[`refresh`](Self::refresh). Queries take `&self` and
/// loads take `&mut self`, so the single-writer discipline is enforced by
/// the borrow checker rather than by convention.
pub struct AvailabilityEngine<S = HttpSource> {
    fetcher: FeedFetcher<S>,
    format: FeedFormat,
    catalog: SlotCatalog,
    index: AvailabilityIndex,
}

impl AvailabilityEngine<HttpSource> {
    /// Engine backed by an HTTP feed.
    pub fn new(config: EngineConfig) -> Self {
        let source = HttpSource::new(config.feed_url.clone());
        Self::with_source(source, config)
    }
}

impl<S: FeedSource> AvailabilityEngine<S> {
    /// Engine with an injected transport (tests, alternate feeds).
    ///
    /// `config.feed_url` is unused here — the source already knows where its
    /// payload comes from.
    pub fn with_source(source: S, config: EngineConfig) -> Self {
        Self {
            fetcher: FeedFetcher::new(source, config.cache_ttl),
            format: config.format,
            catalog: config.catalog,
            index: AvailabilityIndex::default(),
        }
    }

    /// The configured slot catalog.
    pub fn catalog(&self) -> &SlotCatalog {
        &self.catalog
    }

    /// Fetch the feed (cache rules permitting) and rebuild the index from it.
    ///
    /// Rows that fail to parse are skipped; a fetch failure degrades to the
    /// cached payload or, with nothing cached, to an empty index. Neither is
    /// an error at this surface — under-blocking is the safe direction for a
    /// booking calendar, and the skips are logged so operators can see it.
    pub async fn load(&mut self) {
        let payload = self.fetcher.fetch().await;
        self.index.clear();

        let rows = normalize_rows(&payload, self.format);
        let total = rows.len();
        let mut applied = 0usize;
        for cols in &rows {
            match parse_row(cols) {
                Some(row) => {
                    self.index.apply(row, &self.catalog);
                    applied += 1;
                }
                None => debug!(row = ?cols, "skipping feed row with no usable date"),
            }
        }

        info!(
            rows = total,
            applied,
            blocked_days = self.index.blocked_days.len(),
            dates_with_slot_blocks = self.index.blocked_slots.len(),
            "loaded availability feed"
        );
    }

    /// Bypass the fetch cache, then [`load`](Self::load).
    pub async fn refresh(&mut self) {
        self.fetcher.invalidate();
        self.load().await;
    }

    /// Is the whole day blocked?
    pub fn is_date_unavailable(&self, date: NaiveDate) -> bool {
        self.index.blocked_days.contains(&date)
    }

    /// Is this slot blocked on this date? True for every slot of a
    /// day-blocked date.
    pub fn is_slot_unavailable(&self, date: NaiveDate, slot: &str) -> bool {
        self.index.blocked_days.contains(&date)
            || self
                .index
                .blocked_slots
                .get(&date)
                .is_some_and(|slots| slots.contains(slot))
    }

    /// The catalog slots still bookable on this date, in catalog order.
    /// Empty when the day is blocked.
    pub fn available_slots(&self, date: NaiveDate) -> Vec<&str> {
        if self.index.blocked_days.contains(&date) {
            return Vec::new();
        }
        match self.index.blocked_slots.get(&date) {
            Some(blocked) => self
                .catalog
                .labels()
                .iter()
                .filter(|label| !blocked.contains(*label))
                .map(String::as_str)
                .collect(),
            None => self.catalog.labels().iter().map(String::as_str).collect(),
        }
    }

    /// The blocked slots on this date, in catalog order: the full catalog
    /// when the day is blocked, otherwise the date's slot-specific blocks
    /// (possibly none).
    pub fn blocked_slots(&self, date: NaiveDate) -> Vec<&str> {
        if self.index.blocked_days.contains(&date) {
            return self.catalog.labels().iter().map(String::as_str).collect();
        }
        match self.index.blocked_slots.get(&date) {
            Some(blocked) => self
                .catalog
                .labels()
                .iter()
                .filter(|label| blocked.contains(*label))
                .map(String::as_str)
                .collect(),
            None => Vec::new(),
        }
    }

    /// The reason a date (or one slot of it) is blocked, if the feed gave one.
    ///
    /// With a slot supplied, the slot-specific reason wins; the day-level
    /// reason is the fallback either way.
    pub fn reason_for(&self, date: NaiveDate, slot: Option<&str>) -> Option<&str> {
        if let Some(slot) = slot {
            let key = (date, Some(slot.to_string()));
            if let Some(reason) = self.index.reasons.get(&key) {
                return Some(reason);
            }
        }
        self.index.reasons.get(&(date, None)).map(String::as_str)
    }

    /// Every fully-blocked date, sorted.
    pub fn blocked_dates(&self) -> Vec<NaiveDate> {
        self.index.blocked_days.iter().copied().collect()
    }

    /// Day-of-month numbers of the fully-blocked dates in one month, sorted.
    /// Handy for rendering a calendar grid.
    pub fn blocked_days_in_month(&self, year: i32, month: u32) -> Vec<u32> {
        self.index
            .blocked_days
            .iter()
            .filter(|date| date.year() == year && date.month() == month)
            .map(|date| date.day())
            .collect()
    }

    /// Mark an inclusive date range as fully blocked (vacations entered by
    /// hand rather than through the feed).
    ///
    /// This writes into the live index only — the next `load` rebuilds from
    /// the feed and discards it.
    pub fn block_date_range(&mut self, start: NaiveDate, end: NaiveDate, reason: &str) {
        let mut day = start;
        while day <= end {
            self.index.blocked_days.insert(day);
            self.index.reasons.insert((day, None), reason.to_string());
            let Some(next) = day.succ_opt() else { break };
            day = next;
        }
    }
}
