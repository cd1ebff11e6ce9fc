//! # blockout-engine
//!
//! Availability engine for booking calendars fed by a loosely-formatted
//! schedule spreadsheet.
//!
//! A spreadsheet export (CSV, or an equivalent tabular JSON payload) lists
//! blocked dates and time ranges in whatever shapes its human editors type.
//! This crate turns that feed into fast point queries: is a day blocked, is a
//! slot blocked, which slots are still bookable, and why a block exists. The
//! web shell that serves the booking UI is a separate concern — it owns an
//! [`AvailabilityEngine`], loads it, and renders the answers.
//!
//! ## Quick start
//!
//! ```no_run
//! use blockout_engine::{AvailabilityEngine, EngineConfig};
//!
//! # async fn demo() {
//! let mut engine = AvailabilityEngine::new(EngineConfig::new(
//!     "https://docs.google.com/spreadsheets/d/SHEET_ID/gviz/tq?tqx=out:csv",
//! ));
//! engine.load().await;
//!
//! let date = chrono::NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
//! if engine.is_date_unavailable(date) {
//!     // grey the whole day out
//! }
//! for slot in engine.available_slots(date) {
//!     // offer the slot
//! }
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`fetcher`] — feed retrieval with a TTL cache and stale-data fallback
//! - [`feed`] — CSV / tabular-JSON payloads → rows of string columns
//! - [`parser`] — one row → typed (date, time-spec, reason) triple
//! - [`catalog`] — the bookable slot labels + time-range expansion
//! - [`availability`] — the index, load/refresh, and the query API
//! - [`error`] — error types

pub mod availability;
pub mod catalog;
pub mod error;
pub mod feed;
pub mod fetcher;
pub mod parser;

pub use availability::{AvailabilityEngine, EngineConfig};
pub use catalog::SlotCatalog;
pub use error::FeedError;
pub use feed::FeedFormat;
pub use fetcher::{FeedFetcher, FeedSource, HttpSource};
pub use parser::{parse_row, ParsedRow, TimeSpec};
