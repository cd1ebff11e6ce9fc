//! Error types for feed retrieval.

use thiserror::Error;

/// Errors produced while retrieving the schedule feed.
///
/// None of these cross the engine's query surface — [`crate::fetcher::FeedFetcher`]
/// recovers from every variant by serving the previous payload (or an empty one).
/// They exist so the fallback path can log what actually went wrong.
#[derive(Error, Debug)]
pub enum FeedError {
    /// The request itself failed (DNS, TLS, timeout, connection reset).
    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed host answered with a non-success status code.
    #[error("feed returned HTTP status {0}")]
    Status(u16),
}

/// Convenience alias used throughout blockout-engine.
pub type Result<T> = std::result::Result<T, FeedError>;
