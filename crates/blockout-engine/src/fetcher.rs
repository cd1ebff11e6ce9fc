//! Feed retrieval with a time-based cache and stale-data fallback.
//!
//! The schedule feed is a spreadsheet export behind a URL, polled on demand.
//! A fixed TTL keeps queries from hammering the export endpoint; when a
//! refetch fails, the previous payload keeps serving (stale beats empty for a
//! booking calendar). The transport itself sits behind [`FeedSource`] so the
//! engine can be driven by anything that yields payload text.

use std::future::Future;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::{FeedError, Result};

/// Transport seam for the schedule feed.
///
/// Production uses [`HttpSource`]; tests inject in-memory sources.
pub trait FeedSource {
    /// Retrieve the raw feed payload.
    fn fetch(&self) -> impl Future<Output = Result<String>> + Send;
}

/// HTTP transport: GET the feed URL, non-success status is an error.
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

impl FeedSource for HttpSource {
    async fn fetch(&self) -> Result<String> {
        debug!(url = %self.url, "fetching schedule feed");
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::Status(response.status().as_u16()));
        }
        Ok(response.text().await?)
    }
}

/// The last successful payload and when it arrived.
struct CacheEnvelope {
    payload: String,
    fetched_at: Instant,
}

/// Caching wrapper around a [`FeedSource`].
pub struct FeedFetcher<S> {
    source: S,
    ttl: Duration,
    cache: Option<CacheEnvelope>,
    force_refetch: bool,
}

impl<S: FeedSource> FeedFetcher<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            cache: None,
            force_refetch: false,
        }
    }

    /// The raw feed payload, served from cache while the TTL holds.
    ///
    /// This never fails: a transport error falls back to the previous payload
    /// (even an expired one), and to an empty payload when nothing was ever
    /// fetched. Callers treat empty as "no blocks known", not as an error.
    pub async fn fetch(&mut self) -> String {
        if let Some(cache) = &self.cache {
            if !self.force_refetch && cache.fetched_at.elapsed() < self.ttl {
                debug!("serving schedule feed from cache");
                return cache.payload.clone();
            }
        }

        match self.source.fetch().await {
            Ok(payload) => {
                self.cache = Some(CacheEnvelope {
                    payload: payload.clone(),
                    fetched_at: Instant::now(),
                });
                self.force_refetch = false;
                payload
            }
            Err(err) => match &self.cache {
                Some(cache) => {
                    warn!(error = %err, "feed fetch failed; serving stale payload");
                    cache.payload.clone()
                }
                None => {
                    warn!(error = %err, "feed fetch failed with nothing cached; treating feed as empty");
                    String::new()
                }
            },
        }
    }

    /// Expire the cache so the next [`fetch`](Self::fetch) hits the source
    /// regardless of TTL.
    pub fn invalidate(&mut self) {
        self.force_refetch = true;
    }
}
