//! Expiring Page Cache
//!
//! Memoizes page fetches per URL for a fixed time-to-live.
//!
//! # Keys
//! - `count:<url>`: number of `fetch_cached` calls for the URL; never expires
//! - `cached:<url>`: page content; expires after the TTL

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::{decode_integer, decode_text};
use crate::error::Result;
use crate::store::KeyValueStore;
use crate::web::PageFetcher;

/// Time-to-live of a cached page unless configured otherwise.
pub const DEFAULT_PAGE_TTL: Duration = Duration::from_secs(10);

// == Page Cache ==
/// Per-URL fetch cache with access counting.
///
/// A hit does not re-arm the TTL, so a page is refetched at most once per
/// TTL window no matter how often it is read. Failed fetches are not cached.
pub struct PageCache<F> {
    store: Arc<dyn KeyValueStore>,
    fetcher: F,
    ttl: Duration,
}

impl<F: PageFetcher> PageCache<F> {
    /// Creates a page cache with the default TTL.
    pub fn new(store: Arc<dyn KeyValueStore>, fetcher: F) -> Self {
        Self::with_ttl(store, fetcher, DEFAULT_PAGE_TTL)
    }

    pub fn with_ttl(store: Arc<dyn KeyValueStore>, fetcher: F, ttl: Duration) -> Self {
        Self {
            store,
            fetcher,
            ttl,
        }
    }

    pub fn count_key(url: &str) -> String {
        format!("count:{url}")
    }

    pub fn cached_key(url: &str) -> String {
        format!("cached:{url}")
    }

    // == Fetch Cached ==
    /// Returns the page at `url`, fetching it only when no live copy exists.
    ///
    /// The access counter is bumped on every call, hit or miss.
    pub async fn fetch_cached(&self, url: &str) -> Result<String> {
        self.store.incr(&Self::count_key(url)).await?;

        let cached_key = Self::cached_key(url);
        if let Some(raw) = self.store.get(&cached_key).await? {
            debug!(url, "page cache hit");
            return decode_text(raw);
        }

        debug!(url, "page cache miss");
        let content = match self.fetcher.fetch(url).await {
            Ok(content) => content,
            Err(err) => {
                warn!(url, error = %err, "page fetch failed");
                return Err(err);
            }
        };

        self.store
            .set_ex(&cached_key, content.as_bytes(), self.ttl)
            .await?;

        Ok(content)
    }

    // == Access Count ==
    /// Number of `fetch_cached` calls made for `url`.
    pub async fn access_count(&self, url: &str) -> Result<u64> {
        match self.store.get(&Self::count_key(url)).await? {
            Some(raw) => Ok(decode_integer(raw)?.max(0) as u64),
            None => Ok(0),
        }
    }
}
