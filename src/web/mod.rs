//! Web Module
//!
//! An expiring cache of fetched web pages with per-URL access counting.

mod fetcher;
mod page_cache;

use std::sync::Arc;

pub use fetcher::{HttpFetcher, PageFetcher};
pub use page_cache::{PageCache, DEFAULT_PAGE_TTL};

/// Page cache over a type-erased fetcher, as held by the HTTP server.
pub type SharedPageCache = PageCache<Arc<dyn PageFetcher>>;
