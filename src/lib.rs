//! Tracked Cache - an instrumented key-value cache
//!
//! Stores scalar values under generated keys in a key-value store, counts
//! and records every `store` call, and memoizes web page fetches for a fixed
//! time-to-live.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod instrument;
pub mod models;
pub mod store;
pub mod tasks;
pub mod web;

pub use api::AppState;
pub use cache::{Cache, Value};
pub use config::Config;
pub use error::{CacheError, Result};
pub use store::{KeyValueStore, MemoryStore, RedisStore};
pub use tasks::spawn_cleanup_task;
pub use web::{HttpFetcher, PageCache, PageFetcher};
