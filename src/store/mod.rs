//! Store Module
//!
//! The key-value store collaborator consumed by the cache, plus its two
//! backends: an in-process keyspace and a Redis connection.

mod entry;
mod keyspace;
mod memory;
mod redis_impl;


use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use entry::{KeyEntry, StoredValue};
pub use keyspace::Keyspace;
pub use memory::MemoryStore;
pub use redis_impl::RedisStore;

// == Key-Value Store Trait ==
/// Commands the cache needs from a key-value store.
///
/// Every method maps to a single store command and relies on the store for
/// atomicity; callers perform no locking of their own.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Removes every key in the store.
    async fn flush_all(&self) -> Result<()>;

    /// Reads the byte string at `key`, `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Writes a byte string with no expiration.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Atomically increments the integer at `key` and returns the new value.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Atomically appends to the list at `key`, returning its new length.
    async fn rpush(&self, key: &str, value: &[u8]) -> Result<usize>;

    /// Reads list elements from `start` to `stop` inclusive; negative
    /// indices count from the end.
    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>>;

    /// Writes a byte string that expires after `ttl`.
    async fn set_ex(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()>;
}
