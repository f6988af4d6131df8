//! In-memory store backend.
//!
//! Wraps a [`Keyspace`] in a tokio `RwLock` so every command runs atomically
//! with respect to the others, mirroring a single-threaded Redis server.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::Result;
use crate::store::{KeyValueStore, Keyspace};

/// Thread-safe in-process key-value store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    keyspace: RwLock<Keyspace>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes all expired keys, returning how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        self.keyspace.write().await.purge_expired()
    }

    /// Number of keys held, including expired keys not yet purged.
    pub async fn len(&self) -> usize {
        self.keyspace.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.keyspace.read().await.is_empty()
    }

    /// Remaining TTL of `key` in milliseconds.
    pub async fn pttl(&self, key: &str) -> Option<u64> {
        self.keyspace.write().await.pttl(key)
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn flush_all(&self) -> Result<()> {
        let removed = self.keyspace.write().await.flush();
        debug!(removed, "FLUSHDB");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        // Write lock: an expired key is removed on access.
        self.keyspace.write().await.get(key)
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.keyspace.write().await.set(key, value, None);
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        self.keyspace.write().await.incr(key)
    }

    async fn rpush(&self, key: &str, value: &[u8]) -> Result<usize> {
        self.keyspace.write().await.rpush(key, value)
    }

    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        self.keyspace.write().await.lrange(key, start, stop)
    }

    async fn set_ex(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        self.keyspace.write().await.set(key, value, Some(ttl));
        Ok(())
    }
}
