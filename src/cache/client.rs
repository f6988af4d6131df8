//! Cache Client Module
//!
//! Stores scalar values under generated keys and reads them back, with every
//! `store` call running through the instrumentation hook chain.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::cache::{decode_integer, decode_text, Value};
use crate::error::{CacheError, Result};
use crate::instrument::{CallCounter, CallHistory, CallLog, HookChain};
use crate::store::KeyValueStore;

/// Qualified name under which `Cache::store` calls are counted and recorded.
pub const STORE_OPERATION: &str = "Cache.store";

// == Cache ==
/// Opaque storage of scalar values in a key-value store.
///
/// Cheap to clone; clones share the store handle and hook chain.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn KeyValueStore>,
    hooks: Arc<HookChain>,
}

impl Cache {
    // == Initialize ==
    /// Binds a cache to `store` and flushes every existing key.
    ///
    /// `store` calls are counted and recorded (see [`HookChain::tracking`]).
    pub async fn initialize(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        Self::initialize_with_hooks(store, HookChain::tracking()).await
    }

    /// Like [`Cache::initialize`] with a caller-supplied hook chain.
    pub async fn initialize_with_hooks(
        store: Arc<dyn KeyValueStore>,
        hooks: HookChain,
    ) -> Result<Self> {
        store.flush_all().await?;
        info!(hooks = hooks.len(), "cache initialized, store flushed");

        Ok(Self {
            store,
            hooks: Arc::new(hooks),
        })
    }

    // == Store ==
    /// Writes `value` under a fresh random key and returns the key.
    ///
    /// Storing the same value twice yields two distinct keys.
    pub async fn store(&self, value: impl Into<Value>) -> Result<String> {
        let value = value.into();
        let inputs = serde_json::to_string(&[&value])?;

        self.hooks
            .run(self.store.as_ref(), STORE_OPERATION, &inputs, async {
                let key = Uuid::new_v4().to_string();
                self.store.set(&key, &value.to_bytes()).await?;
                debug!(%key, kind = value.kind(), "value stored");
                Ok::<_, CacheError>(key)
            })
            .await
    }

    // == Retrieve ==
    /// Reads the raw bytes stored under `key`; `None` if the key is unknown.
    pub async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let raw = self.store.get(key).await?;
        if raw.is_none() {
            debug!(key, "retrieve miss");
        }
        Ok(raw)
    }

    /// Reads `key` and applies `convert` to the raw bytes.
    ///
    /// Converter errors propagate unchanged; an unknown key yields `None`
    /// without calling the converter.
    pub async fn retrieve_with<T, F>(&self, key: &str, convert: F) -> Result<Option<T>>
    where
        F: FnOnce(Vec<u8>) -> Result<T> + Send,
    {
        match self.retrieve(key).await? {
            Some(raw) => convert(raw).map(Some),
            None => Ok(None),
        }
    }

    /// Reads `key` as UTF-8 text.
    pub async fn retrieve_as_text(&self, key: &str) -> Result<Option<String>> {
        self.retrieve_with(key, decode_text).await
    }

    /// Reads `key` as a decimal integer.
    pub async fn retrieve_as_integer(&self, key: &str) -> Result<Option<i64>> {
        self.retrieve_with(key, decode_integer).await
    }

    // == Call Tracking ==
    /// Number of recorded calls to `operation`.
    pub async fn call_count(&self, operation: &str) -> Result<u64> {
        CallCounter::read(self.store.as_ref(), operation).await
    }

    /// Recorded inputs and outputs of `operation`.
    pub async fn history(&self, operation: &str) -> Result<CallLog> {
        CallHistory::read(self.store.as_ref(), operation).await
    }

    /// Logs and returns the replay of every recorded call to `operation`.
    pub async fn replay(&self, operation: &str) -> Result<Vec<String>> {
        let count = self.call_count(operation).await?;
        let lines = self.history(operation).await?.replay_lines(count);
        for line in &lines {
            info!("{line}");
        }
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::collections::HashSet;

    async fn test_cache() -> Cache {
        Cache::initialize(Arc::new(MemoryStore::new())).await.unwrap()
    }

    #[tokio::test]
    async fn test_initialize_flushes_store() {
        let store = Arc::new(MemoryStore::new());
        store.set("stale", b"old").await.unwrap();

        let cache = Cache::initialize(store.clone()).await.unwrap();

        assert_eq!(cache.retrieve("stale").await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_store_and_retrieve_raw() {
        let cache = test_cache().await;

        let key = cache.store("foo").await.unwrap();
        assert_eq!(cache.retrieve(&key).await.unwrap(), Some(b"foo".to_vec()));

        let key = cache.store(&b"\x00\x01"[..]).await.unwrap();
        assert_eq!(cache.retrieve(&key).await.unwrap(), Some(vec![0, 1]));
    }

    #[tokio::test]
    async fn test_retrieve_unknown_key() {
        let cache = test_cache().await;
        assert_eq!(cache.retrieve("no-such-key").await.unwrap(), None);
        assert_eq!(cache.retrieve_as_integer("no-such-key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_retrieve_with_conversions() {
        let cache = test_cache().await;

        let key = cache.store(42).await.unwrap();
        assert_eq!(cache.retrieve_as_integer(&key).await.unwrap(), Some(42));
        assert_eq!(cache.retrieve_as_text(&key).await.unwrap().as_deref(), Some("42"));

        let key = cache.store(2.5).await.unwrap();
        let parsed = cache
            .retrieve_with(&key, |raw| {
                decode_text(raw)?
                    .parse::<f64>()
                    .map_err(|e| CacheError::Conversion(e.to_string()))
            })
            .await
            .unwrap();
        assert_eq!(parsed, Some(2.5));
    }

    #[tokio::test]
    async fn test_converter_failure_propagates() {
        let cache = test_cache().await;

        let key = cache.store("not a number").await.unwrap();
        let result = cache.retrieve_as_integer(&key).await;

        assert!(matches!(result, Err(CacheError::Conversion(_))));
    }

    #[tokio::test]
    async fn test_same_value_gets_distinct_keys() {
        let cache = test_cache().await;

        let keys: HashSet<String> = [
            cache.store("same").await.unwrap(),
            cache.store("same").await.unwrap(),
        ]
        .into_iter()
        .collect();

        assert_eq!(keys.len(), 2);
    }

    #[tokio::test]
    async fn test_store_is_counted_and_recorded() {
        let cache = test_cache().await;

        let first = cache.store("first").await.unwrap();
        let second = cache.store(7).await.unwrap();
        let third = cache.store(b"raw".to_vec()).await.unwrap();

        assert_eq!(cache.call_count(STORE_OPERATION).await.unwrap(), 3);

        let log = cache.history(STORE_OPERATION).await.unwrap();
        assert_eq!(
            log.inputs,
            vec![
                r#"[{"text":"first"}]"#,
                r#"[{"integer":7}]"#,
                r#"[{"bytes":[114,97,119]}]"#,
            ]
        );
        assert_eq!(log.outputs, vec![first, second, third]);
    }

    #[tokio::test]
    async fn test_replay() {
        let cache = test_cache().await;

        let key = cache.store("foo").await.unwrap();
        let lines = cache.replay(STORE_OPERATION).await.unwrap();

        assert_eq!(lines[0], "Cache.store was called 1 times:");
        assert_eq!(lines[1], format!(r#"Cache.store([{{"text":"foo"}}]) -> {key}"#));
    }

    #[tokio::test]
    async fn test_undecorated_cache_records_nothing() {
        let store = Arc::new(MemoryStore::new());
        let cache = Cache::initialize_with_hooks(store.clone(), HookChain::new())
            .await
            .unwrap();

        let key = cache.store("plain").await.unwrap();

        assert_eq!(cache.call_count(STORE_OPERATION).await.unwrap(), 0);
        assert_eq!(store.len().await, 1);
        assert_eq!(cache.retrieve_as_text(&key).await.unwrap().as_deref(), Some("plain"));
    }
}
