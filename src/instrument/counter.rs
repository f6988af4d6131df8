//! Call Counter Hook

use async_trait::async_trait;
use tracing::debug;

use crate::cache::decode_integer;
use crate::error::Result;
use crate::instrument::CallHook;
use crate::store::KeyValueStore;

/// Counts calls by incrementing a counter keyed by the operation name.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallCounter;

impl CallCounter {
    /// Reads the number of recorded calls, zero if the operation never ran.
    pub async fn read(store: &dyn KeyValueStore, operation: &str) -> Result<u64> {
        match store.get(operation).await? {
            Some(raw) => Ok(decode_integer(raw)?.max(0) as u64),
            None => Ok(0),
        }
    }
}

#[async_trait]
impl CallHook for CallCounter {
    async fn before(&self, store: &dyn KeyValueStore, operation: &str, _inputs: &str) -> Result<()> {
        let count = store.incr(operation).await?;
        debug!(operation, count, "call counted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::HookChain;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_counter_starts_at_zero() {
        let store = MemoryStore::new();
        assert_eq!(CallCounter::read(&store, "Cache.store").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_counter_counts_each_call() {
        let store = MemoryStore::new();
        let chain = HookChain::new().with(CallCounter);

        for _ in 0..3 {
            chain.run(&store, "op", "[]", async { Ok("done") }).await.unwrap();
        }

        assert_eq!(CallCounter::read(&store, "op").await.unwrap(), 3);
    }
}
