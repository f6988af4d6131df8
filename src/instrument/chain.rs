//! Hook Chain
//!
//! Runs an ordered list of before/after hooks around a core operation.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::error::Result;
use crate::instrument::{CallCounter, CallHistory};
use crate::store::KeyValueStore;

// == Call Hook ==
/// A before/after interceptor around an instrumented operation.
///
/// Hooks write their state to the same store the operation uses, one store
/// command per step, so they need no locking of their own.
#[async_trait]
pub trait CallHook: Send + Sync {
    /// Runs before the core operation. `inputs` is the serialized argument list.
    async fn before(&self, _store: &dyn KeyValueStore, _operation: &str, _inputs: &str) -> Result<()> {
        Ok(())
    }

    /// Runs after the core operation succeeded. `output` is its rendered result.
    async fn after(&self, _store: &dyn KeyValueStore, _operation: &str, _output: &str) -> Result<()> {
        Ok(())
    }

    /// Runs instead of `after` when the core operation failed.
    async fn failed(&self, _store: &dyn KeyValueStore, _operation: &str, _error: &str) -> Result<()> {
        Ok(())
    }
}

// == Hook Chain ==
/// Ordered hooks wrapped around a core operation.
///
/// The first hook is the outermost: `before` hooks run first to last,
/// `after` hooks run last to first.
#[derive(Clone, Default)]
pub struct HookChain {
    hooks: Vec<Arc<dyn CallHook>>,
}

impl HookChain {
    /// Creates an empty chain; the core operation runs undecorated.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counting wraps history wraps the core operation.
    pub fn tracking() -> Self {
        Self::new().with(CallCounter).with(CallHistory)
    }

    /// Appends a hook inside every hook already in the chain.
    pub fn with(mut self, hook: impl CallHook + 'static) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    // == Run ==
    /// Runs `core` inside the chain.
    ///
    /// A failing `before` or `after` hook aborts the call. When the core
    /// operation fails, `failed` hooks run last to first and the core error
    /// is returned; a `failed` hook's own error is only logged.
    pub async fn run<T, Fut>(
        &self,
        store: &dyn KeyValueStore,
        operation: &str,
        inputs: &str,
        core: Fut,
    ) -> Result<T>
    where
        T: Display,
        Fut: Future<Output = Result<T>>,
    {
        for hook in &self.hooks {
            hook.before(store, operation, inputs).await?;
        }

        let output = match core.await {
            Ok(output) => output,
            Err(err) => {
                let message = err.to_string();
                for hook in self.hooks.iter().rev() {
                    if let Err(hook_err) = hook.failed(store, operation, &message).await {
                        warn!(operation, error = %hook_err, "failure hook failed");
                    }
                }
                return Err(err);
            }
        };

        let rendered = output.to_string();
        for hook in self.hooks.iter().rev() {
            hook.after(store, operation, &rendered).await?;
        }

        Ok(output)
    }
}
