//! Call History Hook
//!
//! Records each call's serialized inputs and rendered output into two
//! position-correlated lists, `<operation>:inputs` and `<operation>:outputs`.
//! A failed call records `error: <message>` as its output.

use async_trait::async_trait;
use serde::Serialize;

use crate::cache::decode_text;
use crate::error::Result;
use crate::instrument::CallHook;
use crate::store::KeyValueStore;

/// Appends inputs before and one output after every call, failed or not.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallHistory;

impl CallHistory {
    pub fn inputs_key(operation: &str) -> String {
        format!("{operation}:inputs")
    }

    pub fn outputs_key(operation: &str) -> String {
        format!("{operation}:outputs")
    }

    /// Reads both history lists for `operation`.
    pub async fn read(store: &dyn KeyValueStore, operation: &str) -> Result<CallLog> {
        let inputs = store.lrange(&Self::inputs_key(operation), 0, -1).await?;
        let outputs = store.lrange(&Self::outputs_key(operation), 0, -1).await?;

        Ok(CallLog {
            operation: operation.to_string(),
            inputs: inputs.into_iter().map(decode_text).collect::<Result<_>>()?,
            outputs: outputs.into_iter().map(decode_text).collect::<Result<_>>()?,
        })
    }
}

#[async_trait]
impl CallHook for CallHistory {
    async fn before(&self, store: &dyn KeyValueStore, operation: &str, inputs: &str) -> Result<()> {
        store
            .rpush(&Self::inputs_key(operation), inputs.as_bytes())
            .await?;
        Ok(())
    }

    async fn after(&self, store: &dyn KeyValueStore, operation: &str, output: &str) -> Result<()> {
        store
            .rpush(&Self::outputs_key(operation), output.as_bytes())
            .await?;
        Ok(())
    }

    async fn failed(&self, store: &dyn KeyValueStore, operation: &str, error: &str) -> Result<()> {
        store
            .rpush(&Self::outputs_key(operation), format!("error: {error}").as_bytes())
            .await?;
        Ok(())
    }
}

// == Call Log ==
/// The recorded history of one operation, in call order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallLog {
    pub operation: String,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

impl CallLog {
    /// Input/output pairs in call order.
    pub fn calls(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inputs
            .iter()
            .zip(&self.outputs)
            .map(|(input, output)| (input.as_str(), output.as_str()))
    }

    /// Renders a replay: a header with `count`, then one
    /// `<operation>(<inputs>) -> <output>` line per call.
    pub fn replay_lines(&self, count: u64) -> Vec<String> {
        let header = format!("{} was called {} times:", self.operation, count);
        std::iter::once(header)
            .chain(
                self.calls()
                    .map(|(input, output)| format!("{}({}) -> {}", self.operation, input, output)),
            )
            .collect()
    }
}
