//! Instrumentation Module
//!
//! Cross-cutting call tracking expressed as an ordered chain of hooks that
//! run before and after a core operation.
//!
//! # Hooks
//! - [`CallCounter`]: bumps a counter keyed by the operation name
//! - [`CallHistory`]: appends inputs and outputs to `<operation>:inputs` and
//!   `<operation>:outputs`

mod chain;
mod counter;
mod history;

pub use chain::{CallHook, HookChain};
pub use counter::CallCounter;
pub use history::{CallHistory, CallLog};
