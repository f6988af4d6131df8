//! Cache Module
//!
//! Opaque storage and retrieval of scalar values with tracked `store` calls.

mod client;
mod value;


// Re-export public types
pub use client::{Cache, STORE_OPERATION};
pub use value::{decode_integer, decode_text, Value};
