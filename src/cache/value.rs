//! Cache Value Module
//!
//! The scalar values the cache accepts and the converters used to read them
//! back.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

// == Value ==
/// A scalar value accepted by [`Cache::store`](crate::cache::Cache::store).
///
/// Serializes externally tagged (`{"text":"foo"}`, `{"integer":42}`), which is
/// the form recorded in call histories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Value {
    Text(String),
    Bytes(Vec<u8>),
    Integer(i64),
    Float(f64),
}

impl Value {
    /// Wire encoding written to the store.
    ///
    /// Text is UTF-8, bytes are verbatim, numbers are their decimal text so
    /// they can be read back with [`decode_integer`] or parsed as floats.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Value::Text(text) => text.as_bytes().to_vec(),
            Value::Bytes(raw) => raw.clone(),
            Value::Integer(n) => n.to_string().into_bytes(),
            Value::Float(x) => x.to_string().into_bytes(),
        }
    }

    /// Short name of the variant, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => write!(f, "{text}"),
            Value::Bytes(raw) => write!(f, "{}", String::from_utf8_lossy(raw)),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<&[u8]> for Value {
    fn from(raw: &[u8]) -> Self {
        Value::Bytes(raw.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(raw: Vec<u8>) -> Self {
        Value::Bytes(raw)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

// == Converters ==
/// Decodes stored bytes as UTF-8 text.
pub fn decode_text(raw: Vec<u8>) -> Result<String> {
    String::from_utf8(raw).map_err(|e| CacheError::Conversion(e.to_string()))
}

/// Parses stored bytes as a decimal integer.
pub fn decode_integer(raw: Vec<u8>) -> Result<i64> {
    let text = decode_text(raw)?;
    text.parse::<i64>()
        .map_err(|e| CacheError::Conversion(format!("{text:?} is not an integer: {e}")))
}
