//! Response DTOs for the demo API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::Value;
use crate::instrument::CallLog;

/// Response body for the STORE operation (PUT /values)
#[derive(Debug, Clone, Serialize)]
pub struct StoreResponse {
    /// The generated key
    pub key: String,
}

impl StoreResponse {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Response body for the RETRIEVE operation (GET /values/:key)
#[derive(Debug, Clone, Serialize)]
pub struct RetrieveResponse {
    pub key: String,
    /// The decoded value, externally tagged
    pub value: Value,
}

impl RetrieveResponse {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// One recorded call of an instrumented operation.
#[derive(Debug, Clone, Serialize)]
pub struct CallRecord {
    pub input: String,
    pub output: String,
}

/// Response body for the call history endpoint (GET /calls/:operation)
#[derive(Debug, Clone, Serialize)]
pub struct CallsResponse {
    pub operation: String,
    /// Value of the call counter
    pub count: u64,
    /// Input/output pairs in call order
    pub calls: Vec<CallRecord>,
    /// Human-readable replay lines
    pub replay: Vec<String>,
}

impl CallsResponse {
    pub fn new(count: u64, log: &CallLog) -> Self {
        let calls = log
            .calls()
            .map(|(input, output)| CallRecord {
                input: input.to_string(),
                output: output.to_string(),
            })
            .collect();

        Self {
            operation: log.operation.clone(),
            count,
            calls,
            replay: log.replay_lines(count),
        }
    }
}

/// Response body for the page endpoint (GET /pages)
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse {
    pub url: String,
    pub content: String,
    /// Number of times the URL has been requested, this call included
    pub access_count: u64,
}

impl PageResponse {
    pub fn new(url: impl Into<String>, content: impl Into<String>, access_count: u64) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
            access_count,
        }
    }
}

/// Liveness report (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// RFC 3339 server time
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Body sent with every non-2xx status.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_response_carries_key() {
        let body = serde_json::to_value(StoreResponse::new("0b7f")).unwrap();
        assert_eq!(body, serde_json::json!({ "key": "0b7f" }));
    }

    #[test]
    fn test_retrieve_response_tags_value() {
        let body = serde_json::to_string(&RetrieveResponse::new("k", Value::Integer(42))).unwrap();
        assert_eq!(body, r#"{"key":"k","value":{"integer":42}}"#);
    }

    #[test]
    fn test_calls_response_pairs_inputs_with_outputs() {
        let log = CallLog {
            operation: "Cache.store".to_string(),
            inputs: vec!["[1]".to_string(), "[2]".to_string()],
            outputs: vec!["a".to_string(), "b".to_string()],
        };

        let resp = CallsResponse::new(2, &log);

        assert_eq!(resp.count, 2);
        assert_eq!(resp.calls.len(), 2);
        assert_eq!(resp.calls[1].input, "[2]");
        assert_eq!(resp.calls[1].output, "b");
        assert_eq!(resp.replay.len(), 3);
    }

    #[test]
    fn test_health_timestamp_parses() {
        let resp = HealthResponse::healthy();

        assert_eq!(resp.status, "healthy");
        assert!(chrono::DateTime::parse_from_rfc3339(&resp.timestamp).is_ok());
    }

    #[test]
    fn test_error_body_shape() {
        let body = serde_json::to_string(&ErrorResponse::new("Key not found: k")).unwrap();
        assert_eq!(body, r#"{"error":"Key not found: k"}"#);
    }
}
