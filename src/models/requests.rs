//! Request DTOs for the demo API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::cache::Value;

/// Request body for the STORE operation (PUT /values)
///
/// The value is externally tagged: `{"value": {"text": "hello"}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreRequest {
    pub value: Value,
}

/// How GET /values/:key decodes the stored bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    #[default]
    Text,
    Integer,
    Raw,
}

/// Query string for GET /values/:key
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetrieveQuery {
    #[serde(rename = "as", default)]
    pub format: ValueFormat,
}

/// Query string for GET /pages
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    pub url: String,
}

impl PageQuery {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.url.is_empty() {
            return Some("URL cannot be empty".to_string());
        }
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Some("URL must use http or https".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_request_deserialize() {
        let json = r#"{"value": {"text": "hello"}}"#;
        let req: StoreRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.value, Value::Text("hello".to_string()));
    }

    #[test]
    fn test_store_request_integer() {
        let json = r#"{"value": {"integer": 42}}"#;
        let req: StoreRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.value, Value::Integer(42));
    }

    #[test]
    fn test_store_request_untagged_value_rejected() {
        let json = r#"{"value": "hello"}"#;
        assert!(serde_json::from_str::<StoreRequest>(json).is_err());
    }

    #[test]
    fn test_retrieve_query_default_format() {
        let query: RetrieveQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.format, ValueFormat::Text);

        let query: RetrieveQuery = serde_json::from_str(r#"{"as": "integer"}"#).unwrap();
        assert_eq!(query.format, ValueFormat::Integer);
    }

    #[test]
    fn test_page_query_validate() {
        let ok = PageQuery {
            url: "https://example.com".to_string(),
        };
        assert!(ok.validate().is_none());

        let empty = PageQuery { url: String::new() };
        assert!(empty.validate().is_some());

        let ftp = PageQuery {
            url: "ftp://example.com".to_string(),
        };
        assert!(ftp.validate().is_some());
    }
}
