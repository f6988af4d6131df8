//! Error types for the tracked cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the cache, the stores and the demo server.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not found (only raised by the HTTP layer; retrieval returns `None`)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Command run against a key holding the wrong kind of value
    #[error("WRONGTYPE operation against key holding the wrong kind of value: {0}")]
    WrongType(String),

    /// A converter rejected the stored bytes
    #[error("Conversion failed: {0}")]
    Conversion(String),

    /// The store could not be reached
    #[error("Store connection failed: {0}")]
    Connection(String),

    /// The store rejected or failed a command
    #[error("Store operation failed: {0}")]
    Store(String),

    /// The underlying page fetch failed
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Call history could not be serialized
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_connection_refusal() || err.is_timeout() || err.is_connection_dropped() {
            CacheError::Connection(err.to_string())
        } else {
            CacheError::Store(err.to_string())
        }
    }
}

impl From<reqwest::Error> for CacheError {
    fn from(err: reqwest::Error) -> Self {
        CacheError::Fetch(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::WrongType(_) | CacheError::Conversion(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            CacheError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::Fetch(_) => StatusCode::BAD_GATEWAY,
            CacheError::Store(_) | CacheError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the tracked cache.
pub type Result<T> = std::result::Result<T, CacheError>;
