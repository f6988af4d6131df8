//! API Handlers
//!
//! HTTP request handlers exposing the cache, its call history and the page
//! cache.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::cache::{Cache, Value};
use crate::error::{CacheError, Result};
use crate::models::{
    CallsResponse, HealthResponse, PageQuery, PageResponse, RetrieveQuery, RetrieveResponse,
    StoreRequest, StoreResponse, ValueFormat,
};
use crate::web::SharedPageCache;

/// Application state shared across all handlers.
///
/// The cache and the page cache share one key-value store.
#[derive(Clone)]
pub struct AppState {
    pub cache: Cache,
    pub pages: Arc<SharedPageCache>,
}

impl AppState {
    pub fn new(cache: Cache, pages: SharedPageCache) -> Self {
        Self {
            cache,
            pages: Arc::new(pages),
        }
    }
}

/// Handler for PUT /values
///
/// Stores a value under a generated key.
pub async fn store_handler(
    State(state): State<AppState>,
    Json(req): Json<StoreRequest>,
) -> Result<Json<StoreResponse>> {
    let key = state.cache.store(req.value).await?;
    Ok(Json(StoreResponse::new(key)))
}

/// Handler for GET /values/:key
///
/// Retrieves a value, decoded as text (default), integer or raw bytes.
pub async fn retrieve_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<RetrieveQuery>,
) -> Result<Json<RetrieveResponse>> {
    let value = match query.format {
        ValueFormat::Text => state.cache.retrieve_as_text(&key).await?.map(Value::Text),
        ValueFormat::Integer => state
            .cache
            .retrieve_as_integer(&key)
            .await?
            .map(Value::Integer),
        ValueFormat::Raw => state.cache.retrieve(&key).await?.map(Value::Bytes),
    };

    let value = value.ok_or_else(|| CacheError::NotFound(key.clone()))?;
    Ok(Json(RetrieveResponse::new(key, value)))
}

/// Handler for GET /calls/:operation
///
/// Returns the call counter and recorded history of an instrumented operation.
pub async fn calls_handler(
    State(state): State<AppState>,
    Path(operation): Path<String>,
) -> Result<Json<CallsResponse>> {
    let count = state.cache.call_count(&operation).await?;
    let log = state.cache.history(&operation).await?;
    Ok(Json(CallsResponse::new(count, &log)))
}

/// Handler for GET /pages?url=...
///
/// Returns the page through the expiring page cache.
pub async fn page_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse>> {
    if let Some(error_msg) = query.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let content = state.pages.fetch_cached(&query.url).await?;
    let access_count = state.pages.access_count(&query.url).await?;

    Ok(Json(PageResponse::new(query.url, content, access_count)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
