//! API Module
//!
//! HTTP handlers and routing for the demo server.
//!
//! # Endpoints
//! - `PUT /values` - Store a value
//! - `GET /values/:key` - Retrieve a value
//! - `GET /calls/:operation` - Call history of an instrumented operation
//! - `GET /pages?url=...` - Cached page fetch
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
