//! API Module
//!
//! HTTP handlers and routing for the cache admin API.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /cache/stats` - Backend statistics and hit rate
//! - `DELETE /cache` - Clear every entry
//! - `POST /cache/invalidate` - Invalidate by pattern or exact key

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
