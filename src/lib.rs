//! Blog Cache - read-through caching for the blog's read endpoints
//!
//! Derives cache keys from call arguments, serves wrapped reads from a
//! key-value backend (Redis or in-process), and invalidates whole key
//! families by glob pattern after writes.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{Cache, CachePolicy, Cached, HasIdentity, KeyArgs};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_cleanup_task;
