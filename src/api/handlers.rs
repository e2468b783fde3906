//! API Handlers
//!
//! HTTP request handlers for the cache admin endpoints.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::info;

use crate::cache::{Cache, CacheBackend, CacheReport, MemoryBackend, RedisBackend};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, HealthResponse, InvalidateRequest, InvalidateResponse, InvalidationTarget,
};

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Cache handle over the shared backend
    pub cache: Cache,
}

impl AppState {
    /// Creates a new AppState with the given cache.
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Connects to Redis when `redis_url` is set, otherwise uses the
    /// in-process backend.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let backend: Arc<dyn CacheBackend> = match &config.redis_url {
            Some(url) => Arc::new(RedisBackend::connect(url).await?),
            None => Arc::new(MemoryBackend::new()),
        };
        info!("Using {} cache backend", backend.name());
        Ok(Self::new(Cache::from_config(backend, config)))
    }
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        state.cache.backend().name(),
        state.cache.is_enabled(),
    ))
}

/// Handler for GET /cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<CacheReport>> {
    let report = state.cache.manager().get_stats().await?;
    Ok(Json(report))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Result<Json<ClearResponse>> {
    state.cache.manager().clear_all().await?;
    Ok(Json(ClearResponse::new()))
}

/// Handler for POST /cache/invalidate
///
/// Invalidation is fire-and-forget: backend failures are logged, not returned.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Json(req): Json<InvalidateRequest>,
) -> Result<Json<InvalidateResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let target = match req.target() {
        Some(InvalidationTarget::Pattern(pattern)) => {
            state.cache.invalidate_pattern(&pattern).await;
            pattern
        }
        Some(InvalidationTarget::Key(key)) => {
            state.cache.delete_key(&key).await;
            key
        }
        None => {
            return Err(CacheError::InvalidRequest(
                "Invalid invalidation target".to_string(),
            ))
        }
    };

    Ok(Json(InvalidateResponse::new(target)))
}
