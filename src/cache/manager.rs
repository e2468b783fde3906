//! Cache Manager Module
//!
//! Operational helpers: statistics report, clear-all and expired sweeps.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::cache::{Cache, CacheBackend, CacheStats};
use crate::error::Result;

// == Cache Report ==
/// Statistics as exposed to operators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheReport {
    /// Backend name (`memory` or `redis`)
    pub backend: String,
    /// Keys currently stored
    pub total_keys: u64,
    /// Backend lookups that hit
    pub hits: u64,
    /// Backend lookups that missed
    pub misses: u64,
    /// Percentage of lookups that hit, two decimals
    pub hit_rate: f64,
    /// Memory usage, human readable
    pub used_memory: String,
    /// Clients connected to the backend
    pub connected_clients: u64,
    /// Keys evicted by the backend
    pub evicted_keys: u64,
}

impl CacheReport {
    pub fn new(backend: impl Into<String>, stats: &CacheStats) -> Self {
        Self {
            backend: backend.into(),
            total_keys: stats.total_keys,
            hits: stats.hits,
            misses: stats.misses,
            hit_rate: stats.hit_rate(),
            used_memory: stats.used_memory_human(),
            connected_clients: stats.connected_clients,
            evicted_keys: stats.evicted_keys,
        }
    }
}

// == Cache Manager ==
/// Management operations over a backend.
#[derive(Clone)]
pub struct CacheManager {
    backend: Arc<dyn CacheBackend>,
}

impl CacheManager {
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self { backend }
    }

    // == Stats ==
    /// Collects the current statistics.
    pub async fn get_stats(&self) -> Result<CacheReport> {
        let stats = self.backend.stats().await?;
        Ok(CacheReport::new(self.backend.name(), &stats))
    }

    // == Clear All ==
    /// Removes every entry from the backend.
    pub async fn clear_all(&self) -> Result<()> {
        self.backend.clear().await?;
        warn!("All cache cleared");
        Ok(())
    }

    // == Clear Expired ==
    /// Sweeps expired entries where the backend keeps them around, then logs
    /// the current statistics. Returns how many entries were swept.
    pub async fn clear_expired(&self) -> Result<usize> {
        let removed = self.backend.purge_expired().await?;
        let report = self.get_stats().await?;
        info!(
            "Cache stats: backend={} keys={} hit_rate={}% memory={} (swept {})",
            report.backend, report.total_keys, report.hit_rate, report.used_memory, removed
        );
        Ok(removed)
    }
}

impl Cache {
    /// Manager over this cache's backend.
    pub fn manager(&self) -> CacheManager {
        CacheManager::new(self.backend().clone())
    }
}
