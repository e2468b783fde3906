//! Cache Entry Module
//!
//! Individual entries of the in-process backend with TTL support.

use std::time::{Duration, Instant};

use crate::cache::MAX_TTL_SECS;

// == Cache Entry ==
/// A stored value with its expiry deadline and scan position.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Point in time after which the entry is treated as absent
    pub expires_at: Instant,
    /// Insertion sequence number used as the scan cursor position
    pub seq: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry expiring `ttl` from now.
    ///
    /// TTLs longer than `MAX_TTL_SECS` are capped.
    pub fn new(value: String, ttl: Duration, seq: u64) -> Self {
        let now = Instant::now();
        let ttl = ttl.min(Duration::from_secs(MAX_TTL_SECS));
        let expires_at = now.checked_add(ttl).unwrap_or(now);
        Self {
            value,
            expires_at,
            seq,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches its deadline.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    /// Approximate memory held by the entry under `key`.
    pub fn footprint(&self, key: &str) -> usize {
        key.len() + self.value.len()
    }
}
