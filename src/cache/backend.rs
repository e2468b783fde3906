//! Cache Backend Module
//!
//! The key-value store the cache layer sits on. Values are opaque text.

use async_trait::async_trait;
use tracing::debug;

use crate::cache::CacheStats;
use crate::error::Result;

/// Keys examined per `scan` round trip during pattern deletion
pub const SCAN_PAGE_SIZE: usize = 100;

/// Longest TTL written to a backend (about 68 years, fits Redis `EX`)
pub const MAX_TTL_SECS: u64 = i32::MAX as u64;

// == Cache Backend ==
/// Key-value store with TTL and cursor-driven pattern scans.
///
/// Cursor `0` starts a scan; a returned cursor of `0` means the scan is done.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Returns the stored value, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, expiring after `ttl_secs` seconds.
    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()>;

    /// Removes `key`; removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Removes all `keys`, returning how many existed.
    async fn delete_many(&self, keys: &[String]) -> Result<u64>;

    /// Examines up to `count` keys from `cursor`, returning the next cursor
    /// and the examined keys matching `pattern`.
    async fn scan(&self, cursor: u64, pattern: &str, count: usize) -> Result<(u64, Vec<String>)>;

    /// Aggregate statistics reported by the store.
    async fn stats(&self) -> Result<CacheStats>;

    /// Removes every key.
    async fn clear(&self) -> Result<()>;

    /// Drops expired entries the store does not reclaim by itself.
    async fn purge_expired(&self) -> Result<usize> {
        Ok(0)
    }

    /// Short backend name for logs and stats.
    fn name(&self) -> &'static str;

    /// Deletes every key matching `pattern`, one scan page at a time until
    /// the cursor is exhausted. Returns the number of keys removed.
    async fn scan_delete(&self, pattern: &str) -> Result<u64> {
        let mut cursor = 0;
        let mut removed = 0;

        loop {
            let (next, keys) = self.scan(cursor, pattern, SCAN_PAGE_SIZE).await?;
            if !keys.is_empty() {
                removed += self.delete_many(&keys).await?;
            }
            if next == 0 {
                break;
            }
            cursor = next;
        }

        debug!("Scan-deleted {} keys matching {}", removed, pattern);
        Ok(removed)
    }
}
