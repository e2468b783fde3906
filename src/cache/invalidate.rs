//! Invalidation Module
//!
//! Removes cache entries after the system of record changes.
//!
//! Invalidation is fire-and-forget: backend failures are logged and never
//! reach the caller. Writing and invalidating are separate steps, so a crash
//! between them leaves stale entries until their TTL runs out.

use std::future::Future;

use tracing::{debug, error};

use crate::cache::key::{generate_key, CacheArgs};
use crate::cache::{Cache, CacheBackend};

impl Cache {
    // == Invalidate Pattern ==
    /// Deletes every entry whose key matches the glob `pattern`.
    pub async fn invalidate_pattern(&self, pattern: &str) {
        match self.backend().scan_delete(pattern).await {
            Ok(_) => debug!("Cache pattern invalidated: {}", pattern),
            Err(err) => error!("Cache error invalidating {}: {}", pattern, err),
        }
    }

    // == Invalidate Key ==
    /// Deletes the single entry generated for `prefix` and `args`.
    pub async fn invalidate_key<A: CacheArgs + ?Sized>(&self, prefix: &str, args: &A) {
        let key = generate_key(prefix, &args.key_args());
        self.delete_key(&key).await;
    }

    /// Deletes `key` verbatim.
    pub async fn delete_key(&self, key: &str) {
        match self.backend().delete(key).await {
            Ok(()) => debug!("Cache invalidated: {}", key),
            Err(err) => error!("Cache error invalidating {}: {}", key, err),
        }
    }

    // == Write And Invalidate ==
    /// Runs `write` and, once it succeeds, invalidates every pattern.
    ///
    /// A failed write leaves the cache untouched and returns its error.
    pub async fn write_and_invalidate<T, E, Fut>(
        &self,
        write: Fut,
        patterns: &[&str],
    ) -> std::result::Result<T, E>
    where
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        let value = write.await?;
        for pattern in patterns {
            self.invalidate_pattern(pattern).await;
        }
        Ok(value)
    }
}
