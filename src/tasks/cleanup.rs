//! TTL Cleanup Task
//!
//! Background task that periodically removes expired entries from backends
//! that do not expire keys on their own.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::cache::CacheBackend;

/// Spawns a background task that periodically purges expired entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between runs. Purge failures are logged and the loop carries on.
///
/// # Arguments
/// * `backend` - shared cache backend
/// * `cleanup_interval_secs` - Interval in seconds between cleanup runs
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let backend: Arc<dyn CacheBackend> = Arc::new(MemoryBackend::new());
/// let cleanup_handle = spawn_cleanup_task(backend.clone(), 1);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(
    backend: Arc<dyn CacheBackend>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task for {} backend with interval of {} seconds",
            backend.name(),
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            match backend.purge_expired().await {
                Ok(0) => debug!("TTL cleanup: no expired entries found"),
                Ok(removed) => info!("TTL cleanup: removed {} expired entries", removed),
                Err(err) => error!("TTL cleanup failed: {}", err),
            }
        }
    })
}
