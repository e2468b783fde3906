//! Redis Backend Module
//!
//! [`CacheBackend`] backed by a Redis server through a reconnecting
//! connection manager.

use std::collections::HashMap;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use tracing::info;

use crate::cache::{CacheBackend, CacheStats};
use crate::error::Result;

// == Redis Backend ==
/// Redis client shared by all request handlers.
#[derive(Clone)]
pub struct RedisBackend {
    conn: ConnectionManager,
}

impl RedisBackend {
    /// Connects to the Redis server at `url` (e.g. `redis://localhost:6379`).
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        info!("Connected to Redis backend");
        Ok(Self { conn })
    }
}

#[async_trait]
impl CacheBackend for RedisBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(ttl_secs)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: u64 = redis::cmd("DEL").arg(key).query_async(&mut conn).await?;
        Ok(())
    }

    async fn delete_many(&self, keys: &[String]) -> Result<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.conn.clone();
        let removed: u64 = redis::cmd("DEL").arg(keys).query_async(&mut conn).await?;
        Ok(removed)
    }

    async fn scan(&self, cursor: u64, pattern: &str, count: usize) -> Result<(u64, Vec<String>)> {
        let mut conn = self.conn.clone();
        let page: (u64, Vec<String>) = redis::cmd("SCAN")
            .arg(cursor)
            .arg("MATCH")
            .arg(pattern)
            .arg("COUNT")
            .arg(count)
            .query_async(&mut conn)
            .await?;
        Ok(page)
    }

    async fn stats(&self) -> Result<CacheStats> {
        let mut conn = self.conn.clone();
        let info: String = redis::cmd("INFO").query_async(&mut conn).await?;
        let total_keys: u64 = redis::cmd("DBSIZE").query_async(&mut conn).await?;

        let mut stats = parse_info(&info);
        stats.total_keys = total_keys;
        Ok(stats)
    }

    async fn clear(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("FLUSHDB").query_async(&mut conn).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}

/// Extracts the counters we report from an `INFO` reply.
///
/// Missing or malformed fields read as zero.
pub fn parse_info(info: &str) -> CacheStats {
    let fields: HashMap<&str, &str> = info
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once(':'))
        .collect();

    let field = |name: &str| -> u64 {
        fields
            .get(name)
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(0)
    };

    CacheStats {
        hits: field("keyspace_hits"),
        misses: field("keyspace_misses"),
        total_keys: 0,
        used_memory: field("used_memory"),
        connected_clients: field("connected_clients"),
        evicted_keys: field("evicted_keys"),
    }
}
