//! In-Process Backend Module
//!
//! HashMap-backed store with TTL expiration for tests and local development.
//! The whole store sits behind a single async mutex.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::cache::pattern::glob_match;
use crate::cache::{CacheBackend, CacheEntry, CacheStats};
use crate::error::Result;

// == Memory Store ==
/// Key-value storage with TTL expiry and insertion-ordered scans.
#[derive(Debug)]
pub struct MemoryStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Scan order: sequence number -> key
    order: BTreeMap<u64, String>,
    /// Next sequence number to hand out (0 is reserved for "scan start/done")
    next_seq: u64,
    /// Hit/miss counters
    stats: CacheStats,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: BTreeMap::new(),
            next_seq: 1,
            stats: CacheStats::new(),
        }
    }

    // == Set ==
    /// Stores a key-value pair, replacing any previous value and TTL.
    pub fn set(&mut self, key: String, value: String, ttl: Duration) {
        self.remove_entry(&key);

        let seq = self.next_seq;
        self.next_seq += 1;

        self.order.insert(seq, key.clone());
        self.entries.insert(key, CacheEntry::new(value, ttl, seq));
    }

    // == Get ==
    /// Retrieves a live value by key.
    ///
    /// Expired entries are removed and counted as misses.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                let value = entry.value.clone();
                self.stats.record_hit();
                return Some(value);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.remove_entry(key);
        }
        self.stats.record_miss();
        None
    }

    // == Delete ==
    /// Removes an entry by key; returns whether a live entry was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_entry(key)
            .map(|entry| !entry.is_expired())
            .unwrap_or(false)
    }

    // == Scan ==
    /// Examines up to `count` entries in insertion order starting at `cursor`.
    ///
    /// Returns the cursor to resume from (0 when finished) and the live keys
    /// among the examined ones that match `pattern`.
    pub fn scan(&self, cursor: u64, pattern: &str, count: usize) -> (u64, Vec<String>) {
        let count = count.max(1);
        let mut examined = 0;
        let mut next = 0;
        let mut keys = Vec::new();

        for (&seq, key) in self.order.range(cursor..) {
            if examined == count {
                next = seq;
                break;
            }
            examined += 1;

            let live = self
                .entries
                .get(key)
                .map(|entry| !entry.is_expired())
                .unwrap_or(false);
            if live && glob_match(pattern, key) {
                keys.push(key.clone());
            }
        }

        (next, keys)
    }

    // == Stats ==
    /// Returns current statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_keys = self.entries.len() as u64;
        stats.used_memory = self
            .entries
            .iter()
            .map(|(key, entry)| entry.footprint(key) as u64)
            .sum();
        stats.connected_clients = 1;
        stats
    }

    // == Clear ==
    /// Removes every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
        }

        expired_keys.len()
    }

    // == Length ==
    /// Returns the number of stored entries, expired ones not yet reclaimed included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry> {
        let entry = self.entries.remove(key)?;
        self.order.remove(&entry.seq);
        Some(entry)
    }
}

// == Memory Backend ==
/// [`CacheBackend`] over a mutex-guarded [`MemoryStore`].
#[derive(Debug, Default)]
pub struct MemoryBackend {
    store: Mutex<MemoryStore>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.store.lock().await.get(key))
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        self.store
            .lock()
            .await
            .set(key.to_string(), value.to_string(), Duration::from_secs(ttl_secs));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.store.lock().await.delete(key);
        Ok(())
    }

    async fn delete_many(&self, keys: &[String]) -> Result<u64> {
        let mut store = self.store.lock().await;
        let removed = keys.iter().filter(|key| store.delete(key)).count();
        Ok(removed as u64)
    }

    async fn scan(&self, cursor: u64, pattern: &str, count: usize) -> Result<(u64, Vec<String>)> {
        Ok(self.store.lock().await.scan(cursor, pattern, count))
    }

    async fn stats(&self) -> Result<CacheStats> {
        Ok(self.store.lock().await.stats())
    }

    async fn clear(&self) -> Result<()> {
        self.store.lock().await.clear();
        Ok(())
    }

    async fn purge_expired(&self) -> Result<usize> {
        Ok(self.store.lock().await.cleanup_expired())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    const TTL: Duration = Duration::from_secs(300);

    #[test]
    fn test_store_new() {
        let store = MemoryStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = MemoryStore::new();

        store.set("key1".to_string(), "value1".to_string(), TTL);

        assert_eq!(store.get("key1").as_deref(), Some("value1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = MemoryStore::new();
        assert!(store.get("nonexistent").is_none());
    }

    #[test]
    fn test_store_delete() {
        let mut store = MemoryStore::new();

        store.set("key1".to_string(), "value1".to_string(), TTL);
        assert!(store.delete("key1"));

        assert!(store.is_empty());
        assert!(store.get("key1").is_none());
        assert!(!store.delete("key1"));
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = MemoryStore::new();

        store.set("key1".to_string(), "value1".to_string(), TTL);
        store.set("key1".to_string(), "value2".to_string(), TTL);

        assert_eq!(store.get("key1").as_deref(), Some("value2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = MemoryStore::new();

        store.set("key1".to_string(), "value1".to_string(), Duration::from_millis(50));
        assert!(store.get("key1").is_some());

        sleep(Duration::from_millis(80));

        assert!(store.get("key1").is_none());
        assert!(store.is_empty(), "Expired entry should be reclaimed on read");
    }

    #[test]
    fn test_store_stats() {
        let mut store = MemoryStore::new();

        store.set("key1".to_string(), "value1".to_string(), TTL);
        store.get("key1"); // hit
        store.get("nonexistent"); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_keys, 1);
        assert_eq!(stats.used_memory, 10);
        assert_eq!(stats.hit_rate(), 50.0);
    }

    #[test]
    fn test_store_cleanup_expired() {
        let mut store = MemoryStore::new();

        store.set("key1".to_string(), "value1".to_string(), Duration::from_millis(50));
        store.set("key2".to_string(), "value2".to_string(), Duration::from_secs(10));

        sleep(Duration::from_millis(80));

        assert_eq!(store.cleanup_expired(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.get("key2").is_some());
    }

    #[test]
    fn test_scan_pages_through_everything() {
        let mut store = MemoryStore::new();
        for i in 0..25 {
            store.set(format!("tags:list:{}", i), "v".to_string(), TTL);
            store.set(format!("posts:detail:{}", i), "v".to_string(), TTL);
        }

        let mut cursor = 0;
        let mut found = Vec::new();
        let mut rounds = 0;
        loop {
            let (next, keys) = store.scan(cursor, "tags:*", 10);
            assert!(keys.len() <= 10);
            found.extend(keys);
            rounds += 1;
            if next == 0 {
                break;
            }
            cursor = next;
        }

        assert_eq!(found.len(), 25);
        assert!(rounds >= 5);
        assert!(found.iter().all(|k| k.starts_with("tags:")));
    }

    #[test]
    fn test_scan_skips_expired() {
        let mut store = MemoryStore::new();
        store.set("tags:old".to_string(), "v".to_string(), Duration::from_millis(10));
        store.set("tags:new".to_string(), "v".to_string(), TTL);

        sleep(Duration::from_millis(30));

        let (next, keys) = store.scan(0, "tags:*", 100);
        assert_eq!(next, 0);
        assert_eq!(keys, vec!["tags:new".to_string()]);
    }

    #[test]
    fn test_clear() {
        let mut store = MemoryStore::new();
        store.set("a".to_string(), "1".to_string(), TTL);
        store.set("b".to_string(), "2".to_string(), TTL);

        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.scan(0, "*", 10), (0, Vec::new()));
    }

    #[tokio::test]
    async fn test_backend_scan_delete_across_pages() {
        let backend = MemoryBackend::new();
        for i in 0..250 {
            backend.set(&format!("posts:list:{}", i), "[]", 300).await.unwrap();
        }
        backend.set("categories:all", "[]", 300).await.unwrap();

        let removed = backend.scan_delete("posts:*").await.unwrap();

        assert_eq!(removed, 250);
        assert_eq!(backend.len().await, 1);
        assert_eq!(backend.get("categories:all").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_backend_purge_expired() {
        let backend = MemoryBackend::new();
        backend.set("short", "v", 0).await.unwrap();
        backend.set("long", "v", 300).await.unwrap();

        assert_eq!(backend.purge_expired().await.unwrap(), 1);
        assert_eq!(backend.len().await, 1);
        assert_eq!(backend.name(), "memory");
    }
}
