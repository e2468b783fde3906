//! Cache Statistics Module
//!
//! Backend-reported counters plus the derived hit rate.

use serde::Serialize;

// == Cache Stats ==
/// Aggregate statistics of a cache backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups that found a live value
    pub hits: u64,
    /// Lookups that found nothing (absent or expired)
    pub misses: u64,
    /// Number of keys currently stored
    pub total_keys: u64,
    /// Memory used by the store in bytes
    pub used_memory: u64,
    /// Clients connected to the store
    pub connected_clients: u64,
    /// Keys evicted by the store under memory pressure
    pub evicted_keys: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Hit rate as a percentage, see [`hit_rate`].
    pub fn hit_rate(&self) -> f64 {
        hit_rate(self.hits, self.misses)
    }

    /// Memory usage in the `used_memory_human` style of Redis (`1.50K`).
    pub fn used_memory_human(&self) -> String {
        bytes_to_human(self.used_memory)
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }
}

/// Returns `hits / (hits + misses) * 100` rounded to two decimals, or 0.0
/// when no lookup has happened.
pub fn hit_rate(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        return 0.0;
    }

    let percent = hits as f64 / total as f64 * 100.0;
    (percent * 100.0).round() / 100.0
}

/// Formats a byte count the way Redis formats `used_memory_human`.
pub fn bytes_to_human(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["K", "M", "G", "T", "P"];

    if bytes < 1024 {
        return format!("{}B", bytes);
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2}{}", value, UNITS[unit])
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.total_keys, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        assert_eq!(hit_rate(0, 0), 0.0);
        assert_eq!(CacheStats::new().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_percentage() {
        assert_eq!(hit_rate(80, 20), 80.0);
        assert_eq!(hit_rate(3, 0), 100.0);
        assert_eq!(hit_rate(0, 2), 0.0);
    }

    #[test]
    fn test_hit_rate_rounded() {
        // 1/3 = 33.333...
        assert_eq!(hit_rate(1, 2), 33.33);
        // 2/3 = 66.666...
        assert_eq!(hit_rate(2, 1), 66.67);
    }

    #[test]
    fn test_record_hit_and_miss() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hit_rate(), 66.67);
    }

    #[test]
    fn test_bytes_to_human() {
        assert_eq!(bytes_to_human(0), "0B");
        assert_eq!(bytes_to_human(1023), "1023B");
        assert_eq!(bytes_to_human(1536), "1.50K");
        assert_eq!(bytes_to_human(1024 * 1024), "1.00M");
    }
}
