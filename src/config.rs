//! Configuration Module
//!
//! Handles loading cache and server configuration from environment variables.

use std::env;

/// Cache and server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Global cache switch; when false every wrapped read calls straight through
    pub cache_enabled: bool,
    /// Default TTL in seconds for policies without an explicit TTL
    pub cache_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Redis connection URL; the in-process backend is used when unset
    pub redis_url: Option<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `ENABLE_CACHE` - Enable read-through caching (default: true)
    /// - `CACHE_TTL` - Default TTL in seconds (default: 3600)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    /// - `REDIS_URL` - Redis URL, e.g. `redis://localhost:6379` (default: unset)
    pub fn from_env() -> Self {
        Self {
            cache_enabled: env::var("ENABLE_CACHE")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(true),
            cache_ttl: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            redis_url: env::var("REDIS_URL").ok().filter(|v| !v.trim().is_empty()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_ttl: 3600,
            server_port: 3000,
            cleanup_interval: 1,
            redis_url: None,
        }
    }
}

/// Parses the usual truthy/falsy spellings; anything else is ignored.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.cache_enabled);
        assert_eq!(config.cache_ttl, 3600);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 1);
        assert!(config.redis_url.is_none());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("ENABLE_CACHE");
        env::remove_var("CACHE_TTL");
        env::remove_var("SERVER_PORT");
        env::remove_var("CLEANUP_INTERVAL");
        env::remove_var("REDIS_URL");

        let config = Config::from_env();
        assert!(config.cache_enabled);
        assert_eq!(config.cache_ttl, 3600);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 1);
        assert!(config.redis_url.is_none());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" on "), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
