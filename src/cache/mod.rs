//! Cache Module
//!
//! Read-through caching and pattern invalidation over a pluggable
//! key-value backend.

mod backend;
mod cached;
pub mod codec;
mod entry;
mod invalidate;
pub mod key;
mod manager;
mod memory;
pub mod pattern;
pub mod presets;
mod redis;
mod stats;


// Re-export public types
pub use backend::{CacheBackend, MAX_TTL_SECS, SCAN_PAGE_SIZE};
pub use cached::{Cache, CachePolicy, Cached, Condition, KeyFn};
pub use entry::CacheEntry;
pub use key::{generate_key, CacheArgs, HasIdentity, KeyArgs, MAX_KEY_CHARS};
pub use manager::{CacheManager, CacheReport};
pub use memory::{MemoryBackend, MemoryStore};
pub use self::redis::{parse_info, RedisBackend};
pub use stats::{hit_rate, CacheStats};
