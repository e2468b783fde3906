//! Read-Through Module
//!
//! Wraps async read operations so their results are served from the cache
//! when present and stored on a miss.
//!
//! ```ignore
//! let list_posts = cache.wrap(
//!     CachePolicy::new("posts:list").ttl(300),
//!     |page: u32| async move { posts_repo.list(page).await },
//! );
//! let first_page = list_posts.call(1).await?;
//! ```

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use crate::cache::codec;
use crate::cache::key::{generate_key, CacheArgs};
use crate::cache::{CacheBackend, MAX_TTL_SECS};
use crate::config::Config;
use crate::error::Result;

/// Custom key derivation for a wrapped operation
pub type KeyFn<A> = Arc<dyn Fn(&A) -> String + Send + Sync>;

/// Per-call predicate; `false` bypasses the cache for that call
pub type Condition<A> = Arc<dyn Fn(&A) -> bool + Send + Sync>;

// == Cache Policy ==
/// How one wrapped operation is cached.
pub struct CachePolicy<A> {
    prefix: String,
    ttl: Option<u64>,
    key_fn: Option<KeyFn<A>>,
    condition: Option<Condition<A>>,
}

impl<A> CachePolicy<A> {
    /// Policy with the given key prefix and the cache's default TTL.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ttl: None,
            key_fn: None,
            condition: None,
        }
    }

    /// Overrides the TTL in seconds.
    pub fn ttl(mut self, secs: u64) -> Self {
        self.ttl = Some(secs);
        self
    }

    /// Replaces the generated key with `f(args)`.
    pub fn key_fn(mut self, f: impl Fn(&A) -> String + Send + Sync + 'static) -> Self {
        self.key_fn = Some(Arc::new(f));
        self
    }

    /// Only caches calls for which `f(args)` holds.
    pub fn condition(mut self, f: impl Fn(&A) -> bool + Send + Sync + 'static) -> Self {
        self.condition = Some(Arc::new(f));
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn ttl_secs(&self) -> Option<u64> {
        self.ttl
    }

    /// Whether this call should go through the cache.
    pub fn applies_to(&self, args: &A) -> bool {
        self.condition.as_ref().map_or(true, |condition| condition(args))
    }
}

impl<A: CacheArgs> CachePolicy<A> {
    /// Key used for `args`.
    pub fn key_for(&self, args: &A) -> String {
        match &self.key_fn {
            Some(key_fn) => key_fn(args),
            None => generate_key(&self.prefix, &args.key_args()),
        }
    }
}

impl<A> Clone for CachePolicy<A> {
    fn clone(&self) -> Self {
        Self {
            prefix: self.prefix.clone(),
            ttl: self.ttl,
            key_fn: self.key_fn.clone(),
            condition: self.condition.clone(),
        }
    }
}

impl<A> fmt::Debug for CachePolicy<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachePolicy")
            .field("prefix", &self.prefix)
            .field("ttl", &self.ttl)
            .field("key_fn", &self.key_fn.is_some())
            .field("condition", &self.condition.is_some())
            .finish()
    }
}

// == Cache ==
/// Handle to the shared backend plus the global cache settings.
#[derive(Clone)]
pub struct Cache {
    backend: Arc<dyn CacheBackend>,
    enabled: bool,
    default_ttl: u64,
}

impl Cache {
    // == Constructor ==
    pub fn new(backend: Arc<dyn CacheBackend>, enabled: bool, default_ttl: u64) -> Self {
        Self {
            backend,
            enabled,
            default_ttl,
        }
    }

    /// Takes the enabled switch and default TTL from `config`.
    pub fn from_config(backend: Arc<dyn CacheBackend>, config: &Config) -> Self {
        Self::new(backend, config.cache_enabled, config.cache_ttl)
    }

    pub fn backend(&self) -> &Arc<dyn CacheBackend> {
        &self.backend
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    /// TTL actually written, within `1..=MAX_TTL_SECS` (Redis rejects `EX 0`).
    fn effective_ttl(&self, ttl: Option<u64>) -> u64 {
        ttl.unwrap_or(self.default_ttl).clamp(1, MAX_TTL_SECS)
    }

    // == Wrap ==
    /// Wraps `op` with read-through caching under `policy`.
    pub fn wrap<A, T, E, F, Fut>(&self, policy: CachePolicy<A>, op: F) -> Cached<A, T, F>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = std::result::Result<Option<T>, E>>,
    {
        Cached {
            cache: self.clone(),
            policy,
            op,
            _result: PhantomData,
        }
    }

    // == Read Through ==
    /// Returns the value cached under `key`, or runs `load` and caches its
    /// non-null result.
    ///
    /// Backend and decoding failures are logged and treated as a miss; errors
    /// from `load` propagate unchanged.
    pub async fn read_through<T, E, L, Fut>(
        &self,
        key: &str,
        ttl: Option<u64>,
        load: L,
    ) -> std::result::Result<Option<T>, E>
    where
        T: Serialize + DeserializeOwned,
        L: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<Option<T>, E>>,
    {
        if !self.enabled {
            return load().await;
        }

        match self.lookup::<T>(key).await {
            Ok(Some(value)) => {
                debug!("Cache hit: {}", key);
                return Ok(Some(value));
            }
            Ok(None) => {}
            Err(err) => {
                error!("Cache error on {}: {}", key, err);
                return load().await;
            }
        }

        let result = load().await?;

        if let Some(value) = &result {
            match self.store(key, value, ttl).await {
                Ok(()) => debug!("Cache set: {}", key),
                Err(err) => error!("Cache error on {}: {}", key, err),
            }
        }

        Ok(result)
    }

    async fn lookup<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.backend.get(key).await? {
            Some(raw) => Ok(Some(codec::decode(&raw)?)),
            None => Ok(None),
        }
    }

    async fn store<T: Serialize>(&self, key: &str, value: &T, ttl: Option<u64>) -> Result<()> {
        let raw = codec::encode(value)?;
        self.backend.set(key, &raw, self.effective_ttl(ttl)).await
    }
}

impl fmt::Debug for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("backend", &self.backend.name())
            .field("enabled", &self.enabled)
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

// == Cached ==
/// A read operation wrapped with read-through caching.
///
/// Concurrent misses on the same key each run the operation; whichever
/// finishes last wins the cache slot.
pub struct Cached<A, T, F> {
    cache: Cache,
    policy: CachePolicy<A>,
    op: F,
    _result: PhantomData<fn() -> T>,
}

impl<A, T, F> Cached<A, T, F>
where
    A: CacheArgs,
    T: Serialize + DeserializeOwned,
{
    // == Call ==
    /// Runs the wrapped operation through the cache.
    pub async fn call<E, Fut>(&self, args: A) -> std::result::Result<Option<T>, E>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = std::result::Result<Option<T>, E>>,
    {
        if !self.cache.is_enabled() || !self.policy.applies_to(&args) {
            return (self.op)(args).await;
        }

        let key = self.policy.key_for(&args);
        self.cache
            .read_through(&key, self.policy.ttl_secs(), move || (self.op)(args))
            .await
    }

    /// Deletes the entry this wrapper would use for `args`.
    pub async fn invalidate(&self, args: &A) {
        let key = self.policy.key_for(args);
        self.cache.delete_key(&key).await;
    }

    /// Deletes every entry matching `pattern`.
    pub async fn invalidate_pattern(&self, pattern: &str) {
        self.cache.invalidate_pattern(pattern).await;
    }

    pub fn policy(&self) -> &CachePolicy<A> {
        &self.policy
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }
}
