//! Shared Cache Module
//!
//! A cloneable handle that puts one coarse lock around a [`Cache`].

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::cache::{Cache, CacheStats, Clock, SystemClock};
use crate::config::CacheOptions;

// == Shared Cache ==
/// Thread-safe handle to a single cache instance.
///
/// Every operation takes the lock for its whole duration, so sweeps and
/// evictions never interleave with another caller. Clones point at the same
/// store.
#[derive(Debug)]
pub struct SharedCache<T, C = SystemClock> {
    inner: Arc<Mutex<Cache<T, C>>>,
}

impl<T, C> Clone for SharedCache<T, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> SharedCache<T, SystemClock> {
    // == Constructor ==
    /// Creates a shared cache driven by the system clock.
    pub fn new(options: CacheOptions) -> Self {
        Self::from_cache(Cache::new(options))
    }
}

impl<T, C: Clock> SharedCache<T, C> {
    /// Creates a shared cache driven by a custom clock.
    pub fn with_clock(options: CacheOptions, clock: C) -> Self {
        Self::from_cache(Cache::with_clock(options, clock))
    }

    /// Wraps an existing cache.
    pub fn from_cache(cache: Cache<T, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    // == Set ==
    /// Stores `value` under `key`. See [`Cache::set`].
    pub fn set(&self, key: impl Into<String>, value: T) {
        self.inner.lock().set(key, value);
    }

    // == Has ==
    /// Returns true if `key` holds a live entry. See [`Cache::has`].
    pub fn has(&self, key: &str) -> bool {
        self.inner.lock().has(key)
    }

    // == Delete ==
    /// Removes an entry without checking expiry. See [`Cache::delete`].
    pub fn delete(&self, key: &str) -> bool {
        self.inner.lock().delete(key)
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    // == Size ==
    /// Sweeps expired entries, then returns the live count.
    pub fn size(&self) -> usize {
        self.inner.lock().size()
    }

    // == TTL ==
    /// Returns the time left before `key` expires. See [`Cache::ttl`].
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        self.inner.lock().ttl(key)
    }

    // == Purge Expired ==
    /// Removes all expired entries, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.inner.lock().purge_expired()
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Returns the options the cache was built with.
    pub fn options(&self) -> CacheOptions {
        *self.inner.lock().options()
    }
}

impl<T: Clone, C: Clock> SharedCache<T, C> {
    // == Get ==
    /// Retrieves a clone of the live value under `key`. See [`Cache::get`].
    pub fn get(&self, key: &str) -> Option<T> {
        self.inner.lock().get(key)
    }
}
