//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with FIFO eviction and lazy TTL expiry.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::cache::{CacheEntry, CacheStats, Clock, InsertionOrder, SystemClock};
use crate::config::CacheOptions;

/// Stale order slots tolerated beyond the live entry count before compaction
const ORDER_SLACK: usize = 32;

// == Cache ==
/// Bounded key-value cache with lazy TTL expiry and oldest-first eviction.
///
/// There is no background task: `get`, `has`, `set` and `size` sweep every
/// expired entry out of the store before doing their own work. When a `set`
/// finds the store full, the entry that was inserted longest ago is evicted;
/// reads never change eviction order.
///
/// # Example
/// ```
/// use bounded_cache::{Cache, CacheOptions};
///
/// let mut cache = Cache::new(CacheOptions::from_millis(60_000, 2));
/// cache.set("a", 1);
/// cache.set("b", 2);
/// cache.set("c", 3);
///
/// assert_eq!(cache.get("a"), None);
/// assert_eq!(cache.get("b"), Some(2));
/// assert_eq!(cache.size(), 2);
/// ```
#[derive(Debug)]
pub struct Cache<T, C = SystemClock> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Insertion order for eviction
    order: InsertionOrder,
    /// Performance statistics
    stats: CacheStats,
    /// TTL and capacity, fixed at construction
    options: CacheOptions,
    /// Time source for expiry decisions
    clock: C,
}

impl<T> Cache<T, SystemClock> {
    // == Constructor ==
    /// Creates a new cache driven by the system clock.
    pub fn new(options: CacheOptions) -> Self {
        Self::with_clock(options, SystemClock)
    }
}

impl<T, C: Clock> Cache<T, C> {
    /// Creates a new cache driven by a custom clock.
    pub fn with_clock(options: CacheOptions, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(),
            options,
            clock,
        }
    }

    /// Returns the options this cache was built with.
    pub fn options(&self) -> &CacheOptions {
        &self.options
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// Expired entries are swept first. If the store is still at or above
    /// capacity, exactly one entry (the oldest insertion) is evicted, even when
    /// `key` itself is already present. The new entry expires `ttl` from now
    /// and becomes the newest in eviction order.
    ///
    /// With a capacity of 0 the value is dropped.
    pub fn set(&mut self, key: impl Into<String>, value: T) {
        let key = key.into();
        let now = self.clock.now();
        self.sweep(now);

        if self.options.max_size == 0 {
            debug!(key = %key, "Cache has zero capacity, value not retained");
            return;
        }

        if self.entries.len() >= self.options.max_size {
            self.evict_oldest();
        }

        let seq = self.order.push(&key);
        self.entries
            .insert(key, CacheEntry::new(value, now, self.options.ttl, seq));

        self.compact_order();
        self.stats.set_total_entries(self.entries.len());
    }

    // == Has ==
    /// Returns true if `key` holds a live entry.
    ///
    /// Same side effects as [`Cache::get`], without cloning the value.
    pub fn has(&mut self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    // == Delete ==
    /// Removes an entry by key without checking expiry.
    ///
    /// Returns true if an entry (expired or not) was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.compact_order();
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.stats.set_total_entries(0);
    }

    // == Size ==
    /// Sweeps expired entries, then returns the number of live entries.
    pub fn size(&mut self) -> usize {
        let now = self.clock.now();
        self.sweep(now);
        self.entries.len()
    }

    // == TTL ==
    /// Returns the time left before `key` expires, or None if it is not live.
    ///
    /// Sweeps like [`Cache::get`] but leaves the hit/miss counters alone. An
    /// entry whose expiry overflowed the clock reports `Duration::MAX`.
    pub fn ttl(&mut self, key: &str) -> Option<Duration> {
        let now = self.clock.now();
        self.sweep(now);
        self.entries
            .get(key)
            .map(|entry| entry.ttl_remaining(now).unwrap_or(Duration::MAX))
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        self.sweep(now)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Sweeps the store, then resolves `key` to its live value.
    fn lookup(&mut self, key: &str) -> Option<&T> {
        let now = self.clock.now();
        self.sweep(now);

        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired_at(now),
            None => {
                trace!(key = %key, "Cache miss");
                self.stats.record_miss();
                return None;
            }
        };

        // The sweep above already ran against `now`; this only guards against
        // a future change that skips it.
        if expired {
            self.entries.remove(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            self.stats.set_total_entries(self.entries.len());
            return None;
        }

        trace!(key = %key, "Cache hit");
        self.stats.record_hit();
        self.entries.get(key).map(|entry| &entry.value)
    }

    /// Drops every entry that expired before `now`.
    fn sweep(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - self.entries.len();

        if removed > 0 {
            debug!(removed, "Swept expired cache entries");
            self.stats.record_expirations(removed as u64);
            self.stats.set_total_entries(self.entries.len());
            self.compact_order();
        }
        removed
    }

    /// Evicts the oldest live entry, skipping stale order slots.
    fn evict_oldest(&mut self) -> Option<String> {
        while let Some((seq, key)) = self.order.pop_oldest() {
            let live = self
                .entries
                .get(&key)
                .is_some_and(|entry| entry.seq == seq);

            if live {
                self.entries.remove(&key);
                self.stats.record_eviction();
                debug!(key = %key, "Evicted oldest cache entry");
                return Some(key);
            }
        }
        None
    }

    /// Drops stale order slots once they outnumber live entries.
    fn compact_order(&mut self) {
        if self.order.len() <= self.entries.len() * 2 + ORDER_SLACK {
            return;
        }

        let entries = &self.entries;
        self.order
            .retain(|seq, key| entries.get(key).is_some_and(|entry| entry.seq == seq));
    }
}

impl<T: Clone, C: Clock> Cache<T, C> {
    // == Get ==
    /// Retrieves a clone of the value stored under `key`.
    ///
    /// Sweeps every expired entry out of the store first, then returns the
    /// value if `key` is live. Reads never change eviction order.
    pub fn get(&mut self, key: &str) -> Option<T> {
        self.lookup(key).cloned()
    }
}
