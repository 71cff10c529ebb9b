//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A stored value plus the metadata the cache needs to expire and evict it.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored value
    pub value: T,
    /// Instant after which the entry is invalid, None = `now + ttl` overflowed
    pub expires_at: Option<Instant>,
    /// Insertion sequence number, matched against the eviction order queue
    pub seq: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates an entry written at `now` that lives for `ttl`.
    pub fn new(value: T, now: Instant, ttl: Duration, seq: u64) -> Self {
        Self {
            value,
            expires_at: now.checked_add(ttl),
            seq,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired as of `now`.
    ///
    /// The comparison is strict: an entry whose expiry equals `now` is still
    /// valid, so a zero TTL entry is only visible at its own write instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => expires < now,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the time left before expiry, or None if the entry never expires.
    pub fn ttl_remaining(&self, now: Instant) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(now))
    }
}
