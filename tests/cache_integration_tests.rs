//! Integration Tests for the public cache API
//!
//! Exercises the crate the way a downstream user would, with the real clock.

use bounded_cache::cache::ManualClock;
use bounded_cache::{Cache, CacheError, CacheOptions, Config, SharedCache};
use std::thread::{self, sleep};
use std::time::Duration;

// == Helper Functions ==

fn create_test_cache(ttl_ms: u64, max_size: usize) -> Cache<String> {
    Cache::new(CacheOptions::from_millis(ttl_ms, max_size))
}

// == Core Operations ==

#[test]
fn test_set_get_has_delete_roundtrip() {
    let mut cache = create_test_cache(60_000, 10);

    cache.set("session:42", "token-abc".to_string());
    assert_eq!(cache.get("session:42"), Some("token-abc".to_string()));
    assert!(cache.has("session:42"));

    assert!(cache.delete("session:42"));
    assert!(!cache.has("session:42"));
    assert!(!cache.delete("session:42"));
}

#[test]
fn test_eviction_order_is_insertion_order() {
    let mut cache = Cache::new(CacheOptions::from_millis(60_000, 2));

    cache.set("a", 1);
    cache.set("b", 2);
    cache.set("c", 3);

    assert_eq!(cache.get("a"), None);
    assert_eq!(cache.get("b"), Some(2));
    assert_eq!(cache.get("c"), Some(3));
}

#[test]
fn test_clear_removes_everything() {
    let mut cache = create_test_cache(60_000, 10);
    let keys = ["x", "y", "z"];

    for key in keys {
        cache.set(key, key.to_uppercase());
    }
    cache.clear();

    assert_eq!(cache.size(), 0);
    for key in keys {
        assert!(!cache.has(key));
    }
}

#[test]
fn test_size_never_exceeds_capacity() {
    let mut cache = Cache::new(CacheOptions::from_millis(60_000, 5));

    for i in 0..50 {
        cache.set(format!("key{}", i), i);
        assert!(cache.size() <= 5);
    }
    assert_eq!(cache.stats().evictions, 45);
}

// == Expiry With The Real Clock ==

#[test]
fn test_ttl_expiration_real_clock() {
    let mut cache = create_test_cache(100, 10);

    cache.set("short", "lived".to_string());
    assert!(cache.has("short"));

    sleep(Duration::from_millis(150));

    assert_eq!(cache.get("short"), None);
    assert_eq!(cache.size(), 0);
}

#[test]
fn test_zero_ttl_real_clock() {
    let mut cache = create_test_cache(0, 10);

    cache.set("gone", "soon".to_string());
    sleep(Duration::from_millis(5));

    assert!(!cache.has("gone"));
}

#[test]
fn test_manual_clock_through_public_api() {
    let clock = ManualClock::new();
    let mut cache = Cache::with_clock(CacheOptions::from_millis(1_000, 10), clock.clone());

    cache.set("k", 1u8);
    clock.advance(Duration::from_millis(999));
    assert_eq!(cache.get("k"), Some(1));

    clock.advance(Duration::from_millis(2));
    assert_eq!(cache.get("k"), None);
}

// == Degenerate Configuration ==

#[test]
fn test_zero_capacity_cache_holds_nothing() {
    let options = CacheOptions::from_signed(1_000, -4).unwrap();
    let mut cache = Cache::new(options);

    cache.set("a", 1);
    assert_eq!(cache.size(), 0);
    assert_eq!(cache.get("a"), None);
}

#[test]
fn test_negative_ttl_rejected_at_construction() {
    let result = CacheOptions::from_signed(-1, 10);
    assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
}

#[test]
fn test_config_drives_cache_options() {
    let config = Config::from_lookup(|name| match name {
        "CACHE_TTL_MS" => Some("500".to_string()),
        "CACHE_MAX_SIZE" => Some("3".to_string()),
        _ => None,
    })
    .unwrap();

    let cache: Cache<u32> = Cache::new(config.cache_options());
    assert_eq!(cache.options().ttl, Duration::from_millis(500));
    assert_eq!(cache.options().max_size, 3);
}

// == Shared Access ==

#[test]
fn test_shared_cache_across_threads() {
    let cache = SharedCache::new(CacheOptions::from_millis(60_000, 100));

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let cache = cache.clone();
            thread::spawn(move || {
                for i in 0..25 {
                    cache.set(format!("{}:{}", worker, i), i);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.size(), 100);
    assert_eq!(cache.get("3:24"), Some(24));
    assert_eq!(cache.stats().evictions, 0);
}
