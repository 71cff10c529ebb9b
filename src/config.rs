//! Configuration Module
//!
//! Cache construction options and environment-driven configuration.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Default TTL in milliseconds when `CACHE_TTL_MS` is not set
pub const DEFAULT_TTL_MS: u64 = 60_000;

/// Default capacity when `CACHE_MAX_SIZE` is not set
pub const DEFAULT_MAX_SIZE: usize = 1000;

// == Cache Options ==
/// Immutable settings fixed when a cache is constructed.
///
/// A `max_size` of 0 yields a cache that never retains anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheOptions {
    /// Duration added to "now" to compute each entry's expiry
    pub ttl: Duration,
    /// Capacity ceiling checked before every insert
    pub max_size: usize,
}

impl CacheOptions {
    /// Creates options from a TTL and a capacity.
    pub fn new(ttl: Duration, max_size: usize) -> Self {
        Self { ttl, max_size }
    }

    /// Creates options from a TTL in milliseconds and a capacity.
    pub fn from_millis(ttl_ms: u64, max_size: usize) -> Self {
        Self::new(Duration::from_millis(ttl_ms), max_size)
    }

    /// Creates options from signed inputs, validating them up front.
    ///
    /// A negative TTL is rejected. A negative `max_size` is clamped to 0, the
    /// never-retain configuration.
    pub fn from_signed(ttl_ms: i64, max_size: i64) -> Result<Self> {
        Self::from_wide(i128::from(ttl_ms), i128::from(max_size))
    }

    /// Shared validation for signed inputs of any width.
    ///
    /// A TTL above `u64::MAX` milliseconds is rejected, a capacity above
    /// `usize::MAX` saturates.
    fn from_wide(ttl_ms: i128, max_size: i128) -> Result<Self> {
        if ttl_ms < 0 {
            return Err(CacheError::InvalidConfig(format!(
                "ttl must not be negative, got {}ms",
                ttl_ms
            )));
        }
        let ttl_ms = u64::try_from(ttl_ms).map_err(|_| {
            CacheError::InvalidConfig(format!(
                "ttl must be at most {}ms, got {}ms",
                u64::MAX,
                ttl_ms
            ))
        })?;
        let max_size = usize::try_from(max_size.max(0)).unwrap_or(usize::MAX);

        Ok(Self::from_millis(ttl_ms, max_size))
    }
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self::from_millis(DEFAULT_TTL_MS, DEFAULT_MAX_SIZE)
    }
}

// == Config ==
/// Process configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Entry TTL in milliseconds
    pub ttl_ms: u64,
    /// Maximum number of entries the cache can hold
    pub max_size: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_MS` - Entry TTL in milliseconds (default: 60000)
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 1000)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable source.
    ///
    /// Missing variables fall back to defaults; present values must parse as
    /// integers and pass the same checks as [`CacheOptions::from_signed`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ttl_ms = parse_var(&lookup, "CACHE_TTL_MS")?.unwrap_or(i128::from(DEFAULT_TTL_MS));
        let max_size = parse_var(&lookup, "CACHE_MAX_SIZE")?.unwrap_or(DEFAULT_MAX_SIZE as i128);

        let options = CacheOptions::from_wide(ttl_ms, max_size)?;
        Ok(Self {
            ttl_ms: u64::try_from(options.ttl.as_millis()).unwrap_or(u64::MAX),
            max_size: options.max_size,
        })
    }

    /// Returns the cache options described by this configuration.
    pub fn cache_options(&self) -> CacheOptions {
        CacheOptions::from_millis(self.ttl_ms, self.max_size)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_TTL_MS,
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

fn parse_var<F>(lookup: &F, name: &str) -> Result<Option<i128>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<i128>().map(Some).map_err(|_| {
            CacheError::InvalidConfig(format!("{} must be an integer, got {:?}", name, raw))
        }),
    }
}
