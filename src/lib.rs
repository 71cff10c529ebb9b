//! Bounded Cache - A bounded in-memory key-value cache
//!
//! Entries expire lazily after a fixed TTL and the oldest insertion is evicted
//! first when the cache is full. No background task is involved.

pub mod cache;
pub mod config;
pub mod error;
pub mod repl;

pub use cache::{Cache, CacheStats, SharedCache};
pub use config::{CacheOptions, Config};
pub use error::{CacheError, Result};
