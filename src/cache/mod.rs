//! Cache Module
//!
//! Provides a bounded in-memory cache with lazy TTL expiry and FIFO eviction.

mod clock;
mod entry;
mod order;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use order::InsertionOrder;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::Cache;
