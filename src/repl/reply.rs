//! Shell replies
//!
//! Every command produces one [`Reply`], written out as a single JSON line.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::error::CacheError;

/// Result of executing one shell command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum Reply {
    /// Answer to `GET`; `value` is null when the key is absent
    Value { key: String, value: Option<String> },
    /// Answer to `SET`
    Stored { key: String },
    /// Answer to `HAS`
    Exists { key: String, exists: bool },
    /// Answer to `DEL`
    Deleted { key: String, deleted: bool },
    /// Answer to `TTL`; `ttl_ms` is null when the key is absent
    Ttl { key: String, ttl_ms: Option<u64> },
    /// Answer to `CLEAR`
    Cleared,
    /// Answer to `SIZE`
    Size { size: usize },
    /// Answer to `STATS`
    Stats {
        hits: u64,
        misses: u64,
        evictions: u64,
        expirations: u64,
        total_entries: usize,
        hit_rate: f64,
    },
    /// Answer to `PURGE`
    Purged { removed: usize },
    /// Answer to `QUIT`
    Bye,
    /// Input that could not be executed
    Error { error: String },
}

impl Reply {
    /// Builds a stats reply from a snapshot.
    pub fn from_stats(stats: &CacheStats) -> Self {
        Reply::Stats {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
        }
    }

    /// True when the shell should stop after writing this reply.
    pub fn is_closing(&self) -> bool {
        matches!(self, Reply::Bye)
    }

    /// Renders the reply as one line of JSON, without the trailing newline.
    pub fn to_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            serde_json::json!({ "reply": "error", "error": err.to_string() }).to_string()
        })
    }
}

impl From<CacheError> for Reply {
    fn from(err: CacheError) -> Self {
        Reply::Error {
            error: err.to_string(),
        }
    }
}
