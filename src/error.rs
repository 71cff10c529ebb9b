//! Error types for the cache crate
//!
//! Cache operations themselves never fail; errors only surface while building a
//! configuration or parsing shell input.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Configuration value rejected at construction time
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Shell input that does not parse into a command
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache crate.
pub type Result<T> = std::result::Result<T, CacheError>;
