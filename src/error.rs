//! Error types for the eviction cache
//!
//! Provides unified error handling using thiserror. Only construction and
//! configuration can fail; `insert` and `lookup` never return errors.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the eviction cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Capacity must be at least one entry
    #[error("Invalid capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    /// Configuration could not be parsed
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::InvalidConfig(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the eviction cache.
pub type Result<T> = std::result::Result<T, CacheError>;
