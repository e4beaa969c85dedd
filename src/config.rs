//! Configuration Module
//!
//! Describes how a cache is sized. Configuration is plain data: it can be built
//! in code, taken from `Default`, or parsed from a JSON document.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

/// Default number of entries a cache holds.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Cache configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of live entries the cache can hold
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl CacheConfig {
    /// Creates a config with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Parses a config from a JSON document such as `{"capacity": 64}`.
    ///
    /// Missing fields fall back to their defaults. The result is validated, so
    /// a zero capacity is rejected here rather than at cache construction.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: CacheConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the config and returns the capacity as a non-zero value.
    pub fn validate(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.capacity).ok_or(CacheError::InvalidCapacity(self.capacity))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}
