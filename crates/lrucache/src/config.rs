//! Cache configuration
//!
//! ```
//! use lrucache::{CacheConfig, LruCache};
//!
//! let cache: LruCache<u64, String> = CacheConfig::new(1_000)
//!     .name("sessions")
//!     .build()
//!     .unwrap();
//! assert_eq!(cache.capacity(), 1_000);
//! ```

use std::fmt::Debug;
use std::hash::Hash;

use crate::cache::LruCache;
use crate::error::{Error, Result};

const DEFAULT_NAME: &str = "lru";

/// Settings for building an [`LruCache`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub(crate) capacity: usize,
    pub(crate) name: String,
}

impl CacheConfig {
    /// Configuration for a cache holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            name: DEFAULT_NAME.to_string(),
        }
    }

    /// Label attached to this cache's log output
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Maximum number of resident entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Reject settings no cache can operate with
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidConfiguration(
                "capacity must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate and construct the cache
    pub fn build<K, V>(self) -> Result<LruCache<K, V>>
    where
        K: Hash + Eq + Clone + Debug,
        V: Clone,
    {
        LruCache::with_config(self)
    }
}
