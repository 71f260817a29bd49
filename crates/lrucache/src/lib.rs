//! # lrucache
//!
//! Fixed-capacity, thread-safe LRU cache with eviction notifications.
//!
//! ## Architecture
//! - **HashMap**: AHash index from key to arena slot (O(1))
//! - **LRU List**: Doubly-linked list threaded through a slot arena (O(1)
//!   promotion and eviction)
//! - **Lock**: one `parking_lot::Mutex` around each operation
//! - **Listeners**: callbacks fired synchronously for every evicted entry
//!
//! ```
//! use lrucache::LruCache;
//!
//! let cache = LruCache::new(3).unwrap();
//! cache.add("key1", 1);
//! assert_eq!(cache.get(&"key1").unwrap(), 1);
//! assert!(cache.get(&"missing").unwrap_err().is_not_found());
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod event;
mod lru;
mod stats;
mod traits;

pub use cache::LruCache;
pub use config::CacheConfig;
pub use error::{Error, Result};
pub use event::{Evicted, Listener, ListenerId};
pub use stats::CacheStats;
pub use traits::Cache;
