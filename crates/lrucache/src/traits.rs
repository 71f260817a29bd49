//! Caller-facing cache abstraction
//!
//! Lets a host hold `Arc<dyn Cache<K, V>>` without naming the eviction policy.

use crate::error::Result;
use crate::event::{Listener, ListenerId};

/// A bounded, thread-safe key/value cache with eviction notifications
pub trait Cache<K, V>: Send + Sync {
    /// Insert or replace `key`, evicting if the cache is full
    fn add(&self, key: K, value: V);

    /// Return the value for `key`, or `KeyNotFound`
    fn get(&self, key: &K) -> Result<V>;

    /// Number of resident entries
    fn len(&self) -> usize;

    /// True when nothing is resident
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register a callback for evicted entries
    fn on_evicted(&self, listener: Box<Listener<K, V>>) -> ListenerId;
}
