//! LruCache: thread-safe LRU cache with eviction notifications

use std::fmt::{self, Debug};
use std::hash::Hash;
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::config::CacheConfig;
use crate::error::{Error, Result};
use crate::event::{Evicted, Listener, ListenerId, Listeners};
use crate::lru::{LruCore, Outcome};
use crate::stats::CacheStats;
use crate::traits::Cache;

/// Fixed-capacity cache that evicts the least recently used entry when full
///
/// Every `add` and `get` runs under a single lock, so callers only ever see
/// the cache before or after an operation. Share it across threads with
/// `Arc<LruCache<K, V>>`.
///
/// ```
/// use lrucache::LruCache;
///
/// let cache: LruCache<i32, &str> = LruCache::new(2).unwrap();
/// cache.on_evicted(|event| println!("evicted {}", event.key()));
///
/// cache.add(1, "one");
/// cache.add(2, "two");
/// cache.add(3, "three"); // evicts 1
///
/// assert!(cache.get(&1).is_err());
/// assert_eq!(cache.get(&3).unwrap(), "three");
/// ```
pub struct LruCache<K, V> {
    /// Label used in log output
    name: String,

    /// Index and recency list
    core: Mutex<LruCore<K, V>>,

    /// Eviction observers
    listeners: Listeners<K, V>,

    /// Cache statistics
    stats: CacheStats,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone + Debug,
    V: Clone,
{
    /// Create a cache holding at most `capacity` entries
    ///
    /// # Returns
    /// * `Err(Error::InvalidConfiguration)` if `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_config(CacheConfig::new(capacity))
    }

    /// Create a cache from a validated configuration
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        if let Err(err) = config.validate() {
            warn!(cache = %config.name, capacity = config.capacity, "rejected cache configuration");
            return Err(err);
        }

        debug!(cache = %config.name, capacity = config.capacity, "created lru cache");

        Ok(Self {
            core: Mutex::new(LruCore::new(config.capacity)),
            name: config.name,
            listeners: Listeners::new(),
            stats: CacheStats::new(),
        })
    }

    /// Insert or replace `key` as the most recently used entry
    ///
    /// Replacing a resident key never evicts anything. Adding a new key to a
    /// full cache evicts the least recently used entry and notifies every
    /// listener before returning.
    pub fn add(&self, key: K, value: V) {
        let mut core = self.core.lock();

        match core.insert(key, value) {
            Outcome::Inserted => self.stats.record_insert(),
            Outcome::Replaced => self.stats.record_update(),
            Outcome::Evicted(evicted_key, evicted_value) => {
                self.stats.record_insert();
                self.stats.record_eviction();
                trace!(cache = %self.name, key = ?evicted_key, "evicted least recently used entry");

                // Listeners run while `core` is still locked
                self.listeners
                    .broadcast(&Evicted::new(evicted_key, evicted_value));
            }
        }
    }

    /// Return the value for `key` and mark it most recently used
    ///
    /// # Returns
    /// * `Err(Error::KeyNotFound)` if the key was never added or was evicted
    pub fn get(&self, key: &K) -> Result<V> {
        let mut core = self.core.lock();

        match core.get(key) {
            Some(value) => {
                self.stats.record_hit();
                Ok(value.clone())
            }
            None => {
                self.stats.record_miss();
                Err(Error::KeyNotFound(format!("{:?}", key)))
            }
        }
    }

    /// Return the value for `key` without changing its recency
    pub fn peek(&self, key: &K) -> Option<V> {
        self.core.lock().peek(key).cloned()
    }

    /// Check residency without changing recency
    pub fn contains(&self, key: &K) -> bool {
        self.core.lock().contains(key)
    }

    /// Number of resident entries
    pub fn len(&self) -> usize {
        self.core.lock().len()
    }

    /// True when nothing is resident
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of resident entries
    pub fn capacity(&self) -> usize {
        self.core.lock().capacity()
    }

    /// Label given at construction
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resident keys from most to least recently used
    pub fn keys_by_recency(&self) -> Vec<K> {
        self.core.lock().iter().map(|(key, _)| key.clone()).collect()
    }

    /// Register a callback for evicted entries
    ///
    /// Listeners are called in registration order, synchronously, while the
    /// cache lock is held. A slow listener stalls every other cache
    /// operation, and a listener that calls back into the same cache will
    /// deadlock.
    pub fn on_evicted<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&Evicted<K, V>) + Send + Sync + 'static,
    {
        self.listeners.subscribe(Box::new(listener))
    }

    /// Number of registered eviction listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Verify that the index and recency list agree
    pub fn check_invariants(&self) -> Result<()> {
        self.core.lock().check_invariants()
    }
}

impl<K, V> Cache<K, V> for LruCache<K, V>
where
    K: Hash + Eq + Clone + Debug + Send,
    V: Clone + Send,
{
    fn add(&self, key: K, value: V) {
        LruCache::add(self, key, value);
    }

    fn get(&self, key: &K) -> Result<V> {
        LruCache::get(self, key)
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }

    fn on_evicted(&self, listener: Box<Listener<K, V>>) -> ListenerId {
        self.listeners.subscribe(listener)
    }
}

impl<K, V> Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.core.lock();
        f.debug_struct("LruCache")
            .field("name", &self.name)
            .field("len", &core.len())
            .field("capacity", &core.capacity())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
