//! Eviction notifications
//!
//! Listeners are plain callbacks kept in registration order and invoked
//! synchronously by the cache while it still holds its lock.

use parking_lot::RwLock;

/// An entry that was pushed out of the cache to make room for a new key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evicted<K, V> {
    key: K,
    value: V,
}

impl<K, V> Evicted<K, V> {
    pub(crate) fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Key of the evicted entry
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Value the key held when it was evicted
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Take ownership of the key and value
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// Callback invoked for every eviction
pub type Listener<K, V> = dyn Fn(&Evicted<K, V>) + Send + Sync;

/// Handle returned when registering a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Ordered set of registered listeners
pub(crate) struct Listeners<K, V> {
    entries: RwLock<Vec<(ListenerId, Box<Listener<K, V>>)>>,
}

impl<K, V> Listeners<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    pub(crate) fn subscribe(&self, listener: Box<Listener<K, V>>) -> ListenerId {
        let mut entries = self.entries.write();
        let id = ListenerId(entries.last().map_or(0, |(last, _)| last.0 + 1));
        entries.push((id, listener));
        id
    }

    /// Call every listener in registration order
    pub(crate) fn broadcast(&self, event: &Evicted<K, V>) {
        for (_, listener) in self.entries.read().iter() {
            listener(event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_broadcast_in_registration_order() {
        let listeners: Listeners<u32, &str> = Listeners::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let seen = seen.clone();
            listeners.subscribe(Box::new(move |event: &Evicted<u32, &str>| {
                seen.lock().unwrap().push((tag, *event.key()));
            }));
        }

        listeners.broadcast(&Evicted::new(7, "seven"));

        assert_eq!(
            *seen.lock().unwrap(),
            vec![("first", 7), ("second", 7), ("third", 7)]
        );
    }

    #[test]
    fn test_ids_are_distinct() {
        let listeners: Listeners<u32, u32> = Listeners::new();

        let a = listeners.subscribe(Box::new(|_: &Evicted<u32, u32>| {}));
        let b = listeners.subscribe(Box::new(|_: &Evicted<u32, u32>| {}));

        assert_ne!(a, b);
        assert_eq!(listeners.len(), 2);
    }

    #[test]
    fn test_into_parts() {
        let event = Evicted::new("k", 1);
        assert_eq!(event.key(), &"k");
        assert_eq!(event.into_parts(), ("k", 1));
    }
}
