// Property tests: the cache must behave exactly like a naive recency list.

use std::sync::{Arc, Mutex};

use lrucache::LruCache;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(u8, u32),
    Get(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..12, any::<u32>()).prop_map(|(k, v)| Op::Add(k, v)),
        (0u8..12).prop_map(Op::Get),
    ]
}

/// Most recently used first
struct Model {
    capacity: usize,
    entries: Vec<(u8, u32)>,
}

impl Model {
    fn add(&mut self, key: u8, value: u32) -> Option<(u8, u32)> {
        let mut evicted = None;
        if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
            self.entries.remove(pos);
        } else if self.entries.len() >= self.capacity {
            evicted = self.entries.pop();
        }
        self.entries.insert(0, (key, value));
        evicted
    }

    fn get(&mut self, key: u8) -> Option<u32> {
        let pos = self.entries.iter().position(|(k, _)| *k == key)?;
        let entry = self.entries.remove(pos);
        self.entries.insert(0, entry);
        Some(entry.1)
    }
}

proptest! {
    #[test]
    fn prop_matches_reference_model(
        capacity in 1usize..6,
        ops in prop::collection::vec(op_strategy(), 0..200)
    ) {
        let cache: LruCache<u8, u32> = LruCache::new(capacity).unwrap();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        cache.on_evicted(move |event| {
            sink.lock().unwrap().push((*event.key(), *event.value()));
        });
        let mut model = Model { capacity, entries: Vec::new() };

        for op in ops {
            match op {
                Op::Add(key, value) => {
                    let before = events.lock().unwrap().len();
                    cache.add(key, value);
                    let fired: Vec<_> = events.lock().unwrap()[before..].to_vec();
                    let expected: Vec<_> = model.add(key, value).into_iter().collect();
                    prop_assert_eq!(fired, expected);
                }
                Op::Get(key) => {
                    prop_assert_eq!(cache.get(&key).ok(), model.get(key));
                }
            }

            prop_assert!(cache.len() <= capacity);
            prop_assert_eq!(cache.len(), model.entries.len());
            let expected_order: Vec<u8> = model.entries.iter().map(|(k, _)| *k).collect();
            prop_assert_eq!(cache.keys_by_recency(), expected_order);
            prop_assert!(cache.check_invariants().is_ok());
        }
    }

    #[test]
    fn prop_add_then_get_round_trips(
        capacity in 1usize..16,
        key in any::<u16>(),
        value in any::<u64>(),
        prefill in prop::collection::vec((any::<u16>(), any::<u64>()), 0..32)
    ) {
        let cache = LruCache::new(capacity).unwrap();
        for (k, v) in prefill {
            cache.add(k, v);
        }

        cache.add(key, value);

        prop_assert_eq!(cache.get(&key).unwrap(), value);
        prop_assert_eq!(cache.keys_by_recency()[0], key);
    }
}
