//! LRU (Least Recently Used) ordering core
//!
//! Slot arena holding a doubly-linked list, plus a hash index from key to
//! slot. Promotion, insertion and eviction are all O(1) splices.
//!
//! Not synchronized: [`LruCache`](crate::LruCache) owns one of these behind
//! its lock.

use std::collections::HashMap;
use std::hash::Hash;
use ahash::RandomState;

use crate::error::{Error, Result};

/// Node in the LRU doubly-linked list
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// What an insert did to the resident set
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Outcome<K, V> {
    /// New key, room was available
    Inserted,
    /// Existing key, stale node discarded
    Replaced,
    /// New key at capacity; the former tail is handed back
    Evicted(K, V),
}

/// Index + recency list with fixed capacity
pub(crate) struct LruCore<K, V> {
    map: HashMap<K, usize, RandomState>,
    nodes: Vec<Option<Node<K, V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    capacity: usize,
}

impl<K, V> LruCore<K, V> {
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V> LruCore<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create an empty core. Capacity is validated by the caller.
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "capacity must be validated before construction");

        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
            capacity,
        }
    }

    /// Insert `key` at the head, replacing or evicting as needed.
    ///
    /// A resident key is replaced by a fresh node and never causes an
    /// eviction. A novel key at capacity evicts the tail first.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Outcome<K, V> {
        let outcome = if let Some(idx) = self.map.remove(&key) {
            self.unlink(idx);
            self.release(idx);
            Outcome::Replaced
        } else if self.map.len() >= self.capacity {
            match self.pop_back() {
                Some((evicted_key, evicted_value)) => Outcome::Evicted(evicted_key, evicted_value),
                None => Outcome::Inserted,
            }
        } else {
            Outcome::Inserted
        };

        let idx = self.alloc_node();
        self.nodes[idx] = Some(Node {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.push_front(idx);
        self.map.insert(key, idx);

        outcome
    }

    /// Look up `key` and promote it to most recently used
    pub(crate) fn get(&mut self, key: &K) -> Option<&V> {
        let idx = *self.map.get(key)?;
        self.move_to_front(idx);
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    /// Look up `key` without touching recency
    pub(crate) fn peek(&self, key: &K) -> Option<&V> {
        let idx = *self.map.get(key)?;
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    pub(crate) fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Iterate entries from most to least recently used
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
            remaining: self.map.len(),
        }
    }

    /// Walk list and index and report the first inconsistency found
    pub(crate) fn check_invariants(&self) -> Result<()> {
        if self.map.len() > self.capacity {
            return Err(Error::InvariantViolation(format!(
                "{} resident entries exceed capacity {}",
                self.map.len(),
                self.capacity
            )));
        }
        if self.nodes.len() > self.capacity {
            return Err(Error::InvariantViolation(format!(
                "arena grew to {} slots with capacity {}",
                self.nodes.len(),
                self.capacity
            )));
        }
        if self.free_list.len() + self.map.len() != self.nodes.len() {
            return Err(Error::InvariantViolation(format!(
                "{} free + {} live slots != {} arena slots",
                self.free_list.len(),
                self.map.len(),
                self.nodes.len()
            )));
        }

        let mut walked = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            if walked >= self.map.len() {
                return Err(Error::InvariantViolation(format!(
                    "list is longer than the index ({} entries)",
                    self.map.len()
                )));
            }
            let node = self.nodes[idx].as_ref().ok_or_else(|| {
                Error::InvariantViolation(format!("list links to empty slot {}", idx))
            })?;
            if node.prev != prev {
                return Err(Error::InvariantViolation(format!(
                    "slot {} has prev {:?}, expected {:?}",
                    idx, node.prev, prev
                )));
            }
            if self.map.get(&node.key) != Some(&idx) {
                return Err(Error::InvariantViolation(format!(
                    "index does not point back at slot {}",
                    idx
                )));
            }
            walked += 1;
            prev = Some(idx);
            cursor = node.next;
        }

        if walked != self.map.len() {
            return Err(Error::InvariantViolation(format!(
                "list holds {} entries, index holds {}",
                walked,
                self.map.len()
            )));
        }
        if self.tail != prev {
            return Err(Error::InvariantViolation(format!(
                "tail is {:?}, last list node is {:?}",
                self.tail, prev
            )));
        }

        Ok(())
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return; // Already at front
        }

        self.unlink(idx);
        self.push_front(idx);
    }

    fn push_front(&mut self, idx: usize) {
        if let Some(node) = &mut self.nodes[idx] {
            node.prev = None;
            node.next = self.head;
        }

        if let Some(head_idx) = self.head {
            if let Some(head) = &mut self.nodes[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = if let Some(node) = &self.nodes[idx] {
            (node.prev, node.next)
        } else {
            return;
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }

    fn pop_back(&mut self) -> Option<(K, V)> {
        let tail_idx = self.tail?;
        self.unlink(tail_idx);
        let node = self.release(tail_idx)?;
        self.map.remove(&node.key);
        Some((node.key, node.value))
    }

    fn alloc_node(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(None);
            idx
        }
    }

    /// Empty the slot and put it on the free list. Caller unlinks first.
    fn release(&mut self, idx: usize) -> Option<Node<K, V>> {
        let node = self.nodes[idx].take();
        if node.is_some() {
            self.free_list.push(idx);
        }
        node
    }
}

/// Borrowing iterator over entries, most recently used first
pub(crate) struct Iter<'a, K, V> {
    nodes: &'a [Option<Node<K, V>>],
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes[self.cursor?].as_ref()?;
        self.cursor = node.next;
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
