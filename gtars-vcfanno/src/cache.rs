//! Bounded memo for annotation results.
//!
//! Entries are kept in an [`IndexMap`], whose iteration order is the order the
//! cache maintains: oldest entry first. With [`EvictionPolicy::Fifo`] that order is
//! insertion order and reads never change it; with [`EvictionPolicy::Lru`] a hit
//! moves the entry to the back.

use std::hash::Hash;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::consts::DEFAULT_CACHE_CAPACITY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionPolicy {
    /// Evict the oldest-inserted entry, regardless of reads.
    #[default]
    Fifo,
    /// Evict the least recently read or written entry.
    Lru,
}

/// Statistics for cache usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Number of entries currently held.
    pub size: usize,
    pub capacity: usize,
}

impl CacheStats {
    pub fn total(&self) -> u64 {
        self.hits + self.misses
    }
}

///
/// A map holding fewer than `capacity` entries.
///
/// After a new key is inserted, the oldest entry is evicted if the map has reached
/// `capacity`, so at most `capacity - 1` entries survive an insertion. Replacing the
/// value of a key already present never evicts.
///
#[derive(Debug, Clone)]
pub struct BoundedCache<K, V> {
    entries: IndexMap<K, V>,
    capacity: usize,
    policy: EvictionPolicy,
    evictions: u64,
}

impl<K: Hash + Eq, V> BoundedCache<K, V> {
    pub fn new(capacity: usize) -> Self {
        BoundedCache::with_policy(capacity, EvictionPolicy::Fifo)
    }

    pub fn with_policy(capacity: usize, policy: EvictionPolicy) -> Self {
        BoundedCache {
            entries: IndexMap::with_capacity(capacity),
            capacity,
            policy,
            evictions: 0,
        }
    }

    pub fn get(&mut self, key: &K) -> Option<&V> {
        match self.policy {
            EvictionPolicy::Fifo => self.entries.get(key),
            EvictionPolicy::Lru => {
                let idx = self.entries.get_index_of(key)?;
                let newest = self.touch(idx);
                self.entries.get_index(newest).map(|(_, value)| value)
            }
        }
    }

    pub fn put(&mut self, key: K, value: V) {
        if let Some(idx) = self.entries.get_index_of(&key) {
            self.entries[idx] = value;
            if self.policy == EvictionPolicy::Lru {
                self.touch(idx);
            }
            return;
        }

        self.entries.insert(key, value);
        if self.entries.len() >= self.capacity {
            self.entries.shift_remove_index(0);
            self.evictions += 1;
        }
    }

    /// Membership test that never changes eviction order.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Move the entry at `idx` to the newest position and return that position.
    fn touch(&mut self, idx: usize) -> usize {
        let newest = self.entries.len() - 1;
        self.entries.move_index(idx, newest);
        newest
    }
}

impl<K: Hash + Eq, V> Default for BoundedCache<K, V> {
    fn default() -> Self {
        BoundedCache::new(DEFAULT_CACHE_CAPACITY)
    }
}
