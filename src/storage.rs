//! Internal storage implementation for the cache.
//!
//! Entries live in an arena of slots addressed by [`Handle`]s. A `HashMap`
//! indexes keys to handles and the slots themselves form a doubly linked
//! recency list, most recently used at the head. Index, list and the size
//! check are guarded together by a single `RwLock` in [`Db`].

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::trace;

use crate::config::CacheConfig;
use crate::entry::{Entry, Handle};
use crate::stats::{CacheStats, StatsSnapshot};

/// Unsynchronized LRU index: key lookup plus recency list.
///
/// `map.len()` always equals the number of linked slots once a method
/// returns.
#[derive(Debug)]
pub(crate) struct Lru {
    map: HashMap<String, Handle>,
    slots: Vec<Option<Entry>>,
    free: Vec<Handle>,
    head: Option<Handle>,
    tail: Option<Handle>,
    capacity: usize,
}

impl Lru {
    pub fn new(capacity: usize) -> Self {
        // Slots are allocated lazily; a huge configured capacity must not
        // reserve memory up front.
        Self {
            map: HashMap::new(),
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Look up `key` and promote it to the head on a hit.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let handle = *self.map.get(key)?;
        self.move_to_front(handle);
        Some(self.node(handle).value.clone())
    }

    /// Insert or update `key`.
    ///
    /// Returns the key of the entry evicted to make room, if any. Updating
    /// an existing key never evicts.
    pub fn set(&mut self, key: String, value: String) -> Option<String> {
        if self.capacity == 0 {
            return None;
        }

        if let Some(&handle) = self.map.get(&key) {
            self.node_mut(handle).value = value;
            self.move_to_front(handle);
            return None;
        }

        let evicted = if self.map.len() >= self.capacity {
            self.evict_tail()
        } else {
            None
        };

        let handle = self.alloc(Entry::new(key.clone(), value));
        self.map.insert(key, handle);
        self.push_front(handle);

        evicted
    }

    /// Remove `key`. Returns `true` if it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.map.remove(key) {
            Some(handle) => {
                self.unlink(handle);
                self.release(handle);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
    }

    /// Key/value pairs from most to least recently used.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut out = Vec::with_capacity(self.map.len());
        let mut cursor = self.head;
        while let Some(handle) = cursor {
            let entry = self.node(handle);
            out.push((entry.key.clone(), entry.value.clone()));
            cursor = entry.next;
        }
        out
    }

    /// Walk the list in both directions and cross-check it against the
    /// index.
    ///
    /// Each walk is bounded by `len + 1` steps so a cycle is reported
    /// instead of looping forever.
    pub fn links_consistent(&self) -> bool {
        let len = self.map.len();

        match (self.head, self.tail) {
            (None, None) => return len == 0,
            (Some(_), Some(_)) => {}
            _ => return false,
        }

        let mut steps = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(handle) = cursor {
            let entry = match self.slots.get(handle) {
                Some(Some(entry)) => entry,
                _ => return false,
            };
            if entry.prev != prev || self.map.get(&entry.key) != Some(&handle) {
                return false;
            }
            steps += 1;
            if steps > len {
                return false;
            }
            prev = cursor;
            cursor = entry.next;
        }
        if steps != len || prev != self.tail {
            return false;
        }

        let mut steps = 0;
        let mut next = None;
        let mut cursor = self.tail;
        while let Some(handle) = cursor {
            let entry = match self.slots.get(handle) {
                Some(Some(entry)) => entry,
                _ => return false,
            };
            if entry.next != next {
                return false;
            }
            steps += 1;
            if steps > len {
                return false;
            }
            next = cursor;
            cursor = entry.prev;
        }

        steps == len && next == self.head
    }

    // List surgery

    fn move_to_front(&mut self, handle: Handle) {
        if self.head == Some(handle) {
            return;
        }
        self.unlink(handle);
        self.push_front(handle);
    }

    fn push_front(&mut self, handle: Handle) {
        let old_head = self.head;
        {
            let entry = self.node_mut(handle);
            entry.prev = None;
            entry.next = old_head;
        }
        match old_head {
            Some(old) => self.node_mut(old).prev = Some(handle),
            None => self.tail = Some(handle),
        }
        self.head = Some(handle);
    }

    fn unlink(&mut self, handle: Handle) {
        let (prev, next) = {
            let entry = self.node(handle);
            (entry.prev, entry.next)
        };

        let is_head = self.head == Some(handle);
        let is_tail = self.tail == Some(handle);

        if self.head.is_none() {
            return;
        } else if is_head && is_tail {
            self.head = None;
            self.tail = None;
        } else if is_head {
            self.head = next;
            if let Some(next) = next {
                self.node_mut(next).prev = None;
            }
        } else if is_tail {
            self.tail = prev;
            if let Some(prev) = prev {
                self.node_mut(prev).next = None;
            }
        } else {
            if let Some(prev) = prev {
                self.node_mut(prev).next = next;
            }
            if let Some(next) = next {
                self.node_mut(next).prev = prev;
            }
        }

        self.node_mut(handle).detach();
    }

    fn evict_tail(&mut self) -> Option<String> {
        let tail = self.tail?;
        self.unlink(tail);
        let entry = self.release(tail);
        self.map.remove(&entry.key);
        Some(entry.key)
    }

    // Arena

    fn alloc(&mut self, entry: Entry) -> Handle {
        match self.free.pop() {
            Some(handle) => {
                self.slots[handle] = Some(entry);
                handle
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, handle: Handle) -> Entry {
        match self.slots.get_mut(handle).and_then(|slot| slot.take()) {
            Some(entry) => {
                self.free.push(handle);
                entry
            }
            None => unreachable!("released a free slot: {handle}"),
        }
    }

    fn node(&self, handle: Handle) -> &Entry {
        match self.slots.get(handle) {
            Some(Some(entry)) => entry,
            _ => unreachable!("dangling handle: {handle}"),
        }
    }

    fn node_mut(&mut self, handle: Handle) -> &mut Entry {
        match self.slots.get_mut(handle) {
            Some(Some(entry)) => entry,
            _ => unreachable!("dangling handle: {handle}"),
        }
    }
}

/// Thread-safe wrapper around the LRU index.
///
/// This is the internal implementation; users should use `Cache` instead.
/// Request counters follow one policy: nothing is counted when the
/// capacity is zero (except flushes), every request is counted otherwise.
#[derive(Debug)]
pub struct Db {
    /// Index and recency list, protected by a read-write lock.
    lru: RwLock<Lru>,

    /// Fixed at construction.
    capacity: usize,

    /// Statistics for cache operations.
    stats: Arc<CacheStats>,
}

impl Db {
    /// Create a new database with the given configuration.
    pub fn new(config: CacheConfig) -> Self {
        let capacity = config.capacity;
        Self {
            lru: RwLock::new(Lru::new(capacity)),
            capacity,
            stats: Arc::new(CacheStats::new()),
        }
    }

    /// Get a value, promoting it to most recently used.
    pub fn get(&self, key: &str) -> Option<String> {
        if self.capacity == 0 || key.is_empty() {
            return None;
        }
        self.stats.record_get();

        let value = self.write_lock().and_then(|mut lru| lru.get(key));

        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    /// Insert or update a value, evicting the least recently used entry
    /// when a new key arrives at capacity.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        self.stats.record_set();

        let key = key.into();
        if key.is_empty() {
            return;
        }

        let evicted = match self.write_lock() {
            Some(mut lru) => lru.set(key, value.into()),
            None => return, // Lock poisoned, silently fail
        };

        if let Some(evicted) = evicted {
            self.stats.record_eviction();
            trace!(key = %evicted, "evicted least recently used entry");
        }
    }

    /// Delete a key from the cache.
    ///
    /// Returns `true` if the key existed and was removed.
    pub fn delete(&self, key: &str) -> bool {
        if self.capacity == 0 {
            return false;
        }
        self.stats.record_delete();

        if key.is_empty() {
            return false;
        }

        match self.write_lock() {
            Some(mut lru) => lru.remove(key),
            None => false,
        }
    }

    /// Remove every entry. Not counted as evictions.
    pub fn flush(&self) {
        self.stats.record_flush();
        if let Some(mut lru) = self.write_lock() {
            lru.clear();
        }
    }

    /// Check if a key exists without touching its recency.
    pub fn contains(&self, key: &str) -> bool {
        match self.read_lock() {
            Some(lru) => lru.contains(key),
            None => false,
        }
    }

    /// Get the number of entries in the cache.
    pub fn len(&self) -> usize {
        match self.read_lock() {
            Some(lru) => lru.len(),
            None => 0,
        }
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Key/value pairs from most to least recently used.
    pub fn entries(&self) -> Vec<(String, String)> {
        self.read_lock()
            .map(|lru| lru.entries())
            .unwrap_or_default()
    }

    pub fn links_consistent(&self) -> bool {
        match self.read_lock() {
            Some(lru) => lru.links_consistent(),
            None => false,
        }
    }

    /// Get a reference to the statistics.
    pub fn stats(&self) -> Arc<CacheStats> {
        Arc::clone(&self.stats)
    }

    /// Counters plus the current size, read under the shared lock.
    pub fn snapshot(&self) -> StatsSnapshot {
        self.stats.snapshot(self.len(), self.capacity)
    }

    // Private helper methods

    /// Acquire a read lock, returning None if poisoned.
    fn read_lock(&self) -> Option<RwLockReadGuard<'_, Lru>> {
        self.lru.read().ok()
    }

    /// Acquire a write lock, returning None if poisoned.
    fn write_lock(&self) -> Option<RwLockWriteGuard<'_, Lru>> {
        self.lru.write().ok()
    }
}
