//! The main cache interface.
//!
//! This module provides the primary `Cache` type that users interact with.
//! It wraps the internal storage and provides a clean, thread-safe API.

use std::sync::Arc;

use crate::config::CacheConfig;
use crate::stats::{CacheStats, StatsSnapshot};
use crate::storage::Db;

/// A thread-safe, fixed-capacity LRU cache of string keys and values.
///
/// # Features
/// - **Thread-safe**: Can be shared across threads or tasks by cloning.
/// - **LRU eviction**: When capacity is reached, the least recently used entry is evicted.
/// - **O(1) operations**: Hash index plus an arena-backed doubly linked list.
/// - **Statistics**: Track requests, hits, misses and evictions.
///
/// # Example
/// ```
/// use lru_kv::{Cache, CacheConfig};
///
/// let cache = Cache::new(CacheConfig::new().capacity(2).build());
///
/// cache.set("a", "1");
/// cache.set("b", "2");
/// assert_eq!(cache.get("a").as_deref(), Some("1"));
///
/// // "b" is now least recently used and makes room for "c"
/// cache.set("c", "3");
/// assert!(cache.get("b").is_none());
///
/// let stats = cache.stats();
/// assert_eq!(stats.evictions, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Cache {
    /// Internal storage.
    db: Arc<Db>,
}

impl Cache {
    /// Create a new cache with the given configuration.
    ///
    /// # Example
    /// ```
    /// use lru_kv::{Cache, CacheConfig};
    ///
    /// let cache = Cache::new(CacheConfig::default());
    /// ```
    pub fn new(config: CacheConfig) -> Self {
        Self {
            db: Arc::new(Db::new(config)),
        }
    }

    /// Create a cache holding at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(CacheConfig::new().capacity(capacity).build())
    }

    /// Get a value from the cache.
    ///
    /// A hit promotes the key to most recently used. Returns `None` for
    /// missing or empty keys and always on a zero-capacity cache.
    ///
    /// # Example
    /// ```
    /// use lru_kv::Cache;
    ///
    /// let cache = Cache::with_capacity(8);
    /// cache.set("key", "value");
    ///
    /// match cache.get("key") {
    ///     Some(value) => println!("Found: {}", value),
    ///     None => println!("Not found"),
    /// }
    /// ```
    pub fn get(&self, key: &str) -> Option<String> {
        self.db.get(key)
    }

    /// Set a value in the cache.
    ///
    /// Updating an existing key promotes it and never evicts. Inserting a
    /// new key at capacity evicts the least recently used entry first.
    /// Empty keys are ignored.
    ///
    /// # Example
    /// ```
    /// use lru_kv::Cache;
    ///
    /// let cache = Cache::with_capacity(8);
    /// cache.set("string_key", "string value");
    /// cache.set(String::from("owned"), String::from("value"));
    /// ```
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.db.set(key, value);
    }

    /// Delete a key from the cache.
    ///
    /// Returns `true` if the key existed and was removed.
    ///
    /// # Example
    /// ```
    /// use lru_kv::Cache;
    ///
    /// let cache = Cache::with_capacity(8);
    /// cache.set("key", "value");
    /// assert!(cache.delete("key"));
    /// assert!(!cache.delete("key")); // Already deleted
    /// ```
    pub fn delete(&self, key: &str) -> bool {
        self.db.delete(key)
    }

    /// Remove all entries from the cache.
    ///
    /// Flushed entries are not counted as evictions.
    ///
    /// # Example
    /// ```
    /// use lru_kv::Cache;
    ///
    /// let cache = Cache::with_capacity(8);
    /// cache.set("key1", "value1");
    /// cache.set("key2", "value2");
    /// cache.flush();
    /// assert!(cache.is_empty());
    /// ```
    pub fn flush(&self) {
        self.db.flush();
    }

    /// Check if a key exists in the cache.
    ///
    /// Note: This does NOT update the LRU order and is not counted.
    pub fn contains(&self, key: &str) -> bool {
        self.db.contains(key)
    }

    /// Get the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    /// The fixed capacity this cache was built with.
    pub fn capacity(&self) -> usize {
        self.db.capacity()
    }

    /// Contents ordered from most to least recently used.
    ///
    /// Does not promote anything.
    ///
    /// # Example
    /// ```
    /// use lru_kv::Cache;
    ///
    /// let cache = Cache::with_capacity(8);
    /// cache.set("a", "1");
    /// cache.set("b", "2");
    /// for (key, value) in cache.entries() {
    ///     println!("{}: {}", key, value);
    /// }
    /// ```
    pub fn entries(&self) -> Vec<(String, String)> {
        self.db.entries()
    }

    /// Get a snapshot of the cache statistics.
    ///
    /// Counters are read without the cache lock; size is read under the
    /// shared lock.
    ///
    /// # Example
    /// ```
    /// use lru_kv::Cache;
    ///
    /// let cache = Cache::with_capacity(8);
    /// cache.set("key", "value");
    /// let _ = cache.get("key");        // Hit
    /// let _ = cache.get("missing");    // Miss
    ///
    /// let stats = cache.stats();
    /// assert_eq!(stats.hit_rate, 50.0);
    /// ```
    pub fn stats(&self) -> StatsSnapshot {
        self.db.snapshot()
    }

    /// Get a reference to the internal statistics counter.
    ///
    /// This is useful for integrating with external metrics systems.
    pub fn stats_ref(&self) -> Arc<CacheStats> {
        self.db.stats()
    }

    /// Verify that the recency list and the index agree.
    ///
    /// Walks the list from head to tail and back; both walks must visit
    /// exactly `len()` entries.
    pub fn links_consistent(&self) -> bool {
        self.db.links_consistent()
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
