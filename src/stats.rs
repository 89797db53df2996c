//! Statistics and metrics for the cache.
//!
//! This module provides atomic counters for tracking cache operations,
//! enabling observability without taking the cache lock.

use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics for cache operations.
///
/// All counters are atomic, only ever incremented, and can be safely read
/// from multiple threads. Use `Cache::stats()` to get a snapshot that also
/// carries the current size and capacity.
///
/// # Example
/// ```
/// use lru_kv::{Cache, CacheConfig};
///
/// let cache = Cache::new(CacheConfig::new().capacity(8).build());
/// cache.set("key", "value");
/// let stats = cache.stats_ref();
/// assert_eq!(stats.sets(), 1);
/// ```
#[derive(Debug, Default)]
pub struct CacheStats {
    /// Total number of set requests.
    sets: AtomicU64,

    /// Total number of get requests.
    gets: AtomicU64,

    /// Number of get requests that found their key.
    hits: AtomicU64,

    /// Number of get requests that did not.
    misses: AtomicU64,

    /// Total number of delete requests.
    deletes: AtomicU64,

    /// Total number of flush requests.
    flushes: AtomicU64,

    /// Number of entries evicted due to capacity limits.
    evictions: AtomicU64,
}

impl CacheStats {
    /// Create a new stats instance with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_set(&self) {
        self.sets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_get(&self) {
        self.gets.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cache hit.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cache miss.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_flush(&self) {
        self.flushes.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an eviction (due to capacity).
    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    // Getters for reading statistics

    pub fn sets(&self) -> u64 {
        self.sets.load(Ordering::Relaxed)
    }

    pub fn gets(&self) -> u64 {
        self.gets.load(Ordering::Relaxed)
    }

    /// Get the number of cache hits.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Get the number of cache misses.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn deletes(&self) -> u64 {
        self.deletes.load(Ordering::Relaxed)
    }

    pub fn flushes(&self) -> u64 {
        self.flushes.load(Ordering::Relaxed)
    }

    /// Get the number of evictions.
    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    /// Calculate the hit rate as a percentage (0.0 to 100.0).
    /// Returns 0.0 if no gets have been counted.
    pub fn hit_rate(&self) -> f64 {
        hit_rate(self.hits(), self.misses())
    }

    /// Create a snapshot of the current counters.
    ///
    /// `size` and `capacity` come from the cache itself, which reads the
    /// size under its shared lock.
    pub fn snapshot(&self, size: usize, capacity: usize) -> StatsSnapshot {
        let hits = self.hits();
        let misses = self.misses();
        StatsSnapshot {
            sets: self.sets(),
            gets: self.gets(),
            hits,
            misses,
            deletes: self.deletes(),
            flushes: self.flushes(),
            evictions: self.evictions(),
            hit_rate: hit_rate(hits, misses),
            size: size as u64,
            capacity: capacity as u64,
        }
    }
}

fn hit_rate(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        (hits as f64 / total as f64) * 100.0
    }
}

/// A point-in-time snapshot of cache statistics.
///
/// Unlike `CacheStats`, this struct contains plain values (not atomics)
/// and can be easily serialized or logged.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSnapshot {
    pub sets: u64,
    pub gets: u64,
    pub hits: u64,
    pub misses: u64,
    pub deletes: u64,
    pub flushes: u64,
    pub evictions: u64,
    /// Percentage, 0.0 when no gets were counted.
    pub hit_rate: f64,
    pub size: u64,
    pub capacity: u64,
}
