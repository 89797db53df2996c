//! # lru-kv
//!
//! A fixed-capacity, thread-safe LRU key-value cache for string keys and
//! values, plus a line-oriented TCP server that exposes it.
//!
//! ## Features
//!
//! - **Thread-safe**: Share across threads or tasks with `Clone` (uses `Arc` internally)
//! - **LRU eviction**: The least recently set or read entry makes room for new keys
//! - **O(1) operations**: Hash index plus an arena-backed doubly linked list
//! - **Statistics**: Track requests, hits, misses and evictions
//! - **Zero unsafe code**: Built entirely with safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use lru_kv::{Cache, CacheConfig};
//!
//! let cache = Cache::new(CacheConfig::new().capacity(10_000).build());
//!
//! cache.set("user:123", "Alice");
//!
//! if let Some(value) = cache.get("user:123") {
//!     println!("Found: {}", value);
//! }
//!
//! let stats = cache.stats();
//! println!("Hit rate: {:.1}%", stats.hit_rate);
//! ```
//!
//! ## Thread Safety
//!
//! Cloning a `Cache` creates a new handle to the same underlying data:
//!
//! ```rust
//! use lru_kv::Cache;
//! use std::thread;
//!
//! let cache = Cache::with_capacity(16);
//!
//! let handles: Vec<_> = (0..4).map(|i| {
//!     let cache = cache.clone();
//!     thread::spawn(move || {
//!         cache.set(format!("key_{}", i), format!("value_{}", i));
//!     })
//! }).collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.len(), 4);
//! ```
//!
//! ## Protocol
//!
//! The server speaks newline-terminated text commands: `GET key`,
//! `SET key value`, `DELETE key`, `FLUSH`, `STATS` and `END`. See
//! [`server::handle_connection`].

pub mod cache;
pub mod config;
pub mod error;
pub mod stats;

pub use cache::Cache;
pub use config::{CacheConfig, ServerConfig};
pub use error::{CacheError, CacheResult};
pub use stats::{CacheStats, StatsSnapshot};

// Internal modules - not part of public API
pub(crate) mod entry;
pub(crate) mod storage;

pub mod utils;
pub use utils::buffer_to_array;

pub mod command;
pub use command::{Command, CommandError};

pub mod response;
pub use response::Response;

pub mod connection;
pub mod server;

pub mod cli;
pub use cli::{Cli, ClientCommand, ServerArgs};
