//! Configuration for the cache and the server around it.
//!
//! [`CacheConfig`] uses a builder pattern for the engine's capacity.
//! [`ServerConfig`] holds the listener settings; the server binary fills it
//! from command-line flags and environment variables.

/// Default number of entries the cache holds.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Longest command line accepted before a connection is dropped.
pub const DEFAULT_MAX_LINE: usize = 4096;

/// Configuration for creating a new cache instance.
///
/// Use the builder pattern to construct configuration:
///
/// ```
/// use lru_kv::CacheConfig;
///
/// let config = CacheConfig::new()
///     .capacity(10_000)
///     .build();
/// assert_eq!(config.get_capacity(), 10_000);
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold.
    /// When this limit is reached, the least recently used entry is evicted.
    /// Zero means the cache stores nothing.
    pub(crate) capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl CacheConfig {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum capacity of the cache.
    ///
    /// The capacity never changes after the cache is built. A capacity of 0
    /// is legal and turns every operation except `flush` into a no-op.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Self {
        self
    }

    /// Get the configured capacity.
    pub fn get_capacity(&self) -> usize {
        self.capacity
    }
}

/// Listener configuration for the TCP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Capacity of the cache the server is started with.
    pub capacity: usize,
    /// Longest line a client may send without a newline.
    pub max_line: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            capacity: DEFAULT_CAPACITY,
            max_line: DEFAULT_MAX_LINE,
        }
    }
}

impl ServerConfig {
    /// The `host:port` string to bind.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Engine configuration derived from this server configuration.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::new().capacity(self.capacity).build()
    }
}
