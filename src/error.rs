//! Error types for the cache server.
//!
//! The engine itself never fails: bad input degrades to a no-op or a miss.
//! These errors cover the I/O around it, where a failure ends one
//! connection or, for the listener, the whole process.

use std::fmt;
use std::io;

/// The main error type for the network layer.
#[derive(Debug)]
pub enum CacheError {
    /// An I/O error occurred on a connection.
    IoError(io::Error),

    /// The listener could not be bound. Fatal at startup.
    Bind { addr: String, source: io::Error },

    /// A client sent more than `limit` bytes without a newline.
    LineTooLong { limit: usize },
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::IoError(err) => write!(f, "I/O error: {}", err),
            CacheError::Bind { addr, source } => {
                write!(f, "unable to bind {}: {}", addr, source)
            }
            CacheError::LineTooLong { limit } => {
                write!(f, "line exceeds {} bytes without a newline", limit)
            }
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::IoError(err) => Some(err),
            CacheError::Bind { source, .. } => Some(source),
            CacheError::LineTooLong { .. } => None,
        }
    }
}

impl From<io::Error> for CacheError {
    fn from(err: io::Error) -> Self {
        CacheError::IoError(err)
    }
}

/// A specialized Result type for cache server operations.
pub type CacheResult<T> = Result<T, CacheError>;
