//! Command-line interface definitions.
//!
//! This module defines the CLI structure for the server and the client
//! using clap.

use clap::{Parser, Subcommand};

use crate::config::{ServerConfig, DEFAULT_CAPACITY, DEFAULT_MAX_LINE, DEFAULT_PORT};

/// LRU cache server.
///
/// Serves a fixed-capacity LRU cache over a line-oriented TCP protocol.
#[derive(Parser, Debug)]
#[command(name = "lru-kv-server")]
#[command(author, version, about, long_about = None)]
pub struct ServerArgs {
    /// Address to listen on.
    #[arg(long, env = "LRU_KV_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, env = "LRU_KV_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Maximum number of entries. Zero stores nothing.
    #[arg(short, long, env = "LRU_KV_CAPACITY", default_value_t = DEFAULT_CAPACITY)]
    pub capacity: usize,

    /// Longest command line accepted, in bytes.
    #[arg(long, env = "LRU_KV_MAX_LINE", default_value_t = DEFAULT_MAX_LINE)]
    pub max_line: usize,
}

impl From<ServerArgs> for ServerConfig {
    fn from(args: ServerArgs) -> Self {
        ServerConfig {
            host: args.host,
            port: args.port,
            capacity: args.capacity,
            max_line: args.max_line,
        }
    }
}

/// LRU cache client.
///
/// A CLI tool for interacting with the cache server.
#[derive(Parser, Debug)]
#[command(name = "lru-kv-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Server host.
    #[arg(long, global = true, default_value = "127.0.0.1")]
    pub host: String,

    /// Server port.
    #[arg(short, long, global = true, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// The command to execute.
    #[clap(subcommand)]
    pub command: ClientCommand,
}

/// Available client commands.
#[derive(Subcommand, Debug)]
pub enum ClientCommand {
    /// Get a value by key.
    ///
    /// Prints `(nil)` if the key doesn't exist.
    Get {
        /// The key to look up.
        #[arg(value_parser = protocol_word)]
        key: String,
    },

    /// Set a key-value pair.
    ///
    /// Stores the value at the given key. If the key already
    /// exists, its value is updated.
    Set {
        /// The key to store the value under.
        #[arg(value_parser = protocol_word)]
        key: String,
        /// The value to store.
        #[arg(value_parser = protocol_word)]
        value: String,
    },

    /// Delete a key.
    Delete {
        /// The key to delete.
        #[arg(value_parser = protocol_word)]
        key: String,
    },

    /// Remove every entry.
    Flush,

    /// Get server statistics.
    ///
    /// Shows request counters, hit rate, size and capacity.
    Stats,

    /// Open many concurrent connections that each set and read back a key.
    Flood {
        /// Number of concurrent clients.
        #[arg(short, long, default_value_t = 100)]
        clients: usize,
    },
}

/// Keys and values travel as single whitespace-separated tokens, so they
/// must be non-empty and contain no whitespace.
fn protocol_word(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Err("must not be empty".to_string());
    }
    if s.chars().any(char::is_whitespace) {
        return Err("must not contain whitespace".to_string());
    }
    Ok(s.to_string())
}

impl ClientCommand {
    /// The protocol line for single-shot commands, newline included.
    pub fn to_line(&self) -> Option<String> {
        match self {
            ClientCommand::Get { key } => Some(format!("GET {}\n", key)),
            ClientCommand::Set { key, value } => Some(format!("SET {} {}\n", key, value)),
            ClientCommand::Delete { key } => Some(format!("DELETE {}\n", key)),
            ClientCommand::Flush => Some("FLUSH\n".to_string()),
            ClientCommand::Stats => Some("STATS\n".to_string()),
            ClientCommand::Flood { .. } => None,
        }
    }
}
