//! Command types for the cache protocol.
//!
//! A command line is split into words; the first word names the command
//! (case-insensitive) and the rest are its arguments.

use std::fmt;

use crate::cache::Cache;
use crate::response::Response;

/// A parsed, argument-checked command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Get a value by key.
    Get { key: String },
    /// Set a key-value pair.
    Set { key: String, value: String },
    /// Delete a key.
    Delete { key: String },
    /// Remove every entry.
    Flush,
    /// Report counters.
    Stats,
    /// Close the connection.
    End,
}

/// Why a command line was rejected.
///
/// The `Display` text is exactly the error line sent to the client, minus
/// the trailing newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    GetRequiresKey,
    SetRequiresKeyAndValue,
    DeleteRequiresKey,
    FlushTakesNoArguments,
    StatsTakesNoArguments,
    Unknown,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            CommandError::GetRequiresKey => "ERROR: GET requires a key",
            CommandError::SetRequiresKeyAndValue => "ERROR: SET requires key and value",
            CommandError::DeleteRequiresKey => "ERROR: DELETE requires a key",
            CommandError::FlushTakesNoArguments => {
                "ERROR: FLUSH doesn't require key and/or value"
            }
            CommandError::StatsTakesNoArguments => {
                "ERROR: STATS doesn't require key and/or value"
            }
            CommandError::Unknown => "ERROR: Unknown command",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for CommandError {}

impl Command {
    /// Parse a command from its words.
    ///
    /// Extra words after the required arguments of GET, SET, DELETE and
    /// END are ignored.
    ///
    /// # Example
    /// ```
    /// use lru_kv::Command;
    ///
    /// let parts = vec!["set".to_string(), "k".to_string(), "v".to_string()];
    /// assert_eq!(
    ///     Command::parse(&parts),
    ///     Ok(Command::Set { key: "k".into(), value: "v".into() })
    /// );
    /// ```
    pub fn parse(parts: &[String]) -> Result<Command, CommandError> {
        let (name, args) = match parts.split_first() {
            Some((name, args)) => (name, args),
            None => return Err(CommandError::Unknown),
        };

        match name.to_lowercase().as_str() {
            "get" => match args.first() {
                Some(key) => Ok(Command::Get { key: key.clone() }),
                None => Err(CommandError::GetRequiresKey),
            },
            "set" => match args {
                [key, value, ..] => Ok(Command::Set {
                    key: key.clone(),
                    value: value.clone(),
                }),
                _ => Err(CommandError::SetRequiresKeyAndValue),
            },
            "delete" => match args.first() {
                Some(key) => Ok(Command::Delete { key: key.clone() }),
                None => Err(CommandError::DeleteRequiresKey),
            },
            "flush" if args.is_empty() => Ok(Command::Flush),
            "flush" => Err(CommandError::FlushTakesNoArguments),
            "stats" if args.is_empty() => Ok(Command::Stats),
            "stats" => Err(CommandError::StatsTakesNoArguments),
            "end" => Ok(Command::End),
            _ => Err(CommandError::Unknown),
        }
    }

    /// Run this command against the cache.
    pub fn apply(self, cache: &Cache) -> Response {
        match self {
            Command::Get { key } => match cache.get(&key) {
                Some(value) => Response::Value(value),
                None => Response::Nil,
            },
            Command::Set { key, value } => {
                cache.set(key, value);
                Response::Ok
            }
            Command::Delete { key } => {
                cache.delete(&key);
                Response::Ok
            }
            Command::Flush => {
                cache.flush();
                Response::Ok
            }
            Command::Stats => Response::Stats(cache.stats()),
            Command::End => Response::Closing,
        }
    }

    /// Get the wire name of this command.
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Get { .. } => "GET",
            Command::Set { .. } => "SET",
            Command::Delete { .. } => "DELETE",
            Command::Flush => "FLUSH",
            Command::Stats => "STATS",
            Command::End => "END",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
