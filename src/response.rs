//! Text responses written back to clients.

use std::fmt;

use crate::command::CommandError;
use crate::stats::StatsSnapshot;

/// A reply to one command line. `Display` renders the exact bytes sent,
/// including the trailing newline.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// A found value.
    Value(String),
    /// The key was absent.
    Nil,
    Ok,
    Stats(StatsSnapshot),
    /// Sent just before the server closes the connection.
    Closing,
    Error(CommandError),
}

impl Response {
    /// Whether the connection ends after this response.
    pub fn closes_connection(&self) -> bool {
        matches!(self, Response::Closing)
    }
}

impl From<CommandError> for Response {
    fn from(err: CommandError) -> Self {
        Response::Error(err)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Value(value) => writeln!(f, "{}", value),
            Response::Nil => writeln!(f, "(nil)"),
            Response::Ok => writeln!(f, "OK"),
            Response::Stats(stats) => {
                writeln!(f, "Total Sets: {}", stats.sets)?;
                writeln!(f, "Total Gets: {}", stats.gets)?;
                writeln!(f, "Total Hits: {}", stats.hits)?;
                writeln!(f, "Total Misses: {}", stats.misses)?;
                writeln!(f, "Total Deletes: {}", stats.deletes)?;
                writeln!(f, "Total Flushes: {}", stats.flushes)?;
                writeln!(f, "Hit Rate: {:.2}%", stats.hit_rate)?;
                writeln!(f, "Total Evictions: {}", stats.evictions)?;
                writeln!(f, "Current Size: {}", stats.size)?;
                writeln!(f, "Capacity: {}", stats.capacity)
            }
            Response::Closing => writeln!(f, "Closing connection"),
            Response::Error(err) => writeln!(f, "{}", err),
        }
    }
}
