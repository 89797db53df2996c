//! TCP front end for the cache.
//!
//! Every accepted connection runs in its own task and calls straight into
//! the shared [`Cache`]; the cache does all the synchronization.

use std::future::Future;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::cache::Cache;
use crate::command::Command;
use crate::config::ServerConfig;
use crate::connection::Connection;
use crate::error::{CacheError, CacheResult};
use crate::response::Response;
use crate::utils::buffer_to_array;

/// Bind the listener described by `config`.
///
/// Failure here is fatal for the server binary.
pub async fn bind(config: &ServerConfig) -> CacheResult<TcpListener> {
    let addr = config.addr();
    TcpListener::bind(&addr)
        .await
        .map_err(|source| CacheError::Bind { addr, source })
}

/// Accept connections until `shutdown` resolves.
///
/// Accept failures are logged and the loop continues.
pub async fn serve<F>(listener: TcpListener, cache: Cache, max_line: usize, shutdown: F)
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((socket, addr)) => {
                    debug!(%addr, "accepted connection");

                    // Clone the cache handle for this connection
                    let cache = cache.clone();

                    tokio::spawn(async move {
                        match handle_connection(socket, cache, max_line).await {
                            Ok(()) => debug!(%addr, "connection closed"),
                            Err(err) => warn!(%addr, error = %err, "connection terminated"),
                        }
                    });
                }
                Err(err) => {
                    warn!(error = %err, "failed to accept connection");
                }
            },
            _ = &mut shutdown => {
                info!("shutdown requested, no longer accepting connections");
                break;
            }
        }
    }
}

/// Handle a single client connection until it ends the session, closes
/// the stream, or fails.
///
/// Malformed commands get an `ERROR: ...` line and the session continues.
/// Blank lines get no response.
pub async fn handle_connection<S>(stream: S, cache: Cache, max_line: usize) -> CacheResult<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut connection = Connection::new(stream, max_line);

    while let Some(mut line) = connection.read_line().await? {
        let parts = buffer_to_array(&mut line);
        if parts.is_empty() {
            continue;
        }

        let response = process_command(&parts, &cache);
        connection.write_response(&response).await?;

        if response.closes_connection() {
            break;
        }
    }

    Ok(())
}

/// Process one command line and return the response.
pub fn process_command(parts: &[String], cache: &Cache) -> Response {
    match Command::parse(parts) {
        Ok(command) => {
            debug!(%command, "processing command");
            command.apply(cache)
        }
        Err(err) => {
            debug!(error = %err, "rejected command");
            Response::from(err)
        }
    }
}
