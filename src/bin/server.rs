//! LRU cache server.
//!
//! This binary runs a TCP server that accepts cache commands from clients.

use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lru_kv::{server, Cache, ServerArgs, ServerConfig};

/// Entry point for the cache server.
#[tokio::main]
pub async fn main() {
    // Defaults to "info", overridable with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lru_kv=info,server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from(ServerArgs::parse());

    // The one cache instance, handed to every connection
    let cache = Cache::new(config.cache_config());

    let listener = match server::bind(&config).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(error = %err, "unable to start server");
            std::process::exit(1);
        }
    };

    info!(
        addr = %config.addr(),
        capacity = config.capacity,
        max_line = config.max_line,
        "cache server listening"
    );

    server::serve(listener, cache.clone(), config.max_line, shutdown_signal()).await;

    let stats = cache.stats();
    info!(
        sets = stats.sets,
        gets = stats.gets,
        hits = stats.hits,
        misses = stats.misses,
        evictions = stats.evictions,
        size = stats.size,
        "final stats"
    );
}

/// Resolves on Ctrl+C (or SIGTERM on unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C"),
        _ = terminate => info!("received SIGTERM"),
    }
}
