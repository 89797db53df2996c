//! LRU cache client.
//!
//! This binary provides a CLI for interacting with a running cache server.

use clap::Parser;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
    task::JoinSet,
};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lru_kv::cli::{Cli, ClientCommand};

const CLOSING: &str = "Closing connection\n";

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Cli::parse();
    let addr = format!("{}:{}", args.host, args.port);

    if let ClientCommand::Flood { clients } = args.command {
        flood(&addr, clients).await;
        return Ok(());
    }

    let line = match args.command.to_line() {
        Some(line) => line,
        None => return Ok(()),
    };

    let response = match exchange(&addr, &[line]).await {
        Ok(response) => response,
        Err(e) => {
            eprintln!("Failed to talk to server at {}: {}", addr, e);
            eprintln!("Make sure the server is running with: cargo run --bin server");
            std::process::exit(1);
        }
    };

    print!("{}", response);
    if response.starts_with("ERROR:") {
        std::process::exit(1);
    }

    Ok(())
}

/// Send `lines` followed by `END` on one connection and return everything
/// the server answered before closing, minus the closing notice.
async fn exchange(addr: &str, lines: &[String]) -> std::io::Result<String> {
    let mut stream = TcpStream::connect(addr).await?;

    for line in lines {
        stream.write_all(line.as_bytes()).await?;
    }
    stream.write_all(b"END\n").await?;

    let mut response = String::new();
    stream.read_to_string(&mut response).await?;

    if let Some(len) = response.strip_suffix(CLOSING).map(str::len) {
        response.truncate(len);
    }
    Ok(response)
}

/// Run `clients` concurrent sessions, each setting and reading back its
/// own key.
async fn flood(addr: &str, clients: usize) {
    let mut tasks = JoinSet::new();

    for id in 0..clients {
        let addr = addr.to_string();
        tasks.spawn(async move {
            let lines = vec![
                format!("SET key{} value{}\n", id, id),
                format!("GET key{}\n", id),
            ];
            (id, exchange(&addr, &lines).await)
        });
    }

    let mut failed = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((id, Ok(response))) => print!("Client {} got: {}", id, response),
            Ok((id, Err(e))) => {
                failed += 1;
                warn!(client = id, error = %e, "connection failed");
            }
            Err(e) => {
                failed += 1;
                warn!(error = %e, "client task panicked");
            }
        }
    }

    println!("All clients done ({} failed)", failed);
}
