//! End-to-end tests of the line protocol over real TCP connections.

use std::net::SocketAddr;
use std::time::Duration;

use lru_kv::{server, Cache, CacheError, ServerConfig};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

struct TestServer {
    addr: SocketAddr,
    cache: Cache,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    async fn start(capacity: usize) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let cache = Cache::with_capacity(capacity);
        let (tx, rx) = oneshot::channel::<()>();

        tokio::spawn(server::serve(listener, cache.clone(), 4096, async move {
            let _ = rx.await;
        }));

        Self {
            addr,
            cache,
            shutdown: Some(tx),
        }
    }

    async fn connect(&self) -> Client {
        let stream = TcpStream::connect(self.addr).await.unwrap();
        let (read, write) = stream.into_split();
        Client {
            reader: BufReader::new(read),
            writer: write,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

struct Client {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl Client {
    async fn send(&mut self, line: &str) {
        self.writer.write_all(line.as_bytes()).await.unwrap();
    }

    async fn read_line(&mut self) -> String {
        let mut line = String::new();
        self.reader.read_line(&mut line).await.unwrap();
        line
    }

    async fn request(&mut self, line: &str) -> String {
        self.send(line).await;
        self.read_line().await
    }
}

#[tokio::test]
async fn test_set_then_get_over_the_wire() {
    let server = TestServer::start(16).await;
    let mut client = server.connect().await;

    assert_eq!(client.request("SET foo bar\n").await, "OK\n");
    assert_eq!(client.request("GET foo\n").await, "bar\n");
    assert_eq!(client.request("get missing\n").await, "(nil)\n");
}

#[tokio::test]
async fn test_full_session() {
    let server = TestServer::start(2).await;
    let mut client = server.connect().await;

    assert_eq!(client.request("set a 1\n").await, "OK\n");
    assert_eq!(client.request("set b 2\n").await, "OK\n");
    assert_eq!(client.request("get a\n").await, "1\n");
    assert_eq!(client.request("set c 3\n").await, "OK\n");
    assert_eq!(client.request("get b\n").await, "(nil)\n");
    assert_eq!(client.request("delete a\n").await, "OK\n");
    assert_eq!(client.request("delete a\n").await, "OK\n");
    assert_eq!(client.request("get a\n").await, "(nil)\n");

    client.send("STATS\n").await;
    let mut block = Vec::new();
    for _ in 0..10 {
        block.push(client.read_line().await);
    }
    assert_eq!(
        block,
        vec![
            "Total Sets: 3\n",
            "Total Gets: 3\n",
            "Total Hits: 1\n",
            "Total Misses: 2\n",
            "Total Deletes: 2\n",
            "Total Flushes: 0\n",
            "Hit Rate: 33.33%\n",
            "Total Evictions: 1\n",
            "Current Size: 1\n",
            "Capacity: 2\n",
        ]
    );

    assert_eq!(client.request("FLUSH\n").await, "OK\n");
    assert!(server.cache.is_empty());
}

#[tokio::test]
async fn test_protocol_errors_keep_connection_open() {
    let server = TestServer::start(16).await;
    let mut client = server.connect().await;

    assert_eq!(client.request("GET\n").await, "ERROR: GET requires a key\n");
    assert_eq!(
        client.request("SET k\n").await,
        "ERROR: SET requires key and value\n"
    );
    assert_eq!(
        client.request("DELETE\n").await,
        "ERROR: DELETE requires a key\n"
    );
    assert_eq!(
        client.request("FLUSH all\n").await,
        "ERROR: FLUSH doesn't require key and/or value\n"
    );
    assert_eq!(
        client.request("STATS now\n").await,
        "ERROR: STATS doesn't require key and/or value\n"
    );
    assert_eq!(client.request("HELLO\n").await, "ERROR: Unknown command\n");

    // Still usable
    assert_eq!(client.request("SET k v\n").await, "OK\n");
    assert_eq!(client.request("GET k\n").await, "v\n");
}

#[tokio::test]
async fn test_end_closes_connection() {
    let server = TestServer::start(16).await;
    let mut client = server.connect().await;

    assert_eq!(client.request("END\n").await, "Closing connection\n");

    let mut rest = String::new();
    let n = client.reader.read_to_string(&mut rest).await.unwrap();
    assert_eq!(n, 0);
}

#[tokio::test]
async fn test_connections_share_one_cache() {
    let server = TestServer::start(16).await;
    let mut writer = server.connect().await;
    let mut reader = server.connect().await;

    assert_eq!(writer.request("SET shared yes\n").await, "OK\n");
    assert_eq!(reader.request("GET shared\n").await, "yes\n");
}

#[tokio::test]
async fn test_client_disconnect_does_not_stop_server() {
    let server = TestServer::start(16).await;

    {
        let mut client = server.connect().await;
        client.send("SET half").await;
        // Dropped mid-line
    }

    let mut client = server.connect().await;
    assert_eq!(client.request("SET k v\n").await, "OK\n");
    assert!(!server.cache.contains("half"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_many_concurrent_clients() {
    let server = TestServer::start(1024).await;

    let mut tasks = Vec::new();
    for id in 0..100 {
        let mut client = server.connect().await;
        tasks.push(tokio::spawn(async move {
            let set = client.request(&format!("SET key{} value{}\n", id, id)).await;
            let get = client.request(&format!("GET key{}\n", id)).await;
            (set, get, id)
        }));
    }

    for task in tasks {
        let (set, get, id) = tokio::time::timeout(Duration::from_secs(10), task)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(set, "OK\n");
        assert_eq!(get, format!("value{}\n", id));
    }

    assert_eq!(server.cache.len(), 100);
    assert!(server.cache.links_consistent());
}

#[tokio::test]
async fn test_bind_failure_is_reported() {
    let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = taken.local_addr().unwrap().port();

    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port,
        ..ServerConfig::default()
    };

    match server::bind(&config).await {
        Err(CacheError::Bind { addr, .. }) => assert_eq!(addr, format!("127.0.0.1:{}", port)),
        other => panic!("expected bind error, got {:?}", other.map(|_| ())),
    }
}
