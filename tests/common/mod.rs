//! Shared utilities for end-to-end tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use lattice::handler::Dispatcher;
use lattice::server::{self, ServeSettings};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A server running on an ephemeral loopback port
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<lattice::Result<()>>,
}

impl TestServer {
    pub async fn start(dispatcher: Dispatcher) -> Self {
        let listener = server::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(server::serve(
            listener,
            Arc::new(dispatcher),
            ServeSettings::default(),
            async move {
                let _ = rx.await;
            },
        ));

        Self {
            addr,
            shutdown: Some(tx),
            handle,
        }
    }

    /// Stop accepting and wait for the serve loop to return
    pub async fn stop(mut self) -> lattice::Result<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("serve loop did not stop")
            .expect("serve task panicked")
    }
}

/// Parsed pieces of a raw HTTP/1.1 response
pub struct RawResponse {
    pub status: u16,
    pub head: String,
    pub body: String,
}

/// Send one `GET` with `Connection: close` and read until EOF
pub async fn get(addr: SocketAddr, path: &str) -> RawResponse {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut raw))
        .await
        .expect("response timed out")
        .unwrap();

    let text = String::from_utf8(raw).unwrap();
    let (head, body) = text.split_once("\r\n\r\n").expect("malformed response");
    let status = head
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .expect("missing status code");

    RawResponse {
        status,
        head: head.to_string(),
        body: body.to_string(),
    }
}
