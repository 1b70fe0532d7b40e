//! Shared fixtures

use async_trait::async_trait;
use rust_decimal::Decimal;
use schrodinger_model::price::{PriceError, PriceSource};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// The sample document shipped with the crate
pub fn sample_scenarios() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios.json")
}

/// In-memory price source that counts fetches
#[derive(Clone)]
pub struct StubSource {
    pub price: Option<Decimal>,
    pub calls: Arc<AtomicUsize>,
}

impl StubSource {
    pub fn new(price: Option<Decimal>) -> Self {
        Self {
            price,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceSource for StubSource {
    async fn fetch_price(&self) -> Result<Decimal, PriceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.price.ok_or(PriceError::Status(503))
    }
}

/// Serve `status` and `body` to every connection; returns the base URL
pub async fn serve(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    format!("http://{addr}")
}

/// A URL nothing is listening on
pub async fn dead_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/price")
}
