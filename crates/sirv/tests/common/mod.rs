//! Common test utilities and helpers

use async_trait::async_trait;
use sirv::transport::{
    HttpTransport, Transport, TransportRequest, TransportResponse, Result as TransportResult,
};
use sirv::{Client, PlanLimit};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use wiremock::MockServer;

/// Load a response fixture
#[allow(dead_code)]
pub fn load_response_fixture(name: &str) -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = Path::new(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join("responses")
        .join(format!("{}.json", name));

    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!(
            "Failed to load response fixture '{}' from {:?}: {}",
            name, path, e
        )
    })
}

/// Versioned base URL of a mock server
#[allow(dead_code)]
pub fn base_url(server: &MockServer) -> String {
    format!("{}/v2", server.uri())
}

/// Unauthenticated client pointing at a mock server
#[allow(dead_code)]
pub fn client(server: &MockServer) -> Client {
    Client::builder()
        .base_url(base_url(server))
        .build()
        .expect("Failed to build client")
}

/// Transport that counts calls before delegating to reqwest
#[allow(dead_code)]
#[derive(Debug)]
pub struct CountingTransport {
    inner: HttpTransport,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl CountingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: HttpTransport::new().expect("Failed to build transport"),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for CountingTransport {
    async fn send(&self, request: TransportRequest) -> TransportResult<TransportResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.send(request).await
    }
}

/// Client over a counting transport
#[allow(dead_code)]
pub fn counting_client(server: &MockServer) -> (Client, Arc<CountingTransport>) {
    let transport = CountingTransport::new();
    let client = Client::builder()
        .base_url(base_url(server))
        .plan_limit(PlanLimit::FREE)
        .transport(transport.clone())
        .build()
        .expect("Failed to build client");
    (client, transport)
}
