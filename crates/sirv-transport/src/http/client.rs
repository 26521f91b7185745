//! HTTP transport client implementation
//!
//! Implements the Transport trait on top of reqwest. Request and response
//! bodies are streamed in both directions.

use crate::body::Body;
use crate::error::{Result, TransportError};
use crate::traits::{Transport, TransportRequest, TransportResponse};
use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use reqwest::Client as ReqwestClient;
use std::time::Duration;
use tracing::trace;

/// HTTP transport implementation
///
/// Handles HTTP requests with:
/// - Connection pooling
/// - Connect and overall timeouts
/// - Streaming request and response bodies
///
/// The transport never retries and never inspects status codes.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: ReqwestClient,
}

impl HttpTransport {
    /// Create a new HTTP transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpTransportConfig::default())
    }

    /// Create a new HTTP transport with custom configuration
    pub fn with_config(config: HttpTransportConfig) -> Result<Self> {
        let mut builder = ReqwestClient::builder()
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(config.user_agent);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    /// Wrap an already configured reqwest client
    pub fn from_client(client: ReqwestClient) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying reqwest client
    pub fn reqwest_client(&self) -> &ReqwestClient {
        &self.client
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let TransportRequest {
            method,
            url,
            headers,
            body,
        } = request;

        trace!(method = %method, path = %url.path(), body = ?body, "Dispatching request");

        let mut req = self.client.request(method, url).headers(headers);

        req = match body {
            Body::Empty => req,
            Body::Bytes(bytes) => req.body(bytes),
            Body::Stream(stream) => req.body(reqwest::Body::wrap_stream(stream)),
        };

        let response = req.send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes_stream()
            .map_err(TransportError::from)
            .boxed();

        Ok(TransportResponse::new(status, headers, body))
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

/// HTTP transport configuration
#[derive(Clone, Debug)]
pub struct HttpTransportConfig {
    /// Overall request timeout; `None` leaves the request unbounded
    pub timeout: Option<Duration>,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// User-Agent header value
    pub user_agent: String,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: Duration::from_secs(30),
            pool_max_idle_per_host: 10,
            user_agent: format!("sirv-transport/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
