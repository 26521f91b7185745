//! Transport trait and the request/response types it exchanges

use crate::body::{self, Body, BodyStream};
use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use std::fmt;
use tokio::io::AsyncRead;
use url::Url;

/// HTTP request specification
///
/// Represents one outbound call handed to a [`Transport`].
#[derive(Debug)]
pub struct TransportRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: Method,

    /// Fully resolved request URL, query string included
    pub url: Url,

    /// Request headers
    pub headers: HeaderMap,

    /// Request body
    pub body: Body,
}

impl TransportRequest {
    /// Create a new request with no headers and no body
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: Body::Empty,
        }
    }

    /// Add a header to the request
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Set the request body
    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }
}

/// HTTP response
///
/// The body is left unread: callers either stream it somewhere, collect it,
/// or drain it. Dropping the response closes the body.
pub struct TransportResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: BodyStream,
}

impl TransportResponse {
    /// Create a new response
    pub fn new(status: StatusCode, headers: HeaderMap, body: BodyStream) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a response from a fully buffered body
    pub fn from_bytes(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        let chunk: Result<Bytes> = Ok(body.into());
        Self::new(status, headers, futures::stream::iter([chunk]).boxed())
    }

    /// HTTP status code
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get a header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Take the body stream
    pub fn into_body(self) -> BodyStream {
        self.body
    }

    /// Read the body as an [`AsyncRead`]
    pub fn into_async_read(self) -> impl AsyncRead + Send + Unpin + 'static {
        body::into_async_read(self.body)
    }

    /// Read the whole body into memory
    pub async fn bytes(self) -> Result<Bytes> {
        body::collect(self.body).await
    }

    /// Consume and discard the body, returning how many bytes were read
    pub async fn drain(mut self) -> Result<u64> {
        let mut read = 0u64;
        while let Some(chunk) = self.body.next().await {
            read += chunk?.len() as u64;
        }
        Ok(read)
    }
}

impl fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Generic transport trait
///
/// Performs exactly one network exchange per call. Implementations must not
/// retry, and must return non-success statuses as ordinary responses so the
/// caller can classify them.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Send a request and receive the response head with an open body
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse>;

    /// Name of the transport for logging
    fn name(&self) -> &'static str {
        "http"
    }
}
