//! Centralized observability utilities for structured logging
//!
//! All API calls are logged through this layer so individual endpoints stay
//! free of logging noise. Bearer tokens and query strings never reach the
//! log; only method and path do.

use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// HTTP request metadata for structured logging
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request path
    pub path: String,
    /// Request body size in bytes, when known up front
    pub body_size: Option<usize>,
}

impl RequestMetadata {
    /// Create new request metadata
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            body_size: None,
        }
    }

    /// Set the request body size
    pub fn with_body_size(mut self, size: usize) -> Self {
        self.body_size = Some(size);
        self
    }

    /// Log request being sent
    pub fn log_request(&self) {
        debug!(
            method = %self.method,
            path = %self.path,
            body_size = self.body_size,
            "Sending HTTP request"
        );
    }

    /// Log a request that never produced a response
    pub fn log_transport_error(&self, error: &str, elapsed: Duration) {
        warn!(
            method = %self.method,
            path = %self.path,
            elapsed_ms = elapsed.as_millis(),
            error = %error,
            "HTTP transport failed"
        );
    }
}

/// HTTP response metadata for structured logging
#[derive(Debug, Clone)]
pub struct ResponseMetadata {
    /// HTTP status code
    pub status: u16,
    /// Response body size in bytes (optional)
    pub body_size: Option<usize>,
    /// Time elapsed until the response head arrived
    pub elapsed: Duration,
}

impl ResponseMetadata {
    /// Create new response metadata
    pub fn new(status: u16, elapsed: Duration) -> Self {
        Self {
            status,
            body_size: None,
            elapsed,
        }
    }

    /// Set the response body size
    pub fn with_body_size(mut self, size: usize) -> Self {
        self.body_size = Some(size);
        self
    }

    /// Log successful response
    pub fn log_success(&self, request: &RequestMetadata) {
        info!(
            method = %request.method,
            path = %request.path,
            status = self.status,
            elapsed_ms = self.elapsed.as_millis(),
            "HTTP request succeeded"
        );
    }

    /// Log rejected response
    pub fn log_error(&self, request: &RequestMetadata, error: &str) {
        warn!(
            method = %request.method,
            path = %request.path,
            status = self.status,
            elapsed_ms = self.elapsed.as_millis(),
            body_size = self.body_size,
            error = %error,
            "HTTP request failed"
        );
    }
}

/// Timer for measuring request duration
pub struct RequestTimer {
    start: Instant,
}

impl RequestTimer {
    /// Start a new timer
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Log a finished upload or download
pub fn log_transfer(direction: &str, filename: &str, bytes: u64) {
    debug!(
        direction = %direction,
        filename = %filename,
        bytes,
        "File transfer completed"
    );
}

/// Install a `tracing` subscriber honouring `RUST_LOG`.
///
/// Defaults to `info` for this crate when `RUST_LOG` is unset. Calling it
/// twice is harmless; the second call is ignored.
#[cfg(feature = "trace")]
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sirv=info"));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init();
}
