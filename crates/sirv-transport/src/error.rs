//! Transport error types

use thiserror::Error;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors that can occur in transport operations
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(String),

    /// Connection could not be established (DNS, refused, TLS)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Timeout error
    #[error("Timeout")]
    Timeout,

    /// Reading or writing a body stream failed
    #[error("Body error: {0}")]
    Body(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The underlying HTTP client could not be built
    #[error("Client configuration error: {0}")]
    Client(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else if err.is_body() || err.is_decode() {
            Self::Body(err.to_string())
        } else if err.is_builder() {
            Self::Client(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

// Body streams are read through `tokio_util::io::StreamReader`, which needs
// errors convertible into `std::io::Error`.
impl From<TransportError> for std::io::Error {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Io(io) => io,
            TransportError::Timeout => std::io::Error::new(std::io::ErrorKind::TimedOut, err),
            other => std::io::Error::other(other),
        }
    }
}
