//! Error types for the Sirv SDK
//!
//! Every failure a call can produce is one variant of [`Error`]: transport
//! failures, request encoding failures, remote rejections (any status other
//! than 200), response decoding failures and local I/O failures. Nothing is
//! retried and nothing is swallowed.

use sirv_transport::TransportError;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail with a Sirv SDK error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Sirv SDK.
#[derive(Debug, Error)]
pub enum Error {
    /// The transport failed before a response arrived (DNS, refused, TLS, ...).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The request payload could not be encoded. No request was sent.
    #[error("failed to encode request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The API answered with a status other than 200.
    #[error("unexpected status code: {status}{}", remote_message_suffix(.message))]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Short error name from the error body (e.g. "Unauthorized"), if any
        error: Option<String>,
        /// Human readable message from the error body, if any
        message: Option<String>,
    },

    /// The response body did not match the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// Local file I/O failed, or copying a body to or from disk failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The call was cancelled through the client's cancellation token.
    #[error("request cancelled")]
    Cancelled,

    /// The call did not complete within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Invalid URL provided.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid HTTP header value.
    #[error("invalid HTTP header value: {0}")]
    InvalidHeaderValue(String),

    /// Missing required configuration.
    #[error("missing required configuration: {0}")]
    MissingConfig(String),

    /// Configuration value present but unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

fn remote_message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(". Message: {m}"))
        .unwrap_or_default()
}

impl Error {
    /// Classify a non-200 response.
    ///
    /// The body is parsed best-effort as `{statusCode, error, message}` with
    /// every field optional. Anything that is not a JSON object leaves only
    /// the status code.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let envelope = parse_error_envelope(body).unwrap_or_default();

        Error::UnexpectedStatus {
            status,
            error: envelope.error,
            message: envelope.message,
        }
    }

    /// HTTP status of a remote rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message the API attached to a rejection, if any.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            Error::UnexpectedStatus { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Whether the API rejected the call with 401.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Whether the API rejected the call with 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

// Helper structure for parsing API error responses

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEnvelope {
    #[serde(default)]
    #[allow(dead_code)]
    status_code: Option<i64>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

fn parse_error_envelope(body: &[u8]) -> Option<ErrorEnvelope> {
    if body.is_empty() {
        return None;
    }

    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    if !value.is_object() {
        return None;
    }

    serde_json::from_value(value).ok()
}
