//! HTTP call path
//!
//! The executor owns the single request primitive every endpoint goes
//! through; the codec turns payloads into bodies and bodies into values.

pub use codec::JSON_CONTENT_TYPE;
pub use executor::RequestExecutor;

mod codec;
pub mod executor;

// Re-export HTTP types from the http crate for convenience
pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
