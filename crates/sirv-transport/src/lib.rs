//! Transport abstraction layer for the Sirv REST client
//!
//! Provides a trait-based transport abstraction so the request pipeline in
//! the `sirv` crate never talks to an HTTP library directly. The default
//! implementation wraps `reqwest`; tests substitute their own.
//!
//! # Architecture
//!
//! - **Transport trait**: one `send` operation, request in, response out
//! - **Bodies**: request and response bodies are byte streams, so uploads
//!   and downloads never have to sit fully in memory
//! - **HTTP transport**: REST calls via reqwest

#![deny(unsafe_code)]
#![warn(missing_docs)]

//! # Usage
//!
//! ```rust,no_run
//! use sirv_transport::{HttpTransport, Method, Transport, TransportRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = HttpTransport::new()?;
//! let request = TransportRequest::new(
//!     Method::GET,
//!     "https://api.sirv.com/v2/account".parse()?,
//! );
//! let response = transport.send(request).await?;
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```

pub mod body;
pub mod error;
pub mod http;
pub mod traits;

// Re-export commonly used types
pub use body::{Body, BodyStream};
pub use error::{Result, TransportError};
pub use http::{HttpTransport, HttpTransportConfig};
pub use traits::{Transport, TransportRequest, TransportResponse};

// Re-export HTTP types so callers don't need a direct `http` dependency
pub use ::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
