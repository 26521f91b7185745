//! HTTP transport implementation
//!
//! Provides a reqwest-backed client that implements the Transport trait.
//! Connection pooling, TLS and redirects are reqwest's concern.

pub mod client;

pub use client::{HttpTransport, HttpTransportConfig};
