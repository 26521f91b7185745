//! API resource endpoints
//!
//! Endpoints are grouped by resource the way the REST API groups them.
//! Each handle borrows the client, so a call in flight keeps the session
//! from being re-authenticated underneath it.

pub mod account;
pub mod files;

pub use account::Account;
pub use files::Files;

use crate::client::Client;

/// Base trait for API resources.
pub trait Resource {
    /// Get a reference to the client.
    fn client(&self) -> &Client;
}
