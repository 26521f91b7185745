//! Request payloads and response schemas
//!
//! All response types tolerate missing fields so that partial answers from
//! the API still decode; unknown fields are ignored.

pub use account::*;
pub use auth::*;
pub use files::*;
pub use search::*;

/// Account, limits, storage and user types
pub mod account;

/// Token issuance types
pub mod auth;

/// File and folder types
pub mod files;

/// File search types
pub mod search;
