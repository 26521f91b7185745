//! # Sirv SDK
//!
//! Typed async client for the [Sirv](https://sirv.com) REST API:
//! - Token authentication with client credentials
//! - Account info, API limits, storage statistics and users
//! - File search with scroll continuation
//! - Folder listings, stat, rename, mkdir and delete
//! - Streaming uploads and downloads
//!
//! Every call goes through one request primitive that attaches the bearer
//! token and turns any status other than 200 into [`Error::UnexpectedStatus`].
//! Nothing is retried or throttled; the plan limits on the session are
//! informational.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sirv::{AuthPayload, Client, FileSearchPayload};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = Client::try_new()?;
//!     client
//!         .authenticate(&AuthPayload::new("client-id", "client-secret"))
//!         .await?;
//!
//!     let results = client
//!         .files()
//!         .search(&FileSearchPayload::new("logo").size(10))
//!         .await?;
//!     println!("{} matches", results.total);
//!
//!     client.files().download("/img/logo.png", "logo.png").await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export commonly used types
pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, Result};
pub use session::{PlanLimit, Session};
pub use types::*;

// Module declarations
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod resources;
pub mod session;
pub mod types;

// Re-export key dependencies for convenience
pub use sirv_transport::{self as transport, Transport};
pub use tokio_util::sync::CancellationToken;

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use sirv::prelude::*;
/// ```
pub mod prelude {

    pub use crate::{
        Client, ClientConfig, Error, PlanLimit, Result,
        types::{
            AuthPayload, FileSearchPayload, FileSearchResponse, FileSearchScrollPayload,
            FolderContents,
        },
    };
}

/// SDK version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.sirv.com/v2";
