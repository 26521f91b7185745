//! Account API endpoints

use super::Resource;
use crate::{
    client::Client,
    error::Result,
    http::Method,
    types::{AccountInfo, ApiLimits, StorageInfo, User},
};

/// Account API resource.
#[derive(Debug, Clone, Copy)]
pub struct Account<'a> {
    client: &'a Client,
}

impl<'a> Account<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Account settings, CDN endpoints and aliases.
    pub async fn info(&self) -> Result<AccountInfo> {
        self.get("/account").await
    }

    /// Current usage of every rate-limited operation.
    pub async fn limits(&self) -> Result<ApiLimits> {
        self.get("/account/limits").await
    }

    /// Storage quota and usage.
    pub async fn storage(&self) -> Result<StorageInfo> {
        self.get("/account/storage").await
    }

    /// Users with access to the account.
    pub async fn users(&self) -> Result<Vec<User>> {
        self.get("/account/users").await
    }

    async fn get<R>(&self, path: &str) -> Result<R>
    where
        R: serde::de::DeserializeOwned + Send + 'static,
    {
        self.client()
            .execute_json::<(), R>(Method::GET, path, &[], None)
            .await
    }
}

impl Resource for Account<'_> {
    fn client(&self) -> &Client {
        self.client
    }
}
