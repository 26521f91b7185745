//! Account-related types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response of `GET /account`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountInfo {
    /// Account creation timestamp (ISO 8601)
    pub date_created: String,

    /// Primary account alias
    pub alias: String,

    /// Largest file the account may store, in bytes
    pub file_size_limit: i64,

    /// Remote fetching settings
    pub fetching: Fetching,

    /// Minification settings
    pub minify: Minify,

    /// Temporary CDN URL
    #[serde(rename = "cdnTempURL")]
    pub cdn_temp_url: String,

    /// CDN URL
    #[serde(rename = "cdnURL")]
    pub cdn_url: String,

    /// Account aliases keyed by alias name
    pub aliases: HashMap<String, Alias>,
}

/// Remote fetching settings of an account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fetching {
    /// Whether fetching is enabled
    pub enabled: bool,

    /// Fetching type (e.g. "http", "s3")
    #[serde(rename = "type")]
    pub fetch_type: String,

    /// HTTP source settings
    pub http: FetchingHttp,

    /// Maximum size of a fetched file, in bytes
    #[serde(rename = "maxFilesize")]
    pub max_filesize: i64,
}

/// HTTP source of remote fetching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchingHttp {
    /// Source authentication
    pub auth: Toggle,

    /// Source URL
    pub url: String,
}

/// Minification settings.
pub type Minify = Toggle;

/// A bare `{ "enabled": bool }` switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toggle {
    /// Whether the feature is on
    pub enabled: bool,
}

/// One account alias.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alias {
    /// Path prefix served by the alias
    pub prefix: String,

    /// Whether the alias is served through the CDN
    pub cdn: bool,
}

/// Usage counters of one rate-limited operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitInfo {
    /// Requests made in the current window
    pub count: i64,
    /// Requests allowed per window
    pub limit: i64,
    /// Requests left in the current window
    pub remaining: i64,
    /// Unix timestamp when the window resets
    pub reset: i64,
}

/// Response of `GET /account/limits`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiLimits {
    /// S3 API, all methods
    #[serde(rename = "s3:global")]
    pub s3_global: LimitInfo,
    /// S3 PUT
    #[serde(rename = "s3:PUT")]
    pub s3_put: LimitInfo,
    /// S3 GET
    #[serde(rename = "s3:GET")]
    pub s3_get: LimitInfo,
    /// S3 DELETE
    #[serde(rename = "s3:DELETE")]
    pub s3_delete: LimitInfo,
    /// REST API, all endpoints
    #[serde(rename = "rest:global")]
    pub rest_global: LimitInfo,
    /// `POST /files/search`
    #[serde(rename = "rest:post:files:search")]
    pub rest_post_files_search: LimitInfo,
    /// `POST /files/search/scroll`
    #[serde(rename = "rest:post:files:search:scroll")]
    pub rest_post_files_search_scroll: LimitInfo,
    /// `POST /files/video2spin`
    #[serde(rename = "rest:post:files:video2spin")]
    pub rest_post_files_video2spin: LimitInfo,
    /// `POST /files/spin2video`
    #[serde(rename = "rest:post:files:spin2video")]
    pub rest_post_files_spin2video: LimitInfo,
    /// `POST /files/fetch`
    #[serde(rename = "rest:post:files:fetch")]
    pub rest_post_files_fetch: LimitInfo,
    /// `POST /files/upload`
    #[serde(rename = "rest:post:files:upload")]
    pub rest_post_files_upload: LimitInfo,
    /// `POST /files/delete`
    #[serde(rename = "rest:post:files:delete")]
    pub rest_post_files_delete: LimitInfo,
    /// `POST /account`
    #[serde(rename = "rest:post:account")]
    pub rest_post_account: LimitInfo,
    /// `POST /account/fetching`
    #[serde(rename = "rest:post:account:fetching")]
    pub rest_post_account_fetching: LimitInfo,
    /// `GET /stats/http`
    #[serde(rename = "rest:get:stats:http")]
    pub rest_get_stats_http: LimitInfo,
    /// `GET /stats/storage`
    #[serde(rename = "rest:get:stats:storage")]
    pub rest_get_stats_storage: LimitInfo,
    /// `POST /account/new`
    #[serde(rename = "rest:post:account:new")]
    pub rest_post_account_new: LimitInfo,
    /// `POST /user/accounts`
    #[serde(rename = "rest:post:user:accounts")]
    pub rest_post_user_accounts: LimitInfo,
    /// `GET /rest/credentials`
    #[serde(rename = "rest:get:rest:credentials")]
    pub rest_get_rest_credentials: LimitInfo,
    /// `POST /video/toSpin`
    #[serde(rename = "rest:post:video:toSpin")]
    pub rest_post_video_to_spin: LimitInfo,
    /// `POST /upload/toSirv`
    #[serde(rename = "rest:post:upload:toSirv")]
    pub rest_post_upload_to_sirv: LimitInfo,
    /// FTP, all commands
    #[serde(rename = "ftp:global")]
    pub ftp_global: LimitInfo,
    /// FTP STOR
    #[serde(rename = "ftp:STOR")]
    pub ftp_stor: LimitInfo,
    /// FTP RETR
    #[serde(rename = "ftp:RETR")]
    pub ftp_retr: LimitInfo,
    /// FTP DELE
    #[serde(rename = "ftp:DELE")]
    pub ftp_dele: LimitInfo,
    /// Remote file fetches
    #[serde(rename = "fetch:file")]
    pub fetch_file: LimitInfo,
}

/// Response of `GET /account/storage`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageInfo {
    /// Storage included in the plan, in bytes
    pub plan: i64,
    /// Burstable storage, in bytes
    pub burstable: i64,
    /// Extra purchased storage, in bytes
    pub extra: i64,
    /// Storage in use, in bytes
    pub used: i64,
    /// Number of stored files
    pub files: i64,
    /// When the quota was exceeded.
    ///
    /// The API does not pin down the representation (date string, epoch
    /// number or null), so the raw JSON value is kept as-is.
    pub quota_exceeded_date: Option<serde_json::Value>,
}

impl StorageInfo {
    /// Whether the API reports an exceeded quota.
    pub fn quota_exceeded(&self) -> bool {
        self.quota_exceeded_date
            .as_ref()
            .is_some_and(|v| !v.is_null())
    }
}

/// One entry of `GET /account/users`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    /// Role on the account (e.g. "owner", "admin", "contributor")
    pub role: String,
    /// User id
    pub user_id: String,
}
