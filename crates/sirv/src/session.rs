//! Session state: base endpoint, bearer token and plan limits
//!
//! A [`Session`] is owned by exactly one [`Client`](crate::Client) value. The
//! token is written once by [`Client::authenticate`](crate::Client::authenticate)
//! and read by every other call. There is no internal locking; hosts that
//! share a client across tasks wrap it in their own lock.

use crate::error::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

/// Request-rate ceilings of a Sirv subscription tier.
///
/// Purely descriptive. The client never throttles on these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlanLimit {
    /// Total API requests per hour
    pub total_requests_per_hour: u32,
    /// Search requests per hour
    pub search_requests: u32,
    /// Video to spin conversions per hour
    pub video_to_spin_conversions: u32,
    /// Spin to video conversions per hour
    pub spin_to_video_conversions: u32,
    /// Remote fetch requests per hour
    pub fetch_requests: u32,
}

impl PlanLimit {
    /// Enterprise plan
    pub const ENTERPRISE: PlanLimit = PlanLimit::new(14_000, 2_000, 400, 400, 4_000);

    /// Business plan
    pub const BUSINESS: PlanLimit = PlanLimit::new(7_000, 1_000, 200, 200, 2_000);

    /// Free plan
    pub const FREE: PlanLimit = PlanLimit::new(500, 50, 20, 20, 300);

    /// Build a custom limit set.
    pub const fn new(
        total_requests_per_hour: u32,
        search_requests: u32,
        video_to_spin_conversions: u32,
        spin_to_video_conversions: u32,
        fetch_requests: u32,
    ) -> Self {
        Self {
            total_requests_per_hour,
            search_requests,
            video_to_spin_conversions,
            spin_to_video_conversions,
            fetch_requests,
        }
    }

    /// Look up a preset by name (`free`, `business`, `enterprise`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "free" => Some(Self::FREE),
            "business" => Some(Self::BUSINESS),
            "enterprise" => Some(Self::ENTERPRISE),
            _ => None,
        }
    }
}

impl Default for PlanLimit {
    fn default() -> Self {
        Self::FREE
    }
}

/// Base endpoint and credentials shared by every call of one client.
#[derive(Debug, Clone)]
pub struct Session {
    base_url: String,
    token: Option<SecretString>,
    limit: PlanLimit,
}

impl Session {
    /// Create an unauthenticated session.
    ///
    /// A trailing slash on `base_url` is ignored.
    pub fn new(base_url: impl Into<String>, limit: PlanLimit) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            base_url,
            token: None,
            limit,
        }
    }

    /// Versioned base URL, e.g. `https://api.sirv.com/v2`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Advisory plan limits.
    pub fn limit(&self) -> PlanLimit {
        self.limit
    }

    /// Current bearer token.
    pub fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    /// Whether a token has been issued for this session.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Only the authentication flow writes the token.
    pub(crate) fn set_token(&mut self, token: SecretString) {
        self.token = Some(token);
    }

    /// `Authorization` header value. Sent even when no token exists yet.
    pub(crate) fn bearer(&self) -> String {
        let token = self
            .token
            .as_ref()
            .map(|t| t.expose_secret())
            .unwrap_or_default();
        format!("Bearer {token}")
    }

    /// Resolve `path` against the base URL and append percent-encoded query
    /// parameters.
    pub fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, path);
        let mut url = Url::parse(&raw).map_err(|e| {
            Error::InvalidUrl(format!(
                "Failed to construct URL from path '{}': {}",
                path, e
            ))
        })?;

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }
}
