//! Configuration for the Sirv client

use crate::error::{Error, Result};
use crate::session::PlanLimit;
use crate::types::AuthPayload;
use std::time::Duration;

/// Configuration for the Sirv client.
///
/// Every field has a usable default, so `ClientConfig::default()` talks to
/// the public API with no timeout and no stored credentials.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Versioned base URL; [`DEFAULT_BASE_URL`](crate::DEFAULT_BASE_URL) when `None`
    pub base_url: Option<String>,

    /// Per-call deadline covering the request and the whole response body
    pub timeout: Option<Duration>,

    /// TCP connect timeout
    pub connect_timeout: Duration,

    /// Maximum idle connections kept per host
    pub pool_max_idle_per_host: usize,

    /// Advisory plan limits carried by the session
    pub plan_limit: PlanLimit,

    /// User-Agent header value
    pub user_agent: String,

    /// Credentials used by [`Client::authenticate_with_config`](crate::Client::authenticate_with_config)
    pub credentials: Option<AuthPayload>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: None,
            connect_timeout: Duration::from_secs(30),
            pool_max_idle_per_host: 10,
            plan_limit: PlanLimit::default(),
            user_agent: format!("sirv-rust/{}", crate::VERSION),
            credentials: None,
        }
    }
}

impl ClientConfig {
    /// Create a builder starting from the defaults.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Create a configuration carrying client credentials.
    pub fn with_credentials(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            credentials: Some(AuthPayload::new(client_id, client_secret)),
            ..Default::default()
        }
    }

    /// Base URL to use, falling back to the public endpoint.
    pub fn resolved_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(crate::DEFAULT_BASE_URL)
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first, without
    /// overriding variables that are already set. Recognised variables:
    /// - `SIRV_CLIENT_ID` and `SIRV_CLIENT_SECRET` for credentials (both or neither)
    /// - `SIRV_BASE_URL` for the API base URL
    /// - `SIRV_TIMEOUT` for the per-call timeout in seconds
    /// - `SIRV_PLAN` for the plan preset (`free`, `business`, `enterprise`)
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self> {
        use secrecy::SecretString;
        use std::env;

        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        match (env::var("SIRV_CLIENT_ID"), env::var("SIRV_CLIENT_SECRET")) {
            (Ok(client_id), Ok(client_secret)) => {
                config.credentials = Some(AuthPayload {
                    client_id,
                    client_secret: SecretString::new(client_secret.into_boxed_str()),
                });
            }
            (Ok(_), Err(_)) => return Err(Error::MissingConfig("SIRV_CLIENT_SECRET".to_string())),
            (Err(_), Ok(_)) => return Err(Error::MissingConfig("SIRV_CLIENT_ID".to_string())),
            (Err(_), Err(_)) => {}
        }

        if let Ok(base_url) = env::var("SIRV_BASE_URL") {
            config.base_url = Some(base_url);
        }

        if let Ok(timeout_str) = env::var("SIRV_TIMEOUT") {
            let secs = timeout_str.trim().parse::<u64>().map_err(|_| {
                Error::InvalidConfig(format!("SIRV_TIMEOUT must be whole seconds, got '{timeout_str}'"))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        if let Ok(plan) = env::var("SIRV_PLAN") {
            config.plan_limit = PlanLimit::from_name(&plan).ok_or_else(|| {
                Error::InvalidConfig(format!(
                    "SIRV_PLAN must be one of free, business, enterprise, got '{plan}'"
                ))
            })?;
        }

        Ok(config)
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the per-call timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the idle connection pool size per host.
    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.config.pool_max_idle_per_host = max;
        self
    }

    /// Set the plan limits.
    pub fn plan_limit(mut self, limit: PlanLimit) -> Self {
        self.config.plan_limit = limit;
        self
    }

    /// Set the User-Agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Store credentials for [`Client::authenticate_with_config`](crate::Client::authenticate_with_config).
    pub fn credentials(mut self, client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        self.config.credentials = Some(AuthPayload::new(client_id, client_secret));
        self
    }

    /// Finish the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
