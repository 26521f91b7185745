//! Main client implementation for the Sirv API

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Serialize, de::DeserializeOwned};
use sirv_transport::{HttpTransport, HttpTransportConfig, Transport};
use tokio_util::sync::CancellationToken;
use tracing::info;
use url::Url;

use crate::{
    config::ClientConfig,
    error::{Error, Result},
    http::{Method, RequestExecutor},
    resources::{Account, Files},
    session::{PlanLimit, Session},
    types::{AuthPayload, TokenResponse},
};

/// Main client for interacting with the Sirv API.
///
/// A client owns its [`Session`]. [`authenticate`](Client::authenticate)
/// takes `&mut self`, so no call can observe a half-written token. Clones
/// carry their own copy of the session; to share one authenticated client
/// across tasks, wrap it in a `tokio::sync::RwLock`.
///
/// # Example
///
/// ```rust,no_run
/// use sirv::{AuthPayload, Client};
///
/// # async fn example() -> sirv::Result<()> {
/// let mut client = Client::try_new()?;
/// client.authenticate(&AuthPayload::new("client-id", "client-secret")).await?;
///
/// let storage = client.account().storage().await?;
/// println!("{} bytes in {} files", storage.used, storage.files);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    session: Session,
    executor: RequestExecutor,
    credentials: Option<AuthPayload>,
}

impl Client {
    /// Create a client for the public API with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn try_new() -> Result<Self> {
        Self::from_config(ClientConfig::default())
    }

    /// Create a new client builder for advanced configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client from a configuration object.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty, unparsable or not
    /// `http`/`https`, or if the HTTP client cannot be built.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::with_config(HttpTransportConfig {
            timeout: None,
            connect_timeout: config.connect_timeout,
            pool_max_idle_per_host: config.pool_max_idle_per_host,
            user_agent: config.user_agent.clone(),
        })?;

        Self::with_transport(Arc::new(transport), config)
    }

    /// Create a client over a custom transport, talking to the public API.
    pub fn from_transport(transport: Arc<dyn Transport>, limit: PlanLimit) -> Self {
        Self {
            session: Session::new(crate::DEFAULT_BASE_URL, limit),
            executor: RequestExecutor::new(transport),
            credentials: None,
        }
    }

    fn with_transport(transport: Arc<dyn Transport>, config: ClientConfig) -> Result<Self> {
        let base_url = validate_base_url(config.resolved_base_url())?;

        Ok(Self {
            session: Session::new(base_url, config.plan_limit),
            executor: RequestExecutor::new(transport).with_timeout(config.timeout),
            credentials: config.credentials,
        })
    }

    /// Session state: base URL, token and plan limits.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// A copy of this client whose calls abort once `token` is cancelled.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            executor: self.executor.clone().with_cancellation(token),
            ..self.clone()
        }
    }

    /// Exchange client credentials for a bearer token.
    ///
    /// The token is stored in the session only when the API answers 200 and
    /// the body decodes; on any failure the session is left untouched.
    pub async fn authenticate(&mut self, payload: &AuthPayload) -> Result<TokenResponse> {
        let url = self.endpoint("/token", &[])?;

        let response: TokenResponse = self
            .executor
            .execute_json(&self.session, Method::POST, url, Some(payload))
            .await?;

        self.session
            .set_token(SecretString::new(response.token.clone().into_boxed_str()));

        info!(
            client_id = %payload.client_id,
            expires_in = response.expires_in,
            "Authenticated"
        );

        Ok(response)
    }

    /// Authenticate with the credentials stored in the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfig`] when no credentials were configured.
    pub async fn authenticate_with_config(&mut self) -> Result<TokenResponse> {
        let payload = self
            .credentials
            .clone()
            .ok_or_else(|| Error::MissingConfig("client credentials".to_string()))?;

        self.authenticate(&payload).await
    }

    /// Access the account endpoints.
    pub fn account(&self) -> Account<'_> {
        Account::new(self)
    }

    /// Access the file endpoints.
    pub fn files(&self) -> Files<'_> {
        Files::new(self)
    }

    /// Call any JSON endpoint of the API.
    ///
    /// `path` is relative to the versioned base URL. Useful for endpoints
    /// that have no typed wrapper.
    ///
    /// ```rust,no_run
    /// # use sirv::{Client, http::Method};
    /// # async fn example(client: Client) -> sirv::Result<()> {
    /// let stats: serde_json::Value = client
    ///     .execute_json::<(), _>(Method::GET, "/stats/storage", &[("from", "2024-01-01")], None)
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn execute_json<P, R>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        payload: Option<&P>,
    ) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned + Send + 'static,
    {
        let url = self.endpoint(path, query)?;
        self.executor
            .execute_json(&self.session, method, url, payload)
            .await
    }

    pub(crate) fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        self.session.endpoint(path, query)
    }

    pub(crate) fn executor(&self) -> &RequestExecutor {
        &self.executor
    }
}

fn validate_base_url(raw: &str) -> Result<String> {
    if raw.trim().is_empty() {
        return Err(Error::InvalidUrl("Base URL cannot be empty".to_string()));
    }

    let url: Url = raw
        .trim()
        .parse()
        .map_err(|e| Error::InvalidUrl(format!("{}", e)))?;

    match url.scheme() {
        "http" | "https" => Ok(raw.trim().to_string()),
        scheme => Err(Error::InvalidUrl(format!(
            "Invalid URL scheme '{}'. Only 'http' and 'https' are supported.",
            scheme
        ))),
    }
}

/// Builder for creating a configured Client.
#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Start from an existing configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the base URL for the API.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the per-call timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the connect timeout of the default transport.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the plan limits.
    pub fn plan_limit(mut self, limit: PlanLimit) -> Self {
        self.config.plan_limit = limit;
        self
    }

    /// Set the User-Agent of the default transport.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Store credentials for [`Client::authenticate_with_config`].
    pub fn credentials(mut self, client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        self.config.credentials = Some(AuthPayload::new(client_id, client_secret));
        self
    }

    /// Use a custom transport instead of the reqwest one.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client with the configured options.
    pub fn build(self) -> Result<Client> {
        match self.transport {
            Some(transport) => Client::with_transport(transport, self.config),
            None => Client::from_config(self.config),
        }
    }
}
