//! Token issuance types

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer, ser::SerializeStruct};
use std::fmt;

/// Client credentials exchanged for a bearer token at `POST /token`.
#[derive(Clone)]
pub struct AuthPayload {
    /// API client id
    pub client_id: String,
    /// API client secret
    pub client_secret: SecretString,
}

impl AuthPayload {
    /// Create credentials from a client id and secret.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::new(client_secret.into().into_boxed_str()),
        }
    }
}

impl fmt::Debug for AuthPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthPayload")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

impl Serialize for AuthPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AuthPayload", 2)?;
        state.serialize_field("clientId", &self.client_id)?;
        state.serialize_field("clientSecret", self.client_secret.expose_secret())?;
        state.end()
    }
}

/// Response of `POST /token`.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenResponse {
    /// Bearer token for subsequent calls
    pub token: String,

    /// Lifetime of the token in seconds
    #[serde(rename = "expiresIn")]
    pub expires_in: u64,

    /// Scopes granted to the token
    pub scope: Vec<String>,
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish()
    }
}
