//! OAuth 2.0 token endpoint calls used by the session.
//!
//! Two grants are supported: username-password and refresh token. For the
//! password grant, append the user's security token to the password when
//! the org requires one.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{Error, ErrorKind, Result};

/// Connected-app and user credentials for logging in.
///
/// Secrets are redacted in Debug output.
#[derive(Clone)]
pub struct LoginConfig {
    /// Login host, e.g. `https://login.salesforce.com`.
    pub login_url: String,
    /// Consumer key (client_id).
    pub client_id: String,
    client_secret: Option<String>,
    /// Username for the password grant.
    pub username: Option<String>,
    password: Option<String>,
    refresh_token: Option<String>,
}

impl std::fmt::Debug for LoginConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginConfig")
            .field("login_url", &self.login_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "[REDACTED]"))
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl LoginConfig {
    /// Create a login config for the given login host and consumer key.
    pub fn new(login_url: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            login_url: login_url.into().trim_end_matches('/').to_string(),
            client_id: client_id.into(),
            client_secret: None,
            username: None,
            password: None,
            refresh_token: None,
        }
    }

    /// Set the consumer secret.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.client_secret = Some(secret.into());
        self
    }

    /// Use the username-password grant.
    pub fn with_password(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Use the refresh-token grant. Takes precedence over the password grant.
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Load a login config from environment variables.
    ///
    /// Required:
    /// - `SF_CLIENT_ID`
    /// - either `SF_REFRESH_TOKEN`, or both `SF_USERNAME` and `SF_PASSWORD`
    ///
    /// Optional:
    /// - `SF_LOGIN_URL` (default: production login URL)
    /// - `SF_CLIENT_SECRET`
    pub fn from_env() -> Result<Self> {
        let login_url =
            std::env::var("SF_LOGIN_URL").unwrap_or_else(|_| crate::PRODUCTION_LOGIN_URL.to_string());

        let client_id = std::env::var("SF_CLIENT_ID")
            .map_err(|_| Error::new(ErrorKind::EnvVar("SF_CLIENT_ID".to_string())))?;

        let mut config = Self::new(login_url, client_id);

        if let Ok(secret) = std::env::var("SF_CLIENT_SECRET") {
            config = config.with_secret(secret);
        }

        if let (Ok(username), Ok(password)) =
            (std::env::var("SF_USERNAME"), std::env::var("SF_PASSWORD"))
        {
            config = config.with_password(username, password);
        }

        if let Ok(refresh_token) = std::env::var("SF_REFRESH_TOKEN") {
            config = config.with_refresh_token(refresh_token);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the config can drive at least one grant.
    pub fn validate(&self) -> Result<()> {
        if self.client_id.is_empty() {
            return Err(Error::new(ErrorKind::InvalidCredentials(
                "client_id is required".to_string(),
            )));
        }

        if self.refresh_token.is_none() && (self.username.is_none() || self.password.is_none()) {
            return Err(Error::new(ErrorKind::InvalidCredentials(
                "either a refresh token or username and password are required".to_string(),
            )));
        }

        Ok(())
    }

    /// Form parameters for the token request.
    fn grant_params(&self) -> Result<Vec<(&str, &str)>> {
        let mut params = if let Some(ref refresh_token) = self.refresh_token {
            vec![
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.as_str()),
            ]
        } else {
            match (&self.username, &self.password) {
                (Some(username), Some(password)) => vec![
                    ("grant_type", "password"),
                    ("username", username.as_str()),
                    ("password", password.as_str()),
                ],
                _ => {
                    return Err(Error::new(ErrorKind::InvalidCredentials(
                        "either a refresh token or username and password are required"
                            .to_string(),
                    )))
                }
            }
        };

        params.push(("client_id", self.client_id.as_str()));
        if let Some(ref secret) = self.client_secret {
            params.push(("client_secret", secret.as_str()));
        }

        Ok(params)
    }
}

/// Token response from OAuth.
///
/// Sensitive fields like `access_token` and `refresh_token` are redacted
/// in Debug output to prevent accidental exposure in logs.
#[derive(Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token (if requested).
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Instance URL.
    pub instance_url: String,
    /// User ID URL.
    #[serde(default)]
    pub id: Option<String>,
    /// Token type (usually "Bearer").
    #[serde(default)]
    pub token_type: Option<String>,
    /// Signature for verification.
    #[serde(default)]
    pub signature: Option<String>,
    /// Issued at timestamp.
    #[serde(default)]
    pub issued_at: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("instance_url", &self.instance_url)
            .field("id", &self.id)
            .field("token_type", &self.token_type)
            .field("signature", &self.signature.as_ref().map(|_| "[REDACTED]"))
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

/// OAuth error response.
#[derive(Debug, Deserialize)]
struct OAuthErrorResponse {
    error: String,
    #[serde(default)]
    error_description: String,
}

/// Talks to the Salesforce OAuth endpoints.
#[derive(Clone)]
pub struct OAuthClient {
    config: LoginConfig,
    http_client: reqwest::Client,
}

impl std::fmt::Debug for OAuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl OAuthClient {
    /// Create a new OAuth client.
    pub fn new(config: LoginConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Get the login config.
    pub fn config(&self) -> &LoginConfig {
        &self.config
    }

    /// Request a token with the configured grant.
    #[instrument(skip(self), fields(login_url = %self.config.login_url))]
    pub async fn request_token(&self) -> Result<TokenResponse> {
        let body = serde_urlencoded::to_string(self.config.grant_params()?)?;

        let response = self
            .http_client
            .post(format!("{}/services/oauth2/token", self.config.login_url))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<OAuthErrorResponse>(&text) {
                Ok(error) => Error::new(ErrorKind::OAuth {
                    error: error.error,
                    description: error.error_description,
                }),
                Err(_) => Error::new(ErrorKind::Http(format!(
                    "token endpoint returned status {}",
                    status
                ))),
            });
        }

        let token: TokenResponse = response.json().await?;
        Ok(token)
    }

    /// Revoke an access or refresh token.
    ///
    /// The token parameter is not logged to prevent credential exposure.
    #[instrument(skip(self, token))]
    pub async fn revoke_token(&self, token: &str) -> Result<()> {
        let body = serde_urlencoded::to_string([("token", token)])?;

        let response = self
            .http_client
            .post(format!("{}/services/oauth2/revoke", self.config.login_url))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::new(ErrorKind::OAuth {
                error: "revoke_failed".to_string(),
                description: "Failed to revoke token".to_string(),
            }));
        }

        Ok(())
    }
}
