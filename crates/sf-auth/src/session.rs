//! OAuth-backed [`Session`] shared by every client of one org.

use std::sync::RwLock;

use futures::future::BoxFuture;
use sf_exchange_client::Session;
use tracing::{debug, info, instrument, warn};

use crate::error::{Error, ErrorKind, Result};
use crate::oauth::{LoginConfig, OAuthClient, TokenResponse};

#[derive(Default)]
struct SessionState {
    access_token: Option<String>,
    instance_url: Option<String>,
}

/// Holds the bearer token and instance URL obtained from the OAuth
/// token endpoint.
///
/// Logins are serialized by the state lock only while writing; two
/// concurrent logins both hit the token endpoint and the last one wins.
pub struct SalesforceSession {
    oauth: OAuthClient,
    state: RwLock<SessionState>,
}

impl std::fmt::Debug for SalesforceSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let logged_in = self
            .state
            .read()
            .map(|s| s.access_token.is_some())
            .unwrap_or(false);
        f.debug_struct("SalesforceSession")
            .field("oauth", &self.oauth)
            .field("logged_in", &logged_in)
            .finish()
    }
}

impl SalesforceSession {
    /// Create a logged-out session.
    pub fn new(config: LoginConfig) -> Self {
        Self {
            oauth: OAuthClient::new(config),
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Create a session from `SF_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(LoginConfig::from_env()?))
    }

    /// Create a session that already holds a token, e.g. one issued by
    /// the Salesforce CLI.
    pub fn with_token(
        config: LoginConfig,
        access_token: impl Into<String>,
        instance_url: impl Into<String>,
    ) -> Self {
        let session = Self::new(config);
        if let Ok(mut state) = session.state.write() {
            state.access_token = Some(access_token.into());
            state.instance_url = Some(instance_url.into());
        }
        session
    }

    /// Run the configured grant and store the result.
    #[instrument(skip(self, current_token))]
    pub async fn authenticate(&self, current_token: Option<&str>) -> Result<TokenResponse> {
        if current_token.is_some() {
            debug!("replacing current access token");
        }

        let token = self.oauth.request_token().await?;
        self.store(&token)?;
        info!(instance_url = %token.instance_url, "logged in");
        Ok(token)
    }

    /// Revoke the current token and forget it.
    ///
    /// State is cleared even when revocation fails.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        let token = {
            let mut state = self.write_state()?;
            state.instance_url = None;
            state.access_token.take()
        };

        match token {
            Some(token) => {
                let result = self.oauth.revoke_token(&token).await;
                if let Err(ref e) = result {
                    warn!(error = %e, "token revocation failed");
                }
                result
            }
            None => Ok(()),
        }
    }

    fn store(&self, token: &TokenResponse) -> Result<()> {
        let mut state = self.write_state()?;
        state.access_token = Some(token.access_token.clone());
        state.instance_url = Some(token.instance_url.trim_end_matches('/').to_string());
        Ok(())
    }

    fn write_state(&self) -> Result<std::sync::RwLockWriteGuard<'_, SessionState>> {
        self.state
            .write()
            .map_err(|_| Error::new(ErrorKind::Config("session state poisoned".to_string())))
    }
}

impl Session for SalesforceSession {
    fn access_token(&self) -> Option<String> {
        self.state.read().ok()?.access_token.clone()
    }

    fn login<'a>(
        &'a self,
        current_token: Option<&'a str>,
    ) -> BoxFuture<'a, sf_exchange_client::Result<String>> {
        Box::pin(async move {
            let token = self.authenticate(current_token).await?;
            Ok(token.access_token)
        })
    }

    fn instance_url(&self) -> Option<String> {
        self.state.read().ok()?.instance_url.clone()
    }
}
