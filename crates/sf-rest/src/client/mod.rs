//! Salesforce REST API client.
//!
//! Wraps a [`ClientBase`] configured with [`RestConventions`]. Every
//! operation builds one exchange, executes it and decodes the JSON body.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use sf_exchange_client::{
    ClientBase, Exchange, RestConventions, Result, Session, Transport, DEFAULT_API_VERSION,
};

mod describe;
mod query;
mod sobject;

/// Salesforce REST API client.
///
/// # Example
///
/// ```rust,ignore
/// use sf_exchange_rest::RestClient;
///
/// let client = RestClient::new(session, transport).await?;
///
/// let accounts = client
///     .query::<serde_json::Value>("SELECT Id, Name FROM Account")
///     .await?;
///
/// let created = client
///     .create_sobject("Account", &serde_json::json!({"Name": "New Account"}))
///     .await?;
/// client.delete_sobject("Account", &created.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct RestClient {
    base: ClientBase,
}

impl RestClient {
    /// Create a client for the default API version, logging in if the
    /// session holds no token yet.
    pub async fn new(session: Arc<dyn Session>, transport: Arc<dyn Transport>) -> Result<Self> {
        Self::with_version(DEFAULT_API_VERSION, session, transport).await
    }

    /// Create a client for a specific API version, e.g. `"61.0"`.
    pub async fn with_version(
        version: impl AsRef<str>,
        session: Arc<dyn Session>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let base = ClientBase::new(version, session, transport, Arc::new(RestConventions)).await?;
        Ok(Self { base })
    }

    /// Wrap an existing base client.
    pub fn from_base(base: ClientBase) -> Self {
        Self { base }
    }

    /// The underlying base client.
    pub fn inner(&self) -> &ClientBase {
        &self.base
    }

    /// Mutable access, e.g. to push a refreshed token.
    pub fn inner_mut(&mut self) -> &mut ClientBase {
        &mut self.base
    }

    /// Get the API version.
    pub fn api_version(&self) -> &str {
        self.base.version()
    }

    /// Get the instance URL.
    pub fn instance_url(&self) -> &str {
        self.base.instance_url()
    }

    async fn fetch_json<T: DeserializeOwned>(&self, exchange: Exchange) -> Result<T> {
        self.base.execute(exchange).await?.json()
    }

    async fn fetch_empty(&self, exchange: Exchange) -> Result<()> {
        self.base.execute(exchange).await.map(|_| ())
    }
}

/// `sobjects/{name}/` with the name percent-encoded.
fn sobject_path(sobject: &str) -> String {
    format!("sobjects/{}/", urlencoding::encode(sobject))
}

/// `sobjects/{name}/{id}` with both segments percent-encoded.
fn record_path(sobject: &str, id: &str) -> String {
    format!(
        "sobjects/{}/{}",
        urlencoding::encode(sobject),
        urlencoding::encode(id)
    )
}
