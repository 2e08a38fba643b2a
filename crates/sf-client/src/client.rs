//! Base client: token cache, exchange construction and dispatch.

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{debug, info, instrument};

use crate::conventions::ApiConventions;
use crate::dispatch::{ResponseCallback, ResponseListener};
use crate::error::{Error, ErrorKind, Result};
use crate::exchange::{Exchange, RequestMethod};
use crate::response::ResponseStream;
use crate::session::Session;
use crate::transport::{Rejected, Transport};

/// Base for API-specific Salesforce clients.
///
/// Holds a local copy of the session's access token and instance URL, taken
/// at construction. The copy is not refreshed when the session logs in
/// again; push new values with [`set_access_token`](Self::set_access_token)
/// and [`set_instance_url`](Self::set_instance_url). Exchanges already built
/// keep the token they were built with.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use sf_exchange_client::{ClientBase, HttpTransport, RestConventions, RequestMethod};
///
/// let client = ClientBase::new(
///     "62.0",
///     session,
///     Arc::new(HttpTransport::default_transport()?),
///     Arc::new(RestConventions),
/// )
/// .await?;
///
/// let exchange = client.build_exchange(RequestMethod::Get, "/services/data");
/// client.dispatch(exchange, |result| match result {
///     Ok(body) => println!("{} bytes", body.len()),
///     Err(err) => eprintln!("{err}"),
/// });
/// ```
#[derive(Clone)]
pub struct ClientBase {
    version: String,
    session: Arc<dyn Session>,
    transport: Arc<dyn Transport>,
    conventions: Arc<dyn ApiConventions>,
    access_token: String,
    instance_url: String,
}

impl std::fmt::Debug for ClientBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBase")
            .field("version", &self.version)
            .field("instance_url", &self.instance_url)
            .field("access_token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl ClientBase {
    /// Create a client, logging in through the session if it has no token yet.
    ///
    /// Does not return until the login finishes, so no exchange can be built
    /// before a token exists. A failed login is the only error returned here.
    #[instrument(skip_all, fields(version = %version.as_ref()))]
    pub async fn new(
        version: impl AsRef<str>,
        session: Arc<dyn Session>,
        transport: Arc<dyn Transport>,
        conventions: Arc<dyn ApiConventions>,
    ) -> Result<Self> {
        let access_token = match session.access_token() {
            Some(token) => token,
            None => {
                info!("No cached access token, logging in");
                session.login(None).await?
            }
        };

        let instance_url = session.instance_url().ok_or_else(|| {
            Error::new(ErrorKind::Authentication(
                "session has no instance URL after login".to_string(),
            ))
        })?;

        Ok(Self {
            version: version.as_ref().to_string(),
            session,
            transport,
            conventions,
            access_token,
            instance_url: instance_url.trim_end_matches('/').to_string(),
        })
    }

    /// The API version, e.g. `"62.0"`.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The cached access token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// The cached instance URL.
    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    /// The shared session.
    pub fn session(&self) -> &Arc<dyn Session> {
        &self.session
    }

    /// Replace the cached access token.
    pub fn set_access_token(&mut self, access_token: impl Into<String>) {
        self.access_token = access_token.into();
    }

    /// Replace the cached instance URL.
    pub fn set_instance_url(&mut self, instance_url: impl Into<String>) {
        self.instance_url = instance_url.into().trim_end_matches('/').to_string();
    }

    /// Build the full URL for a path.
    ///
    /// Absolute URLs pass through. Anything else is joined to the instance URL.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.instance_url, path)
        } else {
            format!("{}/{}", self.instance_url, path)
        }
    }

    /// Build the versioned REST data URL for a path.
    ///
    /// Example: `data_url("sobjects/Account")` -> `/services/data/v62.0/sobjects/Account`
    pub fn data_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!(
            "{}/services/data/v{}/{}",
            self.instance_url, self.version, path
        )
    }

    /// Build the Bulk API URL for a path.
    ///
    /// Example: `async_url("job")` -> `/services/async/62.0/job`
    pub fn async_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!(
            "{}/services/async/{}/{}",
            self.instance_url, self.version, path
        )
    }

    /// Build an exchange carrying the cached token. No I/O.
    pub fn build_exchange(&self, method: RequestMethod, url: &str) -> Exchange {
        Exchange::new(
            method,
            self.url(url),
            Some(self.access_token.clone()),
            Arc::clone(&self.conventions),
            Arc::clone(&self.session),
        )
    }

    /// Build a GET exchange.
    pub fn get(&self, url: &str) -> Exchange {
        self.build_exchange(RequestMethod::Get, url)
    }

    /// Build a POST exchange.
    pub fn post(&self, url: &str) -> Exchange {
        self.build_exchange(RequestMethod::Post, url)
    }

    /// Build a PATCH exchange.
    pub fn patch(&self, url: &str) -> Exchange {
        self.build_exchange(RequestMethod::Patch, url)
    }

    /// Build a PUT exchange.
    pub fn put(&self, url: &str) -> Exchange {
        self.build_exchange(RequestMethod::Put, url)
    }

    /// Build a DELETE exchange.
    pub fn delete(&self, url: &str) -> Exchange {
        self.build_exchange(RequestMethod::Delete, url)
    }

    /// Hand an exchange to the transport and call `callback` exactly once
    /// with its outcome.
    ///
    /// If the transport refuses the exchange outright, `callback` runs before
    /// this returns. Otherwise it runs on the transport's task, or with an
    /// [`ErrorKind::UnexpectedException`] if the transport drops the exchange
    /// without finishing it. Non-2xx
    /// responses arrive as [`ErrorKind::HttpStatus`] with the parsed
    /// [`ApiError`](crate::ApiError) as source.
    #[instrument(skip_all, fields(method = %exchange.method(), url = %exchange.url()))]
    pub fn dispatch<F>(&self, exchange: Exchange, callback: F)
    where
        F: FnOnce(Result<ResponseStream>) + Send + 'static,
    {
        let callback: ResponseCallback = Box::new(callback);
        let listener = ResponseListener::new(callback, Arc::clone(&self.conventions));

        debug!("Dispatching exchange");
        if let Err(Rejected { cause, mut listener }) = self.transport.send(exchange, Box::new(listener)) {
            listener.on_send_failed(cause);
        }
    }

    /// Dispatch and wait for the outcome.
    pub async fn execute(&self, exchange: Exchange) -> Result<ResponseStream> {
        let (tx, rx) = oneshot::channel();
        self.dispatch(exchange, move |result| {
            let _ = tx.send(result);
        });

        rx.await.map_err(|e| {
            Error::with_source(
                ErrorKind::UnexpectedException("transport dropped the exchange".to_string()),
                e,
            )
        })?
    }
}
