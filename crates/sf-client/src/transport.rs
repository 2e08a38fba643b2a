//! Transport boundary and the reqwest-backed transport.
//!
//! A transport takes an [`Exchange`] plus an [`ExchangeListener`] and runs the
//! exchange asynchronously, reporting its lifecycle to the listener. Events
//! arrive in this order and end with exactly one terminal event:
//!
//! ```text
//! send ─┬─ on_connection_failed            (terminal)
//!       ├─ on_exception                    (terminal)
//!       ├─ on_expire                       (terminal)
//!       └─ on_response_status ─┬─ on_response_complete (terminal)
//!                              ├─ on_exception         (terminal)
//!                              └─ on_expire            (terminal)
//! ```
//!
//! If the transport cannot even start the exchange, `send` returns
//! [`Rejected`] carrying the untouched listener and no event is delivered.

use bytes::Bytes;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{BoxError, Error, ErrorKind, Result};
use crate::exchange::{Exchange, RequestBody, RequestMethod};
use crate::response::CompletedExchange;

/// Receives lifecycle events for one exchange.
pub trait ExchangeListener: Send {
    /// The connection could not be established or was lost. Terminal.
    fn on_connection_failed(&mut self, cause: BoxError);

    /// The transport failed while the exchange was in flight. Terminal.
    fn on_exception(&mut self, cause: BoxError);

    /// The exchange timed out. Terminal.
    fn on_expire(&mut self);

    /// The status line arrived. `reason` holds the raw reason-phrase bytes.
    fn on_response_status(&mut self, version: &str, status: u16, reason: &[u8]);

    /// The whole response has been read. Terminal.
    fn on_response_complete(&mut self, response: CompletedExchange);

    /// The transport refused the exchange before dispatching it.
    ///
    /// Called by the dispatcher on the listener handed back in [`Rejected`],
    /// never by a transport. Terminal.
    fn on_send_failed(&mut self, cause: BoxError);
}

/// A request the transport refused to start.
pub struct Rejected {
    /// Why the request was refused.
    pub cause: BoxError,
    /// The listener, returned without having received any event.
    pub listener: Box<dyn ExchangeListener>,
}

impl std::fmt::Debug for Rejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rejected")
            .field("cause", &self.cause)
            .finish_non_exhaustive()
    }
}

/// Runs exchanges asynchronously.
pub trait Transport: Send + Sync {
    /// Start `exchange`, reporting its lifecycle to `listener`.
    fn send(
        &self,
        exchange: Exchange,
        listener: Box<dyn ExchangeListener>,
    ) -> std::result::Result<(), Rejected>;
}

/// Transport backed by a pooled `reqwest::Client`, running each exchange on
/// the current tokio runtime.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .gzip(config.accept_compressed)
            .deflate(config.accept_compressed)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Create a new HTTP transport with default configuration.
    pub fn default_transport() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Get the transport configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Turn an authenticated exchange into a reqwest request.
    fn build_request(&self, exchange: &Exchange) -> std::result::Result<reqwest::Request, BoxError> {
        let mut url = url::Url::parse(exchange.url())?;
        if !exchange.query_params.is_empty() {
            url.query_pairs_mut().extend_pairs(&exchange.query_params);
        }

        let mut req = self.inner.request(exchange.method().to_reqwest(), url);

        for (name, value) in &exchange.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(ref body) = exchange.body {
            let bytes = match body {
                RequestBody::Json(value) => Bytes::from(serde_json::to_vec(value)?),
                RequestBody::Text(text) => Bytes::from(text.clone()),
                RequestBody::Bytes(bytes) => bytes.clone(),
                RequestBody::Form(data) => Bytes::from(serde_urlencoded::to_string(data)?),
            };
            req = req.body(bytes);
        }

        Ok(req.build()?)
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        mut exchange: Exchange,
        listener: Box<dyn ExchangeListener>,
    ) -> std::result::Result<(), Rejected> {
        exchange.authenticate();

        let request = match self.build_request(&exchange) {
            Ok(request) => request,
            Err(cause) => return Err(Rejected { cause, listener }),
        };

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                return Err(Rejected {
                    cause: Box::new(e),
                    listener,
                })
            }
        };

        if self.config.enable_tracing {
            debug!(
                method = %exchange.method(),
                url = %request.url(),
                "Sending request"
            );
        }

        let client = self.inner.clone();
        let enable_tracing = self.config.enable_tracing;
        runtime.spawn(run_exchange(
            client,
            request,
            exchange.method(),
            listener,
            enable_tracing,
        ));

        Ok(())
    }
}

/// Drive one exchange to its terminal event.
async fn run_exchange(
    client: reqwest::Client,
    request: reqwest::Request,
    method: RequestMethod,
    mut listener: Box<dyn ExchangeListener>,
    enable_tracing: bool,
) {
    let request_uri = request_uri(request.url());

    let response = match client.execute(request).await {
        Ok(response) => response,
        Err(err) => {
            report_failure(listener.as_mut(), err);
            return;
        }
    };

    let status = response.status();
    listener.on_response_status(
        &format!("{:?}", response.version()),
        status.as_u16(),
        reason_phrase(&response),
    );

    let headers: Vec<(String, String)> = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();

    let body = match response.bytes().await {
        Ok(body) => body,
        Err(err) => {
            report_failure(listener.as_mut(), err);
            return;
        }
    };

    if enable_tracing {
        if status.is_success() {
            debug!(status = status.as_u16(), content_length = body.len(), "Response received");
        } else {
            info!(status = status.as_u16(), content_length = body.len(), "Non-success response");
        }
    }

    listener.on_response_complete(CompletedExchange::new(
        method,
        request_uri,
        status.as_u16(),
        headers,
        body,
    ));
}

/// Reason phrase as sent on the wire.
///
/// hyper only records a reason phrase that differs from the canonical one;
/// otherwise the canonical phrase for the status is used.
fn reason_phrase(response: &reqwest::Response) -> &[u8] {
    match response.extensions().get::<hyper::ext::ReasonPhrase>() {
        Some(reason) => reason.as_bytes(),
        None => response
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .as_bytes(),
    }
}

fn report_failure(listener: &mut dyn ExchangeListener, err: reqwest::Error) {
    if err.is_timeout() {
        warn!("Exchange timed out");
        listener.on_expire();
    } else if err.is_connect() {
        warn!(error = %err, "Connection failed");
        listener.on_connection_failed(Box::new(err));
    } else {
        warn!(error = %err, "Exchange failed");
        listener.on_exception(Box::new(err));
    }
}

fn request_uri(url: &url::Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}
