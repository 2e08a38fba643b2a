//! Per-request listener that turns transport events into exactly one
//! completion callback.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::conventions::ApiConventions;
use crate::error::{BoxError, Error, ErrorKind, Result};
use crate::response::{CompletedExchange, ResponseStream};
use crate::transport::ExchangeListener;

/// Completion callback for one exchange. Receives the buffered body or the
/// failure, never both.
pub type ResponseCallback = Box<dyn FnOnce(Result<ResponseStream>) + Send + 'static>;

/// Listener registered on every dispatched exchange.
///
/// Owns the callback until the first terminal event takes it. Anything the
/// transport reports afterwards is logged and dropped.
pub(crate) struct ResponseListener {
    callback: Option<ResponseCallback>,
    conventions: Arc<dyn ApiConventions>,
    reason: Option<String>,
}

impl ResponseListener {
    pub(crate) fn new(callback: ResponseCallback, conventions: Arc<dyn ApiConventions>) -> Self {
        Self {
            callback: Some(callback),
            conventions,
            reason: None,
        }
    }

    fn complete(&mut self, result: Result<ResponseStream>) {
        match self.callback.take() {
            Some(callback) => callback(result),
            None => warn!("Ignoring terminal event for an exchange that already completed"),
        }
    }

    fn status_error(&self, response: &CompletedExchange) -> Error {
        let status = response.status();
        let message = format!(
            "Error {{{}:{}}} executing {{{}:{}}}",
            status,
            self.reason.as_deref().unwrap_or_default(),
            response.method(),
            response.request_uri(),
        );
        let kind = ErrorKind::HttpStatus { status, message };

        match self.conventions.parse_error_body(response) {
            Some(cause) => Error::with_source(kind, cause),
            None => Error::new(kind),
        }
    }
}

/// A listener dropped before any terminal event still completes the
/// exchange, e.g. when the runtime shuts down mid-flight or a transport
/// discards an exchange it accepted.
impl Drop for ResponseListener {
    fn drop(&mut self) {
        if self.callback.is_some() {
            warn!("Exchange dropped before a terminal event");
            self.complete(Err(Error::new(ErrorKind::UnexpectedException(
                "exchange dropped before completion".to_string(),
            ))));
        }
    }
}

impl ExchangeListener for ResponseListener {
    fn on_connection_failed(&mut self, cause: BoxError) {
        let kind = ErrorKind::Connection(cause.to_string());
        self.complete(Err(Error::with_boxed_source(kind, cause)));
    }

    fn on_exception(&mut self, cause: BoxError) {
        let kind = ErrorKind::UnexpectedException(cause.to_string());
        self.complete(Err(Error::with_boxed_source(kind, cause)));
    }

    fn on_expire(&mut self) {
        self.complete(Err(Error::new(ErrorKind::RequestExpired)));
    }

    fn on_response_status(&mut self, version: &str, status: u16, reason: &[u8]) {
        let reason = decode_latin1(reason);
        debug!(version, status, reason = %reason, "Response status");
        self.reason = Some(reason);
    }

    fn on_response_complete(&mut self, response: CompletedExchange) {
        if response.is_success() {
            self.complete(Ok(ResponseStream::new(response.into_body())));
        } else {
            let err = self.status_error(&response);
            self.complete(Err(err));
        }
    }

    fn on_send_failed(&mut self, cause: BoxError) {
        let kind = ErrorKind::Send(cause.to_string());
        self.complete(Err(Error::with_boxed_source(kind, cause)));
    }
}

/// Decode ISO-8859-1 bytes. Every byte maps to the code point of the same value.
pub(crate) fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
