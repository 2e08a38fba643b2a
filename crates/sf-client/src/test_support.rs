//! In-memory session and transport for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use bytes::Bytes;
use futures::future::BoxFuture;

use crate::error::{Error, ErrorKind, Result};
use crate::exchange::Exchange;
use crate::response::CompletedExchange;
use crate::session::Session;
use crate::transport::{ExchangeListener, Rejected, Transport};

const INSTANCE_URL: &str = "https://na1.salesforce.com";

/// Session with a fixed login outcome.
pub(crate) struct StaticSession {
    token: Mutex<Option<String>>,
    instance_url: Mutex<Option<String>>,
    login_result: Option<String>,
    login_calls: AtomicUsize,
}

impl StaticSession {
    /// Already logged in with `token`.
    pub(crate) fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
            instance_url: Mutex::new(Some(INSTANCE_URL.to_string())),
            login_result: Some(token.to_string()),
            login_calls: AtomicUsize::new(0),
        }
    }

    /// No token or instance URL until `login` returns `token`.
    pub(crate) fn logged_out(token: &str) -> Self {
        Self {
            token: Mutex::new(None),
            instance_url: Mutex::new(None),
            login_result: Some(token.to_string()),
            login_calls: AtomicUsize::new(0),
        }
    }

    /// No token, and every login fails.
    pub(crate) fn failing_login() -> Self {
        Self {
            token: Mutex::new(None),
            instance_url: Mutex::new(None),
            login_result: None,
            login_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }
}

impl Session for StaticSession {
    fn access_token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn login<'a>(&'a self, _current_token: Option<&'a str>) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            self.login_calls.fetch_add(1, Ordering::SeqCst);
            let token = self.login_result.clone().ok_or_else(|| {
                Error::new(ErrorKind::Authentication("invalid_grant".to_string()))
            })?;
            *self.token.lock().unwrap() = Some(token.clone());
            *self.instance_url.lock().unwrap() = Some(INSTANCE_URL.to_string());
            Ok(token)
        })
    }

    fn instance_url(&self) -> Option<String> {
        self.instance_url.lock().unwrap().clone()
    }
}

/// What a [`ScriptedTransport`] does with every exchange.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Script {
    ConnectionFailed,
    Exception,
    Expire,
    Respond(u16, &'static str),
    Reject,
    /// Accepts the exchange, then discards it without any event.
    Discard,
    /// Misbehaving transport: two terminal events.
    DoubleTerminal,
}

/// Transport that replays a script synchronously inside `send`.
pub(crate) struct ScriptedTransport {
    script: Script,
    delivered: AtomicUsize,
}

impl ScriptedTransport {
    pub(crate) fn new(script: Script) -> Self {
        Self {
            script,
            delivered: AtomicUsize::new(0),
        }
    }

    pub(crate) fn events_delivered(&self) -> usize {
        self.delivered.load(Ordering::SeqCst)
    }

    fn complete(exchange: &Exchange, status: u16, body: &'static str) -> CompletedExchange {
        CompletedExchange::new(
            exchange.method(),
            exchange.url().to_string(),
            status,
            Vec::new(),
            Bytes::from_static(body.as_bytes()),
        )
    }
}

impl Transport for ScriptedTransport {
    fn send(
        &self,
        mut exchange: Exchange,
        mut listener: Box<dyn ExchangeListener>,
    ) -> std::result::Result<(), Rejected> {
        exchange.authenticate();

        let events = match self.script {
            Script::ConnectionFailed => {
                listener.on_connection_failed("connection refused".into());
                1
            }
            Script::Exception => {
                listener.on_exception("connection reset".into());
                1
            }
            Script::Expire => {
                listener.on_expire();
                1
            }
            Script::Respond(status, body) => {
                listener.on_response_status("HTTP/1.1", status, b"Scripted");
                listener.on_response_complete(Self::complete(&exchange, status, body));
                2
            }
            Script::Reject => {
                return Err(Rejected {
                    cause: "transport closed".into(),
                    listener,
                })
            }
            Script::Discard => {
                drop(listener);
                0
            }
            Script::DoubleTerminal => {
                listener.on_expire();
                listener.on_response_complete(Self::complete(&exchange, 200, "{}"));
                2
            }
        };

        self.delivered.fetch_add(events, Ordering::SeqCst);
        Ok(())
    }
}
