//! # sf-client
//!
//! Core exchange client for Salesforce APIs.
//!
//! One outbound call is an [`Exchange`]. A [`ClientBase`] builds it with the
//! cached access token, hands it to a [`Transport`] together with a listener,
//! and calls the caller's completion callback exactly once with either the
//! buffered response body or a typed [`Error`].
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              API clients (sf-rest, bulk, ...)               │
//! │  - pick ApiConventions (token placement, error bodies)      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       ClientBase                            │
//! │  - caches token + instance URL from the Session             │
//! │  - build_exchange / dispatch / execute                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ Exchange + ResponseListener
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Transport (HttpTransport)                   │
//! │  - authenticates the exchange, runs it on tokio             │
//! │  - reports status / complete / expire / failure events      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sf_exchange_client::{ClientBase, HttpTransport, RestConventions};
//!
//! let client = ClientBase::new(
//!     sf_exchange_client::DEFAULT_API_VERSION,
//!     session,
//!     Arc::new(HttpTransport::default_transport()?),
//!     Arc::new(RestConventions),
//! )
//! .await?;
//!
//! let body = client.execute(client.get(&client.data_url("limits"))).await?;
//! let limits: serde_json::Value = body.json()?;
//! ```

mod client;
mod config;
mod conventions;
mod dispatch;
mod error;
mod exchange;
mod response;
mod session;
mod transport;

#[cfg(test)]
mod test_support;

pub use client::ClientBase;
pub use config::{
    ClientConfig, ClientConfigBuilder, DEFAULT_CONNECT_TIMEOUT, DEFAULT_EXCHANGE_TIMEOUT,
};
pub use conventions::{ApiConventions, ApiError, BulkConventions, RestConventions};
pub use dispatch::ResponseCallback;
pub use error::{BoxError, Error, ErrorKind, Result};
pub use exchange::{Exchange, RequestBody, RequestMethod};
pub use response::{CompletedExchange, ResponseStream};
pub use session::Session;
pub use transport::{ExchangeListener, HttpTransport, Rejected, Transport};

/// Default Salesforce API version
pub const DEFAULT_API_VERSION: &str = "62.0";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("sf-exchange/", env!("CARGO_PKG_VERSION"));
