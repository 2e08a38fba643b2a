//! # sf-exchange
//!
//! Asynchronous exchange client for Salesforce APIs.
//!
//! ## Security
//!
//! - Tokens and secrets are redacted in Debug output
//! - Tracing spans skip credential parameters
//! - Parsed error messages have token-looking values redacted
//!
//! ## Crates
//!
//! - **sf-exchange-client** - Exchanges, transport, dispatcher and typed errors
//! - **sf-exchange-auth** - OAuth 2.0 password and refresh-token session
//! - **sf-exchange-rest** - REST API: versions, describe, sObject CRUD, SOQL
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sf_exchange::{HttpTransport, RestClient, SalesforceSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Arc::new(SalesforceSession::from_env()?);
//!     let transport = Arc::new(HttpTransport::default_transport()?);
//!     let client = RestClient::new(session, transport).await?;
//!
//!     let page = client
//!         .query::<serde_json::Value>("SELECT Id, Name FROM Account LIMIT 10")
//!         .await?;
//!
//!     for account in page.records {
//!         println!("{}", account["Name"]);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "auth")]
pub use sf_exchange_auth as auth;
#[cfg(feature = "client")]
pub use sf_exchange_client as client;
#[cfg(feature = "rest")]
pub use sf_exchange_rest as rest;

// Re-export commonly used types at the top level
#[cfg(feature = "auth")]
pub use sf_exchange_auth::{LoginConfig, SalesforceSession};
#[cfg(feature = "client")]
pub use sf_exchange_client::{
    ClientBase, ClientConfig, Error, ErrorKind, HttpTransport, Result, Session, Transport,
};
#[cfg(feature = "rest")]
pub use sf_exchange_rest::RestClient;

/// Install a `tracing` subscriber that honours `RUST_LOG`.
///
/// Defaults to `info` when `RUST_LOG` is unset. Calling it twice is a no-op.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
