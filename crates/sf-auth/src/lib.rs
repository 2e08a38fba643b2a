//! # sf-auth
//!
//! OAuth 2.0 login for sf-exchange clients.
//!
//! [`SalesforceSession`] implements [`sf_exchange_client::Session`]: it runs
//! the refresh-token grant when a refresh token is configured and the
//! username-password grant otherwise, then keeps the resulting access token
//! and instance URL for every client built on it.
//!
//! ## Security
//!
//! - Tokens and secrets are redacted in Debug output
//! - Tracing spans skip credential parameters
//! - HTTP error messages that mention tokens are replaced
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sf_exchange_auth::SalesforceSession;
//!
//! let session = Arc::new(SalesforceSession::from_env()?);
//! let client = sf_exchange_client::ClientBase::new(
//!     sf_exchange_client::DEFAULT_API_VERSION,
//!     session.clone(),
//!     transport,
//!     conventions,
//! )
//! .await?;
//! ```

mod error;
mod oauth;
mod session;

pub use error::{Error, ErrorKind, Result};
pub use oauth::{LoginConfig, OAuthClient, TokenResponse};
pub use session::SalesforceSession;

/// Default Salesforce login URL for production.
pub const PRODUCTION_LOGIN_URL: &str = "https://login.salesforce.com";

/// Default Salesforce login URL for sandbox.
pub const SANDBOX_LOGIN_URL: &str = "https://test.salesforce.com";
