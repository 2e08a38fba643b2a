//! # sf-rest
//!
//! Salesforce REST API client on top of `sf-exchange-client`.
//!
//! ## Features
//!
//! - **Versions and resources** - discover what the instance serves
//! - **Describe** - global object list, per-object summary and full describe
//! - **SObject CRUD** - get, create, update and delete single records
//! - **SOQL Query** - first page plus `query_more` pagination
//!
//! Failures surface as [`sf_exchange_client::Error`]. Non-2xx responses
//! carry the parsed REST error body as their source.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sf_exchange_auth::SalesforceSession;
//! use sf_exchange_client::HttpTransport;
//! use sf_exchange_rest::RestClient;
//!
//! let session = Arc::new(SalesforceSession::from_env()?);
//! let transport = Arc::new(HttpTransport::default_transport()?);
//! let client = RestClient::new(session, transport).await?;
//!
//! let page = client
//!     .query::<serde_json::Value>("SELECT Id, Name FROM Account LIMIT 10")
//!     .await?;
//! ```

mod client;
mod describe;
mod sobject;

pub use client::RestClient;

pub use describe::{
    ApiVersion, ChildRelationship, DescribeGlobalResult, DescribeSObjectResult, FieldDescribe,
    SObjectBasicInfo, SObjectSummary,
};

pub use sobject::{CreateResult, QueryResult, SalesforceError};

// Re-export sf-client types that users might need
pub use sf_exchange_client::{ClientConfig, ClientConfigBuilder, Error, ErrorKind, Result};
