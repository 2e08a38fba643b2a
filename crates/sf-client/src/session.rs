//! Session boundary: the process-wide holder of the bearer token and
//! instance URL.

use futures::future::BoxFuture;

use crate::error::Result;

/// Supplies and refreshes the bearer token and instance URL.
///
/// A session is shared (`Arc`) by every client built against it. Clients
/// copy the token and URL when they are constructed and do not observe
/// later changes; push new values with
/// [`ClientBase::set_access_token`](crate::ClientBase::set_access_token).
pub trait Session: Send + Sync {
    /// Last known access token, if any.
    fn access_token(&self) -> Option<String>;

    /// Authenticate and return a fresh access token.
    ///
    /// `current_token` is the token the caller holds, if any, so an
    /// implementation can skip or revoke it. Fails with
    /// [`ErrorKind::Authentication`](crate::ErrorKind::Authentication).
    fn login<'a>(&'a self, current_token: Option<&'a str>) -> BoxFuture<'a, Result<String>>;

    /// Instance URL resolved by the last login, if any.
    fn instance_url(&self) -> Option<String>;
}
