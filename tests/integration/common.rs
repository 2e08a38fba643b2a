use std::sync::Arc;

use sf_exchange::{HttpTransport, LoginConfig, SalesforceSession};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LOGIN_TOKEN: &str = "00Dxx0000000001!login";

/// Mock org whose token endpoint hands out [`LOGIN_TOKEN`] and points the
/// instance URL back at the same server.
pub async fn mock_org() -> MockServer {
    sf_exchange::init_tracing();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/services/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": LOGIN_TOKEN,
            "instance_url": server.uri(),
            "token_type": "Bearer",
            "issued_at": "1700000000000"
        })))
        .mount(&server)
        .await;
    server
}

/// Logged-out session for the mock org using the password grant.
pub fn session(server: &MockServer) -> Arc<SalesforceSession> {
    Arc::new(SalesforceSession::new(
        LoginConfig::new(server.uri(), "consumer-key")
            .with_secret("consumer-secret")
            .with_password("integration@example.com", "password+securitytoken"),
    ))
}

pub fn transport() -> Arc<HttpTransport> {
    Arc::new(HttpTransport::default_transport().expect("transport should build"))
}
