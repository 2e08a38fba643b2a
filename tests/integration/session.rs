//! Session and base-client behaviour shared by every API family.

use std::sync::Arc;

use super::common::{mock_org, session, transport, LOGIN_TOKEN};
use sf_exchange::client::BulkConventions;
use sf_exchange::{ClientBase, ErrorKind, Session};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_failed_login_fails_construction() {
    let server = wiremock::MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/services/oauth2/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "authentication failure"
        })))
        .mount(&server)
        .await;

    let err = sf_exchange::RestClient::new(session(&server), transport())
        .await
        .unwrap_err();

    assert!(err.is_auth_error());
    assert!(err.to_string().contains("invalid_grant"));
}

#[tokio::test]
async fn test_bulk_exchange_uses_session_header_and_xml_errors() {
    let server = mock_org().await;

    Mock::given(method("GET"))
        .and(path("/services/async/62.0/job/750xx"))
        .and(header("X-SFDC-Session", LOGIN_TOKEN))
        .respond_with(
            ResponseTemplate::new(400)
                .insert_header("Content-Type", "application/xml")
                .set_body_string(
                    r#"<?xml version="1.0" encoding="UTF-8"?><error xmlns="http://www.force.com/2009/06/asyncapi/dataload"><exceptionCode>InvalidJob</exceptionCode><exceptionMessage>Invalid job id: 750xx</exceptionMessage></error>"#,
                ),
        )
        .mount(&server)
        .await;

    let session = session(&server);
    let client = ClientBase::new("62.0", session.clone(), transport(), Arc::new(BulkConventions))
        .await
        .unwrap();
    assert_eq!(session.access_token().as_deref(), Some(LOGIN_TOKEN));

    let err = client
        .execute(client.get(&client.async_url("job/750xx")))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(400));
    let api_error = err.api_error().unwrap();
    assert_eq!(api_error.error_code, "InvalidJob");
    assert_eq!(api_error.message, "Invalid job id: 750xx");
}

#[tokio::test]
async fn test_dispatch_callback_runs_once_per_exchange() {
    let server = mock_org().await;
    Mock::given(method("GET"))
        .and(path("/services/data/v62.0/limits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "DailyApiRequests": {"Max": 15000, "Remaining": 14998}
        })))
        .mount(&server)
        .await;

    let client = ClientBase::new(
        "62.0",
        session(&server),
        transport(),
        Arc::new(sf_exchange::client::RestConventions),
    )
    .await
    .unwrap();

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    for _ in 0..3 {
        let tx = tx.clone();
        client.dispatch(client.get(&client.data_url("limits")), move |result| {
            let _ = tx.send(result);
        });
    }
    drop(tx);

    let mut outcomes = Vec::new();
    while let Some(result) = rx.recv().await {
        outcomes.push(result);
    }

    assert_eq!(outcomes.len(), 3);
    for outcome in outcomes {
        let limits: serde_json::Value = outcome.unwrap().json().unwrap();
        assert_eq!(limits["DailyApiRequests"]["Max"], 15000);
    }
}

#[tokio::test]
async fn test_timeout_surfaces_as_request_expired() {
    let server = mock_org().await;
    Mock::given(method("GET"))
        .and(path("/services/data/v62.0/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(2)))
        .mount(&server)
        .await;

    let config = sf_exchange::ClientConfig::builder()
        .with_timeout(std::time::Duration::from_millis(200))
        .build();
    let transport = Arc::new(sf_exchange::HttpTransport::new(config).unwrap());
    let client = ClientBase::new(
        "62.0",
        session(&server),
        transport,
        Arc::new(sf_exchange::client::RestConventions),
    )
    .await
    .unwrap();

    let err = client
        .execute(client.get(&client.data_url("slow")))
        .await
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::RequestExpired));
}
