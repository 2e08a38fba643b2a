//! REST client flows from login to decoded records.

use super::common::{mock_org, session, transport, LOGIN_TOKEN};
use sf_exchange::{ErrorKind, RestClient, Session};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_login_then_query_all_pages() {
    let server = mock_org().await;
    let bearer = format!("Bearer {}", LOGIN_TOKEN);

    Mock::given(method("GET"))
        .and(path("/services/data/v62.0/query/"))
        .and(query_param("q", "SELECT Id, Name FROM Account"))
        .and(header("Authorization", bearer.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "totalSize": 2,
            "done": false,
            "nextRecordsUrl": "/services/data/v62.0/query/01gD0000002HU6KIAW-1",
            "records": [{"Id": "001a", "Name": "Acme"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/services/data/v62.0/query/01gD0000002HU6KIAW-1"))
        .and(header("Authorization", bearer.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "totalSize": 2,
            "done": true,
            "records": [{"Id": "001b", "Name": "Globex"}]
        })))
        .mount(&server)
        .await;

    let client = RestClient::new(session(&server), transport())
        .await
        .expect("client should log in");
    assert_eq!(client.inner().access_token(), LOGIN_TOKEN);

    let mut names = Vec::new();
    let mut page = client
        .query::<serde_json::Value>("SELECT Id, Name FROM Account")
        .await
        .expect("first page");
    loop {
        names.extend(page.records.iter().map(|r| r["Name"].as_str().unwrap_or_default().to_string()));
        match page.next_records_url.take() {
            Some(next) if !page.done => {
                page = client.query_more(&next).await.expect("next page");
            }
            _ => break,
        }
    }

    assert_eq!(names, vec!["Acme", "Globex"]);
}

#[tokio::test]
async fn test_expired_session_then_refreshed_token() {
    let server = mock_org().await;

    Mock::given(method("GET"))
        .and(path("/services/data/v62.0/sobjects/Account/001a"))
        .and(header("Authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!([{
            "message": "Session expired or invalid",
            "errorCode": "INVALID_SESSION_ID"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/services/data/v62.0/sobjects/Account/001a"))
        .and(header("Authorization", format!("Bearer {}", LOGIN_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Id": "001a",
            "Name": "Acme"
        })))
        .mount(&server)
        .await;

    let session = session(&server);
    let mut client = RestClient::new(session.clone(), transport()).await.unwrap();
    client.inner_mut().set_access_token("stale");

    let err = client
        .get_sobject::<serde_json::Value>("Account", "001a", &[])
        .await
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::HttpStatus { status: 401, .. }));
    assert_eq!(
        err.to_string(),
        "Error {401:Unauthorized} executing {GET:/services/data/v62.0/sobjects/Account/001a}"
    );
    assert_eq!(err.api_error().unwrap().error_code, "INVALID_SESSION_ID");

    let fresh = session.login(Some("stale")).await.unwrap();
    client.inner_mut().set_access_token(fresh);

    let record: serde_json::Value = client
        .get_sobject("Account", "001a", &[])
        .await
        .expect("refreshed token should be accepted");
    assert_eq!(record["Name"], "Acme");
}

#[tokio::test]
async fn test_unreachable_instance_is_connection_error() {
    let server = mock_org().await;
    let client = RestClient::new(session(&server), transport()).await.unwrap();

    let mut base = client.inner().clone();
    base.set_instance_url("http://127.0.0.1:1");
    let client = RestClient::from_base(base);

    let err = client.versions().await.unwrap_err();
    assert!(
        matches!(err.kind, ErrorKind::Connection(_)),
        "unexpected error: {err:?}"
    );
}
