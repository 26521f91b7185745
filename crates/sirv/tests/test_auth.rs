//! Authentication flow against a mock server

mod common;

use secrecy::ExposeSecret;
use sirv::{AuthPayload, Client, Error};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_authenticate_sets_token_for_next_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/token"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "clientId": "client-1",
            "clientSecret": "s3cr3t"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(common::load_response_fixture("token")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/account/storage"))
        .and(header(
            "authorization",
            "Bearer eyJhbGciOiJIUzI1NiJ9.test-token",
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(common::load_response_fixture("storage")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = common::client(&mock_server);
    assert!(!client.session().is_authenticated());

    let token = client
        .authenticate(&AuthPayload::new("client-1", "s3cr3t"))
        .await
        .expect("authentication failed");

    assert_eq!(token.expires_in, 1200);
    assert_eq!(token.scope.len(), 4);
    assert_eq!(
        client.session().token().map(|t| t.expose_secret().to_string()),
        Some("eyJhbGciOiJIUzI1NiJ9.test-token".to_string())
    );

    let storage = client.account().storage().await.expect("storage failed");
    assert_eq!(storage.used, 42);

    mock_server.verify().await;
}

#[tokio::test]
async fn test_rejected_credentials_leave_session_unauthenticated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "statusCode": 401,
            "error": "Unauthorized",
            "message": "Invalid credentials"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = common::client(&mock_server);
    let err = client
        .authenticate(&AuthPayload::new("client-1", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "unexpected status code: 401. Message: Invalid credentials"
    );
    assert!(err.is_unauthorized());
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn test_reauthentication_replaces_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/token"))
        .and(body_json(serde_json::json!({"clientId": "a", "clientSecret": "1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "first", "expiresIn": 60, "scope": []
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v2/token"))
        .and(body_json(serde_json::json!({"clientId": "b", "clientSecret": "2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "second", "expiresIn": 60, "scope": []
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/account/users"))
        .and(header("authorization", "Bearer second"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = common::client(&mock_server);
    client.authenticate(&AuthPayload::new("a", "1")).await.unwrap();
    client.authenticate(&AuthPayload::new("b", "2")).await.unwrap();

    let users = client.account().users().await.unwrap();
    assert!(users.is_empty());

    mock_server.verify().await;
}

#[tokio::test]
async fn test_authenticate_with_configured_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/token"))
        .and(body_json(serde_json::json!({
            "clientId": "from-config",
            "clientSecret": "hidden"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(common::load_response_fixture("token")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = Client::builder()
        .base_url(common::base_url(&mock_server))
        .credentials("from-config", "hidden")
        .build()
        .unwrap();

    client.authenticate_with_config().await.unwrap();
    assert!(client.session().is_authenticated());

    mock_server.verify().await;
}

#[tokio::test]
async fn test_undecodable_token_response_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"token\": 42}"))
        .mount(&mock_server)
        .await;

    let mut client = common::client(&mock_server);
    let err = client
        .authenticate(&AuthPayload::new("client-1", "s3cr3t"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode(_)), "unexpected: {err:?}");
    assert!(!client.session().is_authenticated());
}
