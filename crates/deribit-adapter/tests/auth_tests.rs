/*
[INPUT]:  Mock authentication responses
[OUTPUT]: Test results for auth flow
[POS]:    Integration tests - authentication
[UPDATE]: When auth endpoints or flow changes
*/

mod common;

use std::sync::Arc;

use common::{LogBuffer, capture_logs, client_for, setup_mock_server, test_credentials};
use deribit_adapter::{AuthFailure, AuthManager, AuthScope, DeribitError, ErrorKind};
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_authenticate_yields_token() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/public/auth"))
        .and(body_partial_json(json!({
            "jsonrpc": "2.0",
            "method": "public/auth",
            "params": {
                "grant_type": "client_credentials",
                "client_id": "test-client-id",
                "client_secret": "test-client-secret",
                "scope": "session:apiconsole expires:2592000"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "result": {"access_token": "T", "expires_in": 2592000, "token_type": "bearer"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth_manager = AuthManager::new(Arc::new(client_for(&server)));
    let session = assert_ok!(auth_manager.authenticate(&test_credentials()).await);
    assert_eq!(session.access_token(), "T");

    let requests = server.received_requests().await.expect("recorded requests");
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_custom_scope_is_sent() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/public/auth"))
        .and(body_partial_json(json!({"params": {"scope": "session:bot expires:60"}})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"result": {"access_token": "T2"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let auth_manager = AuthManager::with_scope(
        Arc::new(client_for(&server)),
        AuthScope {
            session_name: "bot".to_string(),
            expires_seconds: 60,
        },
    );
    let session = assert_ok!(auth_manager.authenticate(&test_credentials()).await);
    assert_eq!(session.access_token(), "T2");
}

#[tokio::test]
async fn test_empty_result_is_rejected() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/public/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {}})))
        .mount(&server)
        .await;

    let auth_manager = AuthManager::new(Arc::new(client_for(&server)));
    let err = auth_manager.authenticate(&test_credentials()).await.unwrap_err();
    assert!(matches!(err, DeribitError::Auth(AuthFailure::Rejected { .. })));
    assert_eq!(err.kind(), ErrorKind::AuthRejected);
}

#[tokio::test]
async fn test_error_response_is_rejected() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/public/auth"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "jsonrpc": "2.0",
            "error": {"code": 13004, "message": "invalid_credentials"}
        })))
        .mount(&server)
        .await;

    let auth_manager = AuthManager::new(Arc::new(client_for(&server)));
    let err = auth_manager.authenticate(&test_credentials()).await.unwrap_err();
    assert!(err.is_auth_error());
    assert_eq!(err.kind(), ErrorKind::AuthRejected);
    assert!(err.to_string().contains("invalid_credentials"));
}

#[tokio::test]
async fn test_malformed_response_is_auth_failure_of_parse_kind() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/public/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"result\": "))
        .mount(&server)
        .await;

    let auth_manager = AuthManager::new(Arc::new(client_for(&server)));
    let err = auth_manager.authenticate(&test_credentials()).await.unwrap_err();
    assert!(matches!(
        err,
        DeribitError::Auth(AuthFailure::MalformedResponse(_))
    ));
    assert_eq!(err.kind(), ErrorKind::ParseFailure);
}

#[tokio::test]
async fn test_debug_logs_never_contain_tokens() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/public/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "result": {"access_token": "SECRET-ACCESS", "refresh_token": "SECRET-REFRESH"}
        })))
        .mount(&server)
        .await;

    let logs = LogBuffer::default();
    let _guard = capture_logs(&logs);

    let auth_manager = AuthManager::new(Arc::new(client_for(&server)));
    let session = assert_ok!(auth_manager.authenticate(&test_credentials()).await);
    assert_eq!(session.access_token(), "SECRET-ACCESS");

    let output = logs.contents();
    assert!(output.contains("rpc response received"), "logs: {output}");
    assert!(output.contains("session established"), "logs: {output}");
    assert!(!output.contains("SECRET-ACCESS"), "logs: {output}");
    assert!(!output.contains("SECRET-REFRESH"), "logs: {output}");
    assert!(!output.contains("test-client-secret"), "logs: {output}");
}
