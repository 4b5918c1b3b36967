//! Contract Test: Vendor API Wire Shape
//!
//! This test verifies the exact requests the solver sends to the Domain
//! Offensive endpoint and how it interprets the answers.
//!
//! Constraints verified:
//! - One GET per call, query `[action=delete&]domain=..&token=..&value=..`
//! - A single trailing dot is stripped from the domain
//! - `present` never sends `action`, `cleanup` always does
//! - Only HTTP 200 with `{"success": true}` counts as success
//!
//! If this test fails, the solver is no longer wire compatible with the vendor.

mod common;

use common::*;
use dns01_core::{ChallengeRequest, Error, Solver};
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_success(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn present_sends_expected_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("domain", "_acme-challenge.example.com"))
        .and(query_param("token", TOKEN))
        .and(query_param("value", VALUE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let solver = solver_with(secret_store().await);
    assert_ok!(solver.present(&challenge(&api_url(&server))).await);

    assert_eq!(
        received_queries(&server).await,
        vec!["domain=_acme-challenge.example.com&token=abc&value=xyz"]
    );
}

#[tokio::test]
async fn cleanup_sends_action_delete() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("action", "delete"))
        .and(query_param("domain", "_acme-challenge.example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let solver = solver_with(secret_store().await);
    assert_ok!(solver.cleanup(&challenge(&api_url(&server))).await);

    assert_eq!(
        received_queries(&server).await,
        vec!["action=delete&domain=_acme-challenge.example.com&token=abc&value=xyz"]
    );
}

#[tokio::test]
async fn present_never_sends_action() {
    let server = MockServer::start().await;
    mount_success(&server).await;

    let solver = solver_with(secret_store().await);
    let request = challenge(&api_url(&server));

    // Interleave to make sure no state leaks from cleanup into present
    assert_ok!(solver.cleanup(&request).await);
    assert_ok!(solver.present(&request).await);
    assert_ok!(solver.present(&request).await);

    let queries = received_queries(&server).await;
    assert_eq!(queries.len(), 3);
    assert!(queries[0].starts_with("action=delete&"));
    assert!(!queries[1].contains("action="));
    assert!(!queries[2].contains("action="));
}

#[tokio::test]
async fn fqdn_without_trailing_dot_is_sent_unchanged() {
    let server = MockServer::start().await;
    mount_success(&server).await;

    let solver = solver_with(secret_store().await);
    let mut request = challenge(&api_url(&server));
    request.resolved_fqdn = "_acme-challenge.sub.example.org".to_string();

    assert_ok!(solver.present(&request).await);
    assert_eq!(
        received_queries(&server).await,
        vec!["domain=_acme-challenge.sub.example.org&token=abc&value=xyz"]
    );
}

#[tokio::test]
async fn values_are_form_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("value", "a+b/c=="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let solver = solver_with(secret_store().await);
    let mut request = challenge(&api_url(&server));
    request.key = "a+b/c==".to_string();

    assert_ok!(solver.present(&request).await);
}

#[tokio::test]
async fn success_false_is_an_error_despite_200() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":false}"#))
        .expect(1)
        .mount(&server)
        .await;

    let solver = solver_with(secret_store().await);
    let err = solver
        .present(&challenge(&api_url(&server)))
        .await
        .unwrap_err();

    match err {
        Error::ApiFailure { body } => assert_eq!(body, r#"{"success":false}"#),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn missing_success_field_is_a_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"message":"queued"}"#))
        .mount(&server)
        .await;

    let solver = solver_with(secret_store().await);
    let result = solver.cleanup(&challenge(&api_url(&server))).await;
    assert!(matches!(result, Err(Error::ApiFailure { .. })));
}

#[tokio::test]
async fn non_200_carries_status_and_body() {
    let server = MockServer::start().await;

    // Even a body claiming success does not rescue a non-200 status
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string(r#"{"success":true}"#))
        .expect(1)
        .mount(&server)
        .await;

    let solver = solver_with(secret_store().await);
    let err = solver
        .present(&challenge(&api_url(&server)))
        .await
        .unwrap_err();

    assert!(err.is_api_rejection());
    match err {
        Error::ApiStatus { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, r#"{"success":true}"#);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn other_2xx_is_not_accepted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let solver = solver_with(secret_store().await);
    let result = solver.present(&challenge(&api_url(&server))).await;
    assert!(matches!(result, Err(Error::ApiStatus { status: 204, .. })));
}

#[tokio::test]
async fn non_json_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let solver = solver_with(secret_store().await);
    let err = solver
        .present(&challenge(&api_url(&server)))
        .await
        .unwrap_err();

    match err {
        Error::ApiDecode { body, .. } => assert_eq!(body, "<html>maintenance</html>"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unreachable_endpoint_is_network_error() {
    // Nothing listens on the discard port
    let solver = solver_with(secret_store().await);
    let err = solver
        .present(&challenge("http://127.0.0.1:9/api/letsencrypt"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Network(_)));
    assert!(!err.to_string().contains(TOKEN));
}

#[tokio::test]
async fn missing_secret_key_makes_no_http_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(0)
        .mount(&server)
        .await;

    let solver = solver_with(secret_store().await);
    let request = ChallengeRequest::new(FQDN, VALUE, NAMESPACE).with_config(json!({
        "apiUrl": api_url(&server),
        "secretKeyRef": { "name": SECRET_NAME, "key": "api-key" }
    }));

    let result = solver.present(&request).await;
    assert!(matches!(result, Err(Error::SecretKeyNotFound { .. })));

    let result = solver.cleanup(&request).await;
    assert!(matches!(result, Err(Error::SecretKeyNotFound { .. })));
}

#[tokio::test]
async fn missing_secret_makes_no_http_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(0)
        .mount(&server)
        .await;

    let solver = solver_with(secret_store().await);
    let mut request = challenge(&api_url(&server));
    request.resource_namespace = "other-team".to_string();

    let result = solver.present(&request).await;
    assert!(matches!(result, Err(Error::SecretLookup { .. })));
}

#[tokio::test]
async fn empty_key_ref_makes_no_http_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(0)
        .mount(&server)
        .await;

    let solver = solver_with(secret_store().await);
    let request = ChallengeRequest::new(FQDN, VALUE, NAMESPACE)
        .with_config(json!({ "apiUrl": api_url(&server) }));

    let result = solver.present(&request).await;
    assert!(matches!(result, Err(Error::MissingCredentialKey)));
}

#[tokio::test]
async fn malformed_config_is_decode_error() {
    let solver = solver_with(secret_store().await);
    let request = ChallengeRequest::new(FQDN, VALUE, NAMESPACE)
        .with_config(json!({ "secretKeyRef": "do-credentials" }));

    let result = solver.present(&request).await;
    assert!(matches!(result, Err(Error::ConfigDecode(_))));
}
