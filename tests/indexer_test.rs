//! Integration tests for the indexing client using wiremock
//!
//! These validate the exact wire shape of a submission: plain-text body of
//! newline-joined URLs, site/token query parameters, and the fixed
//! identifying User-Agent.

use linkpush::error::SubmitError;
use linkpush::indexer::{IndexingApi, IndexingClient};
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_submit_sends_newline_joined_plain_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/urls"))
        .and(query_param("site", "www.example.com"))
        .and(query_param("token", "test-token"))
        .and(header("content-type", "text/plain"))
        .and(header("user-agent", "curl/7.12.1"))
        .and(body_string("http://a.com/1\nhttp://a.com/2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"remain":99998,"success":2}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = IndexingClient::with_endpoint(
        &format!("{}/urls", mock_server.uri()),
        "www.example.com",
        "test-token",
    )
    .unwrap();

    let urls = vec!["http://a.com/1".to_string(), "http://a.com/2".to_string()];
    let ack = client.submit(&urls).await.unwrap();

    assert_eq!(ack, r#"{"remain":99998,"success":2}"#);
}

#[tokio::test]
async fn test_api_error_carries_response_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/urls"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token is not valid"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = IndexingClient::with_endpoint(
        &format!("{}/urls", mock_server.uri()),
        "www.example.com",
        "bad-token",
    )
    .unwrap();

    let result = client.submit(&["http://a.com".to_string()]).await;

    match result {
        Err(SubmitError::Api(detail)) => assert_eq!(detail, "token is not valid"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

/// A server-side failure status is an error even when the body is empty
#[tokio::test]
async fn test_server_error_without_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/urls"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = IndexingClient::with_endpoint(
        &format!("{}/urls", mock_server.uri()),
        "www.example.com",
        "test-token",
    )
    .unwrap();

    let result = client.submit(&["http://a.com".to_string()]).await;
    assert!(matches!(result, Err(SubmitError::Api(_))));
}

#[tokio::test]
async fn test_transport_error_is_reported() {
    // Nothing listens on this port; the connection is refused
    let client =
        IndexingClient::with_endpoint("http://127.0.0.1:1/urls", "www.example.com", "test-token")
            .unwrap();

    let result = client.submit(&["http://a.com".to_string()]).await;
    assert!(matches!(result, Err(SubmitError::Http(_))));
}
