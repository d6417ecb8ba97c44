//! Response validation tests.

use std::sync::Arc;

use contentapi::{
    ClientConfig, ContentClient, ContentEntity, ContentError, StaticToken, REMOTE_ERROR_FALLBACK,
    REMOTE_ERROR_PREFIX,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

type ValueClient = ContentClient<ContentEntity<serde_json::Value>>;

fn client(server: &MockServer) -> ValueClient {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let config = ClientConfig::new(&server.uri(), "blog", "articles").unwrap();
    ContentClient::new(
        config,
        Arc::new(StaticToken::new("test-token")),
        reqwest::Client::new(),
    )
}

#[tokio::test]
async fn test_error_body_is_carried_in_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/content/blog/articles/missing/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&server)
        .await;

    let err = client(&server).get("missing").await.unwrap_err();

    match &err {
        ContentError::RemoteApi {
            message,
            status_code,
        } => {
            assert!(message.contains("Not found"));
            assert!(message.starts_with(REMOTE_ERROR_PREFIX));
            assert_eq!(*status_code, Some(404));
        }
        other => panic!("expected RemoteApi, got {other:?}"),
    }
}

#[tokio::test]
async fn test_json_error_body_is_kept_verbatim() {
    let server = MockServer::start().await;
    let body = r#"{"message":"Validation failed","details":["title: Field is required."]}"#;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(400).set_body_string(body))
        .mount(&server)
        .await;

    let err = client(&server)
        .update_by_id("abc", &serde_json::json!({}))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), format!("{REMOTE_ERROR_PREFIX}{body}"));
    assert_eq!(err.status_code(), Some(400));
}

#[tokio::test]
async fn test_empty_error_body_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server).delete_by_id("abc").await.unwrap_err();

    assert_eq!(err.to_string(), REMOTE_ERROR_FALLBACK);
    assert_eq!(err.status_code(), Some(500));
}

#[tokio::test]
async fn test_whitespace_error_body_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(503).set_body_string("  \n "))
        .mount(&server)
        .await;

    let err = client(&server).publish_by_id("abc").await.unwrap_err();

    assert_eq!(err.to_string(), REMOTE_ERROR_FALLBACK);
}

#[tokio::test]
async fn test_undecodable_success_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = client(&server).get("abc").await.unwrap_err();

    assert!(matches!(err, ContentError::Parse(_)));
}

#[tokio::test]
async fn test_connection_failure_is_http_error() {
    // Nothing listens on port 1
    let config = ClientConfig::new("http://127.0.0.1:1", "blog", "articles").unwrap();
    let client: ValueClient = ContentClient::new(
        config,
        Arc::new(StaticToken::new("test-token")),
        reqwest::Client::new(),
    );

    let err = client.get("abc").await.unwrap_err();

    assert!(matches!(err, ContentError::Http(_)));
}

#[tokio::test]
async fn test_truncated_error_body_is_http_error() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    // Promises 100 bytes, sends 5, then hangs up
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let _ = socket
            .write_all(b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 100\r\n\r\nshort")
            .await;
        let _ = socket.shutdown().await;
    });

    let config = ClientConfig::new(&format!("http://{addr}"), "blog", "articles").unwrap();
    let client: ValueClient = ContentClient::new(
        config,
        Arc::new(StaticToken::new("test-token")),
        reqwest::Client::new(),
    );

    let err = client.get("abc").await.unwrap_err();

    assert!(matches!(err, ContentError::Http(_)), "got {err:?}");
}
