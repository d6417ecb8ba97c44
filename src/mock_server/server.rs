//! Mock content API server.
//!
//! Provides an axum-based HTTP server that simulates the content API.

use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock content API server for testing.
///
/// The server runs in the background and can be used to test the content
/// client against a realistic API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL as the service URL of a `ClientConfig`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        scenario
            .items
            .into_iter()
            .fold(MockState::new(), |state, item| {
                state.with_item(&scenario.app, &scenario.schema, item)
            })
    }

    /// Create the axum router with all routes.
    pub fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Collection routes
            .route("/api/content/:app/:schema", get(handlers::list_content))
            .route("/api/content/:app/:schema/", get(handlers::list_content))
            // Item routes
            .route(
                "/api/content/:app/:schema/:id/",
                get(handlers::get_content)
                    .post(handlers::create_content)
                    .put(handlers::update_content)
                    .delete(handlers::delete_content),
            )
            // Lifecycle routes
            .route(
                "/api/content/:app/:schema/:id/:verb/",
                put(handlers::change_status),
            )
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::mock_server::fixtures::{MockItem, DEFAULT_APP, DEFAULT_SCHEMA};
    use crate::{ClientConfig, ContentClient, ContentError, ContentQuery, ContentStatus, StaticToken};

    fn client_for(server: &MockServer, token: &str) -> ContentClient<MockItem> {
        let config = ClientConfig::new(server.url(), DEFAULT_APP, DEFAULT_SCHEMA).unwrap();
        ContentClient::new(config, Arc::new(StaticToken::new(token)), reqwest::Client::new())
    }

    #[tokio::test]
    async fn test_server_starts_and_responds() {
        let server = MockServer::start().await;

        // Server should be accessible
        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/health", server.url()))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_router_without_network() {
        let app = MockServer::create_router(MockServer::default_state().shared());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/content/test-app/articles/welcome/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let item: MockItem = serde_json::from_slice(&body).unwrap();
        assert_eq!(item.status, ContentStatus::Published);
    }

    #[tokio::test]
    async fn test_get_item_with_content_client() {
        let server = MockServer::start().await;
        let client = client_for(&server, "test-token");

        let item = client.get("welcome").await.expect("Failed to get item");
        assert_eq!(item.data["title"]["iv"], "Welcome to the blog");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_list_items_with_content_client() {
        let server = MockServer::start().await;
        let client = client_for(&server, "test-token");

        let collection = client
            .list(&ContentQuery::default())
            .await
            .expect("Failed to list items");

        assert_eq!(collection.total, 3);
        assert_eq!(collection.items[0].id, "draft-post");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_empty_server() {
        let server = MockServer::start_empty().await;
        let client = client_for(&server, "test-token");

        let result = client.get("nonexistent").await;

        assert!(matches!(
            result,
            Err(ContentError::RemoteApi { status_code: Some(404), .. })
        ));

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_required_token() {
        let state = MockState::new()
            .with_item(DEFAULT_APP, DEFAULT_SCHEMA, Fixtures::item("a", serde_json::json!({})))
            .with_required_token("right");
        let server = MockServer::with_state(state).await;

        assert!(client_for(&server, "right").get("a").await.is_ok());

        let err = client_for(&server, "wrong").get("a").await.unwrap_err();
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(err.to_string(), crate::REMOTE_ERROR_FALLBACK);

        server.shutdown().await;
    }
}
