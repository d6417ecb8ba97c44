//! Mock content API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the content
//! API for integration and end-to-end testing. Unlike wiremock which mocks at
//! the HTTP level per-test, this server maintains state across requests,
//! enabling realistic workflow testing (create, publish, archive, ...).
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use contentapi::mock_server::{MockItem, MockServer, DEFAULT_APP, DEFAULT_SCHEMA};
//! use contentapi::{ClientConfig, ContentClient, StaticToken};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let config = ClientConfig::new(server.url(), DEFAULT_APP, DEFAULT_SCHEMA).unwrap();
//!     let client: ContentClient<MockItem> =
//!         ContentClient::new(config, Arc::new(StaticToken::new("t")), reqwest::Client::new());
//!
//!     // Server comes with default fixtures
//!     let item = client.get("welcome").await.unwrap();
//!     assert!(item.is_published());
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures, MockItem, DEFAULT_APP, DEFAULT_SCHEMA};
pub use server::MockServer;
pub use state::{FieldFilter, ListCriteria, MockState, SortOrder};
