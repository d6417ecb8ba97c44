//! Headless CMS content API client library.
//!
//! A Rust library for reading and mutating the content items of a single
//! schema in a headless content-management application. A
//! [`ContentClient`] is parameterized by an [`Entity`] type and exposes
//! CRUD plus the publish/unpublish/archive/restore lifecycle.
//!
//! # Quick Start
//!
//! ```no_run
//! use contentapi::{ContentClient, ContentEntity, ContentQuery};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct Article {
//!     title: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> contentapi::Result<()> {
//!     // Create client from environment variables
//!     let client: ContentClient<ContentEntity<Article>> = ContentClient::from_env()?;
//!
//!     // List the ten newest articles
//!     let query = ContentQuery {
//!         top: Some(10),
//!         order_by: Some("created desc".to_string()),
//!         ..Default::default()
//!     };
//!     let articles = client.list(&query).await?;
//!     println!("Found {} of {} articles", articles.len(), articles.total);
//!
//!     // Edit and publish one of them
//!     let mut article = client.get("hello-world").await?;
//!     article.data.title = "Hello, world".to_string();
//!     client.update(&mut article).await?;
//!     client.publish(&mut article).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Entities
//!
//! Operations that take an entity (`update`, `publish`, `unpublish`,
//! `archive`, `restore`, `delete`) call [`Entity::mark_updated`] on it once
//! the request has succeeded. Each has a `*_by_id` twin that works on a bare
//! id instead.
//!
//! # Configuration
//!
//! [`ContentClient::from_env`] reads:
//!
//! - `CONTENT_API_APP` (required) - Application name
//! - `CONTENT_API_SCHEMA` (required) - Schema name
//! - `CONTENT_API_TOKEN` (required) - Bearer token
//! - `CONTENT_API_URL` (optional) - Service URL (defaults to `https://cloud.squidex.io/`)

mod auth;
mod client;
mod collection;
mod config;
mod entity;
mod error;
mod query;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use auth::{Authenticator, StaticToken};
pub use client::{default_transport, ContentClient};
pub use collection::EntityCollection;
pub use config::{ClientConfig, DEFAULT_SERVICE_URL};
pub use entity::{ContentEntity, ContentStatus, Entity};
pub use error::{ContentError, Result, REMOTE_ERROR_FALLBACK, REMOTE_ERROR_PREFIX};
pub use query::ContentQuery;
