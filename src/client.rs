//! Content API client.
//!
//! Builds authenticated requests against one schema's content collection
//! and turns responses into typed entities.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::{Authenticator, StaticToken};
use crate::collection::EntityCollection;
use crate::config::ClientConfig;
use crate::entity::Entity;
use crate::error::{ContentError, Result};
use crate::query::ContentQuery;

const USER_AGENT: &str = concat!("contentapi/", env!("CARGO_PKG_VERSION"));

/// Lifecycle transitions addressed as `{id}/{verb}/`.
#[derive(Debug, Clone, Copy)]
enum Lifecycle {
    Publish,
    Unpublish,
    Archive,
    Restore,
}

impl Lifecycle {
    fn as_str(self) -> &'static str {
        match self {
            Self::Publish => "publish",
            Self::Unpublish => "unpublish",
            Self::Archive => "archive",
            Self::Restore => "restore",
        }
    }
}

/// Typed client for the content items of one schema.
///
/// `E` is the entity wrapper and `E::Data` the schema payload. The client
/// holds only immutable configuration; the transport and authenticator are
/// injected and may be shared with other clients.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool and authenticator.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use contentapi::{ClientConfig, ContentClient, ContentEntity, StaticToken};
///
/// # async fn example() -> contentapi::Result<()> {
/// let config = ClientConfig::new("https://cms.example.com", "blog", "articles")?;
/// let client: ContentClient<ContentEntity<serde_json::Value>> =
///     ContentClient::new(config, Arc::new(StaticToken::new("token")), reqwest::Client::new());
///
/// let mut article = client.get("hello-world").await?;
/// client.publish(&mut article).await?;
/// # Ok(())
/// # }
/// ```
pub struct ContentClient<E> {
    http: Client,
    config: Arc<ClientConfig>,
    authenticator: Arc<dyn Authenticator>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for ContentClient<E> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            config: Arc::clone(&self.config),
            authenticator: Arc::clone(&self.authenticator),
            _entity: PhantomData,
        }
    }
}

impl<E> fmt::Debug for ContentClient<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentClient")
            .field("service_url", &self.config.service_url().as_str())
            .field("app", &self.config.app_name())
            .field("schema", &self.config.schema_name())
            .finish_non_exhaustive()
    }
}

/// Build the shared HTTP transport with the crate's defaults.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialised.
pub fn default_transport() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .brotli(true)
        .gzip(true)
        .deflate(true)
        .timeout(Duration::from_secs(300))
        .build()
        .map_err(ContentError::Http)
}

impl<E: Entity> ContentClient<E> {
    /// Create a client over an existing transport.
    pub fn new(
        config: ClientConfig,
        authenticator: Arc<dyn Authenticator>,
        transport: Client,
    ) -> Self {
        Self {
            http: transport,
            config: Arc::new(config),
            authenticator,
            _entity: PhantomData,
        }
    }

    /// Create a client with a freshly built transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be built.
    pub fn with_default_transport(
        config: ClientConfig,
        authenticator: Arc<dyn Authenticator>,
    ) -> Result<Self> {
        Ok(Self::new(config, authenticator, default_transport()?))
    }

    /// Create a client from environment variables.
    ///
    /// Reads `CONTENT_API_APP`, `CONTENT_API_SCHEMA`, `CONTENT_API_TOKEN` and
    /// optionally `CONTENT_API_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or invalid.
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env()?;
        let authenticator = StaticToken::from_env()?;
        Self::with_default_transport(config, Arc::new(authenticator))
    }

    /// The client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL of the schema's content collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be formed.
    pub fn collection_url(&self) -> Result<Url> {
        self.url_for("")
    }

    /// List content items matching the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, query: &ContentQuery) -> Result<EntityCollection<E>> {
        let request = self.request(Method::GET, &query.to_query_string()).await?;
        let response = Self::send(request).await?;
        Self::decode(response).await
    }

    /// Fetch a content item by id.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidArgument`] for a blank id, or an error
    /// if the request fails.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<E> {
        let suffix = item_suffix(id)?;
        let request = self.request(Method::GET, &suffix).await?;
        let response = Self::send(request).await?;
        Self::decode(response).await
    }

    /// Create a content item with the given id and payload.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidArgument`] for a blank id, or an error
    /// if the request fails.
    #[tracing::instrument(skip(self, data))]
    pub async fn create(&self, id: &str, data: &E::Data) -> Result<E> {
        let suffix = item_suffix(id)?;
        let request = self.request(Method::POST, &suffix).await?.json(data);
        let response = Self::send(request).await?;
        Self::decode(response).await
    }

    /// Replace the payload of the content item with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidArgument`] for a blank id, or an error
    /// if the request fails.
    #[tracing::instrument(skip(self, data))]
    pub async fn update_by_id(&self, id: &str, data: &E::Data) -> Result<()> {
        let suffix = item_suffix(id)?;
        let request = self.request(Method::PUT, &suffix).await?.json(data);
        Self::send(request).await?;
        Ok(())
    }

    /// Save the entity's payload and mark it updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; the entity is left untouched.
    pub async fn update(&self, entity: &mut E) -> Result<()> {
        self.update_by_id(entity.id(), entity.data()).await?;
        entity.mark_updated();
        Ok(())
    }

    /// Publish the content item with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidArgument`] for a blank id, or an error
    /// if the request fails.
    pub async fn publish_by_id(&self, id: &str) -> Result<()> {
        self.transition(id, Lifecycle::Publish).await
    }

    /// Publish the entity and mark it updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; the entity is left untouched.
    pub async fn publish(&self, entity: &mut E) -> Result<()> {
        self.publish_by_id(entity.id()).await?;
        entity.mark_updated();
        Ok(())
    }

    /// Unpublish the content item with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidArgument`] for a blank id, or an error
    /// if the request fails.
    pub async fn unpublish_by_id(&self, id: &str) -> Result<()> {
        self.transition(id, Lifecycle::Unpublish).await
    }

    /// Unpublish the entity and mark it updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; the entity is left untouched.
    pub async fn unpublish(&self, entity: &mut E) -> Result<()> {
        self.unpublish_by_id(entity.id()).await?;
        entity.mark_updated();
        Ok(())
    }

    /// Archive the content item with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidArgument`] for a blank id, or an error
    /// if the request fails.
    pub async fn archive_by_id(&self, id: &str) -> Result<()> {
        self.transition(id, Lifecycle::Archive).await
    }

    /// Archive the entity and mark it updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; the entity is left untouched.
    pub async fn archive(&self, entity: &mut E) -> Result<()> {
        self.archive_by_id(entity.id()).await?;
        entity.mark_updated();
        Ok(())
    }

    /// Restore the archived content item with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidArgument`] for a blank id, or an error
    /// if the request fails.
    pub async fn restore_by_id(&self, id: &str) -> Result<()> {
        self.transition(id, Lifecycle::Restore).await
    }

    /// Restore the entity and mark it updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; the entity is left untouched.
    pub async fn restore(&self, entity: &mut E) -> Result<()> {
        self.restore_by_id(entity.id()).await?;
        entity.mark_updated();
        Ok(())
    }

    /// Delete the content item with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidArgument`] for a blank id, or an error
    /// if the request fails.
    #[tracing::instrument(skip(self))]
    pub async fn delete_by_id(&self, id: &str) -> Result<()> {
        let suffix = item_suffix(id)?;
        let request = self.request(Method::DELETE, &suffix).await?;
        Self::send(request).await?;
        Ok(())
    }

    /// Delete the entity and mark it updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; the entity is left untouched.
    pub async fn delete(&self, entity: &mut E) -> Result<()> {
        self.delete_by_id(entity.id()).await?;
        entity.mark_updated();
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn transition(&self, id: &str, verb: Lifecycle) -> Result<()> {
        let suffix = lifecycle_suffix(id, verb)?;
        let request = self.request(Method::PUT, &suffix).await?;
        Self::send(request).await?;
        Ok(())
    }

    /// Resolve a collection-relative suffix against the service URL.
    fn url_for(&self, suffix: &str) -> Result<Url> {
        let path = format!("{}{suffix}", self.config.collection_path());
        Ok(self.config.service_url().join(&path)?)
    }

    /// Start an authenticated request. The token is fetched fresh every time.
    async fn request(&self, method: Method, suffix: &str) -> Result<RequestBuilder> {
        let url = self.url_for(suffix)?;
        let token = self.authenticator.token().await?;

        tracing::debug!(%method, %url, "sending content request");

        Ok(self.http.request(method, url).bearer_auth(token))
    }

    async fn send(request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        Self::check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "received content response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await?;
        Err(ContentError::remote(status.as_u16(), &body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Path suffix for a single item: `{id}/`.
fn item_suffix(id: &str) -> Result<String> {
    if id.trim().is_empty() {
        return Err(ContentError::invalid("content id must not be empty"));
    }
    Ok(format!("{}/", urlencoding::encode(id)))
}

/// Path suffix for a lifecycle transition: `{id}/{verb}/`.
fn lifecycle_suffix(id: &str, verb: Lifecycle) -> Result<String> {
    Ok(format!("{}{}/", item_suffix(id)?, verb.as_str()))
}
