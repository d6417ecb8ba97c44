//! Bearer token providers.

use async_trait::async_trait;

use crate::config::required_var;
use crate::error::{ContentError, Result};

/// Source of the bearer token attached to every request.
///
/// The client asks for a token once per request and never caches it, so
/// implementations own the whole token lifecycle (refresh, expiry).
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use contentapi::{Authenticator, Result};
///
/// struct FromVault;
///
/// #[async_trait]
/// impl Authenticator for FromVault {
///     async fn token(&self) -> Result<String> {
///         Ok("fetched-token".to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Return the current bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if no token can be acquired.
    async fn token(&self) -> Result<String>;
}

/// Authenticator that always hands out the same token.
#[derive(Clone)]
pub struct StaticToken {
    token: String,
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticToken").finish_non_exhaustive()
    }
}

impl StaticToken {
    /// Wrap a fixed token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Read the token from `CONTENT_API_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is not set.
    pub fn from_env() -> Result<Self> {
        required_var("CONTENT_API_TOKEN").map(Self::new)
    }
}

#[async_trait]
impl Authenticator for StaticToken {
    async fn token(&self) -> Result<String> {
        if self.token.trim().is_empty() {
            return Err(ContentError::Auth("static token is empty".to_string()));
        }
        Ok(self.token.clone())
    }
}
