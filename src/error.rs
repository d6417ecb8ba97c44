//! Error types for content API operations.

use thiserror::Error;

/// Prefix placed in front of the server's body when a request fails.
pub const REMOTE_ERROR_PREFIX: &str = "Content API request failed: ";

/// Message used when a failed response carries no body.
pub const REMOTE_ERROR_FALLBACK: &str = "Content API request failed with an empty response";

/// Errors that can occur during content API operations.
#[derive(Debug, Error)]
pub enum ContentError {
    /// A required argument was empty or otherwise unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration is missing or incomplete.
    #[error("Content API configuration required: {0}")]
    ConfigMissing(String),

    /// The server answered with a non-success status.
    #[error("{message}")]
    RemoteApi {
        message: String,
        status_code: Option<u16>,
    },

    /// Token acquisition failed.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ContentError {
    /// Build a [`ContentError::RemoteApi`] from a failed response body.
    pub fn remote(status_code: u16, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            REMOTE_ERROR_FALLBACK.to_string()
        } else {
            format!("{REMOTE_ERROR_PREFIX}{body}")
        };

        Self::RemoteApi {
            message,
            status_code: Some(status_code),
        }
    }

    /// Shorthand for [`ContentError::InvalidArgument`].
    pub(crate) fn invalid(what: impl Into<String>) -> Self {
        Self::InvalidArgument(what.into())
    }

    /// HTTP status of a remote failure, if this is one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::RemoteApi { status_code, .. } => *status_code,
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for content API operations.
pub type Result<T> = core::result::Result<T, ContentError>;
