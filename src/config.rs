//! Client configuration.

use std::env;

use url::Url;

use crate::error::{ContentError, Result};

/// Default service address used when `CONTENT_API_URL` is not set.
pub const DEFAULT_SERVICE_URL: &str = "https://cloud.squidex.io/";

/// Immutable settings identifying one schema of one application.
///
/// # Example
///
/// ```
/// use contentapi::ClientConfig;
///
/// let config = ClientConfig::new("https://cms.example.com", "blog", "articles").unwrap();
/// assert_eq!(config.service_url().as_str(), "https://cms.example.com/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    service_url: Url,
    app_name: String,
    schema_name: String,
}

impl ClientConfig {
    /// Validate and build a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidArgument`] if either name is blank or
    /// the service URL is not absolute, and [`ContentError::Url`] if it
    /// cannot be parsed at all.
    pub fn new(service_url: &str, app_name: &str, schema_name: &str) -> Result<Self> {
        if app_name.trim().is_empty() {
            return Err(ContentError::invalid("application name must not be empty"));
        }
        if schema_name.trim().is_empty() {
            return Err(ContentError::invalid("schema name must not be empty"));
        }
        if service_url.trim().is_empty() {
            return Err(ContentError::invalid("service URL must not be empty"));
        }

        // Ensure base URL ends with / so joins keep any path prefix
        let service_url_str = if service_url.ends_with('/') {
            service_url.to_string()
        } else {
            format!("{service_url}/")
        };

        let service_url = Url::parse(&service_url_str).map_err(|e| match e {
            url::ParseError::RelativeUrlWithoutBase => ContentError::invalid(format!(
                "service URL '{service_url}' is not an absolute address"
            )),
            other => ContentError::Url(other),
        })?;
        if service_url.cannot_be_a_base() {
            return Err(ContentError::invalid(format!(
                "service URL '{service_url}' is not an absolute base address"
            )));
        }

        Ok(Self {
            service_url,
            app_name: app_name.to_string(),
            schema_name: schema_name.to_string(),
        })
    }

    /// Read configuration from the environment.
    ///
    /// Uses `CONTENT_API_APP` and `CONTENT_API_SCHEMA` (both required) and
    /// optionally `CONTENT_API_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::ConfigMissing`] if a required variable is unset.
    pub fn from_env() -> Result<Self> {
        let app_name = required_var("CONTENT_API_APP")?;
        let schema_name = required_var("CONTENT_API_SCHEMA")?;
        let service_url =
            env::var("CONTENT_API_URL").unwrap_or_else(|_| DEFAULT_SERVICE_URL.to_string());

        Self::new(&service_url, &app_name, &schema_name)
    }

    /// The service base address, always ending in `/`.
    pub fn service_url(&self) -> &Url {
        &self.service_url
    }

    /// The application name.
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// The schema name.
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// Path of the schema's content collection, relative to the service URL.
    pub fn collection_path(&self) -> String {
        format!(
            "api/content/{}/{}/",
            urlencoding::encode(&self.app_name),
            urlencoding::encode(&self.schema_name)
        )
    }
}

pub(crate) fn required_var(name: &str) -> Result<String> {
    env::var(name)
        .map_err(|_| ContentError::ConfigMissing(format!("{name} environment variable not set")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_blank_names() {
        let err = ClientConfig::new("https://cms.example.com", "", "articles").unwrap_err();
        assert!(matches!(err, ContentError::InvalidArgument(_)));

        let err = ClientConfig::new("https://cms.example.com", "blog", "  ").unwrap_err();
        assert!(matches!(err, ContentError::InvalidArgument(_)));
    }

    #[test]
    fn test_rejects_missing_or_relative_url() {
        let err = ClientConfig::new("", "blog", "articles").unwrap_err();
        assert!(matches!(err, ContentError::InvalidArgument(_)));

        let err = ClientConfig::new("cms/api", "blog", "articles").unwrap_err();
        assert!(matches!(err, ContentError::InvalidArgument(_)));

        let err = ClientConfig::new("cms.example.com", "blog", "articles").unwrap_err();
        assert!(matches!(err, ContentError::InvalidArgument(_)));

        let err = ClientConfig::new("http://[::1", "blog", "articles").unwrap_err();
        assert!(matches!(err, ContentError::Url(_)));

        let err = ClientConfig::new("mailto:someone@example.com", "blog", "articles").unwrap_err();
        assert!(matches!(err, ContentError::InvalidArgument(_)));
    }

    #[test]
    fn test_service_url_trailing_slash() {
        let a = ClientConfig::new("https://cms.example.com/squidex", "blog", "articles").unwrap();
        let b = ClientConfig::new("https://cms.example.com/squidex/", "blog", "articles").unwrap();
        assert_eq!(a.service_url(), b.service_url());
        assert_eq!(a.service_url().as_str(), "https://cms.example.com/squidex/");
    }

    #[test]
    fn test_collection_path() {
        let config = ClientConfig::new("https://cms.example.com", "blog", "articles").unwrap();
        assert_eq!(config.collection_path(), "api/content/blog/articles/");
    }

    #[test]
    fn test_collection_path_encodes_names() {
        let config = ClientConfig::new("https://cms.example.com", "my?app", "a/b#c").unwrap();
        assert_eq!(config.collection_path(), "api/content/my%3Fapp/a%2Fb%23c/");

        let url = config.service_url().join(&config.collection_path()).unwrap();
        assert_eq!(url.path(), "/api/content/my%3Fapp/a%2Fb%23c/");
        assert!(url.query().is_none());
    }
}
