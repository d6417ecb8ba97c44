//! Query parameters for listing content.

use serde::{Deserialize, Serialize};

/// Query parameters for listing content items.
///
/// `search` and `filter` are mutually exclusive: when `search` is non-blank
/// the filter is dropped from the request entirely.
///
/// # Example
///
/// ```
/// use contentapi::ContentQuery;
///
/// let query = ContentQuery {
///     top: Some(20),
///     order_by: Some("created desc".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(query.to_query_string(), "?$top=20&$orderby=created%20desc");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentQuery {
    /// Number of items to skip.
    pub skip: Option<u64>,
    /// Maximum number of items to return.
    pub top: Option<u64>,
    /// Sort expression, e.g. `created desc`.
    pub order_by: Option<String>,
    /// Full-text search. Takes precedence over `filter`.
    pub search: Option<String>,
    /// Filter expression, e.g. `data/title/iv eq 'Hello'`.
    pub filter: Option<String>,
}

impl ContentQuery {
    /// Build the query string, including the leading `?`.
    ///
    /// Parameters appear as `$skip`, `$top`, `$orderby`, then `$search` or
    /// `$filter`. Absent or blank values are left out, and an empty query
    /// yields an empty string.
    pub fn to_query_string(&self) -> String {
        let mut params = Vec::new();

        if let Some(skip) = self.skip {
            params.push(format!("$skip={skip}"));
        }
        if let Some(top) = self.top {
            params.push(format!("$top={top}"));
        }
        if let Some(order_by) = non_blank(&self.order_by) {
            params.push(format!("$orderby={}", urlencoding::encode(order_by)));
        }

        if let Some(search) = non_blank(&self.search) {
            params.push(format!("$search={}", urlencoding::encode(search)));
        } else if let Some(filter) = non_blank(&self.filter) {
            params.push(format!("$filter={}", urlencoding::encode(filter)));
        }

        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
