//! Content entity types.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A content item the client can read and mutate.
///
/// The client only ever reads the id and data of an entity and calls
/// [`Entity::mark_updated`] after a successful mutation. Everything else
/// (versions, timestamps) belongs to the implementing type.
pub trait Entity: DeserializeOwned + Send {
    /// The schema-specific payload.
    type Data: Serialize + DeserializeOwned + Send + Sync;

    /// The content item id.
    fn id(&self) -> &str;

    /// The payload sent on update.
    fn data(&self) -> &Self::Data;

    /// Called once after any successful mutation made through this entity.
    fn mark_updated(&mut self);
}

/// Publication state of a content item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentStatus {
    #[default]
    Draft,
    Published,
    Archived,
    /// Any status this client does not know about.
    #[serde(other)]
    Unknown,
}

/// The standard content item wrapper returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEntity<D> {
    /// The content item id.
    pub id: String,

    /// Schema-specific payload.
    pub data: D,

    /// Monotonic version, bumped on every change.
    #[serde(default)]
    pub version: i64,

    /// When the item was created.
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,

    /// Who created the item.
    #[serde(default)]
    pub created_by: Option<String>,

    /// When the item was last changed.
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,

    /// Who last changed the item.
    #[serde(default)]
    pub last_modified_by: Option<String>,

    /// Publication state.
    #[serde(default)]
    pub status: ContentStatus,
}

impl<D> ContentEntity<D> {
    /// Create a local draft entity with the given id and payload.
    pub fn new(id: impl Into<String>, data: D) -> Self {
        Self {
            id: id.into(),
            data,
            version: 0,
            created: None,
            created_by: None,
            last_modified: None,
            last_modified_by: None,
            status: ContentStatus::Draft,
        }
    }

    /// Check if the item is published.
    pub fn is_published(&self) -> bool {
        self.status == ContentStatus::Published
    }
}

impl<D> Entity for ContentEntity<D>
where
    D: Serialize + DeserializeOwned + Send + Sync,
{
    type Data = D;

    fn id(&self) -> &str {
        &self.id
    }

    fn data(&self) -> &D {
        &self.data
    }

    fn mark_updated(&mut self) {
        self.last_modified = Some(Utc::now());
        self.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Article {
        title: String,
    }

    #[test]
    fn test_deserialize_api_shape() {
        let entity: ContentEntity<Article> = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "data": { "title": "Hello" },
            "version": 3,
            "created": "2024-01-15T10:30:00Z",
            "createdBy": "subject:editor",
            "lastModified": "2024-01-16T08:00:00Z",
            "status": "Published"
        }))
        .unwrap();

        assert_eq!(entity.id(), "abc");
        assert_eq!(entity.data().title, "Hello");
        assert_eq!(entity.version, 3);
        assert_eq!(entity.created_by.as_deref(), Some("subject:editor"));
        assert!(entity.last_modified_by.is_none());
        assert!(entity.is_published());
    }

    #[test]
    fn test_unknown_status_is_tolerated() {
        let entity: ContentEntity<Article> = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "data": { "title": "Hello" },
            "status": "Scheduled"
        }))
        .unwrap();

        assert_eq!(entity.status, ContentStatus::Unknown);
        assert_eq!(entity.version, 0);
    }

    #[test]
    fn test_mark_updated_bumps_version_and_timestamp() {
        let mut entity = ContentEntity::new("abc", Article { title: "x".into() });
        assert!(entity.last_modified.is_none());

        entity.mark_updated();

        assert_eq!(entity.version, 1);
        assert!(entity.last_modified.is_some());
    }
}
