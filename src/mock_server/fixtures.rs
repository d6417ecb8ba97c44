//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic content items.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::{ContentEntity, ContentStatus};

/// Application served by the default scenario.
pub const DEFAULT_APP: &str = "test-app";

/// Schema served by the default scenario.
pub const DEFAULT_SCHEMA: &str = "articles";

/// Content item shape stored by the mock server.
pub type MockItem = ContentEntity<Value>;

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    /// Create a draft item with the given payload.
    pub fn item(id: &str, data: Value) -> MockItem {
        let created: Option<DateTime<Utc>> = "2024-01-15T10:30:00Z".parse().ok();

        let mut item = ContentEntity::new(id, data);
        item.created = created;
        item.created_by = Some("subject:fixtures".to_string());
        item.last_modified = created;
        item.last_modified_by = Some("subject:fixtures".to_string());
        item
    }

    /// Create an article with an invariant-language title.
    pub fn article(id: &str, title: &str, status: ContentStatus) -> MockItem {
        let mut item = Self::item(id, json!({ "title": { "iv": title } }));
        item.status = status;
        item
    }

    /// Create a default set of test data for common scenarios.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// Items for one schema of one app.
pub struct DefaultScenario {
    pub app: String,
    pub schema: String,
    pub items: Vec<MockItem>,
}

impl DefaultScenario {
    fn new() -> Self {
        let items = vec![
            Fixtures::article("welcome", "Welcome to the blog", ContentStatus::Published),
            Fixtures::article("draft-post", "Work in progress", ContentStatus::Draft),
            Fixtures::article("old-news", "Old news", ContentStatus::Archived),
        ];

        Self {
            app: DEFAULT_APP.to_string(),
            schema: DEFAULT_SCHEMA.to_string(),
            items,
        }
    }
}
