//! Mock server state management.
//!
//! Provides the in-memory content store for the mock content API server.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;

use super::fixtures::MockItem;
use crate::{ContentEntity, ContentStatus, Entity};

/// Shared state for the mock server.
///
/// Items are grouped by `(app, schema)` and kept sorted by id.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Content items indexed by (app, schema), then by id.
    pub schemas: HashMap<(String, String), BTreeMap<String, MockItem>>,

    /// Optional authentication token. If set, requests must include this token.
    pub required_token: Option<String>,
}

/// A `path eq 'value'` filter over the item's JSON shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pointer: String,
    value: String,
}

impl FieldFilter {
    /// Parse expressions like `data/title/iv eq 'Hello'`.
    ///
    /// Returns `None` for anything else.
    pub fn parse(expression: &str) -> Option<Self> {
        let (path, value) = expression.split_once(" eq ")?;
        let value = value.trim().strip_prefix('\'')?.strip_suffix('\'')?;
        let path = path.trim();
        if path.is_empty() {
            return None;
        }

        Some(Self {
            pointer: format!("/{path}"),
            value: value.to_string(),
        })
    }

    /// Check whether an item matches.
    pub fn matches(&self, item: &MockItem) -> bool {
        let Ok(json) = serde_json::to_value(item) else {
            return false;
        };
        match json.pointer(&self.pointer) {
            Some(Value::String(s)) => *s == self.value,
            Some(other) => other.to_string() == self.value,
            None => false,
        }
    }
}

/// Sort order parsed from `field [asc|desc]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pointer: String,
    descending: bool,
}

impl SortOrder {
    /// Parse expressions like `created desc` or `data/title/iv`.
    pub fn parse(expression: &str) -> Option<Self> {
        let mut parts = expression.split_whitespace();
        let path = parts.next()?;
        let descending = match parts.next() {
            None => false,
            Some(d) if d.eq_ignore_ascii_case("asc") => false,
            Some(d) if d.eq_ignore_ascii_case("desc") => true,
            Some(_) => return None,
        };
        if parts.next().is_some() {
            return None;
        }

        Some(Self {
            pointer: format!("/{path}"),
            descending,
        })
    }

    fn compare(&self, a: &MockItem, b: &MockItem) -> Ordering {
        let a = serde_json::to_value(a).ok();
        let b = serde_json::to_value(b).ok();
        let a = a.as_ref().and_then(|v| v.pointer(&self.pointer));
        let b = b.as_ref().and_then(|v| v.pointer(&self.pointer));

        let ordering = match (a, b) {
            (Some(Value::Number(x)), Some(Value::Number(y))) => x
                .as_f64()
                .partial_cmp(&y.as_f64())
                .unwrap_or(Ordering::Equal),
            (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (x, y) => x.map(Value::to_string).cmp(&y.map(Value::to_string)),
        };

        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// How to narrow a listing.
#[derive(Debug, Clone, Default)]
pub struct ListCriteria {
    pub search: Option<String>,
    pub filter: Option<FieldFilter>,
    pub order: Option<SortOrder>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add an item to a schema.
    pub fn with_item(mut self, app: &str, schema: &str, item: MockItem) -> Self {
        self.schema_mut(app, schema).insert(item.id.clone(), item);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    fn schema(&self, app: &str, schema: &str) -> Option<&BTreeMap<String, MockItem>> {
        self.schemas.get(&(app.to_string(), schema.to_string()))
    }

    fn schema_mut(&mut self, app: &str, schema: &str) -> &mut BTreeMap<String, MockItem> {
        self.schemas
            .entry((app.to_string(), schema.to_string()))
            .or_default()
    }

    fn item_mut(&mut self, app: &str, schema: &str, id: &str) -> Option<&mut MockItem> {
        self.schemas
            .get_mut(&(app.to_string(), schema.to_string()))
            .and_then(|items| items.get_mut(id))
    }

    /// Get an item by id.
    pub fn get_item(&self, app: &str, schema: &str, id: &str) -> Option<&MockItem> {
        self.schema(app, schema).and_then(|items| items.get(id))
    }

    /// List items matching the criteria, in id order unless a sort is given.
    ///
    /// A search term is matched case-insensitively against the serialized
    /// payload and, when present, the filter is ignored.
    pub fn list_items(&self, app: &str, schema: &str, criteria: &ListCriteria) -> Vec<&MockItem> {
        let Some(items) = self.schema(app, schema) else {
            return vec![];
        };

        let search = criteria.search.as_deref().map(str::to_lowercase);
        let mut matched: Vec<&MockItem> = items
            .values()
            .filter(|item| match (&search, &criteria.filter) {
                (Some(term), _) => item.data.to_string().to_lowercase().contains(term),
                (None, Some(filter)) => filter.matches(item),
                (None, None) => true,
            })
            .collect();

        if let Some(order) = &criteria.order {
            matched.sort_by(|a, b| order.compare(a, b));
        }

        matched
    }

    /// Insert a new draft item. Returns `None` if the id is taken.
    pub fn create_item(&mut self, app: &str, schema: &str, id: &str, data: Value) -> Option<&MockItem> {
        let items = self.schema_mut(app, schema);
        if items.contains_key(id) {
            return None;
        }

        let now = Some(Utc::now());
        let mut item = ContentEntity::new(id, data);
        item.created = now;
        item.last_modified = now;
        items.insert(id.to_string(), item);
        items.get(id)
    }

    /// Replace an item's payload and return the updated version.
    pub fn update_item(&mut self, app: &str, schema: &str, id: &str, data: Value) -> Option<&MockItem> {
        let item = self.item_mut(app, schema, id)?;
        item.data = data;
        item.mark_updated();
        Some(&*item)
    }

    /// Move an item to a new status and return the updated version.
    pub fn set_status(
        &mut self,
        app: &str,
        schema: &str,
        id: &str,
        status: ContentStatus,
    ) -> Option<&MockItem> {
        let item = self.item_mut(app, schema, id)?;
        item.status = status;
        item.mark_updated();
        Some(&*item)
    }

    /// Remove an item.
    pub fn delete_item(&mut self, app: &str, schema: &str, id: &str) -> Option<MockItem> {
        self.schemas
            .get_mut(&(app.to_string(), schema.to_string()))
            .and_then(|items| items.remove(id))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::mock_server::Fixtures;

    fn sample_state() -> MockState {
        MockState::new()
            .with_item("app", "posts", Fixtures::article("b", "Beta post", ContentStatus::Draft))
            .with_item("app", "posts", Fixtures::article("a", "Alpha post", ContentStatus::Published))
            .with_item("app", "posts", Fixtures::article("c", "Gamma", ContentStatus::Draft))
    }

    fn ids(items: Vec<&MockItem>) -> Vec<&str> {
        items.into_iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_state_add_and_get_item() {
        let state = sample_state();

        let item = state.get_item("app", "posts", "a");
        assert!(item.is_some());
        assert_eq!(item.unwrap().data["title"]["iv"], "Alpha post");
        assert!(state.get_item("app", "other", "a").is_none());
    }

    #[test]
    fn test_list_items_in_id_order() {
        let state = sample_state();
        let all = state.list_items("app", "posts", &ListCriteria::default());
        assert_eq!(ids(all), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_search_ignores_filter() {
        let state = sample_state();
        let criteria = ListCriteria {
            search: Some("POST".into()),
            filter: FieldFilter::parse("status eq 'Published'"),
            order: None,
        };
        assert_eq!(ids(state.list_items("app", "posts", &criteria)), vec!["a", "b"]);
    }

    #[test]
    fn test_filter_and_sort() {
        let state = sample_state();
        let criteria = ListCriteria {
            search: None,
            filter: FieldFilter::parse("status eq 'Draft'"),
            order: SortOrder::parse("id desc"),
        };
        assert_eq!(ids(state.list_items("app", "posts", &criteria)), vec!["c", "b"]);
    }

    #[test]
    fn test_filter_parse() {
        assert!(FieldFilter::parse("data/title/iv eq 'x'").is_some());
        assert!(FieldFilter::parse("data/title/iv gt 3").is_none());
        assert!(SortOrder::parse("created sideways").is_none());
    }

    #[test]
    fn test_create_update_and_status() {
        let mut state = MockState::new();

        assert!(state.create_item("app", "posts", "x", json!({ "n": 1 })).is_some());
        assert!(state.create_item("app", "posts", "x", json!({ "n": 2 })).is_none());

        let updated = state.update_item("app", "posts", "x", json!({ "n": 3 })).unwrap();
        assert_eq!(updated.data["n"], 3);
        assert_eq!(updated.version, 1);

        let published = state
            .set_status("app", "posts", "x", ContentStatus::Published)
            .unwrap();
        assert!(published.is_published());

        assert!(state.delete_item("app", "posts", "x").is_some());
        assert!(state.get_item("app", "posts", "x").is_none());
    }
}
