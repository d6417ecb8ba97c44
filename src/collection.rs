//! Listing results.

use serde::{Deserialize, Serialize};

/// One page of content items plus the total number of matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityCollection<E> {
    /// Total number of items matching the query, across all pages.
    #[serde(default)]
    pub total: u64,
    /// The items returned for this request.
    #[serde(default = "Vec::new")]
    pub items: Vec<E>,
}

impl<E> EntityCollection<E> {
    /// Create a collection from items and the overall total.
    #[must_use]
    pub fn new(items: Vec<E>, total: u64) -> Self {
        Self { items, total }
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(E) -> U>(self, f: F) -> EntityCollection<U> {
        EntityCollection {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }

    /// Returns true if this collection has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items returned (not the total).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the server holds more matches than were returned.
    #[must_use]
    pub fn has_more(&self, skip: u64) -> bool {
        skip.saturating_add(self.items.len() as u64) < self.total
    }

    /// Returns an iterator over the items.
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.items.iter()
    }
}

impl<E> IntoIterator for EntityCollection<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a EntityCollection<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
