//! Client-side mirror of one server collection.

use crate::domain::common::{Keyed, RecordId};

/// In-memory list mirroring a server collection.
///
/// Refreshed wholesale after creates and updates (`replace`); deletes splice
/// the single matching row out (`remove`) instead of refetching.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceCache<T> {
    items: Vec<T>,
    loaded: bool,
}

impl<T> Default for ResourceCache<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loaded: false,
        }
    }
}

impl<T: Keyed> ResourceCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.loaded = true;
    }

    /// Failed fetch: the page renders its empty state.
    pub fn clear_failed(&mut self) {
        self.items.clear();
        self.loaded = true;
    }

    /// Back to "never loaded".
    pub fn reset(&mut self) {
        self.items.clear();
        self.loaded = false;
    }

    /// Remove exactly one entry with the given id. Returns it if found.
    pub fn remove(&mut self, id: RecordId) -> Option<T> {
        let pos = self.items.iter().position(|item| item.key() == id)?;
        Some(self.items.remove(pos))
    }

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.items.iter().find(|item| item.key() == id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.get(id).is_some()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(i64, &'static str);

    impl Keyed for Row {
        fn key(&self) -> RecordId {
            self.0
        }
    }

    #[test]
    fn test_remove_takes_exactly_one() {
        let mut cache = ResourceCache::new();
        cache.replace(vec![Row(1, "a"), Row(2, "b"), Row(2, "dup"), Row(3, "c")]);

        assert_eq!(cache.remove(2), Some(Row(2, "b")));
        assert_eq!(cache.len(), 3);
        assert!(cache.contains(2));
        assert_eq!(cache.remove(99), None);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_loaded_flags() {
        let mut cache: ResourceCache<Row> = ResourceCache::new();
        assert!(!cache.is_loaded());
        cache.replace(vec![Row(1, "a")]);
        assert!(cache.is_loaded());
        cache.clear_failed();
        assert!(cache.is_loaded());
        assert!(cache.is_empty());
        cache.reset();
        assert!(!cache.is_loaded());
    }
}
