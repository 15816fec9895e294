//! Parent selection driving a dependent collection (staff -> expenses).
//!
//! ```text
//!   NoSelection --select(id)--> Loading(id) --apply(ticket)--> Loaded(id)
//!        ^                          |  ^                          |
//!        +-------- deselect --------+  +-------- select(id') -----+
//! ```
//!
//! Every `select` bumps a generation counter and hands out a [`LoadTicket`].
//! Only the ticket of the latest selection may fill the collection, so a
//! slow response for a previously selected parent is dropped.

use super::resource_cache::ResourceCache;
use crate::domain::common::{Keyed, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    NoSelection,
    Loading(RecordId),
    Loaded(RecordId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub parent_id: RecordId,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DependentCollection<T> {
    state: SelectionState,
    generation: u64,
    cache: ResourceCache<T>,
}

impl<T> Default for DependentCollection<T> {
    fn default() -> Self {
        Self {
            state: SelectionState::NoSelection,
            generation: 0,
            cache: ResourceCache::default(),
        }
    }
}

impl<T: Keyed> DependentCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn selected(&self) -> Option<RecordId> {
        match self.state {
            SelectionState::NoSelection => None,
            SelectionState::Loading(id) | SelectionState::Loaded(id) => Some(id),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SelectionState::Loading(_))
    }

    /// Select a parent; the previous collection is dropped immediately.
    pub fn select(&mut self, parent_id: RecordId) -> LoadTicket {
        self.generation += 1;
        self.cache.reset();
        self.state = SelectionState::Loading(parent_id);
        LoadTicket {
            parent_id,
            generation: self.generation,
        }
    }

    /// Ticket to reload the current selection (after a create/update).
    pub fn reload(&mut self) -> Option<LoadTicket> {
        let parent_id = self.selected()?;
        self.generation += 1;
        self.state = SelectionState::Loading(parent_id);
        Some(LoadTicket {
            parent_id,
            generation: self.generation,
        })
    }

    pub fn deselect(&mut self) {
        self.generation += 1;
        self.cache.reset();
        self.state = SelectionState::NoSelection;
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation && self.selected() == Some(ticket.parent_id)
    }

    /// Store a fetched collection. Returns `false` (and changes nothing) for a stale ticket.
    pub fn apply(&mut self, ticket: LoadTicket, items: Vec<T>) -> bool {
        if !self.is_current(&ticket) {
            return false;
        }
        self.cache.replace(items);
        self.state = SelectionState::Loaded(ticket.parent_id);
        true
    }

    /// The fetch failed: show the selected parent with an empty collection.
    pub fn fail(&mut self, ticket: LoadTicket) -> bool {
        if !self.is_current(&ticket) {
            return false;
        }
        self.cache.clear_failed();
        self.state = SelectionState::Loaded(ticket.parent_id);
        true
    }

    pub fn remove(&mut self, id: RecordId) -> Option<T> {
        self.cache.remove(id)
    }

    pub fn items(&self) -> &[T] {
        self.cache.items()
    }

    pub fn cache(&self) -> &ResourceCache<T> {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Child(i64);

    impl Keyed for Child {
        fn key(&self) -> RecordId {
            self.0
        }
    }

    #[test]
    fn test_select_load_cycle() {
        let mut dc = DependentCollection::new();
        assert_eq!(dc.state(), SelectionState::NoSelection);

        let t = dc.select(7);
        assert_eq!(dc.state(), SelectionState::Loading(7));
        assert!(dc.apply(t, vec![Child(1), Child(2)]));
        assert_eq!(dc.state(), SelectionState::Loaded(7));
        assert_eq!(dc.items().len(), 2);

        dc.deselect();
        assert_eq!(dc.state(), SelectionState::NoSelection);
        assert!(dc.items().is_empty());
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut dc = DependentCollection::new();
        let first = dc.select(1);
        let second = dc.select(2);

        assert!(!dc.apply(first, vec![Child(10)]));
        assert_eq!(dc.state(), SelectionState::Loading(2));
        assert!(dc.items().is_empty());

        assert!(dc.apply(second, vec![Child(20)]));
        assert_eq!(dc.items(), &[Child(20)]);
    }

    #[test]
    fn test_reselecting_same_parent_invalidates_older_ticket() {
        let mut dc = DependentCollection::new();
        let old = dc.select(3);
        let new = dc.select(3);
        assert!(!dc.fail(old));
        assert!(dc.apply(new, vec![Child(1)]));
    }

    #[test]
    fn test_response_after_deselect_is_dropped() {
        let mut dc = DependentCollection::new();
        let t = dc.select(4);
        dc.deselect();
        assert!(!dc.apply(t, vec![Child(1)]));
        assert_eq!(dc.state(), SelectionState::NoSelection);
    }

    #[test]
    fn test_failure_yields_empty_loaded() {
        let mut dc: DependentCollection<Child> = DependentCollection::new();
        let t = dc.select(5);
        assert!(dc.fail(t));
        assert_eq!(dc.state(), SelectionState::Loaded(5));
        assert!(dc.cache().is_loaded());
        assert!(dc.items().is_empty());
    }

    #[test]
    fn test_reload_keeps_rows_until_applied() {
        let mut dc = DependentCollection::new();
        let t = dc.select(6);
        dc.apply(t, vec![Child(1)]);
        let r = dc.reload().unwrap();
        assert_eq!(dc.items().len(), 1);
        assert!(dc.apply(r, vec![Child(1), Child(2)]));
        assert_eq!(dc.items().len(), 2);
    }
}
