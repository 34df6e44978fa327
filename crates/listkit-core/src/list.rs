//! Consumer-side list state.
//!
//! Loads cannot be cancelled, so a consumer that starts a new load while an
//! older one is in flight must ignore the older result when it arrives.
//! [`ItemList`] does that with a generation counter: each
//! [`begin_load`](ItemList::begin_load) issues a [`LoadTicket`] and only the
//! newest ticket may apply its result.

use crate::source::{LoadResult, SourceError};
use crate::ItemView;

/// Token identifying one issued load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Idle,
    Loading,
    Loaded,
    Failed(SourceError),
}

/// What applying a result did to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Replaced,
    Failed,
    Stale,
}

#[derive(Debug)]
pub struct ItemList {
    generation: u64,
    items: Vec<ItemView>,
    state: ListState,
}

impl Default for ItemList {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemList {
    pub const fn new() -> Self {
        Self {
            generation: 0,
            items: Vec::new(),
            state: ListState::Idle,
        }
    }

    /// Whether the list has nothing to show and should load on appearance.
    pub fn needs_refresh(&self) -> bool {
        self.items.is_empty() && self.state != ListState::Loading
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation = self.generation.wrapping_add(1);
        self.state = ListState::Loading;
        LoadTicket(self.generation)
    }

    /// Applies a delivered result unless a newer load has been issued.
    ///
    /// Success replaces the items; failure keeps the previous items visible
    /// and records the error.
    pub fn apply(&mut self, ticket: LoadTicket, result: LoadResult) -> Applied {
        if ticket.0 != self.generation {
            return Applied::Stale;
        }

        match result {
            Ok(items) => {
                self.items = items;
                self.state = ListState::Loaded;
                Applied::Replaced
            }
            Err(error) => {
                self.state = ListState::Failed(error);
                Applied::Failed
            }
        }
    }

    pub fn items(&self) -> &[ItemView] {
        &self.items
    }

    pub const fn state(&self) -> &ListState {
        &self.state
    }

    /// Runs the selection callback of the row at `index`, if any.
    pub fn select(&self, index: usize) -> bool {
        match self.items.get(index) {
            Some(item) => {
                item.select();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn rows(labels: &[&str]) -> Vec<ItemView> {
        labels
            .iter()
            .map(|label| ItemView::new(*label, "", Arc::new(|| {})))
            .collect()
    }

    #[test]
    fn fresh_list_needs_refresh() {
        let list = ItemList::new();
        assert!(list.needs_refresh());
        assert_eq!(list.state(), &ListState::Idle);
    }

    #[test]
    fn stale_results_are_ignored() {
        let mut list = ItemList::new();
        let first = list.begin_load();
        let second = list.begin_load();

        assert_eq!(list.apply(first, Ok(rows(&["old"]))), Applied::Stale);
        assert!(list.items().is_empty());

        assert_eq!(list.apply(second, Ok(rows(&["new"]))), Applied::Replaced);
        assert_eq!(list.items()[0].label, "new");
        assert!(!list.needs_refresh());
    }

    #[test]
    fn failure_keeps_previous_items() {
        let mut list = ItemList::new();
        let ticket = list.begin_load();
        list.apply(ticket, Ok(rows(&["a", "b"])));

        let ticket = list.begin_load();
        let applied = list.apply(ticket, Err(SourceError::transport("offline")));

        assert_eq!(applied, Applied::Failed);
        assert_eq!(list.items().len(), 2);
        assert!(matches!(list.state(), ListState::Failed(error) if error.message() == "offline"));
    }

    #[test]
    fn select_out_of_range_is_a_no_op() {
        let list = ItemList::new();
        assert!(!list.select(3));
    }
}
