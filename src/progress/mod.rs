use indexmap::IndexSet;

use crate::catalog::{Catalog, Category, ItemId};

pub const RESET_PROMPT: &str = "Reset all progress? This cannot be undone.";

/// Set of completed item identifiers. Lives only as long as the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressStore {
    completed: IndexSet<ItemId>,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `id` and returns whether it is now completed.
    pub fn toggle(&mut self, id: ItemId) -> bool {
        if self.completed.shift_remove(&id) {
            tracing::debug!(%id, "item marked pending");
            false
        } else {
            self.completed.insert(id);
            tracing::debug!(%id, "item marked done");
            true
        }
    }

    pub fn is_completed(&self, id: ItemId) -> bool {
        self.completed.contains(&id)
    }

    /// Empties the set only when `confirmed` is true. Returns whether a reset happened.
    pub fn reset_all(&mut self, confirmed: bool) -> bool {
        if !confirmed {
            tracing::debug!("reset declined");
            return false;
        }
        let cleared = self.completed.len();
        self.completed.clear();
        tracing::info!(cleared, "progress reset");
        true
    }

    pub fn reset_all_with<F>(&mut self, confirm: F) -> bool
    where
        F: FnOnce(&str) -> bool,
    {
        let confirmed = confirm(RESET_PROMPT);
        self.reset_all(confirmed)
    }

    pub fn len(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    /// Identifiers in the order they were marked done.
    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.completed.iter().copied()
    }

    pub fn done_count(&self, catalog: &Catalog) -> usize {
        self.completed
            .iter()
            .filter(|id| catalog.contains(**id))
            .count()
    }

    pub fn section_count(&self, catalog: &Catalog, category: Category) -> usize {
        catalog
            .ids_in(category)
            .filter(|id| self.completed.contains(id))
            .count()
    }

    /// `round(100 * done / total)`, always within `0..=100`.
    pub fn percent_complete(&self, catalog: &Catalog) -> u8 {
        percent(self.done_count(catalog), catalog.total())
    }
}

impl FromIterator<ItemId> for ProgressStore {
    fn from_iter<I: IntoIterator<Item = ItemId>>(iter: I) -> Self {
        let mut store = Self::new();
        for id in iter {
            store.completed.insert(id);
        }
        store
    }
}

pub fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let done = done.min(total);
    // Integer half-up rounding.
    ((done * 200 + total) / (total * 2)) as u8
}
