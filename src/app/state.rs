use std::time::Instant;

use crate::catalog::{visible, Catalog, Category, FilterMode, ItemId};
use crate::config::AppConfig;
use crate::progress::{ProgressStore, RESET_PROMPT};
use crate::status::{SyncEvent, SyncIndicator, SyncStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemView<'a> {
    pub id: ItemId,
    pub text: &'a str,
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub done: usize,
    pub percent: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionCount {
    pub done: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayState {
    ConfirmReset,
}

/// All view state for one session. Every change goes through the methods
/// below; derived values are recomputed on each call.
#[derive(Debug)]
pub struct TrackerState {
    catalog: Catalog,
    progress: ProgressStore,
    filter: FilterMode,
    expanded: Option<Category>,
    sync: SyncIndicator,
    selected: usize,
    overlay: Option<OverlayState>,
    pub status_message: Option<String>,
}

impl TrackerState {
    pub fn new(catalog: Catalog, config: &AppConfig) -> Self {
        let mut sync = SyncIndicator::new(&config.status);
        sync.mark_synced(Instant::now());
        Self {
            catalog,
            progress: ProgressStore::new(),
            filter: config.default_filter,
            expanded: config.expanded_section.category(),
            sync,
            selected: 0,
            overlay: None,
            status_message: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn expanded(&self) -> Option<Category> {
        self.expanded
    }

    pub fn sync_status(&self) -> &SyncStatus {
        self.sync.status()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn overlay(&self) -> Option<&OverlayState> {
        self.overlay.as_ref()
    }

    pub fn set_status_message<S: Into<String>>(&mut self, message: Option<S>) {
        self.status_message = message.map(Into::into);
    }

    pub fn is_completed(&self, id: ItemId) -> bool {
        self.progress.is_completed(id)
    }

    pub fn toggle(&mut self, id: ItemId) -> bool {
        let done = self.progress.toggle(id);
        self.sync.mark_synced(Instant::now());
        self.normalize_selection();
        done
    }

    pub fn toggle_selected(&mut self) -> Option<(ItemId, bool)> {
        let id = self.selected_item()?.id;
        let done = self.toggle(id);
        Some((id, done))
    }

    pub fn set_filter(&mut self, mode: FilterMode) {
        if self.filter != mode {
            tracing::debug!(from = %self.filter, to = %mode, "filter changed");
        }
        self.filter = mode;
        self.normalize_selection();
    }

    pub fn cycle_filter(&mut self) -> FilterMode {
        self.set_filter(self.filter.next());
        self.filter
    }

    /// Expands `category`, collapsing whichever section was open, or
    /// collapses it when it is already the expanded one.
    pub fn toggle_section(&mut self, category: Category) {
        self.expanded = if self.expanded == Some(category) {
            None
        } else {
            Some(category)
        };
        self.selected = 0;
    }

    pub fn switch_section(&mut self) {
        let next = self
            .expanded
            .map(Category::other)
            .unwrap_or(Category::Common);
        self.toggle_section(next);
    }

    pub fn request_reset(&mut self) {
        self.overlay = Some(OverlayState::ConfirmReset);
        self.set_status_message(Some(RESET_PROMPT));
    }

    pub fn confirm_reset(&mut self) -> bool {
        if self.overlay.take().is_none() {
            return false;
        }
        let reset = self.progress.reset_all(true);
        if reset {
            self.sync.mark_synced(Instant::now());
            self.normalize_selection();
            self.set_status_message(Some("All progress reset"));
        }
        reset
    }

    pub fn cancel_reset(&mut self) {
        if self.overlay.take().is_some() {
            self.progress.reset_all(false);
            self.set_status_message(Some("Reset canceled"));
        }
    }

    pub fn tick(&mut self, now: Instant) -> Option<SyncEvent> {
        self.sync.poll(now)
    }

    pub fn summary(&self) -> Summary {
        Summary {
            total: self.catalog.total(),
            done: self.progress.done_count(&self.catalog),
            percent: self.progress.percent_complete(&self.catalog),
        }
    }

    pub fn section_counts(&self, category: Category) -> SectionCount {
        SectionCount {
            done: self.progress.section_count(&self.catalog, category),
            total: self.catalog.len(category),
        }
    }

    pub fn visible_items(&self, category: Category) -> Vec<ItemView<'_>> {
        self.catalog
            .items(category)
            .map(|(id, text)| ItemView {
                id,
                text,
                completed: self.progress.is_completed(id),
            })
            .filter(|item| visible(item.completed, self.filter))
            .collect()
    }

    /// Rows of the expanded section; empty when both are collapsed.
    pub fn rows(&self) -> Vec<ItemView<'_>> {
        self.expanded
            .map(|category| self.visible_items(category))
            .unwrap_or_default()
    }

    pub fn selected_item(&self) -> Option<ItemView<'_>> {
        self.rows().get(self.selected).copied()
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.rows().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let current = self.selected as isize;
        self.selected = (current + delta).clamp(0, len as isize - 1) as usize;
    }

    fn normalize_selection(&mut self) {
        let len = self.rows().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}
