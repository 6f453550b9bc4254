//! Dashboard view state over an assembled timeline
//!
//! Pure presentation logic: category filtering, incremental reveal and the
//! full-view handoff signal. Holds no I/O.

use std::collections::{HashMap, HashSet};

use opsdeck_domain::constants::{
    MAX_DASHBOARD_ITEMS, TIMELINE_INITIAL_ITEMS, TIMELINE_PAGE_SIZE,
};
use opsdeck_domain::{EventCategory, TimelineEvent};

/// Filterable, incrementally revealed view over one client's feed
#[derive(Debug)]
pub struct TimelineView {
    events: Vec<TimelineEvent>,
    selected: HashSet<EventCategory>,
    display_count: usize,
}

impl TimelineView {
    /// Wrap an assembled feed, showing the initial page with no filters
    pub fn new(events: Vec<TimelineEvent>) -> Self {
        Self { events, selected: HashSet::new(), display_count: TIMELINE_INITIAL_ITEMS }
    }

    /// Toggle one category in the multi-select filter.
    ///
    /// Resets the reveal to the initial page, since the visible slice
    /// changes meaning.
    pub fn toggle_filter(&mut self, category: EventCategory) {
        if !self.selected.remove(&category) {
            self.selected.insert(category);
        }
        self.display_count = TIMELINE_INITIAL_ITEMS;
    }

    /// Drop all category filters
    pub fn clear_filters(&mut self) {
        self.selected.clear();
        self.display_count = TIMELINE_INITIAL_ITEMS;
    }

    /// Currently selected categories (empty means all)
    pub fn selected_filters(&self) -> &HashSet<EventCategory> {
        &self.selected
    }

    /// Events passing the filter: an event is kept when no category is
    /// selected, or when its category is among the selected ones.
    pub fn filtered(&self) -> Vec<&TimelineEvent> {
        self.events
            .iter()
            .filter(|e| self.selected.is_empty() || self.selected.contains(&e.category))
            .collect()
    }

    /// The slice the dashboard renders right now
    pub fn visible(&self) -> Vec<&TimelineEvent> {
        let mut filtered = self.filtered();
        filtered.truncate(self.display_count.min(MAX_DASHBOARD_ITEMS));
        filtered
    }

    /// Reveal one more page, never past the dashboard cap
    pub fn load_more(&mut self) {
        self.display_count = (self.display_count + TIMELINE_PAGE_SIZE).min(MAX_DASHBOARD_ITEMS);
    }

    /// Whether another page can be revealed within the cap
    pub fn has_more(&self) -> bool {
        let filtered_len = self.filtered().len();
        self.display_count < filtered_len.min(MAX_DASHBOARD_ITEMS)
    }

    /// Whether the dashboard is exhausted while more events exist, meaning
    /// the UI should hand off to the dedicated full-history page
    pub fn needs_full_view(&self) -> bool {
        self.display_count >= MAX_DASHBOARD_ITEMS && self.filtered().len() > MAX_DASHBOARD_ITEMS
    }

    /// Event counts per category, for filter badges
    pub fn counts_by_category(&self) -> HashMap<EventCategory, usize> {
        let mut counts = HashMap::new();
        for event in &self.events {
            *counts.entry(event.category).or_insert(0) += 1;
        }
        counts
    }

    /// All events, unfiltered
    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }
}
