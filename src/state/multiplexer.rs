// Tab registry and view multiplexer.
// Routes snapshots to the visible tab only and swaps views on tab selection.

use tracing::{debug, info};

use crate::api::Snapshot;
use crate::error::{MonitorError, Result};
use crate::views::TabView;

use super::widget::WidgetState;

/// Views keyed by tab, in display order. Entries are never removed.
#[derive(Default)]
pub struct TabRegistry {
    tabs: Vec<(String, Box<dyn TabView>)>,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view under `key`. A key can only be registered once.
    pub fn register(&mut self, key: impl Into<String>, view: Box<dyn TabView>) -> Result<()> {
        let key = key.into();
        if self.contains(&key) {
            return Err(MonitorError::DuplicateTab(key));
        }
        self.tabs.push((key, view));
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.tabs.iter().any(|(k, _)| k == key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut dyn TabView> {
        for (k, view) in self.tabs.iter_mut() {
            if k == key {
                return Some(view.as_mut());
            }
        }
        None
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tabs.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.tabs.iter().position(|(k, _)| k == key)
    }
}

/// Decides which registered view receives snapshots.
pub struct ViewMultiplexer {
    registry: TabRegistry,
}

impl ViewMultiplexer {
    pub fn new(registry: TabRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }

    /// Hide every inactive view, then select the initial tab.
    pub fn initialize(&mut self, state: &mut WidgetState) {
        for (key, view) in self.registry.tabs.iter_mut() {
            if *key != state.active_tab {
                view.hide();
            }
        }
        let initial = state.active_tab.clone();
        self.on_tab_selected(state, &initial);
    }

    /// Switch the visible tab. Unknown keys are ignored.
    ///
    /// The new view is updated from the cached snapshot before it is shown,
    /// so it never appears with blank content when data already exists.
    pub fn on_tab_selected(&mut self, state: &mut WidgetState, key: &str) -> bool {
        if !self.registry.contains(key) {
            debug!(tab = key, "ignoring selection of unknown tab");
            return false;
        }

        if let Some(previous) = self.registry.get_mut(&state.active_tab) {
            previous.hide();
        }

        state.active_tab = key.to_string();

        if let Some(view) = self.registry.get_mut(key) {
            if let Some(snapshot) = &state.snapshot {
                view.update(snapshot);
            }
            view.show();
        }

        info!(tab = key, cached = state.snapshot.is_some(), "tab selected");
        true
    }

    /// Deliver a fresh snapshot to whichever tab is active right now.
    pub fn on_snapshot_available(&mut self, state: &WidgetState, snapshot: &Snapshot) {
        if let Some(view) = self.registry.get_mut(&state.active_tab) {
            view.update(snapshot);
        }
    }

    pub fn active_view_mut(&mut self, state: &WidgetState) -> Option<&mut dyn TabView> {
        self.registry.get_mut(&state.active_tab)
    }

    /// Key of the tab after `current`, wrapping around.
    pub fn next_key(&self, current: &str) -> Option<&str> {
        let len = self.registry.len();
        let index = self.registry.position(current).map_or(0, |i| (i + 1) % len);
        self.registry.keys().nth(index)
    }

    /// Key of the tab before `current`, wrapping around.
    pub fn prev_key(&self, current: &str) -> Option<&str> {
        let len = self.registry.len();
        let index = self
            .registry
            .position(current)
            .map_or(0, |i| (i + len - 1) % len);
        self.registry.keys().nth(index)
    }

    /// Tab keys and titles in display order.
    pub fn tabs(&self) -> Vec<(&str, &str)> {
        self.registry
            .tabs
            .iter()
            .map(|(key, view)| (key.as_str(), view.title()))
            .collect()
    }
}
