// Tab views for the instance dashboard.
// Each tab is a view the multiplexer can show, hide, and feed snapshots to.

mod logs;
mod modules;

pub use logs::LogsView;
pub use modules::ModulesView;

use ratatui::prelude::*;

use crate::api::Snapshot;

/// Key of the modules tab.
pub const MODULES_TAB: &str = "modules";
/// Key of the logs tab.
pub const LOGS_TAB: &str = "logs";

/// Capabilities the multiplexer relies on.
pub trait View {
    fn show(&mut self);
    fn hide(&mut self);
    fn update(&mut self, snapshot: &Snapshot);
}

/// Terminal rendering for a view.
pub trait Panel {
    fn title(&self) -> &str;

    fn draw(&mut self, frame: &mut Frame, area: Rect);

    /// Scroll by `delta` rows (negative is up).
    fn scroll(&mut self, _delta: isize) {}
}

/// A view that can be registered as a dashboard tab.
pub trait TabView: View + Panel {}

impl<T: View + Panel> TabView for T {}

/// Settings shared by every tab view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    pub instance_name: String,
}

impl ViewConfig {
    pub fn new(instance_name: impl Into<String>) -> Self {
        Self {
            instance_name: instance_name.into(),
        }
    }
}

/// Build the view for a known tab key.
pub fn build_view(key: &str, config: &ViewConfig) -> Option<Box<dyn TabView>> {
    match key {
        MODULES_TAB => Some(Box::new(ModulesView::new(config.clone()))),
        LOGS_TAB => Some(Box::new(LogsView::new(config.clone()))),
        _ => None,
    }
}

/// Tab keys in display order.
pub const TAB_KEYS: [&str; 2] = [MODULES_TAB, LOGS_TAB];
