// Widget state shared by the fetch and tab-selection paths.

use crate::api::Snapshot;

/// Whether a status request is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    Idle,
    Polling,
}

/// Everything the dashboard core mutates.
///
/// Owned by the monitor and lent to the fetcher and multiplexer for the
/// duration of a single handler, so handlers never observe each other's
/// partial updates.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetState {
    /// Key of the visible tab.
    pub active_tab: String,
    /// Last snapshot received; `None` until the first successful fetch.
    pub snapshot: Option<Snapshot>,
    /// True exactly while a fetch is outstanding.
    pub in_flight: bool,
}

impl WidgetState {
    pub fn new(active_tab: impl Into<String>) -> Self {
        Self {
            active_tab: active_tab.into(),
            snapshot: None,
            in_flight: false,
        }
    }

    pub fn phase(&self) -> PollPhase {
        if self.in_flight {
            PollPhase::Polling
        } else {
            PollPhase::Idle
        }
    }
}
