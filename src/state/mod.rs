// State management module.
// Handles polling, snapshot caching, tab switching, and the status line.

pub mod fetcher;
pub mod multiplexer;
pub mod scheduler;
pub mod status;
pub mod widget;

#[cfg(test)]
pub(crate) mod testing;

pub use fetcher::{FetchOutcome, Fetcher, LOADING_MESSAGE};
pub use multiplexer::{TabRegistry, ViewMultiplexer};
pub use scheduler::PollScheduler;
pub use status::{StatusLevel, StatusLine, StatusMessage, StatusSink};
pub use widget::{PollPhase, WidgetState};
