// Snapshot fetcher.
// Keeps at most one status request outstanding and applies its outcome.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::FutureExt;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::{Snapshot, SnapshotSource};
use crate::error::{MonitorError, Result};

use super::multiplexer::ViewMultiplexer;
use super::status::StatusSink;
use super::widget::WidgetState;

pub const LOADING_MESSAGE: &str = "Loading status ...";

/// Result of one status request, delivered back to the UI loop.
#[derive(Debug)]
pub struct FetchOutcome {
    pub result: Result<Snapshot>,
    pub elapsed: Duration,
}

/// Issues status requests for one instance.
pub struct Fetcher {
    instance_name: String,
    source: Arc<dyn SnapshotSource>,
    completions: mpsc::UnboundedSender<FetchOutcome>,
}

impl Fetcher {
    /// Create a fetcher and the channel its outcomes arrive on.
    pub fn new(
        instance_name: impl Into<String>,
        source: Arc<dyn SnapshotSource>,
    ) -> (Self, mpsc::UnboundedReceiver<FetchOutcome>) {
        let (completions, outcomes) = mpsc::unbounded_channel();
        let fetcher = Self {
            instance_name: instance_name.into(),
            source,
            completions,
        };
        (fetcher, outcomes)
    }

    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    /// Start a request unless one is already in flight.
    ///
    /// Returns whether a request was started. The request runs to completion
    /// on the runtime; its outcome must be handed to [`Fetcher::complete`].
    pub fn poll(&self, state: &mut WidgetState, sink: &mut dyn StatusSink) -> bool {
        if state.in_flight {
            debug!(instance = %self.instance_name, "status request already in flight");
            return false;
        }

        state.in_flight = true;
        sink.debug(LOADING_MESSAGE);

        // A panicking source still has to produce an outcome, or the
        // in-flight flag would never clear.
        let request = AssertUnwindSafe(self.source.fetch(&self.instance_name)).catch_unwind();
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let started = Instant::now();
            let result = request
                .await
                .unwrap_or_else(|payload| Err(MonitorError::FetchPanicked(panic_message(&*payload))));
            // The receiver only goes away on shutdown.
            let _ = completions.send(FetchOutcome {
                result,
                elapsed: started.elapsed(),
            });
        });
        true
    }

    /// Apply a finished request.
    ///
    /// Clears the in-flight flag and the loading banner whatever the outcome.
    /// A success replaces the cached snapshot and is dispatched to the tab
    /// active now; a failure is reported and leaves the cache untouched.
    pub fn complete(
        &self,
        state: &mut WidgetState,
        outcome: FetchOutcome,
        mux: &mut ViewMultiplexer,
        sink: &mut dyn StatusSink,
    ) {
        state.in_flight = false;
        sink.hide();

        match outcome.result {
            Ok(snapshot) => {
                info!(
                    instance = %self.instance_name,
                    elapsed = ?outcome.elapsed,
                    tab = %state.active_tab,
                    "status received"
                );
                state.snapshot = Some(snapshot.clone());
                mux.on_snapshot_available(state, &snapshot);
            }
            Err(err) => {
                warn!(
                    instance = %self.instance_name,
                    elapsed = ?outcome.elapsed,
                    error = %err,
                    "status request failed"
                );
                let category = if err.is_connection_error() {
                    "Connection error"
                } else {
                    "Error"
                };
                sink.error(&format!("{} loading status: {}", category, err));
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
