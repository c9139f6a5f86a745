// Dashboard core.
// Ties the widget state, fetcher, and multiplexer together behind one owner.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::SnapshotSource;
use crate::error::Result;
use crate::state::{
    FetchOutcome, Fetcher, StatusLine, StatusSink, TabRegistry, ViewMultiplexer, WidgetState,
};
use crate::views::{TAB_KEYS, TabView, ViewConfig, build_view};

/// Register the modules and logs views for an instance.
pub fn default_registry(config: &ViewConfig) -> Result<TabRegistry> {
    let mut registry = TabRegistry::new();
    for key in TAB_KEYS {
        if let Some(view) = build_view(key, config) {
            registry.register(key, view)?;
        }
    }
    Ok(registry)
}

/// Live state of one monitored instance.
///
/// Every handler runs to completion before the next event is processed, so
/// the state never needs locking.
pub struct Monitor<S: StatusSink = StatusLine> {
    state: WidgetState,
    fetcher: Fetcher,
    mux: ViewMultiplexer,
    status: S,
}

impl<S: StatusSink> Monitor<S> {
    pub fn new(
        instance_name: &str,
        initial_tab: &str,
        source: Arc<dyn SnapshotSource>,
        registry: TabRegistry,
        status: S,
    ) -> (Self, mpsc::UnboundedReceiver<FetchOutcome>) {
        let (fetcher, outcomes) = Fetcher::new(instance_name, source);
        let monitor = Self {
            state: WidgetState::new(initial_tab),
            fetcher,
            mux: ViewMultiplexer::new(registry),
            status,
        };
        (monitor, outcomes)
    }

    /// Show the initial tab and hide the others.
    pub fn start(&mut self) {
        self.mux.initialize(&mut self.state);
    }

    pub fn poll(&mut self) -> bool {
        self.fetcher.poll(&mut self.state, &mut self.status)
    }

    pub fn complete(&mut self, outcome: FetchOutcome) {
        self.fetcher
            .complete(&mut self.state, outcome, &mut self.mux, &mut self.status);
    }

    pub fn select_tab(&mut self, key: &str) -> bool {
        self.mux.on_tab_selected(&mut self.state, key)
    }

    pub fn select_next_tab(&mut self) -> bool {
        match self.mux.next_key(&self.state.active_tab).map(str::to_string) {
            Some(key) => self.select_tab(&key),
            None => false,
        }
    }

    pub fn select_prev_tab(&mut self) -> bool {
        match self.mux.prev_key(&self.state.active_tab).map(str::to_string) {
            Some(key) => self.select_tab(&key),
            None => false,
        }
    }

    pub fn instance_name(&self) -> &str {
        self.fetcher.instance_name()
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn status(&self) -> &S {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut S {
        &mut self.status
    }

    pub fn tabs(&self) -> Vec<(&str, &str)> {
        self.mux.tabs()
    }

    pub fn active_view_mut(&mut self) -> Option<&mut dyn TabView> {
        self.mux.active_view_mut(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PollPhase;
    use crate::state::testing::{
        Call, CallLog, RecordingSink, RecordingView, ScriptedSource, network_error, snapshot,
    };

    fn monitor(
        initial_tab: &str,
    ) -> (
        Monitor<RecordingSink>,
        mpsc::UnboundedReceiver<FetchOutcome>,
        ScriptedSource,
        CallLog,
    ) {
        let log = CallLog::default();
        let mut registry = TabRegistry::new();
        registry
            .register("modules", Box::new(RecordingView::new("modules", &log)))
            .unwrap();
        registry
            .register("logs", Box::new(RecordingView::new("logs", &log)))
            .unwrap();
        let source = ScriptedSource::default();
        let (monitor, outcomes) = Monitor::new(
            "run-42",
            initial_tab,
            Arc::new(source.clone()),
            registry,
            RecordingSink::default(),
        );
        (monitor, outcomes, source, log)
    }

    #[tokio::test]
    async fn test_startup_then_switch_scenario() {
        let (mut monitor, mut outcomes, source, log) = monitor("logs");
        monitor.start();
        log.take();

        assert!(monitor.poll());
        source.respond(Ok(snapshot("ok")));
        monitor.complete(outcomes.recv().await.unwrap());

        assert_eq!(log.take(), vec![Call::update("logs", "ok")]);

        assert!(monitor.select_tab("modules"));
        assert_eq!(
            log.take(),
            vec![
                Call::hide("logs"),
                Call::update("modules", "ok"),
                Call::show("modules"),
            ]
        );
    }

    #[tokio::test]
    async fn test_network_failure_scenario() {
        let (mut monitor, mut outcomes, source, log) = monitor("logs");
        monitor.start();
        log.take();

        monitor.poll();
        assert_eq!(monitor.state().phase(), PollPhase::Polling);
        source.respond(Err(network_error()));
        monitor.complete(outcomes.recv().await.unwrap());

        assert_eq!(monitor.status().errors.len(), 1);
        assert_eq!(monitor.status().sequence, vec!["debug", "hide", "error"]);
        assert!(monitor.state().snapshot.is_none());
        assert_eq!(monitor.state().phase(), PollPhase::Idle);
        assert!(log.take().is_empty());
    }

    #[tokio::test]
    async fn test_hidden_tab_never_updated() {
        let (mut monitor, mut outcomes, source, log) = monitor("logs");
        monitor.start();
        log.take();

        for status in ["ok", "busy", "done"] {
            monitor.poll();
            source.respond(Ok(snapshot(status)));
            monitor.complete(outcomes.recv().await.unwrap());
        }

        let calls = log.take();
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|call| matches!(call, Call::Update(view, _) if view == "logs")));
    }

    #[tokio::test]
    async fn test_switch_away_and_back_before_first_snapshot() {
        let (mut monitor, _outcomes, _source, log) = monitor("logs");
        monitor.start();
        log.take();

        monitor.select_next_tab();
        monitor.select_prev_tab();

        assert_eq!(monitor.state().active_tab, "logs");
        assert_eq!(
            log.take(),
            vec![
                Call::hide("logs"),
                Call::show("modules"),
                Call::hide("modules"),
                Call::show("logs"),
            ]
        );
    }

    #[tokio::test]
    async fn test_tick_while_polling_is_noop() {
        let (mut monitor, mut outcomes, source, _log) = monitor("modules");
        monitor.start();

        assert!(monitor.poll());
        assert!(!monitor.poll());
        assert!(monitor.select_tab("logs"));
        assert!(!monitor.poll());
        assert_eq!(source.calls(), 1);

        source.respond(Ok(snapshot("ok")));
        monitor.complete(outcomes.recv().await.unwrap());
        assert!(monitor.poll());
        assert_eq!(source.calls(), 2);
    }

    #[test]
    fn test_default_registry() {
        let registry = default_registry(&ViewConfig::new("run-42")).unwrap();
        let keys: Vec<&str> = registry.keys().collect();
        assert_eq!(keys, vec!["modules", "logs"]);
    }
}
