// Test doubles for the dashboard core.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use futures::FutureExt;
use futures::future::BoxFuture;
use ratatui::prelude::*;
use serde_json::json;
use tokio::sync::oneshot;

use crate::api::{Snapshot, SnapshotSource};
use crate::error::{MonitorError, Result};
use crate::views::{Panel, View};

use super::status::StatusSink;

/// Snapshot whose only content is `{"status": <status>}`.
pub fn snapshot(status: &str) -> Snapshot {
    Snapshot::from_value(json!({ "status": status })).unwrap()
}

/// A view lifecycle call, tagged with the view that received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Show(String),
    Hide(String),
    /// View name and the snapshot's `status` field.
    Update(String, String),
}

impl Call {
    pub fn show(view: &str) -> Self {
        Call::Show(view.to_string())
    }

    pub fn hide(view: &str) -> Self {
        Call::Hide(view.to_string())
    }

    pub fn update(view: &str, status: &str) -> Self {
        Call::Update(view.to_string(), status.to_string())
    }
}

/// Ordered record of calls shared by every recording view.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    /// Return and clear the recorded calls.
    pub fn take(&self) -> Vec<Call> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

pub struct RecordingView {
    name: String,
    log: CallLog,
}

impl RecordingView {
    pub fn new(name: &str, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            log: log.clone(),
        }
    }
}

impl View for RecordingView {
    fn show(&mut self) {
        self.log.push(Call::show(&self.name));
    }

    fn hide(&mut self) {
        self.log.push(Call::hide(&self.name));
    }

    fn update(&mut self, snapshot: &Snapshot) {
        let status = snapshot.state().unwrap_or_default();
        self.log.push(Call::update(&self.name, status));
    }
}

impl Panel for RecordingView {
    fn title(&self) -> &str {
        &self.name
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) {}
}

/// Sink that records every call.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub debug: Vec<String>,
    pub errors: Vec<String>,
    pub hides: usize,
    /// Kind of every call, in order.
    pub sequence: Vec<&'static str>,
}

impl StatusSink for RecordingSink {
    fn debug(&mut self, message: &str) {
        self.debug.push(message.to_string());
        self.sequence.push("debug");
    }

    fn error(&mut self, message: &str) {
        self.errors.push(message.to_string());
        self.sequence.push("error");
    }

    fn hide(&mut self) {
        self.hides += 1;
        self.sequence.push("hide");
    }
}

/// Snapshot source whose requests stay pending until the test resolves them.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    inner: Arc<Mutex<ScriptedInner>>,
}

#[derive(Default)]
struct ScriptedInner {
    calls: Vec<String>,
    pending: VecDeque<oneshot::Sender<Result<Snapshot>>>,
}

impl ScriptedSource {
    /// Number of fetches started so far.
    pub fn calls(&self) -> usize {
        self.inner.lock().unwrap().calls.len()
    }

    pub fn requested_instances(&self) -> Vec<String> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Resolve the oldest pending fetch.
    pub fn respond(&self, result: Result<Snapshot>) {
        let sender = self
            .inner
            .lock()
            .unwrap()
            .pending
            .pop_front()
            .expect("no pending fetch");
        sender.send(result).ok().expect("fetch future dropped");
    }
}

impl SnapshotSource for ScriptedSource {
    fn fetch(&self, instance_name: &str) -> BoxFuture<'static, Result<Snapshot>> {
        let (tx, rx) = oneshot::channel();
        {
            let mut inner = self.inner.lock().unwrap();
            inner.calls.push(instance_name.to_string());
            inner.pending.push_back(tx);
        }
        async move {
            rx.await.unwrap_or_else(|_| {
                Err(MonitorError::Io(std::io::Error::other("request abandoned")))
            })
        }
        .boxed()
    }
}

/// Snapshot source whose requests panic while being polled.
pub struct PanickingSource;

impl SnapshotSource for PanickingSource {
    fn fetch(&self, _instance_name: &str) -> BoxFuture<'static, Result<Snapshot>> {
        futures::future::lazy(|_| -> Result<Snapshot> { panic!("source blew up") }).boxed()
    }
}

/// A connection-refused failure.
pub fn network_error() -> MonitorError {
    MonitorError::Io(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "connection refused",
    ))
}
