// Monitoring API response types.
// The status document is kept opaque; typed helpers parse the parts views care about.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// One fetched status document for an instance.
///
/// The payload is shared and read-only: cloning a snapshot is cheap and never
/// copies the document, so views can keep their own handle to it.
#[derive(Debug, Clone)]
pub struct Snapshot {
    document: Arc<Map<String, Value>>,
    received_at: DateTime<Utc>,
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.document == other.document
    }
}

impl Snapshot {
    pub fn new(document: Map<String, Value>) -> Self {
        Self {
            document: Arc::new(document),
            received_at: Utc::now(),
        }
    }

    /// Parse a response body. Anything other than a JSON object is rejected.
    pub fn from_json(body: &str) -> Result<Self> {
        let document: Map<String, Value> = serde_json::from_str(body)?;
        Ok(Self::new(document))
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let document: Map<String, Value> = serde_json::from_value(value)?;
        Ok(Self::new(document))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    /// Instance name reported by the server.
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    /// Overall state: the root module's state, or a top-level `status`.
    pub fn state(&self) -> Option<&str> {
        self.get("root")
            .and_then(|root| root.get("state"))
            .or_else(|| self.get("status"))
            .and_then(Value::as_str)
    }

    /// Root of the module tree, if the document carries one.
    pub fn modules(&self) -> Option<ModuleNode> {
        self.get("root")
            .and_then(|root| ModuleNode::deserialize(root).ok())
    }

    /// Log entries carried by the document. Unrecognized entries are skipped.
    pub fn logs(&self) -> Vec<LogEntry> {
        self.get("logs")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| RawLogEntry::deserialize(entry).ok())
                    .map(LogEntry::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Module run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Ready,
    Waiting,
    Running,
    Paused,
    Finished,
    Failed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl RunState {
    pub fn label(&self) -> &'static str {
        match self {
            RunState::Ready => "ready",
            RunState::Waiting => "waiting",
            RunState::Running => "running",
            RunState::Paused => "paused",
            RunState::Finished => "finished",
            RunState::Failed => "failed",
            RunState::Unknown => "unknown",
        }
    }
}

/// A node in the instance's module tree.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModuleNode {
    pub id: Option<String>,
    pub name: String,
    pub state: RunState,
    pub modules: Vec<ModuleNode>,
    #[serde(alias = "tasks_count_by_state")]
    pub tasks_count: BTreeMap<String, u64>,
}

impl ModuleNode {
    /// Id if present, otherwise the name.
    pub fn label(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }

    /// Depth-first walk of the tree, paired with each node's depth.
    pub fn flatten(&self) -> Vec<(usize, &ModuleNode)> {
        let mut rows = Vec::new();
        self.collect(0, &mut rows);
        rows
    }

    fn collect<'a>(&'a self, depth: usize, rows: &mut Vec<(usize, &'a ModuleNode)>) {
        rows.push((depth, self));
        for child in &self.modules {
            child.collect(depth + 1, rows);
        }
    }

    pub fn total_tasks(&self) -> u64 {
        self.tasks_count.values().sum()
    }
}

/// Log severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Other,
}

impl From<&str> for LogLevel {
    fn from(level: &str) -> Self {
        match level.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warn" | "warning" => LogLevel::Warn,
            "error" | "critical" | "fatal" => LogLevel::Error,
            _ => LogLevel::Other,
        }
    }
}

/// One log line from the instance.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: Option<String>,
    pub level: LogLevel,
    pub name: Option<String>,
    pub text: String,
}

/// Log entries arrive either as `[timestamp, level, name, text]` or as records.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLogEntry {
    Tuple(Option<String>, Option<String>, Option<String>, String),
    Record {
        #[serde(default)]
        timestamp: Option<String>,
        #[serde(default)]
        level: Option<String>,
        #[serde(default)]
        name: Option<String>,
        text: String,
    },
}

impl From<RawLogEntry> for LogEntry {
    fn from(raw: RawLogEntry) -> Self {
        let (timestamp, level, name, text) = match raw {
            RawLogEntry::Tuple(timestamp, level, name, text) => (timestamp, level, name, text),
            RawLogEntry::Record {
                timestamp,
                level,
                name,
                text,
            } => (timestamp, level, name, text),
        };
        Self {
            timestamp,
            level: level.as_deref().map(LogLevel::from).unwrap_or(LogLevel::Other),
            name,
            text,
        }
    }
}
