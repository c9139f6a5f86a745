// Error types for wokmon.
// Covers status fetch failures, configuration problems, and tab registration.

use std::io::ErrorKind;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Server { status: StatusCode, body: String },

    #[error("invalid status document: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("status request panicked: {0}")]
    FetchPanicked(String),

    #[error("invalid server URL: {0}")]
    InvalidUrl(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("tab already registered: {0}")]
    DuplicateTab(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MonitorError {
    /// Whether this is a transport, server or decode failure of a status fetch.
    pub fn is_connection_error(&self) -> bool {
        match self {
            MonitorError::Transport(_) | MonitorError::Server { .. } | MonitorError::Decode(_) => {
                true
            }
            MonitorError::Io(err) => matches!(
                err.kind(),
                ErrorKind::ConnectionRefused
                    | ErrorKind::ConnectionReset
                    | ErrorKind::ConnectionAborted
                    | ErrorKind::NotConnected
                    | ErrorKind::TimedOut
            ),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, MonitorError>;
