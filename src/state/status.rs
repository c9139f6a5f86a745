// Status line state management.
// Holds the loading/error banner and a bounded history of status messages.

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// Where the core reports progress and failures.
pub trait StatusSink {
    fn debug(&mut self, message: &str);
    fn error(&mut self, message: &str);
    fn hide(&mut self);
}

/// Status message level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Debug,
    Error,
}

/// A message shown in the status line.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl StatusMessage {
    pub fn debug(message: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Debug,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Terminal status line.
#[derive(Debug)]
pub struct StatusLine {
    /// Banner currently displayed, if any.
    banner: Option<StatusMessage>,
    /// How long an error banner stays up.
    banner_ttl: Duration,
    /// Recent errors, newest last.
    errors: VecDeque<StatusMessage>,
}

impl StatusLine {
    const HISTORY_LIMIT: usize = 50;

    pub fn new(banner_ttl: Duration) -> Self {
        Self {
            banner: None,
            banner_ttl,
            errors: VecDeque::new(),
        }
    }

    pub fn banner(&self) -> Option<&StatusMessage> {
        self.banner.as_ref()
    }

    pub fn errors(&self) -> impl Iterator<Item = &StatusMessage> {
        self.errors.iter()
    }

    /// Drop an error banner once it has been visible for the banner TTL.
    pub fn expire(&mut self, now: DateTime<Utc>) {
        let expired = self.banner.as_ref().is_some_and(|banner| {
            banner.level == StatusLevel::Error
                && now
                    .signed_duration_since(banner.timestamp)
                    .to_std()
                    .unwrap_or(Duration::ZERO)
                    >= self.banner_ttl
        });
        if expired {
            self.banner = None;
        }
    }
}

impl StatusSink for StatusLine {
    fn debug(&mut self, message: &str) {
        tracing::debug!("{}", message);
        self.banner = Some(StatusMessage::debug(message));
    }

    fn error(&mut self, message: &str) {
        tracing::warn!("{}", message);
        let entry = StatusMessage::error(message);
        self.errors.push_back(entry.clone());
        while self.errors.len() > Self::HISTORY_LIMIT {
            self.errors.pop_front();
        }
        self.banner = Some(entry);
    }

    fn hide(&mut self) {
        self.banner = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_then_hide() {
        let mut status = StatusLine::new(Duration::from_secs(5));
        status.debug("Loading status ...");
        assert_eq!(status.banner().unwrap().level, StatusLevel::Debug);
        status.hide();
        assert!(status.banner().is_none());
    }

    #[test]
    fn test_error_banner_expires() {
        let mut status = StatusLine::new(Duration::from_secs(5));
        status.error("Connection error loading status: refused");

        let shown_at = status.banner().unwrap().timestamp;
        status.expire(shown_at + chrono::Duration::seconds(4));
        assert!(status.banner().is_some());
        status.expire(shown_at + chrono::Duration::seconds(5));
        assert!(status.banner().is_none());

        assert_eq!(status.errors().count(), 1);
    }

    #[test]
    fn test_loading_banner_does_not_expire() {
        let mut status = StatusLine::new(Duration::from_secs(5));
        status.debug("Loading status ...");
        status.expire(Utc::now() + chrono::Duration::minutes(10));
        assert!(status.banner().is_some());
    }

    #[test]
    fn test_error_history_is_bounded() {
        let mut status = StatusLine::new(Duration::from_secs(5));
        for i in 0..(StatusLine::HISTORY_LIMIT + 5) {
            status.error(&format!("error {}", i));
        }
        assert_eq!(status.errors().count(), StatusLine::HISTORY_LIMIT);
        assert_eq!(status.errors().next().unwrap().message, "error 5");
    }
}
