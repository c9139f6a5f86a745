// Shared rendering helpers for tab views.
// Provides status colors plus loading and empty states.

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

use crate::api::{LogLevel, RunState};

/// Format a timestamp as relative time (e.g., "2h ago").
pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    format_elapsed(Utc::now(), dt)
}

fn format_elapsed(now: DateTime<Utc>, dt: &DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(*dt);

    if duration.num_days() > 0 {
        format!("{}d ago", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m ago", duration.num_minutes())
    } else if duration.num_seconds() > 0 {
        format!("{}s ago", duration.num_seconds())
    } else {
        "just now".to_string()
    }
}

/// Get color for a module run state.
pub fn state_color(state: RunState) -> Color {
    match state {
        RunState::Finished => Color::Green,
        RunState::Running => Color::Yellow,
        RunState::Ready | RunState::Waiting => Color::Blue,
        RunState::Paused => Color::Magenta,
        RunState::Failed => Color::Red,
        RunState::Unknown => Color::Gray,
    }
}

/// Get icon for a module run state.
pub fn state_icon(state: RunState) -> &'static str {
    match state {
        RunState::Finished => "✅",
        RunState::Running => "🔄",
        RunState::Ready | RunState::Waiting => "⏳",
        RunState::Paused => "⏸️",
        RunState::Failed => "❌",
        RunState::Unknown => "❓",
    }
}

/// Get color for a log level.
pub fn level_color(level: LogLevel) -> Color {
    match level {
        LogLevel::Debug => Color::DarkGray,
        LogLevel::Info => Color::Cyan,
        LogLevel::Warn => Color::Yellow,
        LogLevel::Error => Color::Red,
        LogLevel::Other => Color::White,
    }
}

/// Render a loading indicator inside a titled block.
pub fn render_loading(frame: &mut Frame, area: Rect, block: Block, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow))
        .block(block);
    frame.render_widget(text, area);
}

/// Render an empty state message inside a titled block.
pub fn render_empty(frame: &mut Frame, area: Rect, block: Block, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(block);
    frame.render_widget(text, area);
}
