// Logs tab.
// Renders the instance log stream, following the tail until the user scrolls.

use ratatui::{prelude::*, widgets::*};

use crate::api::{LogEntry, Snapshot};
use crate::ui::list::{level_color, render_empty, render_loading};

use super::{Panel, View, ViewConfig};

pub struct LogsView {
    config: ViewConfig,
    visible: bool,
    received: bool,
    entries: Vec<LogEntry>,
    /// First visible line when not following.
    offset: usize,
    follow: bool,
    /// Inner height from the last draw, used to clamp scrolling.
    viewport: usize,
}

impl LogsView {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            visible: false,
            received: false,
            entries: Vec::new(),
            offset: 0,
            follow: true,
            viewport: 0,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }

    fn max_offset(&self) -> usize {
        self.entries.len().saturating_sub(self.viewport)
    }

    fn visible_offset(&self) -> usize {
        if self.follow {
            self.max_offset()
        } else {
            self.offset.min(self.max_offset())
        }
    }

    fn line(entry: &LogEntry) -> Line<'_> {
        let mut spans = Vec::new();
        if let Some(timestamp) = &entry.timestamp {
            spans.push(Span::styled(
                format!("{} ", timestamp),
                Style::default().fg(Color::DarkGray),
            ));
        }
        if let Some(name) = &entry.name {
            spans.push(Span::styled(
                format!("{} ", name),
                Style::default().fg(Color::Magenta),
            ));
        }
        spans.push(Span::styled(
            entry.text.as_str(),
            Style::default().fg(level_color(entry.level)),
        ));
        Line::from(spans)
    }
}

impl View for LogsView {
    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn update(&mut self, snapshot: &Snapshot) {
        self.received = true;
        self.entries = snapshot.logs();
    }
}

impl Panel for LogsView {
    fn title(&self) -> &str {
        "Logs"
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }
        self.viewport = area.height.saturating_sub(2) as usize;

        let title = if self.entries.is_empty() {
            format!(" Logs: {} ", self.config.instance_name)
        } else {
            let start = self.visible_offset();
            format!(
                " Logs: {} [{}-{}/{}]{} ",
                self.config.instance_name,
                start + 1,
                (start + self.viewport).min(self.entries.len()),
                self.entries.len(),
                if self.follow { " following" } else { "" }
            )
        };
        let block = Block::default().borders(Borders::ALL).title(title);

        if !self.received {
            render_loading(frame, area, block, "Waiting for instance status");
            return;
        }
        if self.entries.is_empty() {
            render_empty(frame, area, block, "No log entries");
            return;
        }

        let offset = self.visible_offset();
        let lines: Vec<Line> = self
            .entries
            .iter()
            .skip(offset)
            .take(self.viewport)
            .map(Self::line)
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn scroll(&mut self, delta: isize) {
        let max = self.max_offset();
        let next = self.visible_offset().saturating_add_signed(delta).min(max);
        self.offset = next;
        self.follow = next >= max;
    }
}
