// UI module for rendering the TUI.
// Lays out the tab bar, the active tab's view, and the status line.

pub mod list;
mod tabs;

use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::state::StatusLevel;

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Tab bar
            Constraint::Min(1),    // Active view
            Constraint::Length(1), // Status line
        ])
        .split(frame.area());

    tabs::draw_tabs(frame, app, chunks[0]);

    if let Some(view) = app.monitor.active_view_mut() {
        view.draw(frame, chunks[1]);
    }

    draw_status_bar(frame, app, chunks[2]);

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Draw the status line: banner if one is up, otherwise keybinding hints.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = app.monitor.status();

    let mut spans = match status.banner() {
        Some(banner) if banner.level == StatusLevel::Error => vec![Span::styled(
            format!(" ❌ {}", banner.message),
            Style::default().fg(Color::Red),
        )],
        Some(banner) => vec![Span::styled(
            format!(" ⏳ {}", banner.message),
            Style::default().fg(Color::Yellow),
        )],
        None => vec![
            Span::raw(" Tab "),
            Span::styled("Switch", Style::default().fg(Color::DarkGray)),
            Span::raw("  ↑↓ "),
            Span::styled("Scroll", Style::default().fg(Color::DarkGray)),
            Span::raw("  r "),
            Span::styled("Refresh", Style::default().fg(Color::DarkGray)),
            Span::raw("  ? "),
            Span::styled("Help", Style::default().fg(Color::DarkGray)),
            Span::raw("  q "),
            Span::styled("Quit", Style::default().fg(Color::DarkGray)),
        ],
    };

    if let Some(snapshot) = &app.monitor.state().snapshot {
        spans.push(Span::styled(
            format!(
                "  Updated {}",
                list::format_relative_time(&snapshot.received_at())
            ),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let error_count = status.errors().count();
    if error_count > 0 {
        spans.push(Span::styled(
            format!("  Errors: {}", error_count),
            Style::default().fg(Color::Red),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    // Create a centered popup
    let popup_width = 46.min(area.width);
    let popup_height = 15.min(area.height);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let key_style = Style::default().fg(Color::Cyan);
    let bindings = [
        ("  Tab/S-Tab     ", "Next/previous tab"),
        ("  1-9           ", "Jump to tab"),
        ("  ↑/↓ or j/k    ", "Scroll"),
        ("  PgUp/PgDn     ", "Page scroll"),
        ("  Home/End g/G  ", "Jump to start/end"),
        ("  r             ", "Refresh now"),
        ("  ?             ", "Show/hide this help"),
        ("  q             ", "Quit"),
    ];

    let mut help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
    ];
    help_text.extend(
        bindings
            .iter()
            .map(|(keys, action)| Line::from(vec![Span::styled(*keys, key_style), Span::raw(*action)])),
    );
    help_text.push(Line::from(""));
    help_text.push(Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" or ", Style::default().fg(Color::DarkGray)),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::styled(" to close", Style::default().fg(Color::DarkGray)),
    ]));

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}
