// Tab bar rendering.
// Highlights the active tab and shows the instance's overall state.

use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::state::PollPhase;

/// Draw the tab bar at the top of the screen.
pub fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let monitor = &app.monitor;
    let tabs = monitor.tabs();
    let active = monitor.state().active_tab.as_str();

    let tab_titles: Vec<Line> = tabs
        .iter()
        .enumerate()
        .map(|(i, (key, title))| {
            let style = if *key == active {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(format!("{} {}", i + 1, title), style))
        })
        .collect();

    let selected_index = tabs.iter().position(|(key, _)| *key == active).unwrap_or(0);

    let snapshot = monitor.state().snapshot.as_ref();
    let name = snapshot
        .and_then(|snapshot| snapshot.name())
        .unwrap_or(monitor.instance_name());
    let state = snapshot
        .and_then(|snapshot| snapshot.state())
        .unwrap_or("no data");
    let activity = match monitor.state().phase() {
        PollPhase::Polling => " ⟳",
        PollPhase::Idle => "",
    };

    let tabs_widget = Tabs::new(tab_titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(
                    " wokmon: {} @ {} [{}]{} ",
                    name, app.server_url, state, activity
                ))
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .select(selected_index)
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider(Span::raw(" │ "));

    frame.render_widget(tabs_widget, area);
}
