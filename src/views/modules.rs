// Modules tab.
// Renders the instance's module tree with run states and task counts.

use ratatui::{prelude::*, widgets::*};

use crate::api::{ModuleNode, Snapshot};
use crate::ui::list::{render_empty, render_loading, state_color, state_icon};

use super::{Panel, View, ViewConfig};

pub struct ModulesView {
    config: ViewConfig,
    visible: bool,
    received: bool,
    root: Option<ModuleNode>,
    list_state: ListState,
}

impl ModulesView {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            visible: false,
            received: false,
            root: None,
            list_state: ListState::default(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn row_count(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.flatten().len())
    }

    /// Keep the selection inside the current rows.
    fn clamp_selection(&mut self) {
        let rows = self.row_count();
        match self.list_state.selected() {
            _ if rows == 0 => self.list_state.select(None),
            Some(i) if i >= rows => self.list_state.select(Some(rows - 1)),
            None => self.list_state.select(Some(0)),
            Some(_) => {}
        }
    }

    fn block(&self) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Modules: {} ", self.config.instance_name))
    }
}

impl View for ModulesView {
    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn update(&mut self, snapshot: &Snapshot) {
        self.received = true;
        self.root = snapshot.modules();
        self.clamp_selection();
    }
}

impl Panel for ModulesView {
    fn title(&self) -> &str {
        "Modules"
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }
        let block = self.block();
        if !self.received {
            render_loading(frame, area, block, "Waiting for instance status");
            return;
        }
        let Some(root) = &self.root else {
            render_empty(frame, area, block, "No module information");
            return;
        };

        let items: Vec<ListItem> = root
            .flatten()
            .into_iter()
            .map(|(depth, node)| {
                let mut spans = vec![
                    Span::raw("  ".repeat(depth)),
                    Span::raw(format!("{} ", state_icon(node.state))),
                    Span::styled(
                        node.label().to_string(),
                        Style::default().fg(state_color(node.state)),
                    ),
                    Span::styled(
                        format!("  {}", node.state.label()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ];

                let total = node.total_tasks();
                if total > 0 {
                    let finished = node.tasks_count.get("finished").copied().unwrap_or(0);
                    spans.push(Span::styled(
                        format!("  {}/{} tasks", finished, total),
                        Style::default().fg(Color::Cyan),
                    ));
                }

                ListItem::new(Line::from(spans))
            })
            .collect();

        let list_widget = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        frame.render_stateful_widget(list_widget, area, &mut self.list_state);
    }

    fn scroll(&mut self, delta: isize) {
        let rows = self.row_count();
        if rows == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(rows - 1);
        self.list_state.select(Some(next));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use serde_json::json;

    fn snapshot() -> Snapshot {
        Snapshot::from_value(json!({
            "root": {
                "name": "pipeline",
                "state": "running",
                "tasks_count": {"finished": 2, "running": 1},
                "modules": [
                    {"name": "fetch", "state": "finished"},
                    {"name": "score", "state": "failed"}
                ]
            }
        }))
        .unwrap()
    }

    fn shown() -> ModulesView {
        let mut view = ModulesView::new(ViewConfig::new("run-42"));
        view.show();
        view
    }

    fn render(view: &mut ModulesView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        terminal.draw(|frame| view.draw(frame, frame.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_show_hide() {
        let mut view = ModulesView::new(ViewConfig::new("run-42"));
        assert!(!view.is_visible());
        view.show();
        assert!(view.is_visible());
        view.hide();
        assert!(!view.is_visible());
    }

    #[test]
    fn test_hidden_view_draws_nothing() {
        let mut view = shown();
        view.update(&snapshot());
        view.hide();
        let screen = render(&mut view);
        assert!(!screen.contains("Modules"));
        assert!(!screen.contains("pipeline"));
    }

    #[test]
    fn test_renders_waiting_before_first_update() {
        let mut view = shown();
        let screen = render(&mut view);
        assert!(screen.contains("Waiting for instance status"));
        assert!(screen.contains("Modules: run-42"));
    }

    #[test]
    fn test_renders_module_tree() {
        let mut view = shown();
        view.update(&snapshot());
        let screen = render(&mut view);
        assert!(screen.contains("pipeline"));
        assert!(screen.contains("2/3 tasks"));
        assert!(screen.contains("fetch"));
        assert!(screen.contains("failed"));
    }

    #[test]
    fn test_snapshot_without_modules() {
        let mut view = shown();
        view.update(&Snapshot::from_value(json!({"status": "ok"})).unwrap());
        assert!(render(&mut view).contains("No module information"));
    }

    #[test]
    fn test_scroll_stays_in_bounds() {
        let mut view = ModulesView::new(ViewConfig::new("run-42"));
        view.scroll(1);
        assert_eq!(view.list_state.selected(), None);

        view.update(&snapshot());
        assert_eq!(view.list_state.selected(), Some(0));
        view.scroll(10);
        assert_eq!(view.list_state.selected(), Some(2));
        view.scroll(-10);
        assert_eq!(view.list_state.selected(), Some(0));
    }
}
