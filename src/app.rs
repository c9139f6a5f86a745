// App state and main event loop.
// Multiplexes poll ticks, fetch completions, and keyboard input on one task.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::prelude::*;
use tokio::sync::mpsc;

use crate::api::SnapshotSource;
use crate::config::Config;
use crate::error::Result;
use crate::monitor::{Monitor, default_registry};
use crate::state::{FetchOutcome, PollScheduler, StatusLine};
use crate::ui;
use crate::views::ViewConfig;

/// How often the screen is redrawn when nothing else happens.
const REDRAW_INTERVAL: Duration = Duration::from_millis(500);
/// Rows moved by PgUp/PgDn.
const PAGE_SIZE: isize = 10;

/// What woke the event loop.
enum LoopEvent {
    Tick,
    Fetched(FetchOutcome),
    Input(Option<io::Result<Event>>),
    Redraw,
}

/// Main application state.
pub struct App {
    pub monitor: Monitor<StatusLine>,
    /// Base URL shown in the title bar.
    pub server_url: String,
    /// Whether the help overlay is open.
    pub show_help: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
    outcomes: mpsc::UnboundedReceiver<FetchOutcome>,
    scheduler: PollScheduler,
}

impl App {
    /// Must be called from within a tokio runtime.
    pub fn new(config: &Config, source: Arc<dyn SnapshotSource>) -> Result<Self> {
        let registry = default_registry(&ViewConfig::new(&config.instance_name))?;
        let (monitor, outcomes) = Monitor::new(
            &config.instance_name,
            &config.initial_tab,
            source,
            registry,
            StatusLine::new(config.banner_ttl),
        );

        Ok(Self {
            monitor,
            server_url: config.server_url.clone(),
            show_help: false,
            should_quit: false,
            outcomes,
            scheduler: PollScheduler::new(config.poll_interval),
        })
    }

    /// Main event loop.
    pub async fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        self.monitor.start();
        let mut events = EventStream::new();

        while !self.should_quit {
            self.monitor.status_mut().expire(Utc::now());
            terminal.draw(|frame| ui::draw(frame, self))?;

            let event = tokio::select! {
                _ = self.scheduler.tick() => LoopEvent::Tick,
                Some(outcome) = self.outcomes.recv() => LoopEvent::Fetched(outcome),
                input = events.next() => LoopEvent::Input(input),
                _ = tokio::time::sleep(REDRAW_INTERVAL) => LoopEvent::Redraw,
            };

            match event {
                LoopEvent::Tick => {
                    self.monitor.poll();
                }
                LoopEvent::Fetched(outcome) => self.monitor.complete(outcome),
                LoopEvent::Input(Some(Ok(Event::Key(key)))) => self.handle_key(key),
                LoopEvent::Input(Some(Ok(_))) | LoopEvent::Redraw => {}
                LoopEvent::Input(Some(Err(e))) => return Err(e),
                LoopEvent::Input(None) => self.should_quit = true,
            }
        }
        Ok(())
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab => {
                self.monitor.select_next_tab();
            }
            KeyCode::BackTab => {
                self.monitor.select_prev_tab();
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                let key = self
                    .monitor
                    .tabs()
                    .get(index)
                    .map(|(key, _)| key.to_string());
                if let Some(key) = key {
                    self.monitor.select_tab(&key);
                }
            }
            KeyCode::Char('r') => {
                self.monitor.poll();
            }
            KeyCode::Up | KeyCode::Char('k') => self.scroll(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll(1),
            KeyCode::PageUp => self.scroll(-PAGE_SIZE),
            KeyCode::PageDown => self.scroll(PAGE_SIZE),
            KeyCode::Home | KeyCode::Char('g') => self.scroll(isize::MIN),
            KeyCode::End | KeyCode::Char('G') => self.scroll(isize::MAX),
            _ => {}
        }
    }

    fn scroll(&mut self, delta: isize) {
        if let Some(view) = self.monitor.active_view_mut() {
            view.scroll(delta);
        }
    }
}
