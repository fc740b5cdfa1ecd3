//! Application core — event loop, overlay management, action dispatch.

use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use whereabouts_core::FetchService;

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screens::LocationsScreen;
use crate::theme;
use crate::tui::Tui;

/// Top-level application state and event loop.
pub struct App {
    /// The one screen: the locations table.
    screen: Box<dyn Component>,
    /// Whether the app should keep running.
    running: bool,
    /// Help overlay visibility.
    help_visible: bool,
    /// Search overlay visibility.
    search_active: bool,
    /// Current search buffer (mirrors the screen's view state).
    search_query: String,
    /// Action sender — components can dispatch actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Fetch service, consumed when the bridge task spawns.
    service: Option<FetchService>,
    /// Cancellation token for the fetch bridge task.
    fetch_cancel: CancellationToken,
}

impl App {
    pub fn new(service: FetchService) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            screen: Box::new(LocationsScreen::new()),
            running: true,
            help_visible: false,
            search_active: false,
            search_query: String::new(),
            action_tx,
            action_rx,
            service: Some(service),
            fetch_cancel: CancellationToken::new(),
        }
    }

    /// Run the main event loop. This is the heart of the TUI.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.screen.init(self.action_tx.clone())?;

        // Spawn the one-shot fetch. The user can interact immediately;
        // until the bridge reports back the table is simply empty.
        if let Some(service) = self.service.take() {
            let cancel = self.fetch_cancel.clone();
            let tx = self.action_tx.clone();
            tokio::spawn(async move {
                crate::fetch_bridge::spawn_fetch_bridge(service, tx, cancel).await;
            });
        }

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            // 1. Wait for the next event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event → action(s)
            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // 3. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        // Cancel the fetch bridge and clean up
        self.fetch_cancel.cancel();
        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// table keys are delegated to the screen component.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Search overlay captures all input while active. Every change
        // dispatches the buffer as-is: filtering uses the value just
        // typed, never a stale one.
        if self.search_active {
            return match key.code {
                KeyCode::Esc => Ok(Some(Action::CloseSearch)),
                KeyCode::Enter => Ok(Some(Action::SearchSubmit)),
                KeyCode::Backspace => {
                    self.search_query.pop();
                    Ok(Some(Action::SearchInput(self.search_query.clone())))
                }
                KeyCode::Char(c) => {
                    self.search_query.push(c);
                    Ok(Some(Action::SearchInput(self.search_query.clone())))
                }
                _ => Ok(None),
            };
        }

        if self.help_visible {
            // In help mode, Esc or ? closes help
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        // Global keybindings
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),

            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),

            (KeyModifiers::NONE, KeyCode::Char('/')) => return Ok(Some(Action::OpenSearch)),

            _ => {}
        }

        // Delegate to the screen component
        self.screen.handle_key_event(key)
    }

    /// Handle mouse events (delegate to the screen unless an overlay is up).
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.help_visible || self.search_active {
            return Ok(None);
        }
        self.screen.handle_mouse_event(mouse)
    }

    /// Process a single action — update app state and propagate to the screen.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::OpenSearch => {
                self.search_active = true;
            }

            Action::CloseSearch => {
                self.search_active = false;
                self.search_query.clear();
            }

            Action::SearchSubmit => {
                // Keep the filter, return focus to the table.
                self.search_active = false;
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            _ => {}
        }

        // Screens see every action and may produce a follow-up.
        if let Some(follow_up) = self.screen.update(action)? {
            self.action_tx.send(follow_up)?;
        }

        Ok(())
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&mut self, frame: &mut Frame) {
        let layout = Layout::vertical([
            Constraint::Length(1), // title bar
            Constraint::Min(1),    // screen
            Constraint::Length(1), // footer / search input
        ])
        .split(frame.area());

        self.render_title_bar(frame, layout[0]);
        self.screen.render(frame, layout[1]);

        if self.search_active {
            self.render_search_bar(frame, layout[2]);
        } else {
            Self::render_footer(frame, layout[2]);
        }

        if self.help_visible {
            Self::render_help_overlay(frame, frame.area());
        }
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let title = Line::from(vec![
            Span::styled(" whereabouts ", theme::title_style()),
            Span::styled(
                concat!("v", env!("CARGO_PKG_VERSION"), " · random user locations"),
                theme::status_dim(),
            ),
        ]);
        frame.render_widget(Paragraph::new(title), area);
    }

    fn render_search_bar(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(" / ", theme::key_hint_key()),
            Span::styled(self.search_query.clone(), theme::search_style()),
            Span::styled("▌", theme::search_style()),
            Span::styled("   Enter keep · Esc clear", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_footer(frame: &mut Frame, area: Rect) {
        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("rows  ", theme::key_hint()),
            Span::styled("←/→ ", theme::key_hint_key()),
            Span::styled("column  ", theme::key_hint()),
            Span::styled("s ", theme::key_hint_key()),
            Span::styled("sort  ", theme::key_hint()),
            Span::styled("/ ", theme::key_hint_key()),
            Span::styled("search  ", theme::key_hint()),
            Span::styled("? ", theme::key_hint_key()),
            Span::styled("help  ", theme::key_hint()),
            Span::styled("q ", theme::key_hint_key()),
            Span::styled("quit", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), area);
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let width = 46.min(area.width);
        let height = 14.min(area.height);
        let popup = Rect::new(
            area.x + (area.width.saturating_sub(width)) / 2,
            area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        );

        let block = Block::default()
            .title(" Help ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        let entry = |key: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<12}"), theme::key_hint_key()),
                Span::styled(what, theme::key_hint()),
            ])
        };

        let lines = vec![
            Line::from(""),
            entry("j/k, ↓/↑", "move row selection"),
            entry("g / G", "first / last row"),
            entry("Ctrl-d/u", "page down / up"),
            entry("h/l, ←/→", "move column cursor"),
            entry("s, Enter", "cycle sort on column"),
            entry("click header", "cycle sort on column"),
            entry("/", "search as you type"),
            entry("Esc", "clear search"),
            entry("?", "toggle this help"),
            entry("q, Ctrl-c", "quit"),
        ];

        frame.render_widget(Clear, popup);
        frame.render_widget(Paragraph::new(lines).block(block), popup);
    }
}
