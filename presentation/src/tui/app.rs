//! TUI application: main loop with Actor pattern
//!
//! Architecture:
//! ```text
//! TuiApp (select! loop)                 submit task (tokio::spawn per question)
//!   ├─ crossterm EventStream              └─ SubmitQuestionUseCase::submit()
//!   ├─ ui_rx (UiEvent)  <──────────────────── ui_tx
//!   └─ tick_interval                      theme sync task (ThemeManager::spawn_sync)
//!                        <──────────────────── ui_tx
//! ```

use super::mode::{self, KeyAction};
use super::presenter::TuiPresenter;
use super::state::TuiState;
use super::surface::TerminalThemeSurface;
use super::widgets::{
    MainLayout, header::HeaderWidget, help::HelpWidget, input::AskButtonWidget,
    input::InputWidget, page::PageWidget, status_bar::StatusBarWidget,
};
use crate::config::RenderConfig;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::stream::StreamExt;
use openanswer_application::{SubmitError, SubmitQuestionUseCase, ThemeManager, UiEvent};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const TICK: Duration = Duration::from_millis(100);
const MOUSE_SCROLL_LINES: u16 = 3;

/// Main TUI application
pub struct TuiApp {
    submit: SubmitQuestionUseCase,
    theme: Arc<ThemeManager>,
    surface: Arc<TerminalThemeSurface>,
    ui_rx: mpsc::UnboundedReceiver<UiEvent>,
    presenter: TuiPresenter,
    render: RenderConfig,
}

impl TuiApp {
    /// `submit` and `theme` must send their events to the sender paired with `ui_rx`.
    pub fn new(
        submit: SubmitQuestionUseCase,
        theme: Arc<ThemeManager>,
        surface: Arc<TerminalThemeSurface>,
        ui_rx: mpsc::UnboundedReceiver<UiEvent>,
    ) -> Self {
        Self {
            submit,
            theme,
            surface,
            ui_rx,
            presenter: TuiPresenter::new(),
            render: RenderConfig::default(),
        }
    }

    pub fn with_render_config(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Install panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(info);
        }));

        self.theme.apply_initial();
        let sync_handle = self.theme.clone().spawn_sync();

        let mut state = TuiState::new(self.surface.theme(), self.render);
        let mut event_stream = EventStream::new();
        let mut tick = tokio::time::interval(TICK);
        info!("Interactive page started");

        let result = loop {
            // The surface is the source of truth for colours
            state.set_theme(self.surface.theme(), self.surface.palette());

            if let Err(e) = terminal.draw(|frame| Self::render(frame, &mut state)) {
                break Err(e);
            }

            if state.should_quit {
                break Ok(());
            }

            tokio::select! {
                // Terminal events (keyboard, mouse, resize)
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(term_event)) => self.handle_terminal_event(&mut state, term_event),
                    Some(Err(e)) => break Err(e),
                    None => break Ok(()),
                },

                // UiEvents from the submit task and theme sync
                Some(ui_event) = self.ui_rx.recv() => {
                    self.presenter.apply(&mut state, &ui_event);
                }

                // Tick for flash expiry and spinner animation
                _ = tick.tick() => {
                    state.tick();
                }
            }
        };

        sync_handle.abort();

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    /// Render all widgets
    fn render(frame: &mut ratatui::Frame, state: &mut TuiState) {
        let layout = MainLayout::compute(frame.area());

        let page_inner = PageWidget::new(state).inner(layout.page);
        let content_lines = PageWidget::new(state).line_count(page_inner.width);
        state.set_page_metrics(content_lines, page_inner.height);

        frame.render_widget(HeaderWidget::new(state), layout.header);
        frame.render_widget(InputWidget::new(state), layout.input);
        frame.render_widget(AskButtonWidget::new(state), layout.button);
        frame.render_widget(PageWidget::new(state), layout.page);
        frame.render_widget(StatusBarWidget::new(state), layout.status_bar);

        if state.show_help {
            let help_area = MainLayout::centered_overlay(70, 70, frame.area());
            frame.render_widget(HelpWidget::new(state), help_area);
        }
    }

    fn handle_terminal_event(&self, state: &mut TuiState, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(state, key),
            Event::Paste(text) => {
                for c in text.chars().filter(|c| !c.is_control()) {
                    state.insert_char(c);
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => state.scroll_up(MOUSE_SCROLL_LINES),
                MouseEventKind::ScrollDown => state.scroll_down(MOUSE_SCROLL_LINES),
                _ => {}
            },
            _ => {}
        }
    }

    fn handle_key(&self, state: &mut TuiState, key: KeyEvent) {
        match mode::handle_key(key, state.show_help, state.input.is_empty()) {
            KeyAction::Submit => self.submit_input(state),
            KeyAction::InsertChar(c) => state.insert_char(c),
            KeyAction::DeleteChar => state.delete_char(),
            KeyAction::DeleteForward => state.delete_forward(),
            KeyAction::CursorLeft => state.cursor_left(),
            KeyAction::CursorRight => state.cursor_right(),
            KeyAction::CursorStart => state.cursor_home(),
            KeyAction::CursorEnd => state.cursor_end(),
            KeyAction::ClearInput => state.clear_input(),
            KeyAction::ToggleTheme => {
                // The ThemeChanged event updates the state
                if let Err(e) = self.theme.toggle() {
                    warn!("Failed to save theme: {}", e);
                    state.set_flash(format!("Theme not saved: {}", e));
                }
            }
            KeyAction::ToggleFootnotes => {
                state.toggle_footnotes();
                let status = if state.render.footnotes { "on" } else { "off" };
                state.set_flash(format!("Footnote markers {}", status));
            }
            KeyAction::ScrollUp => state.scroll_up(1),
            KeyAction::ScrollDown => state.scroll_down(1),
            KeyAction::PageUp => state.scroll_up(state.page_step()),
            KeyAction::PageDown => state.scroll_down(state.page_step()),
            KeyAction::ToggleHelp => state.show_help = !state.show_help,
            KeyAction::Quit => state.should_quit = true,
            KeyAction::None => {}
        }
    }

    /// Start a submission on its own task; the result arrives as a UiEvent.
    fn submit_input(&self, state: &mut TuiState) {
        match refusal(state, self.submit.is_loading()) {
            Some(SubmitError::Busy) => {
                debug!("Submit ignored while loading");
                return;
            }
            Some(e) => {
                state.set_flash(e.to_string());
                return;
            }
            None => {}
        }

        let submit = self.submit.clone();
        let input = state.input.clone();
        tokio::spawn(async move {
            if let Err(e) = submit.submit(&input).await {
                debug!("Submission rejected: {}", e);
            }
        });
    }
}

/// Why the current input cannot be submitted, if anything.
///
/// Only an empty field counts as missing; whitespace is sent as typed.
fn refusal(state: &TuiState, busy: bool) -> Option<SubmitError> {
    if state.ask.loading || busy {
        Some(SubmitError::Busy)
    } else if state.input.is_empty() {
        Some(SubmitError::EmptyQuestion)
    } else {
        None
    }
}
