//! TUI application state
//!
//! Single source of truth for everything the TUI renders.
//! Updated by TuiPresenter (UiEvent → state) and by key handling in TuiApp.

use crate::config::RenderConfig;
use crate::render::{AnswerRenderer, Palette, RenderedAnswer};
use openanswer_application::AskState;
use openanswer_domain::Theme;
use std::time::{Duration, Instant};

const FLASH_DURATION: Duration = Duration::from_secs(3);

/// Central TUI state: owned by the TuiApp select! loop
pub struct TuiState {
    // -- Question input (cursor is a byte offset) --
    pub input: String,
    pub cursor_pos: usize,

    // -- Submission --
    pub ask: AskState,
    pub question: Option<String>,
    pub rendered: Option<RenderedAnswer>,

    // -- Appearance --
    pub theme: Theme,
    pub palette: Palette,
    pub render: RenderConfig,

    // -- Answer pane --
    pub scroll: u16,
    pub max_scroll: u16,
    pub page_height: u16,

    // -- Overlay --
    pub show_help: bool,
    pub flash_message: Option<(String, Instant)>,
    pub spinner_frame: usize,

    // -- Lifecycle --
    pub should_quit: bool,
}

impl TuiState {
    pub fn new(theme: Theme, render: RenderConfig) -> Self {
        Self {
            input: String::new(),
            cursor_pos: 0,
            ask: AskState::new(),
            question: None,
            rendered: None,
            theme,
            palette: Palette::for_theme(theme),
            render,
            scroll: 0,
            max_scroll: 0,
            page_height: 0,
            show_help: false,
            flash_message: None,
            spinner_frame: 0,
            should_quit: false,
        }
    }

    // -- Input editing --

    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    pub fn delete_char(&mut self) {
        if let Some(c) = self.input[..self.cursor_pos].chars().next_back() {
            self.cursor_pos -= c.len_utf8();
            self.input.remove(self.cursor_pos);
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor_pos < self.input.len() {
            self.input.remove(self.cursor_pos);
        }
    }

    pub fn cursor_left(&mut self) {
        if let Some(c) = self.input[..self.cursor_pos].chars().next_back() {
            self.cursor_pos -= c.len_utf8();
        }
    }

    pub fn cursor_right(&mut self) {
        if let Some(c) = self.input[self.cursor_pos..].chars().next() {
            self.cursor_pos += c.len_utf8();
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_pos = self.input.len();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_pos = 0;
    }

    // -- Appearance --

    /// Switch theme and re-render the answer with matching highlight colours.
    pub fn set_theme(&mut self, theme: Theme, palette: Palette) {
        self.palette = palette;
        if self.theme != theme {
            self.theme = theme;
            self.rerender();
        }
    }

    pub fn toggle_footnotes(&mut self) {
        self.render.footnotes = !self.render.footnotes;
        self.rerender();
    }

    /// Rebuild the rendered answer from the current answer and options.
    pub fn rerender(&mut self) {
        let renderer = AnswerRenderer::new(self.render.options(self.theme));
        self.rendered = self.ask.answer.as_ref().map(|a| renderer.render(&a.answer));
    }

    // -- Scrolling --

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines).min(self.max_scroll);
    }

    pub fn page_step(&self) -> u16 {
        self.page_height.saturating_sub(1).max(1)
    }

    /// Record the answer pane size from the last frame.
    pub fn set_page_metrics(&mut self, content_lines: usize, height: u16) {
        self.page_height = height;
        let content = u16::try_from(content_lines).unwrap_or(u16::MAX);
        self.max_scroll = content.saturating_sub(height);
        self.scroll = self.scroll.min(self.max_scroll);
    }

    // -- Flash / animation --

    pub fn set_flash(&mut self, message: impl Into<String>) {
        self.flash_message = Some((message.into(), Instant::now()));
    }

    pub fn tick(&mut self) {
        if self.ask.loading {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
        if let Some((_, shown_at)) = &self.flash_message
            && shown_at.elapsed() >= FLASH_DURATION
        {
            self.flash_message = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openanswer_domain::{AnswerOutcome, AnswerResult};

    fn state() -> TuiState {
        TuiState::new(Theme::Light, RenderConfig::default())
    }

    #[test]
    fn test_input_editing_multibyte() {
        let mut state = state();
        for c in "héllo".chars() {
            state.insert_char(c);
        }
        assert_eq!(state.cursor_pos, "héllo".len());

        state.cursor_left();
        state.cursor_left();
        state.cursor_left();
        state.cursor_left();
        state.delete_char();
        assert_eq!(state.input, "éllo");
        assert_eq!(state.cursor_pos, 0);

        state.delete_forward();
        assert_eq!(state.input, "llo");
        state.cursor_end();
        state.insert_char('!');
        assert_eq!(state.input, "llo!");
    }

    #[test]
    fn test_footnote_toggle_rerenders() {
        let mut state = state();
        state.ask.finish(&AnswerOutcome::Success(AnswerResult::new(
            "A[^1].\n\n[^1]: note",
        )));
        state.rerender();
        assert!(state.rendered.as_ref().unwrap().plain_text().contains("A[1]."));

        state.toggle_footnotes();
        assert!(!state.render.footnotes);
        assert!(state.rendered.as_ref().unwrap().plain_text().contains("A[^1]."));
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut state = state();
        state.set_page_metrics(30, 10);
        state.scroll_down(50);
        assert_eq!(state.scroll, 20);
        state.scroll_up(5);
        assert_eq!(state.scroll, 15);

        // Shrinking content pulls the offset back
        state.set_page_metrics(12, 10);
        assert_eq!(state.scroll, 2);
        assert_eq!(state.page_step(), 9);
    }

    #[test]
    fn test_set_theme_updates_palette() {
        let mut state = state();
        state.set_theme(Theme::Dark, Palette::for_theme(Theme::Dark));
        assert_eq!(state.theme, Theme::Dark);
        assert_eq!(state.palette, Palette::for_theme(Theme::Dark));
    }

    #[test]
    fn test_flash_expires() {
        let mut state = state();
        state.flash_message = Some(("x".into(), Instant::now() - FLASH_DURATION));
        state.tick();
        assert!(state.flash_message.is_none());
    }
}
