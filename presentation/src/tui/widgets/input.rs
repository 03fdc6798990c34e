//! Input widget: the question field and the Ask button
//!
//! The field is a single line. When the question is wider than the field
//! the view slides so the cursor stays visible.

use super::base_style;
use crate::progress::reporter::LOADING_LABEL;
use crate::render::terminal::to_color;
use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub const PLACEHOLDER: &str = "Enter your question or request";
pub const ASK_LABEL: &str = "Ask";

pub struct InputWidget<'a> {
    state: &'a TuiState,
}

impl<'a> InputWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }
}

impl<'a> Widget for InputWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = &self.state.palette;
        let border_color = if self.state.ask.loading {
            palette.muted
        } else {
            palette.accent
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Question ")
            .border_style(Style::default().fg(to_color(border_color)))
            .style(base_style(self.state));
        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.state.input.is_empty() {
            Line::from(vec![
                cursor_span(" ", self.state),
                Span::styled(PLACEHOLDER, Style::default().fg(to_color(palette.muted))),
            ])
        } else {
            build_input_line(self.state, inner.width as usize)
        };

        Paragraph::new(line).render(inner, buf);
    }
}

fn cursor_span(symbol: &str, state: &TuiState) -> Span<'static> {
    Span::styled(
        symbol.to_string(),
        Style::default()
            .fg(to_color(state.palette.background))
            .bg(to_color(state.palette.foreground)),
    )
}

/// Visible slice of the input with the cursor highlighted
fn build_input_line(state: &TuiState, width: usize) -> Line<'static> {
    let (before, after) = state.input.split_at(state.cursor_pos);
    let visible = width.saturating_sub(1).max(1);

    let before_chars: Vec<char> = before.chars().collect();
    let skip = before_chars.len().saturating_sub(visible);
    let shown_before: String = before_chars[skip..].iter().collect();

    let mut after_chars = after.chars();
    let under_cursor = after_chars
        .next()
        .map(|c| c.to_string())
        .unwrap_or_else(|| " ".to_string());
    let rest: String = after_chars.collect();

    Line::from(vec![
        Span::raw(shown_before),
        cursor_span(&under_cursor, state),
        Span::raw(rest),
    ])
}

/// The submit button; disabled while a request is in flight
pub struct AskButtonWidget<'a> {
    state: &'a TuiState,
}

impl<'a> AskButtonWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }

    pub fn label(&self) -> &'static str {
        if self.state.ask.loading {
            LOADING_LABEL
        } else {
            ASK_LABEL
        }
    }
}

impl<'a> Widget for AskButtonWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = &self.state.palette;
        let style = if self.state.ask.loading {
            Style::default()
                .fg(to_color(palette.muted))
                .bg(to_color(palette.background))
        } else {
            Style::default()
                .fg(to_color(palette.background))
                .bg(to_color(palette.accent))
                .add_modifier(Modifier::BOLD)
        };

        Paragraph::new(Line::from(self.label()))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(to_color(palette.accent))),
            )
            .style(style)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use openanswer_domain::Theme;

    fn state_with(input: &str) -> TuiState {
        let mut state = TuiState::new(Theme::Light, RenderConfig::default());
        for c in input.chars() {
            state.insert_char(c);
        }
        state
    }

    fn render_text(state: &TuiState, width: u16) -> String {
        let area = Rect::new(0, 0, width, 3);
        let mut buf = Buffer::empty(area);
        InputWidget::new(state).render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_placeholder_when_empty() {
        let state = state_with("");
        assert!(render_text(&state, 60).contains(PLACEHOLDER));
    }

    #[test]
    fn test_shows_input() {
        let state = state_with("What is Rust?");
        let text = render_text(&state, 60);
        assert!(text.contains("What is Rust?"));
        assert!(!text.contains(PLACEHOLDER));
    }

    #[test]
    fn test_long_input_keeps_cursor_end_visible() {
        let state = state_with("abcdefghijklmnopqrstuvwxyz");
        let line = build_input_line(&state, 10);
        let shown: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(shown, "rstuvwxyz ");
    }

    #[test]
    fn test_button_label_follows_loading() {
        let mut state = state_with("");
        assert_eq!(AskButtonWidget::new(&state).label(), "Ask");
        state.ask.begin();
        assert_eq!(AskButtonWidget::new(&state).label(), "Loading...");
    }
}
