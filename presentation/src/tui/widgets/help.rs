//! Help overlay widget

use crate::render::terminal::to_color;
use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

const BINDINGS: [(&str, &str); 10] = [
    ("Enter", "Ask the question"),
    ("Ctrl+U", "Clear the question"),
    ("Ctrl+T", "Toggle light/dark theme"),
    ("Ctrl+F", "Toggle footnote markers"),
    ("Up/Down", "Scroll the answer"),
    ("PgUp/PgDn", "Scroll the answer by a page"),
    ("Home/End", "Move to start/end of the question"),
    ("?", "Toggle this help (when the question is empty)"),
    ("F1", "Toggle this help"),
    ("Esc/Ctrl+C", "Quit"),
];

/// Widget for rendering help overlay
pub struct HelpWidget<'a> {
    state: &'a TuiState,
}

impl<'a> HelpWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }

    fn build_help_text(&self) -> Vec<Line<'static>> {
        let palette = &self.state.palette;
        let key_style = Style::default().fg(to_color(palette.accent));

        let mut lines = vec![
            Line::from(Span::styled(
                "Keyboard Shortcuts",
                Style::default()
                    .fg(to_color(palette.heading))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        lines.extend(BINDINGS.iter().map(|(key, description)| {
            Line::from(vec![
                Span::styled(format!("{:<11}", key), key_style),
                Span::raw(format!(" - {}", description)),
            ])
        }));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(to_color(palette.muted)),
        )));
        lines
    }
}

impl<'a> Widget for HelpWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = &self.state.palette;
        let lines = self.build_help_text();

        Clear.render(area, buf);
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help ")
                    .border_style(Style::default().fg(to_color(palette.accent))),
            )
            .style(
                Style::default()
                    .fg(to_color(palette.foreground))
                    .bg(to_color(palette.background)),
            )
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
