//! Header widget: app label, page title and current theme

use super::base_style;
use crate::render::terminal::to_color;
use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub const APP_LABEL: &str = "OpenAnswer";
pub const PAGE_TITLE: &str = "Research Assistant";

pub struct HeaderWidget<'a> {
    state: &'a TuiState,
}

impl<'a> HeaderWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }
}

impl<'a> Widget for HeaderWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = &self.state.palette;

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", APP_LABEL))
            .border_style(Style::default().fg(to_color(palette.accent)))
            .style(base_style(self.state));
        let inner = block.inner(area);
        block.render(area, buf);

        let title = Line::from(Span::styled(
            PAGE_TITLE,
            Style::default()
                .fg(to_color(palette.heading))
                .add_modifier(Modifier::BOLD),
        ));
        Paragraph::new(title).render(inner, buf);

        let icon = if self.state.theme.is_dark() { "☾" } else { "☀" };
        let theme = Line::from(vec![
            Span::styled(format!("{} ", icon), Style::default().fg(to_color(palette.accent))),
            Span::styled(
                self.state.theme.as_str(),
                Style::default().fg(to_color(palette.muted)),
            ),
        ]);
        Paragraph::new(theme)
            .alignment(Alignment::Right)
            .render(inner, buf);
    }
}
