//! Status bar widget: key hints or flash message, plus the footer credit

use crate::render::terminal::to_color;
use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

pub const FOOTER: &str = "Powered by https://github.com/Txoka/OpenAnswer";
const KEY_HINTS: &str = "Enter:ask  Ctrl+T:theme  Ctrl+F:footnotes  PgUp/PgDn:scroll  ?:help  Esc:quit";

pub struct StatusBarWidget<'a> {
    state: &'a TuiState,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = &self.state.palette;

        // Fill background
        let bg_style = Style::default()
            .bg(to_color(palette.code_background))
            .fg(to_color(palette.foreground));
        for x in area.left()..area.right() {
            buf[(x, area.y)].set_style(bg_style).set_char(' ');
        }

        // Flash message or key hints on the left
        let (left_text, left_color) = match &self.state.flash_message {
            Some((flash, _)) => (flash.as_str(), palette.error),
            None => (KEY_HINTS, palette.muted),
        };
        let left_width = left_text.chars().count() as u16;
        let left_line = Line::from(Span::styled(
            format!(" {}", left_text),
            bg_style.fg(to_color(left_color)),
        ));
        buf.set_line(area.x, area.y, &left_line, area.width);

        // Footer right-aligned when it fits
        let footer_width = FOOTER.chars().count() as u16;
        let footer_x = area.right().saturating_sub(footer_width + 1);
        if footer_x > area.x + left_width + 2 {
            let footer_line = Line::from(Span::styled(FOOTER, bg_style.fg(to_color(palette.muted))));
            buf.set_line(footer_x, area.y, &footer_line, footer_width + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use openanswer_domain::Theme;

    fn render_text(state: &TuiState, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        StatusBarWidget::new(state).render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_footer_on_wide_terminal() {
        let state = TuiState::new(Theme::Light, RenderConfig::default());
        let text = render_text(&state, 160);
        assert!(text.contains(FOOTER));
        assert!(text.contains("Ctrl+T:theme"));
    }

    #[test]
    fn test_flash_replaces_hints() {
        let mut state = TuiState::new(Theme::Light, RenderConfig::default());
        state.set_flash("Please fill out this field.");
        let text = render_text(&state, 160);
        assert!(text.contains("Please fill out this field."));
        assert!(!text.contains("Ctrl+T:theme"));
    }
}
