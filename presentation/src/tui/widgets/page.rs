//! Page widget: error banner, search metadata and the rendered answer

use super::base_style;
use crate::progress::reporter::LOADING_LABEL;
use crate::render::terminal::to_color;
use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const EMPTY_HINT: &str = "Ask a question to get started. Press ? for help.";

pub struct PageWidget<'a> {
    state: &'a TuiState,
}

impl<'a> PageWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }

    fn block(&self) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .title(" Answer ")
            .border_style(Style::default().fg(to_color(self.state.palette.muted)))
    }

    /// Area the page text is drawn into
    pub fn inner(&self, area: Rect) -> Rect {
        self.block().inner(area)
    }

    /// Number of wrapped lines at `width`
    pub fn line_count(&self, width: u16) -> usize {
        Paragraph::new(self.content())
            .wrap(Wrap { trim: false })
            .line_count(width)
    }

    pub fn content(&self) -> Text<'static> {
        let state = self.state;
        let palette = &state.palette;
        let mut lines: Vec<Line<'static>> = Vec::new();

        if state.ask.loading {
            let frame = SPINNER_FRAMES[state.spinner_frame % SPINNER_FRAMES.len()];
            lines.push(Line::from(vec![
                Span::styled(format!("{} ", frame), Style::default().fg(to_color(palette.accent))),
                Span::styled(LOADING_LABEL, Style::default().fg(to_color(palette.muted))),
            ]));
            return Text::from(lines);
        }

        if let Some(error) = &state.ask.error {
            lines.push(Line::from(vec![
                Span::styled(
                    " Error: ",
                    Style::default()
                        .fg(to_color(palette.error))
                        .bg(to_color(palette.error_background))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{} ", error.message),
                    Style::default()
                        .fg(to_color(palette.error))
                        .bg(to_color(palette.error_background)),
                ),
            ]));
            lines.push(Line::from(""));
        }

        let section = Style::default()
            .fg(to_color(palette.heading))
            .add_modifier(Modifier::BOLD);
        let bullet = Style::default().fg(to_color(palette.accent));

        let terms = state.ask.search_terms();
        if !terms.is_empty() {
            lines.push(Line::from(Span::styled("Search Terms:", section)));
            for term in terms {
                lines.push(Line::from(vec![
                    Span::styled("  • ", bullet),
                    Span::raw(term.clone()),
                ]));
            }
            lines.push(Line::from(""));
        }

        let urls = state.ask.relevant_urls();
        if !urls.is_empty() {
            lines.push(Line::from(Span::styled("Relevant URLs:", section)));
            for url in urls {
                lines.push(Line::from(vec![
                    Span::styled("  • ", bullet),
                    Span::styled(
                        url.clone(),
                        Style::default()
                            .fg(to_color(palette.link))
                            .add_modifier(Modifier::UNDERLINED),
                    ),
                ]));
            }
            lines.push(Line::from(""));
        }

        if let Some(rendered) = &state.rendered {
            lines.extend(rendered.to_text(palette).lines);
        } else if state.ask.error.is_none() {
            lines.push(Line::from(Span::styled(
                EMPTY_HINT,
                Style::default().fg(to_color(palette.muted)),
            )));
        }

        Text::from(lines)
    }
}

impl<'a> Widget for PageWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.content())
            .block(self.block())
            .style(base_style(self.state))
            .wrap(Wrap { trim: false })
            .scroll((self.state.scroll, 0))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use openanswer_domain::{AnswerOutcome, AnswerResult, Theme};

    fn state() -> TuiState {
        TuiState::new(Theme::Dark, RenderConfig::default())
    }

    fn plain(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_empty_hint() {
        let state = state();
        assert_eq!(plain(&PageWidget::new(&state).content()), vec![EMPTY_HINT]);
    }

    #[test]
    fn test_loading_hides_previous_content() {
        let mut state = state();
        state.ask.begin();
        let lines = plain(&PageWidget::new(&state).content());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("Loading..."));
    }

    #[test]
    fn test_answer_with_metadata() {
        let mut state = state();
        state.ask.finish(&AnswerOutcome::Success(
            AnswerResult::new("Answer *text*")
                .with_search_terms(vec!["term one".to_string()])
                .with_relevant_urls(vec!["https://example.com".to_string()]),
        ));
        state.rerender();

        let lines = plain(&PageWidget::new(&state).content());
        assert_eq!(
            lines,
            vec![
                "Search Terms:",
                "  • term one",
                "",
                "Relevant URLs:",
                "  • https://example.com",
                "",
                "Answer text",
            ]
        );
    }

    #[test]
    fn test_error_banner() {
        let mut state = state();
        state.ask.finish(&AnswerOutcome::ApiReportedFailure {
            status_code: "503".to_string(),
        });
        let lines = plain(&PageWidget::new(&state).content());
        assert_eq!(lines[0], " Error: 503 ");
    }

    #[test]
    fn test_line_count_wraps() {
        let mut state = state();
        state.ask.finish(&AnswerOutcome::Success(AnswerResult::new("word ".repeat(40))));
        state.rerender();
        let widget = PageWidget::new(&state);
        assert!(widget.line_count(20) > widget.line_count(200));
    }
}
