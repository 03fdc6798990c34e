//! TUI widgets: ratatui components for the question page
//!
//! Layout:
//! ┌── Header (3) ────────────────────────────────────┐
//! ├── Input (3) ───────────────────────┬── Ask (12) ─┤
//! ├── Page: error, metadata, answer (flex) ──────────┤
//! └── StatusBar (1) ─────────────────────────────────┘

pub mod header;
pub mod help;
pub mod input;
pub mod page;
pub mod status_bar;

use super::state::TuiState;
use crate::render::terminal::to_color;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;

const HEADER_HEIGHT: u16 = 3;
const INPUT_HEIGHT: u16 = 3;
const BUTTON_WIDTH: u16 = 14;

/// Compute the main layout regions from a terminal area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainLayout {
    pub header: Rect,
    pub input: Rect,
    pub button: Rect,
    pub page: Rect,
    pub status_bar: Rect,
}

impl MainLayout {
    pub fn compute(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Length(INPUT_HEIGHT),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        let input_row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(BUTTON_WIDTH)])
            .split(vertical[1]);

        Self {
            header: vertical[0],
            input: input_row[0],
            button: input_row[1],
            page: vertical[2],
            status_bar: vertical[3],
        }
    }

    /// Centered overlay rect (for help)
    pub fn centered_overlay(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
        let vert = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(area);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(vert[1])[1]
    }
}

/// Foreground on the page background
pub(crate) fn base_style(state: &TuiState) -> Style {
    Style::default()
        .fg(to_color(state.palette.foreground))
        .bg(to_color(state.palette.background))
}
