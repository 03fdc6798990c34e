//! Turning a rendered answer into ratatui text or ANSI escapes

use super::markdown::{RenderedAnswer, Role, SegmentStyle};
use super::palette::{Palette, Rgb};
use colored::{ColoredString, Colorize};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

fn role_colors(role: Role, palette: &Palette) -> (Rgb, Option<Rgb>) {
    match role {
        Role::Text => (palette.foreground, None),
        Role::Heading => (palette.heading, None),
        Role::Code => (palette.code, Some(palette.code_background)),
        Role::CodeBlock => (palette.foreground, Some(palette.code_background)),
        Role::Link => (palette.link, None),
        Role::Url | Role::Quote | Role::Rule | Role::TableBorder => (palette.muted, None),
        Role::FootnoteRef | Role::FootnoteBackref => (palette.footnote, None),
        Role::Marker => (palette.accent, None),
    }
}

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn segment_style(style: &SegmentStyle, palette: &Palette) -> Style {
    let (fg, bg) = role_colors(style.role, palette);
    let mut out = Style::default().fg(to_color(style.fg.unwrap_or(fg)));
    if let Some(bg) = bg {
        out = out.bg(to_color(bg));
    }
    if style.bold {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.italic {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.strikethrough {
        out = out.add_modifier(Modifier::CROSSED_OUT);
    }
    if style.role == Role::Link {
        out = out.add_modifier(Modifier::UNDERLINED);
    }
    out
}

impl RenderedAnswer {
    /// ratatui text for the answer pane
    pub fn to_text(&self, palette: &Palette) -> Text<'static> {
        let lines: Vec<Line<'static>> = self
            .lines
            .iter()
            .map(|line| {
                Line::from(
                    line.segments
                        .iter()
                        .map(|s| Span::styled(s.text.clone(), segment_style(&s.style, palette)))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();
        Text::from(lines)
    }

    /// ANSI-coloured text for one-shot console output.
    ///
    /// Honours `colored`'s global override, so disabling colour yields plain text.
    pub fn to_ansi(&self, palette: &Palette) -> String {
        self.lines
            .iter()
            .map(|line| {
                line.segments
                    .iter()
                    .map(|s| ansi_segment(&s.text, &s.style, palette).to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn ansi_segment(text: &str, style: &SegmentStyle, palette: &Palette) -> ColoredString {
    // Terminal background is unknown, so only the foreground is set
    let (fg, _) = role_colors(style.role, palette);
    let Rgb(r, g, b) = style.fg.unwrap_or(fg);
    let mut out = text.truecolor(r, g, b);
    if style.bold {
        out = out.bold();
    }
    if style.italic {
        out = out.italic();
    }
    if style.strikethrough {
        out = out.strikethrough();
    }
    if style.role == Role::Link {
        out = out.underline();
    }
    out
}
