//! Syntax highlighting for fenced code blocks

use super::palette::Rgb;
use openanswer_domain::Theme;
use std::sync::OnceLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

const DARK_THEME: &str = "base16-ocean.dark";
const LIGHT_THEME: &str = "InspiredGitHub";

/// A run of highlighted code text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedSpan {
    pub text: String,
    pub fg: Rgb,
    pub bold: bool,
    pub italic: bool,
}

/// syntect syntaxes and themes, loaded once
pub struct CodeHighlighter {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
}

impl CodeHighlighter {
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            themes: ThemeSet::load_defaults(),
        }
    }

    /// Process-wide instance; loading the default sets is not cheap.
    pub fn shared() -> &'static CodeHighlighter {
        static SHARED: OnceLock<CodeHighlighter> = OnceLock::new();
        SHARED.get_or_init(CodeHighlighter::new)
    }

    /// Whether a fence info string names a known language
    pub fn supports(&self, info: &str) -> bool {
        language_token(info)
            .and_then(|token| self.syntaxes.find_syntax_by_token(token))
            .is_some()
    }

    /// Highlight `code` line by line.
    ///
    /// Returns `None` when the language is unknown, so callers fall back to
    /// plain preformatted text.
    pub fn highlight(&self, code: &str, info: &str, theme: Theme) -> Option<Vec<Vec<HighlightedSpan>>> {
        let syntax = self.syntaxes.find_syntax_by_token(language_token(info)?)?;
        let theme_name = if theme.is_dark() { DARK_THEME } else { LIGHT_THEME };
        let syntect_theme = self.themes.themes.get(theme_name)?;

        let mut highlighter = HighlightLines::new(syntax, syntect_theme);
        let mut lines = Vec::new();
        for line in LinesWithEndings::from(code) {
            let ranges = highlighter.highlight_line(line, &self.syntaxes).ok()?;
            let spans = ranges
                .into_iter()
                .filter_map(|(style, text)| {
                    let text = text.trim_end_matches(['\n', '\r']);
                    (!text.is_empty()).then(|| HighlightedSpan {
                        text: text.to_string(),
                        fg: Rgb(style.foreground.r, style.foreground.g, style.foreground.b),
                        bold: style.font_style.contains(FontStyle::BOLD),
                        italic: style.font_style.contains(FontStyle::ITALIC),
                    })
                })
                .collect();
            lines.push(spans);
        }
        Some(lines)
    }
}

impl Default for CodeHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// First word of a fence info string (`rust,ignore` -> `rust`)
fn language_token(info: &str) -> Option<&str> {
    info.split([',', ' ', '{'])
        .map(str::trim)
        .find(|token| !token.is_empty())
}
