//! Answer Markdown to styled lines
//!
//! Walks the pulldown-cmark event stream and produces [`RenderedAnswer`], a
//! terminal-neutral list of styled lines. GitHub-flavoured extensions
//! (tables, strikethrough, task lists, footnotes) are enabled.

use super::highlight::CodeHighlighter;
use super::palette::Rgb;
use openanswer_domain::Theme;
use pulldown_cmark::{Alignment, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

const RULE_WIDTH: usize = 40;
const BACK_REFERENCE: &str = "↩";

/// Rendering switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// `[id]` references and `↩` back-references instead of `[^id]` / `id:`
    pub footnotes: bool,
    /// Syntax-highlight fenced code blocks that name a language
    pub highlight: bool,
    /// Picks the highlighting colour scheme
    pub theme: Theme,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            footnotes: true,
            highlight: true,
            theme: Theme::default(),
        }
    }
}

/// What a piece of text is, so each terminal can colour it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Role {
    #[default]
    Text,
    Heading,
    Code,
    CodeBlock,
    Link,
    Url,
    FootnoteRef,
    FootnoteBackref,
    Quote,
    Marker,
    Rule,
    TableBorder,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentStyle {
    pub role: Role,
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    /// Fixed colour chosen by the syntax highlighter
    pub fg: Option<Rgb>,
}

impl SegmentStyle {
    pub fn role(role: Role) -> Self {
        Self {
            role,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: SegmentStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledLine {
    pub segments: Vec<Segment>,
}

impl StyledLine {
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.text.is_empty())
    }
}

/// A rendered answer, ready for the TUI or the console
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedAnswer {
    pub lines: Vec<StyledLine>,
}

impl RenderedAnswer {
    /// Text without styling, one line per rendered line
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(StyledLine::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Converts answer Markdown into [`RenderedAnswer`]
#[derive(Debug, Clone, Copy, Default)]
pub struct AnswerRenderer {
    options: RenderOptions,
}

impl AnswerRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    pub fn render(&self, markdown: &str) -> RenderedAnswer {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_FOOTNOTES;

        let mut writer = LineWriter::new(self.options);
        for event in Parser::new_ext(markdown, options) {
            writer.event(event);
        }
        writer.finish()
    }
}

struct LinkState {
    dest: String,
    text: String,
}

struct CodeBlockState {
    info: String,
    text: String,
}

#[derive(Default)]
struct TableState {
    alignments: Vec<Alignment>,
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    cell: String,
    has_header: bool,
}

struct LineWriter {
    options: RenderOptions,
    lines: Vec<StyledLine>,
    current: Vec<Segment>,
    bold: usize,
    italic: usize,
    strikethrough: usize,
    heading: bool,
    quote_depth: usize,
    /// Next number for ordered lists, `None` for bullets
    lists: Vec<Option<u64>>,
    links: Vec<LinkState>,
    code_block: Option<CodeBlockState>,
    table: Option<TableState>,
    in_footnote: bool,
}

impl LineWriter {
    fn new(options: RenderOptions) -> Self {
        Self {
            options,
            lines: Vec::new(),
            current: Vec::new(),
            bold: 0,
            italic: 0,
            strikethrough: 0,
            heading: false,
            quote_depth: 0,
            lists: Vec::new(),
            links: Vec::new(),
            code_block: None,
            table: None,
            in_footnote: false,
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.code(&code),
            Event::FootnoteReference(label) => self.footnote_reference(&label),
            Event::SoftBreak => self.text(" "),
            Event::HardBreak => {
                if let Some(table) = &mut self.table {
                    table.cell.push(' ');
                } else {
                    self.flush();
                }
            }
            Event::Rule => {
                self.flush();
                self.push_segment("─".repeat(RULE_WIDTH), SegmentStyle::role(Role::Rule));
                self.flush();
                self.blank_line();
            }
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[x] " } else { "[ ] " };
                self.push_segment(marker.to_string(), SegmentStyle::role(Role::Marker));
            }
            Event::Html(html) => {
                for line in html.lines() {
                    self.text(line);
                    self.flush();
                }
            }
            Event::InlineHtml(html) => self.text(&html),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {}
            Tag::Heading { level, .. } => {
                self.flush();
                self.heading = true;
                let hashes = "#".repeat(level as usize);
                self.push_segment(format!("{hashes} "), self.current_style());
            }
            Tag::BlockQuote(_) => {
                self.flush();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(kind) => {
                self.flush();
                let info = match kind {
                    CodeBlockKind::Fenced(info) => info.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                self.code_block = Some(CodeBlockState {
                    info,
                    text: String::new(),
                });
            }
            Tag::List(start) => {
                self.flush();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                let depth = self.lists.len().saturating_sub(1);
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.push_prefix(false);
                self.current.push(Segment {
                    text: format!("{}{}", "  ".repeat(depth), marker),
                    style: SegmentStyle::role(Role::Marker),
                });
            }
            Tag::FootnoteDefinition(label) => {
                self.flush();
                self.blank_line();
                self.in_footnote = true;
                let (text, role) = if self.options.footnotes {
                    (format!("[{label}] "), Role::FootnoteRef)
                } else {
                    (format!("{label}: "), Role::Text)
                };
                self.push_segment(text, SegmentStyle::role(role));
            }
            Tag::Table(alignments) => {
                self.flush();
                self.table = Some(TableState {
                    alignments,
                    ..TableState::default()
                });
            }
            Tag::TableCell => {
                if let Some(table) = &mut self.table {
                    table.cell.clear();
                }
            }
            Tag::Emphasis => self.italic += 1,
            Tag::Strong => self.bold += 1,
            Tag::Strikethrough => self.strikethrough += 1,
            Tag::Link { dest_url, .. } => self.links.push(LinkState {
                dest: dest_url.to_string(),
                text: String::new(),
            }),
            Tag::Image { dest_url, .. } => {
                self.push_segment("image: ".to_string(), SegmentStyle::role(Role::Url));
                self.links.push(LinkState {
                    dest: dest_url.to_string(),
                    text: String::new(),
                });
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush();
                if self.lists.is_empty() && !self.in_footnote {
                    self.blank_line();
                }
            }
            TagEnd::Heading(_) => {
                self.flush();
                self.heading = false;
                self.blank_line();
            }
            TagEnd::BlockQuote { .. } => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank_line();
            }
            TagEnd::CodeBlock => {
                if let Some(block) = self.code_block.take() {
                    self.write_code_block(block);
                }
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Item => self.flush(),
            TagEnd::FootnoteDefinition => {
                self.flush();
                if self.options.footnotes
                    && let Some(last) = self.lines.iter_mut().rev().find(|l| !l.is_empty())
                {
                    last.segments.push(Segment {
                        text: format!(" {BACK_REFERENCE}"),
                        style: SegmentStyle::role(Role::FootnoteBackref),
                    });
                }
                self.in_footnote = false;
                self.blank_line();
            }
            TagEnd::TableHead => {
                if let Some(table) = &mut self.table {
                    let row = std::mem::take(&mut table.row);
                    table.rows.push(row);
                    table.has_header = true;
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = &mut self.table {
                    let row = std::mem::take(&mut table.row);
                    table.rows.push(row);
                }
            }
            TagEnd::TableCell => {
                if let Some(table) = &mut self.table {
                    let cell = std::mem::take(&mut table.cell);
                    table.row.push(cell.trim().to_string());
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    self.write_table(table);
                }
                self.blank_line();
            }
            TagEnd::Emphasis => self.italic = self.italic.saturating_sub(1),
            TagEnd::Strong => self.bold = self.bold.saturating_sub(1),
            TagEnd::Strikethrough => self.strikethrough = self.strikethrough.saturating_sub(1),
            TagEnd::Link | TagEnd::Image => {
                if let Some(link) = self.links.pop()
                    && !link.dest.is_empty()
                    && link.text != link.dest
                {
                    let url = format!(" ({})", link.dest);
                    if let Some(table) = &mut self.table {
                        table.cell.push_str(&url);
                    } else {
                        self.push_segment(url, SegmentStyle::role(Role::Url));
                    }
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(block) = &mut self.code_block {
            block.text.push_str(text);
            return;
        }
        if let Some(link) = self.links.last_mut() {
            link.text.push_str(text);
        }
        if let Some(table) = &mut self.table {
            table.cell.push_str(text);
            return;
        }
        self.push_segment(text.to_string(), self.current_style());
    }

    fn code(&mut self, code: &str) {
        if let Some(link) = self.links.last_mut() {
            link.text.push_str(code);
        }
        if let Some(table) = &mut self.table {
            table.cell.push_str(code);
            return;
        }
        let style = SegmentStyle {
            role: Role::Code,
            ..self.current_style()
        };
        self.push_segment(code.to_string(), style);
    }

    fn footnote_reference(&mut self, label: &str) {
        let (text, role) = if self.options.footnotes {
            (format!("[{label}]"), Role::FootnoteRef)
        } else {
            (format!("[^{label}]"), Role::Text)
        };
        if let Some(table) = &mut self.table {
            table.cell.push_str(&text);
            return;
        }
        self.push_segment(text, SegmentStyle::role(role));
    }

    fn current_style(&self) -> SegmentStyle {
        let role = if self.heading {
            Role::Heading
        } else if !self.links.is_empty() {
            Role::Link
        } else {
            Role::Text
        };
        SegmentStyle {
            role,
            bold: self.bold > 0 || self.heading,
            italic: self.italic > 0,
            strikethrough: self.strikethrough > 0,
            fg: None,
        }
    }

    /// Quote bars, plus list indentation for continuation lines
    fn push_prefix(&mut self, list_indent: bool) {
        if self.quote_depth > 0 {
            self.current.push(Segment {
                text: "│ ".repeat(self.quote_depth),
                style: SegmentStyle::role(Role::Quote),
            });
        }
        if list_indent && !self.lists.is_empty() {
            self.current.push(Segment {
                text: "  ".repeat(self.lists.len()),
                style: SegmentStyle::default(),
            });
        }
    }

    fn push_segment(&mut self, text: String, style: SegmentStyle) {
        if text.is_empty() {
            return;
        }
        if self.current.is_empty() {
            self.push_prefix(true);
        }
        self.current.push(Segment { text, style });
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            let segments = std::mem::take(&mut self.current);
            self.lines.push(StyledLine { segments });
        }
    }

    fn blank_line(&mut self) {
        if self.lines.last().is_some_and(|l| !l.is_empty()) {
            self.lines.push(StyledLine::default());
        }
    }

    fn write_code_block(&mut self, block: CodeBlockState) {
        let code = block.text.strip_suffix('\n').unwrap_or(&block.text);

        let highlighted = if self.options.highlight && !block.info.trim().is_empty() {
            CodeHighlighter::shared().highlight(code, &block.info, self.options.theme)
        } else {
            None
        };

        match highlighted {
            Some(lines) => {
                for spans in lines {
                    self.code_line_prefix();
                    for span in spans {
                        self.current.push(Segment {
                            text: span.text,
                            style: SegmentStyle {
                                role: Role::CodeBlock,
                                bold: span.bold,
                                italic: span.italic,
                                strikethrough: false,
                                fg: Some(span.fg),
                            },
                        });
                    }
                    self.flush();
                }
            }
            None => {
                for line in code.lines() {
                    self.code_line_prefix();
                    self.current.push(Segment {
                        text: line.to_string(),
                        style: SegmentStyle::role(Role::CodeBlock),
                    });
                    self.flush();
                }
            }
        }
    }

    fn code_line_prefix(&mut self) {
        self.push_prefix(true);
        self.current.push(Segment {
            text: "  ".to_string(),
            style: SegmentStyle::role(Role::CodeBlock),
        });
    }

    fn write_table(&mut self, table: TableState) {
        let columns = table.rows.iter().map(Vec::len).max().unwrap_or(0);
        if columns == 0 {
            return;
        }
        let mut widths = vec![0usize; columns];
        for row in &table.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let border = SegmentStyle::role(Role::TableBorder);
        for (index, row) in table.rows.iter().enumerate() {
            let is_header = table.has_header && index == 0;
            let cell_style = SegmentStyle {
                bold: is_header,
                ..SegmentStyle::default()
            };

            for (i, width) in widths.iter().enumerate() {
                if i > 0 {
                    self.push_segment(" │ ".to_string(), border);
                }
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                let alignment = table.alignments.get(i).copied().unwrap_or(Alignment::None);
                self.push_segment(align_cell(cell, *width, alignment), cell_style);
            }
            self.flush();

            if is_header {
                let separator = widths
                    .iter()
                    .map(|w| "─".repeat(*w))
                    .collect::<Vec<_>>()
                    .join("─┼─");
                self.push_segment(separator, border);
                self.flush();
            }
        }
    }

    fn finish(mut self) -> RenderedAnswer {
        self.flush();
        while self.lines.last().is_some_and(StyledLine::is_empty) {
            self.lines.pop();
        }
        RenderedAnswer { lines: self.lines }
    }
}

fn align_cell(cell: &str, width: usize, alignment: Alignment) -> String {
    let pad = width.saturating_sub(cell.chars().count());
    match alignment {
        Alignment::Right => format!("{}{}", " ".repeat(pad), cell),
        Alignment::Center => {
            let left = pad / 2;
            format!("{}{}{}", " ".repeat(left), cell, " ".repeat(pad - left))
        }
        Alignment::Left | Alignment::None => format!("{}{}", cell, " ".repeat(pad)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(markdown: &str) -> RenderedAnswer {
        AnswerRenderer::default().render(markdown)
    }

    fn render_with(markdown: &str, footnotes: bool, highlight: bool) -> RenderedAnswer {
        AnswerRenderer::new(RenderOptions {
            footnotes,
            highlight,
            theme: Theme::Dark,
        })
        .render(markdown)
    }

    fn find_segment<'a>(rendered: &'a RenderedAnswer, text: &str) -> Option<&'a Segment> {
        rendered
            .lines
            .iter()
            .flat_map(|l| l.segments.iter())
            .find(|s| s.text == text)
    }

    #[test]
    fn test_paragraphs_and_emphasis() {
        let rendered = render("Hello **bold** and *it*.\n\nSecond paragraph.");
        assert_eq!(
            rendered.plain_text(),
            "Hello bold and it.\n\nSecond paragraph."
        );
        assert!(find_segment(&rendered, "bold").unwrap().style.bold);
        assert!(find_segment(&rendered, "it").unwrap().style.italic);
    }

    #[test]
    fn test_heading() {
        let rendered = render("## Title\n\nBody");
        assert_eq!(rendered.lines[0].plain_text(), "## Title");
        let title = find_segment(&rendered, "Title").unwrap();
        assert_eq!(title.style.role, Role::Heading);
        assert!(title.style.bold);
    }

    #[test]
    fn test_strikethrough() {
        let rendered = render("~~gone~~");
        assert!(find_segment(&rendered, "gone").unwrap().style.strikethrough);
    }

    #[test]
    fn test_link_shows_text_and_url() {
        let rendered = render("See [the docs](https://example.com/docs).");
        assert_eq!(rendered.plain_text(), "See the docs (https://example.com/docs).");
        assert_eq!(find_segment(&rendered, "the docs").unwrap().style.role, Role::Link);
    }

    #[test]
    fn test_autolink_url_not_repeated() {
        let rendered = render("<https://example.com>");
        assert_eq!(rendered.plain_text(), "https://example.com");
    }

    #[test]
    fn test_lists_and_task_items() {
        let rendered = render("- one\n- two\n\n1. first\n2. second\n\n- [x] done\n- [ ] todo");
        let text = rendered.plain_text();
        assert!(text.contains("• one\n• two"));
        assert!(text.contains("1. first\n2. second"));
        assert!(text.contains("• [x] done\n• [ ] todo"));
    }

    #[test]
    fn test_nested_list_indents() {
        let rendered = render("- outer\n  - inner");
        assert_eq!(rendered.plain_text(), "• outer\n  • inner");
    }

    #[test]
    fn test_blockquote_prefix() {
        let rendered = render("> quoted");
        assert_eq!(rendered.plain_text(), "│ quoted");
        assert_eq!(rendered.lines[0].segments[0].style.role, Role::Quote);
    }

    #[test]
    fn test_inline_code() {
        let rendered = render("Use `cargo` here");
        assert_eq!(rendered.plain_text(), "Use cargo here");
        assert_eq!(find_segment(&rendered, "cargo").unwrap().style.role, Role::Code);
    }

    #[test]
    fn test_code_block_without_language_is_plain() {
        let rendered = render("```\nlet x = 1;\n```");
        assert_eq!(rendered.plain_text(), "  let x = 1;");
        assert!(
            rendered.lines[0]
                .segments
                .iter()
                .all(|s| s.style.role == Role::CodeBlock && s.style.fg.is_none())
        );
    }

    #[test]
    fn test_code_block_with_language_is_highlighted() {
        let markdown = "```rust\nfn main() {}\n```";
        let highlighted = render_with(markdown, true, true);
        let plain = render_with(markdown, true, false);

        // Same text either way
        assert_eq!(highlighted.plain_text(), "  fn main() {}");
        assert_eq!(plain.plain_text(), "  fn main() {}");
        assert_ne!(highlighted, plain);
        assert!(
            highlighted.lines[0]
                .segments
                .iter()
                .any(|s| s.style.fg.is_some())
        );
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain() {
        let rendered = render_with("```nosuchlang\nabc\n```", true, true);
        assert_eq!(rendered.plain_text(), "  abc");
        assert!(rendered.lines[0].segments.iter().all(|s| s.style.fg.is_none()));
    }

    #[test]
    fn test_table_alignment() {
        let rendered = render("| Name | Qty |\n|:-----|----:|\n| apple | 3 |\n| kiwi | 12 |");
        let lines: Vec<String> = rendered.lines.iter().map(StyledLine::plain_text).collect();
        assert_eq!(lines[0], "Name  │ Qty");
        assert_eq!(lines[1], "──────┼────");
        assert_eq!(lines[2], "apple │   3");
        assert_eq!(lines[3], "kiwi  │  12");
        assert!(find_segment(&rendered, "Name ").unwrap().style.bold);
    }

    const FOOTNOTE_DOC: &str = "Rust is fast[^1].\n\n[^1]: Benchmarks vary.";

    #[test]
    fn test_footnotes_enabled() {
        let rendered = render_with(FOOTNOTE_DOC, true, true);
        let text = rendered.plain_text();
        assert!(text.starts_with("Rust is fast[1]."));
        assert!(text.contains("[1] Benchmarks vary. ↩"));
        assert_eq!(find_segment(&rendered, "[1]").unwrap().style.role, Role::FootnoteRef);
        assert_eq!(
            find_segment(&rendered, " ↩").unwrap().style.role,
            Role::FootnoteBackref
        );
    }

    #[test]
    fn test_footnotes_disabled() {
        let text = render_with(FOOTNOTE_DOC, false, true).plain_text();
        assert!(text.starts_with("Rust is fast[^1]."));
        assert!(text.contains("1: Benchmarks vary."));
        assert!(!text.contains(BACK_REFERENCE));
    }

    #[test]
    fn test_rule() {
        let rendered = render("a\n\n---\n\nb");
        assert_eq!(rendered.lines[2].plain_text(), "─".repeat(RULE_WIDTH));
    }

    #[test]
    fn test_render_is_idempotent() {
        let renderer = AnswerRenderer::default();
        let markdown = "# T\n\n* a\n* b\n\n```python\nprint(1)\n```";
        assert_eq!(renderer.render(markdown), renderer.render(markdown));
    }

    #[test]
    fn test_empty_input() {
        assert!(render("").lines.is_empty());
    }
}
