//! Answer rendering
//!
//! [`AnswerRenderer`] turns the Markdown answer into [`RenderedAnswer`];
//! [`terminal`] converts that into ratatui text or ANSI escapes.

pub mod highlight;
pub mod markdown;
pub mod palette;
pub mod terminal;

pub use highlight::CodeHighlighter;
pub use markdown::{AnswerRenderer, RenderOptions, RenderedAnswer, Role, Segment, SegmentStyle, StyledLine};
pub use palette::{Palette, Rgb};
