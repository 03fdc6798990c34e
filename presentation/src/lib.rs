//! Presentation layer for openanswer
//!
//! This crate contains CLI definitions, the answer renderer, one-shot
//! output formatting, progress reporting and the interactive page.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;
pub mod render;
pub mod tui;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use config::{OutputConfig, RenderConfig};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::ProgressReporter;
pub use render::{AnswerRenderer, Palette, RenderOptions, RenderedAnswer};
pub use tui::{TerminalThemeSurface, TuiApp};
