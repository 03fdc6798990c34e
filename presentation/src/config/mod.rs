//! Presentation-level configuration
//!
//! Settings for one-shot output, resolved from the config file and CLI flags.

use crate::render::RenderOptions;
use openanswer_domain::{OutputFormat, Theme};

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show the loading spinner
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Full,
            color: true,
            show_progress: true,
        }
    }
}

/// Answer rendering configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub footnotes: bool,
    pub highlight: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            footnotes: true,
            highlight: true,
        }
    }
}

impl RenderConfig {
    pub fn options(&self, theme: Theme) -> RenderOptions {
        RenderOptions {
            footnotes: self.footnotes,
            highlight: self.highlight,
            theme,
        }
    }
}
