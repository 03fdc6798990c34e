//! Terminal theme surface
//!
//! Receives the theme attribute and background colour from the
//! `ThemeManager` and exposes them to the draw loop as a [`Palette`].

use crate::render::Palette;
use openanswer_application::ThemeSurface;
use openanswer_domain::Theme;
use std::sync::RwLock;

struct Applied {
    attribute: String,
    background: String,
}

/// Theme surface backed by the terminal page
pub struct TerminalThemeSurface {
    applied: RwLock<Applied>,
}

impl TerminalThemeSurface {
    pub fn new(theme: Theme) -> Self {
        Self {
            applied: RwLock::new(Applied {
                attribute: theme.as_str().to_string(),
                background: theme.background_color().to_string(),
            }),
        }
    }

    /// Theme named by the current attribute
    pub fn theme(&self) -> Theme {
        let applied = self.applied.read().unwrap_or_else(|p| p.into_inner());
        Theme::from_stored(Some(&applied.attribute))
    }

    /// Palette for the current attribute and background
    pub fn palette(&self) -> Palette {
        let applied = self.applied.read().unwrap_or_else(|p| p.into_inner());
        Palette::for_theme(Theme::from_stored(Some(&applied.attribute)))
            .with_background(&applied.background)
    }
}

impl ThemeSurface for TerminalThemeSurface {
    fn set_theme_attribute(&self, value: &str) {
        let mut applied = self.applied.write().unwrap_or_else(|p| p.into_inner());
        applied.attribute = value.to_string();
    }

    fn set_background_color(&self, color: &str) {
        let mut applied = self.applied.write().unwrap_or_else(|p| p.into_inner());
        applied.background = color.to_string();
    }
}
