//! Theme surface port
//!
//! The display the theme is applied to: a theme attribute plus a
//! background colour set together so the screen never flashes the wrong
//! colour between them. The presentation layer provides the adapter.

use openanswer_domain::Theme;

/// Something a theme can be applied to
pub trait ThemeSurface: Send + Sync {
    /// Set the active theme attribute (`"light"` / `"dark"`)
    fn set_theme_attribute(&self, value: &str);

    /// Set the background colour (`#rrggbb`)
    fn set_background_color(&self, color: &str);

    /// Apply both values for `theme`
    fn apply(&self, theme: Theme) {
        self.set_theme_attribute(theme.as_str());
        self.set_background_color(theme.background_color());
    }
}

/// Surface that ignores everything, for headless use
pub struct NoThemeSurface;

impl ThemeSurface for NoThemeSurface {
    fn set_theme_attribute(&self, _value: &str) {}
    fn set_background_color(&self, _color: &str) {}
}
