//! Theme value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Storage key under which the theme preference is persisted
pub const THEME_KEY: &str = "theme";

/// Light/dark display mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Value stored under [`THEME_KEY`] and used as the theme attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Background colour applied alongside the theme attribute
    pub fn background_color(&self) -> &'static str {
        match self {
            Theme::Light => "#ffffff",
            Theme::Dark => "#1a1a1a",
        }
    }

    /// Lenient parse for stored values: empty, missing or unknown means light.
    pub fn from_stored(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(DomainError::InvalidTheme(other.to_string())),
        }
    }
}
