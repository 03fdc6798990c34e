//! Colours for each theme

use openanswer_domain::Theme;

/// 24-bit colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Colour roles used by the renderer and the terminal UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub foreground: Rgb,
    pub muted: Rgb,
    pub accent: Rgb,
    pub heading: Rgb,
    pub link: Rgb,
    pub code: Rgb,
    pub code_background: Rgb,
    pub footnote: Rgb,
    pub error: Rgb,
    pub error_background: Rgb,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        let background = Rgb::from_hex(theme.background_color()).unwrap_or(match theme {
            Theme::Light => Rgb(0xff, 0xff, 0xff),
            Theme::Dark => Rgb(0x1a, 0x1a, 0x1a),
        });

        match theme {
            Theme::Light => Self {
                background,
                foreground: Rgb(0x1f, 0x29, 0x37),
                muted: Rgb(0x6b, 0x72, 0x80),
                accent: Rgb(0x25, 0x63, 0xeb),
                heading: Rgb(0x11, 0x18, 0x27),
                link: Rgb(0x1d, 0x4e, 0xd8),
                code: Rgb(0xbe, 0x12, 0x3c),
                code_background: Rgb(0xf3, 0xf4, 0xf6),
                footnote: Rgb(0x7c, 0x3a, 0xed),
                error: Rgb(0xb9, 0x1c, 0x1c),
                error_background: Rgb(0xfe, 0xe2, 0xe2),
            },
            Theme::Dark => Self {
                background,
                foreground: Rgb(0xe5, 0xe7, 0xeb),
                muted: Rgb(0x9c, 0xa3, 0xaf),
                accent: Rgb(0x60, 0xa5, 0xfa),
                heading: Rgb(0xf9, 0xfa, 0xfb),
                link: Rgb(0x93, 0xc5, 0xfd),
                code: Rgb(0xf4, 0x72, 0xb6),
                code_background: Rgb(0x2d, 0x2d, 0x2d),
                footnote: Rgb(0xc4, 0xb5, 0xfd),
                error: Rgb(0xfc, 0xa5, 0xa5),
                error_background: Rgb(0x45, 0x0a, 0x0a),
            },
        }
    }

    /// Replace the background with a colour set through the theme surface.
    pub fn with_background(mut self, hex: &str) -> Self {
        if let Some(rgb) = Rgb::from_hex(hex) {
            self.background = rgb;
        }
        self
    }
}
