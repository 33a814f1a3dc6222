//! Theme colours resolved for the terminal.

use folio_core::theme::{Theme, parse_hex_rgb};
use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Borders, prompt and highlights.
    pub primary: Color,
    pub background: Color,
    /// Body text.
    pub accent: Color,
    /// Secondary text and masked input.
    pub muted: Color,
}

impl Palette {
    /// Colours that fail to parse fall back to the default theme's.
    pub fn from_theme(theme: &Theme) -> Self {
        let defaults = Theme::default();
        let color = |hex: &str, fallback: &str| {
            parse_hex_rgb(hex)
                .or_else(|| parse_hex_rgb(fallback))
                .map_or(Color::Reset, |(r, g, b)| Color::Rgb(r, g, b))
        };
        Self {
            primary: color(&theme.primary_color, &defaults.primary_color),
            background: color(&theme.background_color, &defaults.background_color),
            accent: color(&theme.accent_color, &defaults.accent_color),
            muted: Color::DarkGray,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

/// `[<prompt> ~]$ `
pub fn prompt_prefix(prompt: &str) -> String {
    format!("[{prompt} ~]$ ")
}
