//! Site theme: colours, font and terminal text, plus colour conversion.
//!
//! The theme is stored in `<data_dir>/theme.json`. Colours are `#RGB` or
//! `#RRGGBB` hex strings; [`hex_to_hsl_string`] turns them into the
//! `"H S% L%"` form used for CSS custom properties, and [`parse_hex_rgb`]
//! gives the TUI raw RGB triples.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::projects::write_atomic;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    /// Borders, highlights and the cursor.
    pub primary_color: String,
    pub background_color: String,
    /// Primary text colour.
    pub accent_color: String,
    pub font: String,
    pub welcome_message: String,
    /// Prompt shown as `[<prompt> ~]$`.
    pub prompt: String,
    /// Command that "runs" to reveal the project list.
    pub loading_command: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: "#2F4F4F".to_string(),
            background_color: "#1A1A1A".to_string(),
            accent_color: "#32CD32".to_string(),
            font: "Space Grotesk".to_string(),
            welcome_message: " welcome-to-my-portfolio".to_string(),
            prompt: "user@cli-portfolio".to_string(),
            loading_command: "ls projects".to_string(),
        }
    }
}

impl Theme {
    /// Prompt text, falling back to the default when blank.
    pub fn prompt(&self) -> &str {
        if self.prompt.trim().is_empty() {
            "user@cli-portfolio"
        } else {
            &self.prompt
        }
    }

    /// CSS custom properties derived from the theme, in application order.
    pub fn css_variables(&self) -> Vec<(&'static str, String)> {
        let background = hex_to_hsl_string(&self.background_color, &HslAdjustments::default());
        let card = hex_to_hsl_string(&self.primary_color, &HslAdjustments::default());
        let accent = hex_to_hsl_string(&self.accent_color, &HslAdjustments::default());
        let muted_foreground = hex_to_hsl_string(
            &self.accent_color,
            &HslAdjustments {
                lightness: Some(Box::new(|l| l * 0.8)),
                ..Default::default()
            },
        );

        vec![
            ("--background", background.clone()),
            ("--card", card.clone()),
            ("--secondary", card.clone()),
            ("--border", card.clone()),
            ("--input", card.clone()),
            ("--muted", card),
            ("--foreground", accent.clone()),
            ("--primary", accent.clone()),
            ("--primary-foreground", background),
            ("--accent-foreground", accent.clone()),
            ("--card-foreground", accent.clone()),
            ("--ring", accent),
            ("--muted-foreground", muted_foreground),
        ]
    }
}

/// Theme edits. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemePatch {
    pub primary_color: Option<String>,
    pub background_color: Option<String>,
    pub accent_color: Option<String>,
    pub font: Option<String>,
    pub welcome_message: Option<String>,
    pub prompt: Option<String>,
    pub loading_command: Option<String>,
}

impl ThemePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Edited colours must be exactly `#RRGGBB`.
///
/// # Errors
/// Returns an error naming the field when the value is not a six-digit hex code.
pub fn validate_hex_color(field: &str, value: &str) -> Result<()> {
    let valid = value
        .strip_prefix('#')
        .is_some_and(|digits| digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()));
    if !valid {
        anyhow::bail!("{field} must be a valid hex code: {value}");
    }
    Ok(())
}

impl Theme {
    /// Validates every edited field, then applies them all. Nothing changes on
    /// error.
    ///
    /// # Errors
    /// Returns an error if a colour is not `#RRGGBB` or the font is blank.
    pub fn apply(&mut self, patch: ThemePatch) -> Result<()> {
        for (field, value) in [
            ("primaryColor", &patch.primary_color),
            ("backgroundColor", &patch.background_color),
            ("accentColor", &patch.accent_color),
        ] {
            if let Some(value) = value {
                validate_hex_color(field, value)?;
            }
        }
        if let Some(font) = &patch.font
            && font.trim().is_empty()
        {
            anyhow::bail!("Font is required");
        }

        let ThemePatch {
            primary_color,
            background_color,
            accent_color,
            font,
            welcome_message,
            prompt,
            loading_command,
        } = patch;
        let fields = [
            (&mut self.primary_color, primary_color),
            (&mut self.background_color, background_color),
            (&mut self.accent_color, accent_color),
            (&mut self.font, font),
            (&mut self.welcome_message, welcome_message),
            (&mut self.prompt, prompt),
            (&mut self.loading_command, loading_command),
        ];
        for (slot, value) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        Ok(())
    }
}

/// Optional per-channel tweaks applied before rounding.
#[derive(Default)]
pub struct HslAdjustments {
    pub hue: Option<Box<dyn Fn(f64) -> f64>>,
    pub saturation: Option<Box<dyn Fn(f64) -> f64>>,
    pub lightness: Option<Box<dyn Fn(f64) -> f64>>,
}

/// Parses `#RGB` or `#RRGGBB`.
pub fn parse_hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        3 => {
            let mut parts = digits.chars().map(|c| channel(&format!("{c}{c}")));
            Some((parts.next()??, parts.next()??, parts.next()??))
        }
        6 => Some((
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        _ => None,
    }
}

/// Hue in degrees, saturation and lightness in percent.
fn rgb_to_hsl((r, g, b): (u8, u8, u8)) -> (f64, f64, f64) {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = f64::midpoint(max, min);

    if (max - min).abs() < f64::EPSILON {
        return (0.0, 0.0, l * 100.0);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    #[allow(clippy::float_cmp)]
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h / 6.0 * 360.0, s * 100.0, l * 100.0)
}

/// Converts a hex colour to `"H S% L%"`. Invalid input yields `"0 0% 0%"`.
pub fn hex_to_hsl_string(hex: &str, adjustments: &HslAdjustments) -> String {
    let Some(rgb) = parse_hex_rgb(hex) else {
        return "0 0% 0%".to_string();
    };

    let (mut h, mut s, mut l) = rgb_to_hsl(rgb);
    if let Some(f) = &adjustments.hue {
        h = f(h);
    }
    if let Some(f) = &adjustments.saturation {
        s = f(s);
    }
    if let Some(f) = &adjustments.lightness {
        l = f(l);
    }

    format!("{} {}% {}%", h.round(), s.round(), l.round())
}

/// JSON file backing the theme.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the theme; a missing file yields [`Theme::default`].
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(&self) -> Result<Theme> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse theme from {}", self.path.display())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Theme::default()),
            Err(err) => {
                Err(err).with_context(|| format!("Failed to read theme from {}", self.path.display()))
            }
        }
    }

    /// # Errors
    /// Returns an error if serialization or the atomic write fails.
    pub fn save(&self, theme: &Theme) -> Result<()> {
        let json = serde_json::to_string_pretty(theme).context("Failed to serialize theme")?;
        write_atomic(&self.path, &json)?;
        tracing::info!(path = %self.path.display(), "theme saved");
        Ok(())
    }
}
