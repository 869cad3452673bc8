// Theme module - dark/light mode, palettes and color helpers
//
// The page chrome and the point field both pick their colors from the
// current `ThemeMode`. The mode itself lives in `ThemeState` (see `store`),
// which is passed around explicitly instead of being global.

pub mod palette;
pub mod store;

use ratatui::style::Color;

use crate::field::Rgb;

pub use palette::{chrome, field_colors, page_background, Chrome};
pub use store::{FileThemeStore, ThemeState, ThemeStore};

/// Cyan accent used for highlights in dark mode
/// RGB: (37, 244, 238)
pub const NEON_CYAN: Rgb = Rgb(37, 244, 238);

/// Pink accent used for highlights in light mode
/// RGB: (254, 44, 85)
pub const HOT_PINK: Rgb = Rgb(254, 44, 85);

/// Near-black used as dark background and light-mode ink
/// RGB: (18, 18, 18)
pub const INK: Rgb = Rgb(18, 18, 18);

/// Near-white used as light background
/// RGB: (248, 250, 252)
pub const PAPER: Rgb = Rgb(248, 250, 252);

/// Pure white points and lines in dark mode
pub const WHITE: Rgb = Rgb(255, 255, 255);

/// Geometric preset accent in light mode
/// RGB: (59, 130, 246)
pub const SKY_BLUE: Rgb = Rgb(59, 130, 246);

/// Geometric preset backgrounds
pub const SLATE: Rgb = Rgb(31, 41, 55);
pub const MIST: Rgb = Rgb(249, 250, 251);

/// Color scheme of the whole page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Dark,
    #[default]
    Light,
}

impl ThemeMode {
    pub fn is_dark(&self) -> bool {
        matches!(self, ThemeMode::Dark)
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    /// Word written to the preference file
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    /// Parse a stored preference word
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "dark" => Some(ThemeMode::Dark),
            "light" => Some(ThemeMode::Light),
            _ => None,
        }
    }
}

/// Convert a backend-independent color to a terminal color
pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_mode_round_trip_words() {
        assert_eq!(ThemeMode::parse("dark"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::parse("light\n"), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::parse("sepia"), None);
        assert_eq!(ThemeMode::Dark.as_str(), "dark");
    }

    #[test]
    fn test_toggled() {
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert!(ThemeMode::Dark.is_dark());
    }
}
