// Per-mode palettes
//
// Field colors for each preset and the chrome colors for borders, text and
// accents around the page.

use ratatui::style::Color;

use super::{to_color, ThemeMode, HOT_PINK, INK, MIST, NEON_CYAN, PAPER, SKY_BLUE, SLATE, WHITE};
use crate::field::{FieldColors, Preset, Rgb};

/// Alpha baked into the line color of the network preset
const NETWORK_LINE_OPACITY: f64 = 0.2;

/// Colors the point field draws with
pub fn field_colors(preset: Preset, mode: ThemeMode) -> FieldColors {
    match (preset, mode) {
        (Preset::Network, ThemeMode::Dark) => FieldColors {
            background: INK,
            point: WHITE,
            line: WHITE,
            line_opacity: NETWORK_LINE_OPACITY,
            highlight: NEON_CYAN,
        },
        (Preset::Network, ThemeMode::Light) => FieldColors {
            background: PAPER,
            point: INK,
            line: INK,
            line_opacity: NETWORK_LINE_OPACITY,
            highlight: HOT_PINK,
        },
        (Preset::Geometric, ThemeMode::Dark) => FieldColors {
            background: SLATE,
            point: WHITE,
            line: WHITE,
            line_opacity: 1.0,
            highlight: WHITE,
        },
        (Preset::Geometric, ThemeMode::Light) => FieldColors {
            background: MIST,
            point: SKY_BLUE,
            line: SKY_BLUE,
            line_opacity: 1.0,
            highlight: SKY_BLUE,
        },
    }
}

/// Color the terminal page is painted with
pub fn page_background(mode: ThemeMode) -> Rgb {
    match mode {
        ThemeMode::Dark => INK,
        ThemeMode::Light => PAPER,
    }
}

/// Page chrome colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chrome {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
}

pub fn chrome(mode: ThemeMode) -> Chrome {
    match mode {
        ThemeMode::Dark => Chrome {
            background: to_color(page_background(mode)),
            text: Color::Rgb(229, 231, 235),
            muted: Color::Rgb(156, 163, 175),
            accent: to_color(NEON_CYAN),
            border: Color::Rgb(75, 85, 99),
        },
        ThemeMode::Light => Chrome {
            background: to_color(page_background(mode)),
            text: to_color(INK),
            muted: Color::Rgb(107, 114, 128),
            accent: to_color(HOT_PINK),
            border: Color::Rgb(209, 213, 219),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_palettes_follow_mode() {
        let dark = field_colors(Preset::Network, ThemeMode::Dark);
        assert_eq!(dark.point, Rgb(255, 255, 255));
        assert_eq!(dark.highlight, Rgb(37, 244, 238));

        let light = field_colors(Preset::Network, ThemeMode::Light);
        assert_eq!(light.point, Rgb(18, 18, 18));
        assert_eq!(light.highlight, Rgb(254, 44, 85));
        assert_eq!(light.line_opacity, 0.2);
    }

    #[test]
    fn test_geometric_light_uses_accent() {
        let light = field_colors(Preset::Geometric, ThemeMode::Light);
        assert_eq!(light.line, Rgb(59, 130, 246));
        assert_eq!(light.line_opacity, 1.0);
    }

    #[test]
    fn test_chrome_background_matches_field_backdrop() {
        for mode in [ThemeMode::Dark, ThemeMode::Light] {
            let field = field_colors(Preset::Network, mode);
            assert_eq!(chrome(mode).background, to_color(field.background));
        }
    }
}
