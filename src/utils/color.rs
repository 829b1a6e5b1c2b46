//! Color utilities.
//!
//! Label colors are stored as `#rrggbb` strings; these helpers turn them into
//! terminal colors and derive the tinted chip background.

use ratatui::style::Color;
use regex::Regex;
use std::sync::OnceLock;

static HEX_COLOR: OnceLock<Option<Regex>> = OnceLock::new();

fn hex_color_pattern() -> Option<&'static Regex> {
    HEX_COLOR
        .get_or_init(|| {
            Regex::new(r"^#?([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$")
                .map_err(|e| log::warn!("Failed to compile hex color pattern: {}", e))
                .ok()
        })
        .as_ref()
}

/// Parse a `#rrggbb` (or `rrggbb`) string into its channels.
///
pub fn parse_hex(value: &str) -> Option<(u8, u8, u8)> {
    let caps = hex_color_pattern()?.captures(value.trim())?;
    let channel = |i: usize| u8::from_str_radix(caps.get(i)?.as_str(), 16).ok();
    Some((channel(1)?, channel(2)?, channel(3)?))
}

/// Blend `fg` over `bg` with the given alpha (0 keeps `bg`, 255 gives `fg`).
///
pub fn blend(fg: (u8, u8, u8), bg: (u8, u8, u8), alpha: u8) -> Color {
    let mix = |f: u8, b: u8| {
        let a = alpha as u16;
        ((f as u16 * a + b as u16 * (255 - a) + 127) / 255) as u8
    };
    Color::Rgb(mix(fg.0, bg.0), mix(fg.1, bg.1), mix(fg.2, bg.2))
}

/// Opacity of the tinted background behind label chips.
pub const CHIP_ALPHA: u8 = 0x20;

/// Foreground and background for a label chip drawn on `surface`.
///
pub fn chip_colors(label_color: &str, surface: (u8, u8, u8), fallback: Color) -> (Color, Color) {
    match parse_hex(label_color) {
        Some(rgb) => (
            Color::Rgb(rgb.0, rgb.1, rgb.2),
            blend(rgb, surface, CHIP_ALPHA),
        ),
        None => (fallback, Color::Rgb(surface.0, surface.1, surface.2)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#ef4444"), Some((0xef, 0x44, 0x44)));
        assert_eq!(parse_hex("EC4899"), Some((0xec, 0x48, 0x99)));
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("#zz4444"), None);
        assert_eq!(parse_hex(""), None);
    }

    #[test]
    fn test_blend_extremes() {
        assert_eq!(blend((200, 100, 0), (0, 0, 0), 255), Color::Rgb(200, 100, 0));
        assert_eq!(blend((200, 100, 0), (10, 20, 30), 0), Color::Rgb(10, 20, 30));
    }

    #[test]
    fn test_chip_background_is_faint_tint() {
        let (fg, bg) = chip_colors("#ffffff", (0, 0, 0), Color::Reset);
        assert_eq!(fg, Color::Rgb(255, 255, 255));
        assert_eq!(bg, Color::Rgb(32, 32, 32));

        let (fg, bg) = chip_colors("red", (1, 2, 3), Color::Red);
        assert_eq!(fg, Color::Red);
        assert_eq!(bg, Color::Rgb(1, 2, 3));
    }
}
