//! Color values and color token parsing

use crate::error::{ConfigError, Result};

/// RGBA color with f32 components (0.0 to 1.0)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create from u8 components (0-255)
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create from hex value (0xRRGGBB)
    pub fn from_hex(hex: u32) -> Self {
        Self::from_rgba8(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
            255,
        )
    }

    /// Convert to u8 array [r, g, b, a]
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        ]
    }

    /// Parse a style token as accepted by the widget options.
    ///
    /// Accepts CSS named colors (common subset), `#rgb`, `#rrggbb` and
    /// `#rrggbbaa`. Matching is case-insensitive and ignores surrounding
    /// whitespace.
    pub fn parse(token: &str) -> Result<Self> {
        let trimmed = token.trim();
        let lower = trimmed.to_ascii_lowercase();

        if let Some(hex) = lower.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ConfigError::InvalidColor(token.to_string()));
        }

        named(&lower).ok_or_else(|| ConfigError::InvalidColor(token.to_string()))
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(Color::from_rgba8(nibble(0)?, nibble(1)?, nibble(2)?, 255)),
        6 => Some(Color::from_rgba8(byte(0)?, byte(2)?, byte(4)?, 255)),
        8 => Some(Color::from_rgba8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn named(name: &str) -> Option<Color> {
    let hex = match name {
        "white" => 0xFFFFFF,
        "black" => 0x000000,
        "red" => 0xFF0000,
        "green" => 0x008000,
        "lime" => 0x00FF00,
        "blue" => 0x0000FF,
        "yellow" => 0xFFFF00,
        "orange" => 0xFFA500,
        "gray" | "grey" => 0x808080,
        "silver" => 0xC0C0C0,
        "cyan" | "aqua" => 0x00FFFF,
        "magenta" | "fuchsia" => 0xFF00FF,
        "purple" => 0x800080,
        "pink" => 0xFFC0CB,
        "crimson" => 0xDC143C,
        "tomato" => 0xFF6347,
        "gold" => 0xFFD700,
        "navy" => 0x000080,
        "teal" => 0x008080,
        "transparent" => return Some(Color::TRANSPARENT),
        _ => return None,
    };
    Some(Color::from_hex(hex))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors() {
        assert_eq!(Color::parse("white").unwrap(), Color::WHITE);
        assert_eq!(Color::parse(" Red ").unwrap(), Color::RED);
        assert_eq!(Color::parse("grey").unwrap(), Color::parse("gray").unwrap());
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(Color::parse("#f00").unwrap(), Color::RED);
        assert_eq!(Color::parse("#00ff00").unwrap().to_rgba8(), [0, 255, 0, 255]);
        assert_eq!(Color::parse("#11223380").unwrap().to_rgba8(), [0x11, 0x22, 0x33, 0x80]);
    }

    #[test]
    fn test_invalid_tokens() {
        assert!(matches!(
            Color::parse("not-a-color"),
            Err(ConfigError::InvalidColor(_))
        ));
        assert!(Color::parse("#12").is_err());
        assert!(Color::parse("#zzzzzz").is_err());
    }
}
