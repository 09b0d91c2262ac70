//! Material colour type

use serde::{Deserialize, Serialize};

/// 8-bit RGB colour assigned to marker, connector and panel materials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Color::rgb(255, 255, 255);
    pub const MARKER_PINK: Self = Color::rgb(239, 45, 94);
    pub const CONNECTOR_GREY: Self = Color::rgb(150, 150, 150);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to crossterm color
    pub fn to_crossterm(&self) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }

    /// Hex notation, e.g. `#ef2d5e`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(Color::MARKER_PINK.to_hex(), "#ef2d5e");
        assert_eq!(Color::WHITE.to_hex(), "#ffffff");
    }

    #[test]
    fn test_crossterm_conversion() {
        assert_eq!(
            Color::CONNECTOR_GREY.to_crossterm(),
            crossterm::style::Color::Rgb { r: 150, g: 150, b: 150 }
        );
    }
}
