//! Color type conversions and utilities
//!
//! Provides type-safe color handling with conversions between:
//! - Hex strings (#AARRGGBB or #RRGGBB format)
//! - ARGB32 values (u32)
//! - X11 render Colors (16-bit per channel)

use x11rb::protocol::render::Color;

/// 8-bit per channel RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse hex color string supporting multiple formats:
    /// - 6 digits: RRGGBB (full opacity assumed)
    /// - 8 digits: AARRGGBB (explicit alpha)
    /// - Optional '#' prefix supported but not required
    pub fn parse_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !matches!(hex.len(), 6 | 8) {
            return None;
        }
        let value = u32::from_str_radix(hex, 16).ok()?;

        let argb = if hex.len() == 6 {
            0xFF_00_00_00 | value
        } else {
            value
        };

        Some(Self::from_argb32(argb))
    }

    /// Create from ARGB32 value
    pub fn from_argb32(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Convert to X11 Color (16-bit per channel, 0-65535 range)
    pub fn to_x11_color(self) -> Color {
        // Scale from 8-bit (0-255) to 16-bit (0-65535)
        let scale = |v: u8| (v as u16) << 8 | v as u16;

        Color {
            red: scale(self.r),
            green: scale(self.g),
            blue: scale(self.b),
            alpha: scale(self.a),
        }
    }
}
