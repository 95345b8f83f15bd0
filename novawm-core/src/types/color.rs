//! Color representation for style descriptors and pixel buffers.
//!
//! Colors are stored as 8-bit RGBA components and convert to the premultiplied-
//! free ARGB32 words used by pixel buffers. In configuration files they are
//! written as hex strings (`"#RRGGBB"` or `"#RRGGBBAA"`).
//!
//! ```
//! use novawm_core::types::Color;
//!
//! let dark = Color::from_hex("#202020").unwrap();
//! assert_eq!(dark.to_argb32(), 0xff202020);
//! assert_eq!(Color::from_argb32(0x80ff0000).to_hex_with_alpha(), "#ff000080");
//! ```

use serde::de::Error as SerdeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The string does not start with '#'.
    #[error("Invalid hex color string format: '{0}'. Expected #RGB, #RRGGBB, or #RRGGBBAA.")]
    InvalidHexFormat(String),

    /// A component is not a valid hex number.
    #[error("Invalid hex digit in '{input_str}': {source}")]
    InvalidHexDigit {
        input_str: String,
        #[source]
        source: ParseIntError,
    },

    /// Wrong number of digits after '#'.
    #[error("Invalid hex color string length: '{0}'. Expected 3, 6, or 8 characters after '#'.")]
    InvalidHexLength(String),
}

/// An RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// An opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Builds a color from an ARGB32 word (`0xAARRGGBB`).
    pub const fn from_argb32(argb: u32) -> Self {
        Color {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// The ARGB32 word (`0xAARRGGBB`) of this color.
    pub const fn to_argb32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Parses `#RGB`, `#RRGGBB` or `#RRGGBBAA`.
    pub fn from_hex(hex_str: &str) -> Result<Self, ColorParseError> {
        let input = hex_str
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::InvalidHexFormat(hex_str.to_string()))?;

        let component = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|e| ColorParseError::InvalidHexDigit {
                input_str: s.to_string(),
                source: e,
            })
        };

        if !input.is_ascii() {
            return Err(ColorParseError::InvalidHexFormat(hex_str.to_string()));
        }
        match input.len() {
            3 => {
                let r = component(&input[0..1])?;
                let g = component(&input[1..2])?;
                let b = component(&input[2..3])?;
                Ok(Color::rgb((r << 4) | r, (g << 4) | g, (b << 4) | b))
            }
            6 => Ok(Color::rgb(
                component(&input[0..2])?,
                component(&input[2..4])?,
                component(&input[4..6])?,
            )),
            8 => Ok(Color::rgba(
                component(&input[0..2])?,
                component(&input[2..4])?,
                component(&input[4..6])?,
                component(&input[6..8])?,
            )),
            _ => Err(ColorParseError::InvalidHexLength(hex_str.to_string())),
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_hex_with_alpha(&self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }

    /// Linear interpolation towards `other`; `t` is clamped to `[0, 1]`.
    pub fn interpolate(&self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
        Color::rgba(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex_with_alpha())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(SerdeError::custom)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s.trim())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_with_alpha())
    }
}
