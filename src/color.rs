// src/color.rs

//! Defines the color types used throughout the engine.
//!
//! Painted cells carry an [`Rgb`] true color whose canonical textual form is
//! a lowercase `#rrggbb` hex string; that string is also the serde
//! representation, so a serialized painted-cell mapping is directly
//! interchangeable with the `"x_y" -> "#rrggbb"` format the surrounding
//! application persists. Overlay chrome (grid lines, hover reticle, preview
//! borders) uses [`Rgba`], which adds an alpha channel but never round-trips
//! through text.

use once_cell::sync::Lazy;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An opaque true color, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Parses a strict `#rrggbb` hex string (case-insensitive digits).
    ///
    /// Anything else — wrong length, missing `#`, shorthand `#rgb`,
    /// non-hex digits — yields `None`. This is the only color validation
    /// the engine performs.
    pub fn from_hex(s: &str) -> Option<Rgb> {
        let digits = s.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
        let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
        let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
        Some(Rgb::new(r, g, b))
    }

    /// Canonical lowercase `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// This color as an opaque [`Rgba`].
    pub const fn opaque(&self) -> Rgba {
        Rgba::new(self.r, self.g, self.b, 1.0)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex(&s)
            .ok_or_else(|| D::Error::custom(format!("invalid hex color string: {:?}", s)))
    }
}

/// A color with straight alpha in `[0.0, 1.0]`, used for overlay styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Rgba { r, g, b, a }
    }
}

impl From<Rgb> for Rgba {
    fn from(c: Rgb) -> Self {
        c.opaque()
    }
}

/// The default 16-color painting palette, in presentation order.
///
/// Parsed lazily from the canonical hex strings so the palette and the hex
/// parser can never drift apart.
pub static DEFAULT_PALETTE: Lazy<Vec<Rgb>> = Lazy::new(|| {
    const HEX: [&str; 16] = [
        "#ffffff", "#e4e4e4", "#888888", "#222222", "#ffa7d1", "#e50000", "#e59500", "#a06a42",
        "#e5d900", "#94e044", "#02be01", "#00d3dd", "#0083c7", "#0000ea", "#cf6ee4", "#820080",
    ];
    HEX.iter()
        .map(|s| Rgb::from_hex(s).expect("default palette entry must be valid hex"))
        .collect()
});
