//! Hex colors and theme-relative color defaults.

extern crate alloc;

use alloc::string::String;
use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Straight-alpha RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);
    /// Mid gray used when a document color cannot be parsed.
    pub const NEUTRAL: Self = Self::rgb(0x80, 0x80, 0x80);

    /// Opaque color from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`. The leading `#` is optional.
    pub fn from_hex(raw: &str) -> Option<Self> {
        let hex = raw.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                let r = nibble(hex.as_bytes()[0])?;
                let g = nibble(hex.as_bytes()[1])?;
                let b = nibble(hex.as_bytes()[2])?;
                Some(Self::rgb(r * 0x11, g * 0x11, b * 0x11))
            }
            6 => Some(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            8 => Some(Self {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
                a: channel(&hex[6..8])?,
            }),
            _ => None,
        }
    }

    /// Parse a document color, substituting `fallback` when it is malformed.
    pub fn from_hex_or(raw: &str, fallback: Self) -> Self {
        match Self::from_hex(raw) {
            Some(color) => color,
            None => {
                log::debug!("malformed color {:?}; using {}", raw, fallback);
                fallback
            }
        }
    }

    /// Same color with alpha scaled to `opacity` in `[0.0, 1.0]`.
    pub fn with_opacity(self, opacity: f32) -> Self {
        let opacity = if opacity.is_nan() {
            1.0
        } else {
            opacity.clamp(0.0, 1.0)
        };
        Self {
            a: (self.a as f32 * opacity).round() as u8,
            ..self
        }
    }

    /// Lowercase hex form; alpha is appended only when not opaque.
    pub fn to_hex(self) -> String {
        alloc::format!("{}", self)
    }
}

fn nibble(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|d| d as u8)
}

fn channel(pair: &str) -> Option<u8> {
    match pair.as_bytes() {
        [hi, lo] => Some((nibble(*hi)? << 4) | nibble(*lo)?),
        _ => None,
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 0xFF {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_hex_or(&raw, Self::NEUTRAL))
    }
}

/// Theme palette slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThemeColorRole {
    /// Primary text.
    Text,
    /// Captions, dates, secondary labels.
    SecondaryText,
    /// Page background.
    Background,
    /// Cards, inputs, grouped content.
    SecondaryBackground,
}

/// Template default color: a theme slot or a fixed color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorValue {
    /// Follows the current theme palette.
    Theme(ThemeColorRole),
    /// Fixed regardless of theme.
    Fixed(Color),
}

impl ColorValue {
    /// Primary theme text color.
    pub const TEXT: Self = Self::Theme(ThemeColorRole::Text);
    /// Secondary theme text color.
    pub const SECONDARY_TEXT: Self = Self::Theme(ThemeColorRole::SecondaryText);
    /// Fully transparent, the usual background default.
    pub const CLEAR: Self = Self::Fixed(Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    });
}
