//! Color model, name tables and format conversions
//!
//! This module provides:
//! - `Rgb`, the 8-bit triple every other part of the app passes around
//! - Named color tables (one per database) and the resolver that queries them
//! - Conversions to HEX, CMYK, HSV and HSL

pub mod builtin;
pub mod formats;
pub mod resolver;
pub mod tables;

pub use formats::ColorFormats;
pub use resolver::{NameHit, NamedColorSet};
pub use tables::Database;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An sRGB color with 8-bit channels.
///
/// Serialized as a `[r, g, b]` array, which is the shape favorites and the
/// settings store use on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse `#RRGGBB` or `RRGGBB` (either case).
    pub fn from_hex(s: &str) -> anyhow::Result<Self> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 {
            anyhow::bail!("hex color must have 6 digits: {s:?}");
        }
        let bytes = hex::decode(digits).with_context(|| format!("decode hex color {s:?}"))?;
        Ok(Self::new(bytes[0], bytes[1], bytes[2]))
    }

    /// Squared Euclidean distance in RGB space.
    pub fn distance_sq(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    pub fn channel(self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }

    /// Returns a copy with `channel` moved by `delta`, clamped to 0..=255.
    pub fn adjusted(self, channel: Channel, delta: i16) -> Self {
        let value = (self.channel(channel) as i16 + delta).clamp(0, 255) as u8;
        let mut out = self;
        match channel {
            Channel::Red => out.r = value,
            Channel::Green => out.g = value,
            Channel::Blue => out.b = value,
        }
        out
    }

    /// Rec. 601 luma, used to pick readable text on top of a swatch.
    pub fn is_dark(self) -> bool {
        0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64 <= 128.0
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(v: [u8; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.r, self.g, self.b)
    }
}

/// Accepts `r,g,b`, `(r, g, b)`, `[r, g, b]`, `#RRGGBB` and `RRGGBB`.
impl FromStr for Rgb {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('#') || (s.len() == 6 && !s.contains(',')) {
            return Self::from_hex(s);
        }

        let inner = s
            .trim_start_matches(['(', '['])
            .trim_end_matches([')', ']']);
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            anyhow::bail!("expected three components: {s:?}");
        }
        let mut out = [0u8; 3];
        for (slot, part) in out.iter_mut().zip(&parts) {
            *slot = part
                .parse::<u8>()
                .with_context(|| format!("component {part:?} is not in 0..=255"))?;
        }
        Ok(out.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Channel {
    #[default]
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn next(self) -> Self {
        match self {
            Channel::Red => Channel::Green,
            Channel::Green => Channel::Blue,
            Channel::Blue => Channel::Red,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Channel::Red => "R",
            Channel::Green => "G",
            Channel::Blue => "B",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        let want = Rgb::new(12, 200, 255);
        assert_eq!("12,200,255".parse::<Rgb>().unwrap(), want);
        assert_eq!("(12, 200, 255)".parse::<Rgb>().unwrap(), want);
        assert_eq!("[12, 200, 255]".parse::<Rgb>().unwrap(), want);
        assert_eq!("#0CC8FF".parse::<Rgb>().unwrap(), want);
        assert_eq!("0cc8ff".parse::<Rgb>().unwrap(), want);
    }

    #[test]
    fn test_parse_rejects() {
        assert!("256,0,0".parse::<Rgb>().is_err());
        assert!("1,2".parse::<Rgb>().is_err());
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("#GG0000".parse::<Rgb>().is_err());
        assert!("red".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_hex_round_trip() {
        for r in (0..=255u8).step_by(15) {
            for g in (0..=255u8).step_by(17) {
                for b in [0u8, 1, 127, 128, 254, 255] {
                    let c = Rgb::new(r, g, b);
                    assert_eq!(Rgb::from_hex(&c.to_hex()).unwrap(), c);
                }
            }
        }
    }

    #[test]
    fn test_hex_is_uppercase_and_padded() {
        assert_eq!(Rgb::new(10, 0, 171).to_hex(), "#0A00AB");
    }

    #[test]
    fn test_distance() {
        assert_eq!(Rgb::new(1, 2, 3).distance_sq(Rgb::new(1, 2, 3)), 0);
        assert_eq!(Rgb::new(0, 0, 0).distance_sq(Rgb::new(255, 255, 255)), 3 * 255 * 255);
        assert_eq!(Rgb::new(10, 0, 0).distance_sq(Rgb::new(7, 4, 0)), 25);
    }

    #[test]
    fn test_adjust_clamps() {
        let c = Rgb::new(250, 5, 100);
        assert_eq!(c.adjusted(Channel::Red, 16), Rgb::new(255, 5, 100));
        assert_eq!(c.adjusted(Channel::Green, -16), Rgb::new(250, 0, 100));
        assert_eq!(c.adjusted(Channel::Blue, 1), Rgb::new(250, 5, 101));
    }

    #[test]
    fn test_serde_array_shape() {
        let json = serde_json::to_string(&Rgb::new(1, 2, 3)).unwrap();
        assert_eq!(json, "[1,2,3]");
        let back: Rgb = serde_json::from_str("[4, 5, 6]").unwrap();
        assert_eq!(back, Rgb::new(4, 5, 6));
        assert!(serde_json::from_str::<Rgb>("[4, 5, 600]").is_err());
    }
}
