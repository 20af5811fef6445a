//! RGBA colors with CSS hex parsing and CSS output

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Color with 8-bit channels and a floating alpha (0..=1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Same channels, alpha replaced (clamped to 0..=1)
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a: a.clamp(0.0, 1.0), ..self }
    }

    /// Parse `#rgb` or `#rrggbb` (leading `#` optional)
    pub fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || ConfigError::InvalidColor(hex.to_string());

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

        match digits.len() {
            3 => {
                let expand = |i: usize| channel(&digits[i..i + 1].repeat(2));
                Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }

    /// Lowercase `#rrggbb`, alpha dropped
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS `rgba(r, g, b, a)` string for canvas color stops and styles
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, round_alpha(self.a))
    }

    /// Channel-wise interpolation
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            f.write_str(&self.to_hex())
        } else {
            f.write_str(&self.to_css())
        }
    }
}

impl TryFrom<String> for Rgba {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_hex()
    }
}

/// Keep CSS strings short: 0.12000000000000001 -> 0.12
fn round_alpha(a: f64) -> f64 {
    (a.clamp(0.0, 1.0) * 10_000.0).round() / 10_000.0
}
