// File: crates/stream-core/src/color.rs
// Summary: Backend-free RGBA color with CSS hex parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("color {0:?} must start with '#'")]
    MissingHash(String),
    #[error("color {0:?} must have 3 or 6 hex digits")]
    BadLength(String),
    #[error("color {0:?} contains a non-hex digit")]
    BadDigit(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a }
    }
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(255, r, g, b)
    }

    /// Parse `#rgb` or `#rrggbb`.
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let digits = s.trim().strip_prefix('#').ok_or_else(|| ColorError::MissingHash(s.to_string()))?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::BadDigit(s.to_string()));
        }
        let channel = |hex: &str| u8::from_str_radix(hex, 16).map_err(|_| ColorError::BadDigit(s.to_string()));
        match digits.len() {
            3 => {
                let expand = |i: usize| channel(&digits[i..i + 1].repeat(2));
                Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::rgb(channel(&digits[0..2])?, channel(&digits[2..4])?, channel(&digits[4..6])?)),
            _ => Err(ColorError::BadLength(s.to_string())),
        }
    }

    /// Lowercase `#rrggbb`; alpha is not encoded.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::from_hex(s) }
}

impl TryFrom<String> for Color {
    type Error = ColorError;
    fn try_from(s: String) -> Result<Self, Self::Error> { Self::from_hex(&s) }
}

impl From<Color> for String {
    fn from(c: Color) -> String { c.to_hex() }
}
