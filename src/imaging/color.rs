//! Background color parsing.
//!
//! Canvas colors come from configuration as `#RRGGBB` strings. Parsing is
//! strict: the leading `#` is required, exactly six hex digits must follow
//! (either case), and anything else is an [`InvalidColorError`]. There is no
//! fallback color.

use image::{Rgb, Rgba};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color {input:?}: {reason}")]
pub struct InvalidColorError {
    pub input: String,
    pub reason: &'static str,
}

/// An opaque sRGB color parsed from `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const BLACK: HexColor = HexColor { r: 0, g: 0, b: 0 };

    pub fn parse(input: &str) -> Result<Self, InvalidColorError> {
        let invalid = |reason| InvalidColorError {
            input: input.to_string(),
            reason,
        };

        let digits = input
            .strip_prefix('#')
            .ok_or_else(|| invalid("missing leading '#'"))?;
        if digits.len() != 6 {
            return Err(invalid("expected exactly 6 hex digits"));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid("non-hex digit"));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid("non-hex digit"))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb([self.r, self.g, self.b])
    }

    /// Fully opaque RGBA pixel of this color.
    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for HexColor {
    type Err = InvalidColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = InvalidColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_uppercase_and_lowercase() {
        assert_eq!(
            HexColor::parse("#1A2B3C").unwrap(),
            HexColor {
                r: 26,
                g: 43,
                b: 60
            }
        );
        assert_eq!(
            HexColor::parse("#1a2b3c").unwrap(),
            HexColor::parse("#1A2B3C").unwrap()
        );
    }

    #[test]
    fn rejects_non_hex_digits() {
        let err = HexColor::parse("#XYZ123").unwrap_err();
        assert_eq!(err.input, "#XYZ123");
        assert_eq!(err.reason, "non-hex digit");
    }

    #[test]
    fn rejects_missing_hash() {
        let err = HexColor::parse("123456").unwrap_err();
        assert_eq!(err.input, "123456");
        assert_eq!(err.reason, "missing leading '#'");
    }

    #[test]
    fn rejects_doubled_hash() {
        let err = HexColor::parse("##123456").unwrap_err();
        assert_eq!(err.reason, "expected exactly 6 hex digits");
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(HexColor::parse("#12345").is_err());
        assert!(HexColor::parse("#1234567").is_err());
        assert!(HexColor::parse("#").is_err());
        assert!(HexColor::parse("").is_err());
    }

    #[test]
    fn rejects_multibyte_input_of_right_byte_length() {
        // "é" is two bytes, so this is six bytes but not six hex digits
        assert!(HexColor::parse("#éabcd").is_err());
    }

    #[test]
    fn display_round_trips() {
        let c = HexColor::parse("#0aFF10").unwrap();
        assert_eq!(c.to_string(), "#0AFF10");
        assert_eq!(HexColor::parse(&c.to_string()).unwrap(), c);
    }

    #[test]
    fn rgba_is_opaque() {
        let c = HexColor::parse("#102030").unwrap();
        assert_eq!(c.to_rgba(), Rgba([16, 32, 48, 255]));
        assert_eq!(c.to_rgb(), Rgb([16, 32, 48]));
    }
}
