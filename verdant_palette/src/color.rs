// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hex parsing and the luma-based light/dark classifier.

use core::fmt;
use core::str::FromStr;

use peniko::Color;
use peniko::color::palette::css;

/// Luma above which a background counts as light.
pub const LUMA_THRESHOLD: f64 = 128.0;

/// Errors returned when parsing a `#RRGGBB` color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseHexError {
    /// The string does not start with `#`.
    #[error("color must start with '#'")]
    MissingHash,
    /// The part after `#` is not exactly six bytes long.
    #[error("expected 6 hex digits after '#', found {0} bytes")]
    BadLength(usize),
    /// A byte is not a hexadecimal digit (offset counts from the `#`).
    #[error("invalid hex digit at offset {0}")]
    BadDigit(usize),
}

/// An opaque sRGB color with 8-bit channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Creates a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#RRGGBB` string (either digit case).
    pub fn parse_hex(hex: &str) -> Result<Self, ParseHexError> {
        let digits = hex.strip_prefix('#').ok_or(ParseHexError::MissingHash)?;
        let bytes = digits.as_bytes();
        if bytes.len() != 6 {
            return Err(ParseHexError::BadLength(bytes.len()));
        }
        let channel = |i: usize| -> Result<u8, ParseHexError> {
            let hi = nibble(bytes[i]).ok_or(ParseHexError::BadDigit(i + 1))?;
            let lo = nibble(bytes[i + 1]).ok_or(ParseHexError::BadDigit(i + 2))?;
            Ok((hi << 4) | lo)
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// ITU-R BT.601 luma in `[0, 255]`: `(299 r + 587 g + 114 b) / 1000`.
    pub fn luma(&self) -> f64 {
        (f64::from(self.r) * 299.0 + f64::from(self.g) * 587.0 + f64::from(self.b) * 114.0)
            / 1000.0
    }

    /// Whether dark text should be drawn on top of this color.
    pub fn is_light(&self) -> bool {
        self.luma() > LUMA_THRESHOLD
    }

    /// Converts to a `peniko` color.
    pub fn to_color(self) -> Color {
        Color::from_rgb8(self.r, self.g, self.b)
    }
}

impl FromStr for Rgb8 {
    type Err = ParseHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

fn nibble(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Returns `true` when `hex` is a light color (luma above [`LUMA_THRESHOLD`]).
///
/// A malformed string is treated as dark: the caller gets the light-on-dark label style.
pub fn is_light(hex: &str) -> bool {
    match Rgb8::parse_hex(hex) {
        Ok(rgb) => rgb.is_light(),
        Err(err) => {
            log::warn!("color token {hex:?} is not #RRGGBB ({err}); using the dark label style");
            false
        }
    }
}

/// Foreground treatment for text drawn on a colored background.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextTone {
    /// Dark text, for light backgrounds.
    Dark,
    /// Light text, for dark backgrounds.
    Light,
}

impl TextTone {
    /// Picks the tone that stays legible on `background_hex`.
    pub fn for_background(background_hex: &str) -> Self {
        if is_light(background_hex) {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// The text color for this tone.
    pub fn color(self) -> Color {
        match self {
            // Text / Primary.
            Self::Dark => Color::from_rgb8(0x0B, 0x24, 0x1C),
            Self::Light => css::WHITE,
        }
    }
}
