// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named color tokens and ordered ramps.

extern crate alloc;

use alloc::borrow::Cow;

use peniko::Color;

use crate::color::{ParseHexError, Rgb8, TextTone};

/// A named color, as it appears in the catalogue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorToken {
    /// Display name (`"800"`, `"Primary"`, `"Cat-07"`).
    pub name: Cow<'static, str>,
    /// `#RRGGBB` value.
    pub hex: Cow<'static, str>,
    /// Optional usage note shown on large cards.
    pub usage: Option<Cow<'static, str>>,
}

impl ColorToken {
    /// Creates a token from static strings (usable in `const` tables).
    pub const fn from_static(name: &'static str, hex: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            hex: Cow::Borrowed(hex),
            usage: None,
        }
    }

    /// Creates a token with a usage note from static strings.
    pub const fn with_static_usage(
        name: &'static str,
        hex: &'static str,
        usage: &'static str,
    ) -> Self {
        Self {
            name: Cow::Borrowed(name),
            hex: Cow::Borrowed(hex),
            usage: Some(Cow::Borrowed(usage)),
        }
    }

    /// Creates a token from owned or borrowed strings.
    pub fn new(name: impl Into<Cow<'static, str>>, hex: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
            usage: None,
        }
    }

    /// Parses the hex value.
    pub fn rgb(&self) -> Result<Rgb8, ParseHexError> {
        Rgb8::parse_hex(&self.hex)
    }

    /// The token as a paint color; malformed values render as transparent.
    pub fn color(&self) -> Color {
        match self.rgb() {
            Ok(rgb) => rgb.to_color(),
            Err(err) => {
                log::warn!("token {:?} has invalid hex {:?}: {err}", self.name, self.hex);
                Color::TRANSPARENT
            }
        }
    }

    /// Text tone that stays legible on this token.
    pub fn text_tone(&self) -> TextTone {
        TextTone::for_background(&self.hex)
    }
}

/// An ordered palette; position encodes intensity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteRamp {
    /// Ramp name (`"primary"`, `"sage"`).
    pub name: Cow<'static, str>,
    tokens: Cow<'static, [ColorToken]>,
}

impl PaletteRamp {
    /// Wraps a static token table.
    pub const fn from_static(name: &'static str, tokens: &'static [ColorToken]) -> Self {
        Self {
            name: Cow::Borrowed(name),
            tokens: Cow::Borrowed(tokens),
        }
    }

    /// Creates a ramp from any token list, keeping its order.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        tokens: impl Into<Cow<'static, [ColorToken]>>,
    ) -> Self {
        Self {
            name: name.into(),
            tokens: tokens.into(),
        }
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the ramp has no steps.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token at `index`, in display order.
    pub fn step(&self, index: usize) -> Option<&ColorToken> {
        self.tokens.get(index)
    }

    /// Tokens in display order.
    pub fn tokens(&self) -> &[ColorToken] {
        &self.tokens
    }

    /// Iterates the tokens in ramp order.
    pub fn iter(&self) -> core::slice::Iter<'_, ColorToken> {
        self.tokens.iter()
    }

    /// Finds a token by name (ASCII case-insensitive).
    pub fn find(&self, name: &str) -> Option<&ColorToken> {
        self.tokens.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }
}

/// Maps numeric values onto the steps of a sequential ramp.
///
/// A value `v` selects step `floor(v / bucket)`, clamped to the last step. Negative, `NaN`
/// and infinite values select step 0.
#[derive(Clone, Copy, Debug)]
pub struct SequentialBins<'a> {
    ramp: &'a PaletteRamp,
    bucket: f64,
}

impl<'a> SequentialBins<'a> {
    /// Creates a binning with the given bucket width (`1.0` indexes the ramp directly).
    pub fn new(ramp: &'a PaletteRamp, bucket: f64) -> Self {
        Self { ramp, bucket }
    }

    /// Step index for `value`.
    pub fn index(&self, value: f64) -> usize {
        let last = self.ramp.len().saturating_sub(1);
        if !(self.bucket > 0.0) || !value.is_finite() || value <= 0.0 {
            return 0;
        }
        let q = value / self.bucket;
        if q >= last as f64 {
            return last;
        }
        // `q` is finite and in `[0, last)`, so truncation is `floor`.
        #[allow(clippy::cast_possible_truncation, reason = "range checked above")]
        let index = q as usize;
        index.min(last)
    }

    /// Token for `value`, or `None` for an empty ramp.
    pub fn token(&self, value: f64) -> Option<&'a ColorToken> {
        self.ramp.step(self.index(value))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::tokens;

    #[test]
    fn ramp_keeps_insertion_order() {
        let ramp = PaletteRamp::from_static("primary", tokens::PRIMARY);
        let names: std::vec::Vec<_> = ramp.iter().map(|t| &*t.name).collect();
        assert_eq!(names.first(), Some(&"50"), "lightest first");
        assert_eq!(names.last(), Some(&"900"), "darkest last");
        assert_eq!(ramp.step(8).map(|t| &*t.hex), Some("#11362A"), "brand primary");
    }

    #[test]
    fn find_is_case_insensitive() {
        let ramp = PaletteRamp::from_static("core", tokens::CORE);
        assert_eq!(
            ramp.find("surface").map(|t| &*t.hex),
            Some("#FFFFFF"),
            "name lookup ignores case"
        );
        assert!(ramp.find("missing").is_none(), "unknown names miss");
    }

    #[test]
    fn sequential_bins_floor_and_clamp() {
        let ramp = PaletteRamp::from_static("sequential", tokens::SEQUENTIAL);
        let bins = SequentialBins::new(&ramp, 10.0);
        assert_eq!(bins.index(90.0), 9, "90 / 10");
        assert_eq!(bins.index(49.9), 4, "floor");
        assert_eq!(bins.index(1_000.0), 9, "clamped to last step");
        assert_eq!(bins.index(-5.0), 0, "negative");
        assert_eq!(bins.index(f64::NAN), 0, "nan");
        assert_eq!(bins.token(40.0).map(|t| &*t.name), Some("5"), "step 4 is named 5");
    }

    #[test]
    fn direct_indexing_with_unit_buckets() {
        let ramp = PaletteRamp::from_static("sequential", tokens::SEQUENTIAL);
        let bins = SequentialBins::new(&ramp, 1.0);
        let picked: std::vec::Vec<_> = [1.0, 3.0, 9.0]
            .into_iter()
            .map(|v| bins.index(v))
            .collect();
        assert_eq!(picked, vec![1, 3, 9], "unit buckets index the ramp");
    }

    #[test]
    fn empty_ramp_has_no_tokens() {
        let ramp = PaletteRamp::new("empty", alloc::vec::Vec::<ColorToken>::new());
        let bins = SequentialBins::new(&ramp, 10.0);
        assert!(ramp.is_empty(), "no steps");
        assert!(bins.token(50.0).is_none(), "nothing to pick");
    }

    #[test]
    fn invalid_token_colors_are_transparent() {
        let token = ColorToken::new("broken", "#12");
        assert!(token.rgb().is_err(), "short hex fails to parse");
        assert_eq!(token.color(), Color::TRANSPARENT, "renders as nothing");
        assert_eq!(token.text_tone(), TextTone::Light, "dark path");
    }
}
