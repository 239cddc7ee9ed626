// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Area fills: solid brushes and diagonal two-tone stripes.

use peniko::{Brush, Color};

/// A repeating diagonal stripe tile made of two shades of one hue.
///
/// The tile is `tile` units square, split into two stripes of `tile / 2`, and rotated by
/// `angle` degrees. Renderers are expected to express this as a pattern fill (an SVG
/// `<pattern>` with `patternTransform="rotate(angle)"`, or an equivalent shader).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StripePattern {
    /// Color of the first stripe in the tile.
    pub primary: Color,
    /// Color of the second stripe in the tile.
    pub secondary: Color,
    /// Tile edge length in scene units.
    pub tile: f64,
    /// Rotation of the stripes in degrees.
    pub angle: f64,
}

impl StripePattern {
    /// Creates a 45° stripe pattern with a 6-unit tile.
    pub fn new(primary: Color, secondary: Color) -> Self {
        Self {
            primary,
            secondary,
            tile: 6.0,
            angle: 45.0,
        }
    }

    /// Sets the tile edge length.
    pub fn with_tile(mut self, tile: f64) -> Self {
        self.tile = tile.max(0.0);
        self
    }

    /// Sets the stripe rotation in degrees.
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Width of a single stripe.
    pub fn stripe_width(&self) -> f64 {
        self.tile * 0.5
    }
}

/// The paint used to fill a rect mark.
#[derive(Clone, Debug, PartialEq)]
pub enum Fill {
    /// A flat brush.
    Solid(Brush),
    /// A repeating stripe pattern.
    Stripes(StripePattern),
}

impl Fill {
    /// Returns the stripe pattern if this fill is striped.
    pub fn stripes(&self) -> Option<&StripePattern> {
        match self {
            Self::Stripes(p) => Some(p),
            Self::Solid(_) => None,
        }
    }
}

impl Default for Fill {
    fn default() -> Self {
        Self::Solid(Brush::default())
    }
}

impl From<Brush> for Fill {
    fn from(value: Brush) -> Self {
        Self::Solid(value)
    }
}

impl From<Color> for Fill {
    fn from(value: Color) -> Self {
        Self::Solid(Brush::Solid(value))
    }
}

impl From<StripePattern> for Fill {
    fn from(value: StripePattern) -> Self {
        Self::Stripes(value)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn stripe_width_is_half_the_tile() {
        let p = StripePattern::new(css::BLACK, css::WHITE).with_tile(8.0);
        assert_eq!(p.stripe_width(), 4.0, "two stripes per tile");
        assert_eq!(p.angle, 45.0, "default angle is diagonal");
    }

    #[test]
    fn only_striped_fills_expose_a_pattern() {
        let solid: Fill = css::BLACK.into();
        let striped: Fill = StripePattern::new(css::BLACK, css::WHITE).into();
        assert!(solid.stripes().is_none(), "solid fill has no pattern");
        assert!(striped.stripes().is_some(), "striped fill keeps its pattern");
    }
}
