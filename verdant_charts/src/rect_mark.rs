// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle mark generation.

use kurbo::{Rect, RoundedRectRadii};
use verdant_core::{Fill, Mark, MarkId, MarkPayload, RectPayload};

/// A rectangle mark spec.
#[derive(Clone, Debug)]
pub struct RectMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Rectangle geometry in scene coordinates.
    pub rect: Rect,
    /// Corner radii.
    pub radii: RoundedRectRadii,
    /// Fill paint.
    pub fill: Fill,
    /// Rendering order hint (`verdant_core::Mark::z_index`).
    pub z_index: i32,
}

impl RectMarkSpec {
    /// Creates a new rectangle mark spec with square corners.
    pub fn new(id: MarkId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            radii: RoundedRectRadii::from_single_radius(0.0),
            fill: Fill::default(),
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Fill>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Rounds all four corners.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radii = RoundedRectRadii::from_single_radius(radius.max(0.0));
        self
    }

    /// Rounds only the two top corners (the end of a vertical bar).
    pub fn with_top_radius(mut self, radius: f64) -> Self {
        let r = radius.max(0.0);
        self.radii = RoundedRectRadii::new(r, r, 0.0, 0.0);
        self
    }

    /// Rounds only the two right corners (the end of a horizontal bar).
    pub fn with_end_radius(mut self, radius: f64) -> Self {
        let r = radius.max(0.0);
        self.radii = RoundedRectRadii::new(0.0, r, r, 0.0);
        self
    }

    /// Rounds only the two left corners (the start of a horizontal strip).
    pub fn with_start_radius(mut self, radius: f64) -> Self {
        let r = radius.max(0.0);
        self.radii = RoundedRectRadii::new(r, 0.0, 0.0, r);
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the mark.
    ///
    /// Radii are clamped to half the shorter side so thin bars stay well-formed.
    pub fn mark(&self) -> Mark {
        let rect = self.rect.abs();
        let max_r = rect.width().min(rect.height()) * 0.5;
        let r = self.radii;
        let radii = RoundedRectRadii::new(
            r.top_left.min(max_r),
            r.top_right.min(max_r),
            r.bottom_right.min(max_r),
            r.bottom_left.min(max_r),
        );
        Mark::new(
            self.id,
            MarkPayload::Rect(RectPayload {
                rect,
                radii,
                fill: self.fill.clone(),
            }),
        )
        .with_z_index(self.z_index)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn radii_are_clamped_to_the_short_side() {
        let m = RectMarkSpec::new(MarkId::from_raw(1), Rect::new(0.0, 0.0, 80.0, 2.0))
            .with_top_radius(4.0)
            .with_fill(css::BLACK)
            .mark();
        let MarkPayload::Rect(r) = &m.payload else {
            panic!("expected rect payload");
        };
        assert_eq!(r.radii.top_left, 1.0, "clamped to half the height");
        assert_eq!(r.radii.bottom_left, 0.0, "bottom stays square");
    }

    #[test]
    fn flipped_rects_are_normalized() {
        let m = RectMarkSpec::new(MarkId::from_raw(1), Rect::new(10.0, 10.0, 0.0, 0.0)).mark();
        assert_eq!(
            m.payload.bounds(),
            Some(Rect::new(0.0, 0.0, 10.0, 10.0)),
            "abs() applied"
        );
    }
}
