// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mark identities and payloads.

extern crate alloc;

use alloc::string::String;

use kurbo::{BezPath, Circle, Point, Rect, RoundedRectRadii, Shape};
use peniko::Brush;

use crate::fill::Fill;

/// Stable identity of a mark across frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Bit offset of the lane number within an id.
    ///
    /// Lanes occupy bits 32..48, so charts that share a scene need bases that differ at
    /// bit 48 or above.
    pub const LANE_SHIFT: u32 = 32;

    /// Bit offset of the row within a [`MarkId::cell`] index.
    const ROW_SHIFT: u32 = 16;

    /// Wraps a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The `index`-th id of `lane` under `base`.
    ///
    /// A chart gives each kind of mark (bars, labels, rules) its own lane, so no dataset size
    /// makes two kinds share an id.
    pub fn lane(base: u64, lane: u16, index: usize) -> Self {
        let index = index as u64;
        debug_assert!(
            index < 1 << Self::LANE_SHIFT,
            "mark index {index} spills into the next lane"
        );
        Self(base + (u64::from(lane) << Self::LANE_SHIFT) + index)
    }

    /// The id of `(row, column)` in `lane`, for marks indexed in two dimensions.
    pub fn cell(base: u64, lane: u16, row: usize, column: usize) -> Self {
        debug_assert!(
            row < 1 << Self::ROW_SHIFT && column < 1 << Self::ROW_SHIFT,
            "cell ({row}, {column}) does not fit a lane"
        );
        Self::lane(base, lane, (row << Self::ROW_SHIFT) | column)
    }
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the anchor point.
    #[default]
    Start,
    /// Text is centered on the anchor point.
    Middle,
    /// Text ends at the anchor point.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    /// The anchor point is the vertical middle of the line.
    #[default]
    Middle,
    /// The anchor point is on the alphabetic baseline.
    Alphabetic,
    /// The anchor point is the top of the line.
    Hanging,
}

/// The kind of a mark, without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkKind {
    /// [`RectPayload`].
    Rect,
    /// [`TextPayload`].
    Text,
    /// [`PathPayload`].
    Path,
    /// [`RingPayload`].
    Ring,
}

/// A filled rectangle with optional rounded corners.
#[derive(Clone, Debug, PartialEq)]
pub struct RectPayload {
    /// Geometry in scene coordinates.
    pub rect: Rect,
    /// Corner radii (all zero for square corners).
    pub radii: RoundedRectRadii,
    /// Fill paint.
    pub fill: Fill,
}

/// A single line of unshaped text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPayload {
    /// Anchor position.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size in scene units.
    pub font_size: f64,
    /// CSS-style weight (`400` normal, `600` semibold).
    pub font_weight: u16,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Text paint.
    pub fill: Brush,
}

/// A stroked and/or filled path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathPayload {
    /// Path geometry.
    pub path: BezPath,
    /// Fill paint (transparent for pure strokes).
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0` disables the stroke.
    pub stroke_width: f64,
}

/// A circle drawn as a single stroke-dash segment.
///
/// This is the classic SVG donut technique: the dash pattern is `dash_length` on, then a full
/// circumference off, shifted by `dash_offset`. With `rotation = -90` the dash starts at
/// 12 o'clock and runs clockwise.
#[derive(Clone, Debug, PartialEq)]
pub struct RingPayload {
    /// Circle center.
    pub center: Point,
    /// Radius of the stroke centerline.
    pub radius: f64,
    /// Ring thickness.
    pub stroke_width: f64,
    /// Stroke paint.
    pub stroke: Brush,
    /// Visible dash length along the circumference.
    pub dash_length: f64,
    /// Dash offset (negative values advance the dash clockwise).
    pub dash_offset: f64,
    /// Rotation applied around the center, in degrees.
    pub rotation: f64,
}

impl RingPayload {
    /// Circumference of the stroke centerline.
    pub fn circumference(&self) -> f64 {
        2.0 * core::f64::consts::PI * self.radius
    }
}

/// Payload of a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// Rectangle.
    Rect(RectPayload),
    /// Text.
    Text(TextPayload),
    /// Path.
    Path(PathPayload),
    /// Dashed ring.
    Ring(RingPayload),
}

impl MarkPayload {
    /// Returns the payload kind.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Rect(_) => MarkKind::Rect,
            Self::Text(_) => MarkKind::Text,
            Self::Path(_) => MarkKind::Path,
            Self::Ring(_) => MarkKind::Ring,
        }
    }

    /// Geometric bounds, if they can be known without text measurement.
    ///
    /// Text marks return `None`; renderers estimate them from font metrics.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect),
            Self::Text(_) => None,
            Self::Path(p) => {
                let half = p.stroke_width.max(0.0) * 0.5;
                Some(p.path.bounding_box().inflate(half, half))
            }
            Self::Ring(r) => {
                let half = r.stroke_width.max(0.0) * 0.5;
                Some(
                    Circle::new(r.center, r.radius)
                        .bounding_box()
                        .inflate(half, half),
                )
            }
        }
    }
}

/// A renderable mark: stable id, paint order and payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity.
    pub id: MarkId,
    /// Paint order; renderers sort by `(z_index, id)`.
    pub z_index: i32,
    /// What to draw.
    pub payload: MarkPayload,
}

impl Mark {
    /// Creates a mark with `z_index = 0`.
    pub fn new(id: MarkId, payload: MarkPayload) -> Self {
        Self {
            id,
            z_index: 0,
            payload,
        }
    }

    /// Creates a rect mark with square corners.
    pub fn rect(id: MarkId, rect: Rect, fill: impl Into<Fill>) -> Self {
        Self::new(
            id,
            MarkPayload::Rect(RectPayload {
                rect,
                radii: RoundedRectRadii::from_single_radius(0.0),
                fill: fill.into(),
            }),
        )
    }

    /// Sets the paint order.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Returns the payload kind.
    pub fn kind(&self) -> MarkKind {
        self.payload.kind()
    }
}
