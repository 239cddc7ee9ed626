// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rule mark generation.
//!
//! A "rule" is a stroked polyline: axis gridlines are two-point rules, donut leader lines
//! are elbowed three-point rules.

use kurbo::{BezPath, Point};
use peniko::{Brush, Color};
use smallvec::SmallVec;
use verdant_core::{Mark, MarkId, MarkPayload, PathPayload};

use crate::z_order;

/// A rule mark spec (a stroked open polyline).
#[derive(Clone, Debug)]
pub struct RuleMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Vertices in scene coordinates.
    pub points: SmallVec<[Point; 3]>,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
    /// Rendering order hint (`verdant_core::Mark::z_index`).
    pub z_index: i32,
}

impl RuleMarkSpec {
    /// Creates a new rule between two points.
    pub fn new(id: MarkId, from: Point, to: Point) -> Self {
        Self::polyline(id, [from, to])
    }

    /// Creates a rule through every point in order.
    pub fn polyline(id: MarkId, points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            id,
            points: points.into_iter().collect(),
            stroke: Brush::default(),
            stroke_width: 1.0,
            z_index: z_order::AXIS_RULES,
        }
    }

    /// Creates a horizontal rule.
    pub fn horizontal(id: MarkId, y: f64, x0: f64, x1: f64) -> Self {
        Self::new(id, Point::new(x0, y), Point::new(x1, y))
    }

    /// Sets stroke paint and width.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        self.stroke = stroke.into();
        self.stroke_width = stroke_width;
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the rule mark.
    pub fn mark(&self) -> Mark {
        let mut p = BezPath::new();
        let mut points = self.points.iter().copied();
        if let Some(first) = points.next() {
            p.move_to(first);
            for pt in points {
                p.line_to(pt);
            }
        }
        Mark::new(
            self.id,
            MarkPayload::Path(PathPayload {
                path: p,
                fill: Brush::Solid(Color::TRANSPARENT),
                stroke: self.stroke.clone(),
                stroke_width: self.stroke_width,
            }),
        )
        .with_z_index(self.z_index)
    }
}
