// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Donut arcs drawn with the stroke-dash technique.
//!
//! Every segment is the same circle stroked with a single dash: `dash = p / 100 * C` and
//! `offset = -(cumulative / 100) * C`, where `C = 2πr`. A -90° rotation moves the start of
//! the dash from 3 o'clock to 12 o'clock, so segments run clockwise from the top.
//!
//! Inputs rarely sum to exactly 100 (display rounding). When the sum overshoots, the geometry
//! is scaled down by `100 / sum` so the last arc still ends at 12 o'clock and no two arcs
//! overlap. An undershoot leaves a gap at the end of the ring.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use core::f64::consts::{FRAC_PI_2, TAU};

use kurbo::{Circle, CircleSegment, Point};
use peniko::Brush;
use verdant_core::{Mark, MarkId, MarkPayload, RingPayload};
use verdant_palette::ColorToken;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::donut_labels::DonutLabels;
use crate::format::{Magnitude, compact, percent};
use crate::rule_mark::RuleMarkSpec;
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// One slice of the donut.
#[derive(Clone, Debug, PartialEq)]
pub struct DonutSegment {
    /// Category name (legend text).
    pub label: String,
    /// Share of the whole, in percent.
    pub percent: f64,
    /// Slice color.
    pub color: ColorToken,
    /// Optional absolute value behind the share.
    pub value: Option<f64>,
}

impl DonutSegment {
    /// Creates a segment without an absolute value.
    pub fn new(label: impl Into<String>, percent: f64, color: ColorToken) -> Self {
        Self {
            label: label.into(),
            percent,
            color,
            value: None,
        }
    }

    /// Attaches the absolute value behind the share.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Callout text: the value in thousands followed by the share (`204.16K (65.35%)`), or
    /// the share alone when the value is unknown.
    pub fn display_value(&self) -> String {
        let share = percent(self.percent, 2);
        match self.value {
            Some(v) => format!("{} ({share})", compact(v, Magnitude::Thousands, 2)),
            None => share,
        }
    }
}

/// Geometry of one arc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DonutArc {
    /// Index of the source segment.
    pub index: usize,
    /// Input share (negative and non-finite inputs become `0`).
    pub percent: f64,
    /// Where the arc starts, in percent of the ring.
    pub start: f64,
    /// How much of the ring the arc covers, in percent (after drift correction).
    pub sweep: f64,
    /// Visible dash length.
    pub dash_length: f64,
    /// Dash offset (non-positive, decreasing along the ring).
    pub dash_offset: f64,
}

impl DonutArc {
    /// Start angle in radians, clockwise from 12 o'clock.
    pub fn start_angle(&self) -> f64 {
        self.start / 100.0 * TAU
    }

    /// End angle in radians, clockwise from 12 o'clock.
    pub fn end_angle(&self) -> f64 {
        (self.start + self.sweep) / 100.0 * TAU
    }

    /// Angle of the arc midpoint.
    pub fn mid_angle(&self) -> f64 {
        (self.start + self.sweep * 0.5) / 100.0 * TAU
    }

    /// The filled annular sector covered by this arc (for hit testing).
    pub fn sector(&self, center: Point, layout: &DonutLayout) -> CircleSegment {
        Circle::new(center, layout.outer_radius()).segment(
            layout.inner_radius(),
            self.start_angle() - FRAC_PI_2,
            self.sweep / 100.0 * TAU,
        )
    }
}

/// A point at `radius` from `center`, `angle` radians clockwise from 12 o'clock.
pub fn polar(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + radius * angle.sin(),
        center.y - radius * angle.cos(),
    )
}

/// Ring dimensions and the percent-to-arc mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DonutLayout {
    /// Radius of the stroke centerline.
    pub radius: f64,
    /// Ring thickness.
    pub stroke_width: f64,
}

impl Default for DonutLayout {
    fn default() -> Self {
        Self {
            radius: 70.0,
            stroke_width: 40.0,
        }
    }
}

impl DonutLayout {
    /// Creates a layout.
    pub fn new(radius: f64, stroke_width: f64) -> Self {
        Self {
            radius: radius.max(0.0),
            stroke_width: stroke_width.max(0.0),
        }
    }

    /// `2πr` of the stroke centerline.
    pub fn circumference(&self) -> f64 {
        TAU * self.radius
    }

    /// Outer edge of the ring.
    pub fn outer_radius(&self) -> f64 {
        self.radius + self.stroke_width * 0.5
    }

    /// Inner edge of the ring.
    pub fn inner_radius(&self) -> f64 {
        (self.radius - self.stroke_width * 0.5).max(0.0)
    }

    /// Lays out arcs for `percents`, in order, clockwise from 12 o'clock.
    pub fn arcs(&self, percents: impl IntoIterator<Item = f64>) -> Vec<DonutArc> {
        let percents: Vec<f64> = percents
            .into_iter()
            .map(|p| if p.is_finite() && p > 0.0 { p } else { 0.0 })
            .collect();
        let sum: f64 = percents.iter().sum();
        let scale = if sum > 100.0 {
            log::debug!("donut percents sum to {sum}; scaling arcs to fit the ring");
            100.0 / sum
        } else {
            if sum == 0.0 && !percents.is_empty() {
                log::debug!("donut has no positive share; every arc is empty");
            }
            1.0
        };

        let c = self.circumference();
        let mut start = 0.0;
        percents
            .into_iter()
            .enumerate()
            .map(|(index, percent)| {
                let sweep = percent * scale;
                let arc = DonutArc {
                    index,
                    percent,
                    start,
                    sweep,
                    dash_length: sweep / 100.0 * c,
                    dash_offset: -(start / 100.0) * c,
                };
                start += sweep;
                arc
            })
            .collect()
    }
}

/// Styling of leader lines and callout text.
#[derive(Clone, Debug, PartialEq)]
pub struct CalloutStyle {
    /// Leader line paint.
    pub leader_stroke: Brush,
    /// Leader line width.
    pub leader_width: f64,
    /// Callout text paint.
    pub text_fill: Brush,
    /// Callout font size.
    pub font_size: f64,
}

impl Default for CalloutStyle {
    fn default() -> Self {
        Self {
            leader_stroke: Brush::Solid(peniko::Color::from_rgb8(0x4A, 0x75, 0x61)),
            leader_width: 1.0,
            text_fill: Brush::Solid(peniko::Color::from_rgb8(0x0B, 0x24, 0x1C)),
            font_size: 11.0,
        }
    }
}

/// A donut chart with callouts.
///
/// Ids: ring `i` is lane 0; callout `k` uses lane 1 for the leader and lane 2 for the text
/// (see [`MarkId::lane`]).
#[derive(Clone, Debug)]
pub struct DonutChartSpec {
    /// Stable-id base.
    pub id_base: u64,
    /// Ring center.
    pub center: Point,
    /// Ring dimensions.
    pub layout: DonutLayout,
    /// Segments in ring order.
    pub segments: Vec<DonutSegment>,
    /// Callout placement.
    pub labels: DonutLabels,
    /// Callout styling.
    pub callout: CalloutStyle,
}

impl DonutChartSpec {
    /// Creates a chart with the default ring and radial callouts.
    pub fn new(id_base: u64, center: Point, segments: Vec<DonutSegment>) -> Self {
        Self {
            id_base,
            center,
            layout: DonutLayout::default(),
            segments,
            labels: DonutLabels::radial(),
            callout: CalloutStyle::default(),
        }
    }

    /// Sets the ring dimensions.
    pub fn with_layout(mut self, layout: DonutLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the callout placement.
    pub fn with_labels(mut self, labels: DonutLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Sets the callout styling.
    pub fn with_callout(mut self, callout: CalloutStyle) -> Self {
        self.callout = callout;
        self
    }

    /// Arc geometry for the current segments.
    pub fn arcs(&self) -> Vec<DonutArc> {
        self.layout.arcs(self.segments.iter().map(|s| s.percent))
    }

    /// Index of the segment under `pt`, if any.
    pub fn hit_test(&self, pt: Point) -> Option<usize> {
        use kurbo::Shape;

        self.arcs()
            .into_iter()
            .filter(|a| a.sweep > 0.0)
            .find(|a| a.sector(self.center, &self.layout).contains(pt))
            .map(|a| a.index)
    }

    /// Generates ring and callout marks.
    pub fn marks(&self) -> Vec<Mark> {
        let arcs = self.arcs();
        let mut out = Vec::with_capacity(arcs.len() * 3);

        for arc in &arcs {
            if arc.dash_length <= 0.0 {
                continue;
            }
            let Some(segment) = self.segments.get(arc.index) else {
                continue;
            };
            out.push(
                Mark::new(
                    MarkId::lane(self.id_base, 0, arc.index),
                    MarkPayload::Ring(RingPayload {
                        center: self.center,
                        radius: self.layout.radius,
                        stroke_width: self.layout.stroke_width,
                        stroke: Brush::Solid(segment.color.color()),
                        dash_length: arc.dash_length,
                        dash_offset: arc.dash_offset,
                        rotation: -90.0,
                    }),
                )
                .with_z_index(z_order::SERIES_RINGS),
            );
        }

        let callouts = self
            .labels
            .place(self.center, &self.layout, &arcs, &self.segments);
        for (k, label) in callouts.into_iter().enumerate() {
            out.push(
                RuleMarkSpec::polyline(
                    MarkId::lane(self.id_base, 1, k),
                    label.leader.iter().copied(),
                )
                .with_stroke(self.callout.leader_stroke.clone(), self.callout.leader_width)
                .with_z_index(z_order::LEADER_LINES)
                .mark(),
            );
            out.push(
                TextMarkSpec::new(
                    MarkId::lane(self.id_base, 2, k),
                    label.pos,
                    label.text,
                )
                .with_font_size(self.callout.font_size)
                .with_font_weight(500)
                .with_anchor(label.text_anchor)
                .with_fill(self.callout.text_fill.clone())
                .with_z_index(z_order::CALLOUT_LABELS)
                .mark(),
            );
        }
        out
    }
}
