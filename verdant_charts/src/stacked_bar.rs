// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacked segment layout and the stacked bar chart builder.
//!
//! Segments are stacked in declaration order: the first segment sits on the baseline and
//! each later one starts where the previous one ended. Only the topmost visible segment gets
//! rounded top corners, and a segment carries an inline value label only when it is tall
//! enough for the text to fit.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Brush;
use smallvec::SmallVec;
use verdant_core::{Mark, MarkId, TextAnchor, TextBaseline};
use verdant_palette::ColorToken;

use crate::format::{Magnitude, compact};
use crate::rect_mark::RectMarkSpec;
use crate::rule_mark::RuleMarkSpec;
use crate::scale::{ExtentScale, ScaleBand, ScaleLinear};
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// Default minimum segment extent (exclusive) for drawing an inline label.
pub const DEFAULT_LABEL_THRESHOLD: f64 = 20.0;

/// One segment of a stacked bar.
#[derive(Clone, Debug, PartialEq)]
pub struct StackSegment {
    /// Raw value; the label text is derived from it.
    pub value: f64,
    /// Segment color.
    pub color: ColorToken,
    /// Whether the segment may carry an inline label at all.
    pub labeled: bool,
}

impl StackSegment {
    /// Creates a labeled segment.
    pub fn new(value: f64, color: ColorToken) -> Self {
        Self {
            value,
            color,
            labeled: true,
        }
    }

    /// Suppresses the inline label regardless of extent.
    pub fn unlabeled(mut self) -> Self {
        self.labeled = false;
        self
    }
}

/// A category with its stacked segments, base first.
#[derive(Clone, Debug, PartialEq)]
pub struct StackedBar {
    /// Category label.
    pub label: String,
    /// Segments in stacking order.
    pub segments: SmallVec<[StackSegment; 4]>,
}

impl StackedBar {
    /// Creates an empty bar.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            segments: SmallVec::new(),
        }
    }

    /// Appends a segment on top of the existing ones.
    pub fn with_segment(mut self, segment: StackSegment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Sum of the finite, non-negative segment values.
    pub fn total(&self) -> f64 {
        self.segments.iter().map(|s| sanitize(s.value)).sum()
    }
}

/// Placement of one segment along the bar axis, in pixels from the baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentGeometry {
    /// Index of the segment in its bar.
    pub index: usize,
    /// Distance from the baseline to the segment's start.
    pub offset: f64,
    /// Segment length.
    pub extent: f64,
    /// Whether this is the topmost visible segment (rounded corners).
    pub is_top: bool,
    /// Whether the inline label is drawn.
    pub show_label: bool,
}

impl SegmentGeometry {
    /// Distance from the baseline to the segment's end.
    pub fn end(&self) -> f64 {
        self.offset + self.extent
    }
}

/// Converts segment values into cumulative pixel offsets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackedBarLayout {
    /// Pixels per data unit.
    pub pixels_per_unit: f64,
    /// Segments must be strictly taller than this to carry a label.
    pub label_threshold: f64,
}

impl Default for StackedBarLayout {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl StackedBarLayout {
    /// Creates a layout with a fixed scale factor.
    pub fn new(pixels_per_unit: f64) -> Self {
        Self {
            pixels_per_unit,
            label_threshold: DEFAULT_LABEL_THRESHOLD,
        }
    }

    /// Creates a layout where the tallest bar fills `max_extent`.
    ///
    /// An empty or all-zero dataset yields a zero scale factor.
    pub fn fit(bars: &[StackedBar], max_extent: f64) -> Self {
        let scale = ExtentScale::fit(bars.iter().map(StackedBar::total), max_extent);
        Self::new(scale.map(1.0))
    }

    /// Sets the label visibility threshold.
    pub fn with_label_threshold(mut self, threshold: f64) -> Self {
        self.label_threshold = threshold;
        self
    }

    /// Lays out the segments of `bar`.
    pub fn segments(&self, bar: &StackedBar) -> SmallVec<[SegmentGeometry; 4]> {
        let ppu = sanitize(self.pixels_per_unit);
        let mut out: SmallVec<[SegmentGeometry; 4]> = SmallVec::new();
        let mut offset = 0.0;
        for (index, segment) in bar.segments.iter().enumerate() {
            let extent = sanitize(segment.value) * ppu;
            out.push(SegmentGeometry {
                index,
                offset,
                extent,
                is_top: false,
                show_label: segment.labeled && extent > self.label_threshold,
            });
            offset += extent;
        }
        if let Some(top) = out.iter_mut().rev().find(|g| g.extent > 0.0) {
            top.is_top = true;
        }
        out
    }

    /// Total pixel length of `bar`.
    pub fn total_extent(&self, bar: &StackedBar) -> f64 {
        bar.total() * sanitize(self.pixels_per_unit)
    }
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

/// Formats a data value as display text.
pub type ValueFormat = Arc<dyn Fn(f64) -> String + Send + Sync>;

/// A vertical stacked bar chart with a value axis.
///
/// Marks use deterministic ids derived from `id_base` (see [`MarkId::lane`]):
/// - segment `j` of bar `i`: cell `(i, j)` of lane 0,
/// - its label: cell `(i, j)` of lane 1,
/// - category label `i`: lane 2,
/// - axis rule / label `k`: lanes 3 and 4.
#[derive(Clone)]
pub struct StackedBarChartSpec {
    /// Stable-id base.
    pub id_base: u64,
    /// Bars in display order.
    pub bars: Vec<StackedBar>,
    /// Segment layout.
    pub layout: StackedBarLayout,
    /// Plot area; the baseline is its bottom edge.
    pub plot: Rect,
    /// Bar width.
    pub bar_width: f64,
    /// Top of the value axis, in data units.
    pub axis_max: f64,
    /// Requested number of axis intervals.
    pub tick_count: usize,
    /// Axis label formatter.
    pub tick_format: ValueFormat,
    /// Segment label formatter.
    pub value_format: ValueFormat,
    /// Corner radius of the topmost segment.
    pub corner_radius: f64,
    /// Color of axis labels and category labels.
    pub text_fill: Brush,
    /// Color of axis gridlines.
    pub rule_stroke: Brush,
    /// Font size of all labels.
    pub font_size: f64,
}

impl core::fmt::Debug for StackedBarChartSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StackedBarChartSpec")
            .field("id_base", &self.id_base)
            .field("bars", &self.bars.len())
            .field("layout", &self.layout)
            .field("plot", &self.plot)
            .field("bar_width", &self.bar_width)
            .field("axis_max", &self.axis_max)
            .field("tick_count", &self.tick_count)
            .field("tick_format", &"<fn>")
            .field("value_format", &"<fn>")
            .field("corner_radius", &self.corner_radius)
            .field("text_fill", &self.text_fill)
            .field("rule_stroke", &self.rule_stroke)
            .field("font_size", &self.font_size)
            .finish()
    }
}

impl StackedBarChartSpec {
    /// Creates a chart over `plot` at one pixel per unit, with the axis spanning the plot.
    pub fn new(id_base: u64, plot: Rect, bars: Vec<StackedBar>) -> Self {
        Self {
            id_base,
            bars,
            layout: StackedBarLayout::new(1.0),
            plot,
            bar_width: 80.0,
            axis_max: plot.height(),
            tick_count: 2,
            tick_format: Arc::new(|v| compact(v, Magnitude::Units, 2)),
            value_format: Arc::new(|v| compact(v, Magnitude::Units, 2)),
            corner_radius: 4.0,
            text_fill: Brush::Solid(peniko::Color::from_rgb8(0x4A, 0x75, 0x61)),
            rule_stroke: Brush::Solid(peniko::Color::from_rgb8(0xE8, 0xE8, 0xE5)),
            font_size: 12.0,
        }
    }

    /// Sets the segment layout (scale factor and label threshold).
    pub fn with_layout(mut self, layout: StackedBarLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the label visibility threshold.
    pub fn with_label_threshold(mut self, threshold: f64) -> Self {
        self.layout.label_threshold = threshold;
        self
    }

    /// Sets the axis maximum (data units) and number of intervals.
    pub fn with_axis(mut self, axis_max: f64, tick_count: usize) -> Self {
        self.axis_max = axis_max;
        self.tick_count = tick_count;
        self
    }

    /// Sets the axis label formatter.
    pub fn with_tick_format(mut self, f: impl Fn(f64) -> String + Send + Sync + 'static) -> Self {
        self.tick_format = Arc::new(f);
        self
    }

    /// Sets the segment label formatter.
    pub fn with_value_format(
        mut self,
        f: impl Fn(f64) -> String + Send + Sync + 'static,
    ) -> Self {
        self.value_format = Arc::new(f);
        self
    }

    /// Sets the bar width.
    pub fn with_bar_width(mut self, bar_width: f64) -> Self {
        self.bar_width = bar_width.max(0.0);
        self
    }

    /// Generates all marks: gridlines, axis labels, segments, segment labels and categories.
    pub fn marks(&self) -> Vec<Mark> {
        let mut out = Vec::new();
        let baseline = self.plot.y1;

        self.axis_marks(baseline, &mut out);

        let band = ScaleBand::new((self.plot.x0, self.plot.x1), self.bars.len())
            .with_padding(0.3, 0.15);
        for (i, bar) in self.bars.iter().enumerate() {
            let cx = band.center(i);
            let x0 = cx - self.bar_width * 0.5;
            let x1 = cx + self.bar_width * 0.5;

            for g in self.layout.segments(bar) {
                if g.extent <= 0.0 {
                    continue;
                }
                let Some(segment) = bar.segments.get(g.index) else {
                    continue;
                };
                let y1 = baseline - g.offset;
                let y0 = y1 - g.extent;
                let mut rect = RectMarkSpec::new(
                    MarkId::cell(self.id_base, 0, i, g.index),
                    Rect::new(x0, y0, x1, y1),
                )
                .with_fill(segment.color.color());
                if g.is_top {
                    rect = rect.with_top_radius(self.corner_radius);
                }
                out.push(rect.mark());

                if g.show_label {
                    out.push(
                        TextMarkSpec::new(
                            MarkId::cell(self.id_base, 1, i, g.index),
                            Point::new(cx, (y0 + y1) * 0.5),
                            (self.value_format)(segment.value),
                        )
                        .with_font_size(self.font_size)
                        .with_font_weight(600)
                        .with_anchor(TextAnchor::Middle)
                        .with_baseline(TextBaseline::Middle)
                        .with_fill(segment.color.text_tone().color())
                        .mark(),
                    );
                }
            }

            out.push(
                TextMarkSpec::new(
                    MarkId::lane(self.id_base, 2, i),
                    Point::new(cx, baseline + 8.0),
                    bar.label.clone(),
                )
                .with_font_size(self.font_size)
                .with_anchor(TextAnchor::Middle)
                .with_baseline(TextBaseline::Hanging)
                .with_fill(self.text_fill.clone())
                .with_z_index(z_order::AXIS_LABELS)
                .mark(),
            );
        }
        out
    }

    fn axis_marks(&self, baseline: f64, out: &mut Vec<Mark>) {
        if !(self.axis_max.is_finite() && self.axis_max > 0.0) {
            log::debug!("stacked bar chart has no value axis (axis_max = {})", self.axis_max);
            return;
        }
        let top = baseline - self.axis_max * sanitize(self.layout.pixels_per_unit);
        let scale = ScaleLinear::new((0.0, self.axis_max), (baseline, top));
        for (k, v) in scale.ticks(self.tick_count).into_iter().enumerate() {
            let y = scale.map(v);
            out.push(
                RuleMarkSpec::horizontal(
                    MarkId::lane(self.id_base, 3, k),
                    y,
                    self.plot.x0,
                    self.plot.x1,
                )
                .with_stroke(self.rule_stroke.clone(), 1.0)
                .mark(),
            );
            out.push(
                TextMarkSpec::new(
                    MarkId::lane(self.id_base, 4, k),
                    Point::new(self.plot.x0 - 8.0, y),
                    (self.tick_format)(v),
                )
                .with_font_size(self.font_size)
                .with_anchor(TextAnchor::End)
                .with_fill(self.text_fill.clone())
                .with_z_index(z_order::AXIS_LABELS)
                .mark(),
            );
        }
    }
}
