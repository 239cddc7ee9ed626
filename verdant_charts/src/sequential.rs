// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Charts colored by a sequential ramp: a calendar-style heatmap, ramp-colored columns and an
//! index-scale strip.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::{Brush, Color};
use verdant_core::{Mark, MarkId, TextAnchor, TextBaseline};
use verdant_palette::{PaletteRamp, SequentialBins};

use crate::bar_list::BarDatum;
use crate::format::{Magnitude, compact};
use crate::rect_mark::RectMarkSpec;
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// A grid of cells, each colored by its value's ramp step.
///
/// Cell `i` is entry `i` of lane 0 (see [`MarkId::lane`]).
#[derive(Clone, Debug)]
pub struct HeatmapSpec {
    /// Stable-id base.
    pub id_base: u64,
    /// Values, row-major.
    pub values: Vec<f64>,
    /// Color ramp.
    pub ramp: PaletteRamp,
    /// Value range covered by one ramp step.
    pub bucket: f64,
    /// Top-left corner.
    pub origin: Point,
    /// Cells per row.
    pub columns: usize,
    /// Cell edge length.
    pub cell: f64,
    /// Gap between cells.
    pub gap: f64,
}

impl HeatmapSpec {
    /// Creates a 7-column heatmap that indexes the ramp directly (`bucket = 1`).
    pub fn new(id_base: u64, origin: Point, ramp: PaletteRamp, values: Vec<f64>) -> Self {
        Self {
            id_base,
            values,
            ramp,
            bucket: 1.0,
            origin,
            columns: 7,
            cell: 28.0,
            gap: 4.0,
        }
    }

    /// Sets the value range per ramp step.
    pub fn with_bucket(mut self, bucket: f64) -> Self {
        self.bucket = bucket;
        self
    }

    /// Sets the number of cells per row.
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    /// Generates one rect per value.
    pub fn marks(&self) -> Vec<Mark> {
        let bins = SequentialBins::new(&self.ramp, self.bucket);
        let columns = self.columns.max(1);
        let pitch = self.cell + self.gap;
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let x = self.origin.x + (i % columns) as f64 * pitch;
                let y = self.origin.y + (i / columns) as f64 * pitch;
                let fill = bins.token(v).map_or(Color::TRANSPARENT, |t| t.color());
                RectMarkSpec::new(
                    MarkId::lane(self.id_base, 0, i),
                    Rect::new(x, y, x + self.cell, y + self.cell),
                )
                .with_radius(4.0)
                .with_fill(fill)
                .mark()
            })
            .collect()
    }
}

/// Vertical columns whose color steps through a sequential ramp with the value.
///
/// Column `i` is entry `i` of lane 0, its category label of lane 1 and its value label of
/// lane 2.
#[derive(Clone, Debug)]
pub struct ColumnBarsSpec {
    /// Stable-id base.
    pub id_base: u64,
    /// Columns in display order.
    pub data: Vec<BarDatum>,
    /// Color ramp.
    pub ramp: PaletteRamp,
    /// Value range covered by one ramp step.
    pub bucket: f64,
    /// Left end of the baseline.
    pub baseline: Point,
    /// Pixels per data unit.
    pub pixels_per_unit: f64,
    /// Column width.
    pub bar_width: f64,
    /// Gap between columns.
    pub gap: f64,
    /// Label paint.
    pub text_fill: Brush,
}

impl ColumnBarsSpec {
    /// Creates columns at one pixel per unit with ten units per ramp step.
    pub fn new(id_base: u64, baseline: Point, ramp: PaletteRamp, data: Vec<BarDatum>) -> Self {
        Self {
            id_base,
            data,
            ramp,
            bucket: 10.0,
            baseline,
            pixels_per_unit: 1.0,
            bar_width: 40.0,
            gap: 16.0,
            text_fill: Brush::Solid(Color::from_rgb8(0x4A, 0x75, 0x61)),
        }
    }

    /// Sets the value range per ramp step.
    pub fn with_bucket(mut self, bucket: f64) -> Self {
        self.bucket = bucket;
        self
    }

    /// Generates columns and labels.
    pub fn marks(&self) -> Vec<Mark> {
        let bins = SequentialBins::new(&self.ramp, self.bucket);
        let mut out = Vec::with_capacity(self.data.len() * 3);
        for (i, d) in self.data.iter().enumerate() {
            let x = self.baseline.x + i as f64 * (self.bar_width + self.gap);
            let h = if d.value.is_finite() && d.value > 0.0 {
                d.value * self.pixels_per_unit
            } else {
                0.0
            };
            let top = self.baseline.y - h;
            let fill = bins.token(d.value).map_or(Color::TRANSPARENT, |t| t.color());
            out.push(
                RectMarkSpec::new(
                    MarkId::lane(self.id_base, 0, i),
                    Rect::new(x, top, x + self.bar_width, self.baseline.y),
                )
                .with_top_radius(4.0)
                .with_fill(fill)
                .mark(),
            );
            let cx = x + self.bar_width * 0.5;
            out.push(
                TextMarkSpec::new(
                    MarkId::lane(self.id_base, 1, i),
                    Point::new(cx, self.baseline.y + 6.0),
                    d.label.clone(),
                )
                .with_font_size(11.0)
                .with_anchor(TextAnchor::Middle)
                .with_baseline(TextBaseline::Hanging)
                .with_fill(self.text_fill.clone())
                .with_z_index(z_order::AXIS_LABELS)
                .mark(),
            );
            out.push(
                TextMarkSpec::new(
                    MarkId::lane(self.id_base, 2, i),
                    Point::new(cx, top - 4.0),
                    compact(d.value, Magnitude::Units, 1),
                )
                .with_font_size(11.0)
                .with_anchor(TextAnchor::Middle)
                .with_baseline(TextBaseline::Alphabetic)
                .with_fill(self.text_fill.clone())
                .mark(),
            );
        }
        out
    }
}

/// A horizontal strip with one equal-width stop per ramp step, labeled underneath.
///
/// Labels are justified across the strip: the first hugs the left end, the last the right
/// end, and the rest are spaced evenly between them. Stop `i` is entry `i` of lane 0 and
/// label `i` of lane 1.
#[derive(Clone, Debug)]
pub struct IndexScaleSpec {
    /// Stable-id base.
    pub id_base: u64,
    /// Top-left corner of the strip.
    pub origin: Point,
    /// Ramp, lowest step first.
    pub ramp: PaletteRamp,
    /// Strip width.
    pub width: f64,
    /// Strip height.
    pub height: f64,
    /// Radius of the strip's outer corners.
    pub corner_radius: f64,
    /// Labels, left to right.
    pub labels: Vec<String>,
    /// Gap between the strip and its labels.
    pub label_gap: f64,
    /// Label font size.
    pub font_size: f64,
    /// Label paint.
    pub text_fill: Brush,
}

impl IndexScaleSpec {
    /// Creates a 480 × 32 strip without labels.
    pub fn new(id_base: u64, origin: Point, ramp: PaletteRamp) -> Self {
        Self {
            id_base,
            origin,
            ramp,
            width: 480.0,
            height: 32.0,
            corner_radius: 6.0,
            labels: Vec::new(),
            label_gap: 8.0,
            font_size: 11.0,
            text_fill: Brush::Solid(Color::from_rgb8(0x4A, 0x75, 0x61)),
        }
    }

    /// Sets the strip size.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self
    }

    /// Sets the labels shown under the strip.
    pub fn with_labels<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Generates stops and labels.
    pub fn marks(&self) -> Vec<Mark> {
        let steps = self.ramp.len();
        let mut out = Vec::with_capacity(steps + self.labels.len());
        let stop = if steps == 0 { 0.0 } else { self.width / steps as f64 };
        let (x0, y0) = (self.origin.x, self.origin.y);
        for (i, token) in self.ramp.iter().enumerate() {
            let x = x0 + i as f64 * stop;
            let spec = RectMarkSpec::new(
                MarkId::lane(self.id_base, 0, i),
                Rect::new(x, y0, x + stop, y0 + self.height),
            )
            .with_fill(token.color());
            let spec = match (i == 0, i + 1 == steps) {
                (true, true) => spec.with_radius(self.corner_radius),
                (true, false) => spec.with_start_radius(self.corner_radius),
                (false, true) => spec.with_end_radius(self.corner_radius),
                (false, false) => spec,
            };
            out.push(spec.mark());
        }

        let last = self.labels.len().saturating_sub(1);
        let y = y0 + self.height + self.label_gap;
        for (i, label) in self.labels.iter().enumerate() {
            let (x, anchor) = if i == 0 {
                (x0, TextAnchor::Start)
            } else if i == last {
                (x0 + self.width, TextAnchor::End)
            } else {
                (x0 + self.width * i as f64 / last as f64, TextAnchor::Middle)
            };
            out.push(
                TextMarkSpec::new(
                    MarkId::lane(self.id_base, 1, i),
                    Point::new(x, y),
                    label.clone(),
                )
                .with_font_size(self.font_size)
                .with_anchor(anchor)
                .with_baseline(TextBaseline::Hanging)
                .with_fill(self.text_fill.clone())
                .with_z_index(z_order::AXIS_LABELS)
                .mark(),
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use verdant_core::MarkPayload;
    use verdant_palette::tokens;

    use super::*;

    fn fill_of(mark: &Mark) -> Option<verdant_core::Fill> {
        match &mark.payload {
            MarkPayload::Rect(r) => Some(r.fill.clone()),
            _ => None,
        }
    }

    #[test]
    fn heatmap_indexes_the_ramp_by_value() {
        let ramp = PaletteRamp::from_static("sequential", tokens::SEQUENTIAL);
        let spec = HeatmapSpec::new(0, Point::ZERO, ramp.clone(), vec![1.0, 9.0, 42.0]);
        let marks = spec.marks();
        let expect = |i: usize| ramp.step(i).map(|t| verdant_core::Fill::from(t.color()));
        assert_eq!(fill_of(&marks[0]), expect(1), "value 1 is step 1");
        assert_eq!(fill_of(&marks[1]), expect(9), "value 9 is the darkest step");
        assert_eq!(fill_of(&marks[2]), expect(9), "out of range clamps");
    }

    #[test]
    fn heatmap_wraps_rows() {
        let ramp = PaletteRamp::from_static("sequential", tokens::SEQUENTIAL);
        let marks = HeatmapSpec::new(0, Point::ZERO, ramp, vec![1.0; 8]).marks();
        assert_eq!(marks[7].payload.bounds().map(|b| b.y0), Some(32.0), "eighth cell wraps");
    }

    #[test]
    fn column_height_and_color_follow_the_value() {
        let ramp = PaletteRamp::from_static("sequential", tokens::SEQUENTIAL);
        let data = vec![BarDatum::new("IG", 90.0), BarDatum::new("LI", 40.0)];
        let marks = ColumnBarsSpec::new(0, Point::new(0.0, 100.0), ramp.clone(), data).marks();
        let heights: std::vec::Vec<f64> = marks
            .iter()
            .filter(|m| matches!(m.payload, MarkPayload::Rect(_)))
            .filter_map(|m| m.payload.bounds().map(|b| b.height()))
            .collect();
        assert_eq!(heights, vec![90.0, 40.0], "one pixel per unit");
        assert_eq!(
            fill_of(&marks[3]),
            ramp.step(4).map(|t| verdant_core::Fill::from(t.color())),
            "40 / 10 is step 4"
        );
    }

    #[test]
    fn index_strip_splits_the_width_evenly() {
        let ramp = PaletteRamp::from_static("index", tokens::INDEX);
        let marks = IndexScaleSpec::new(0, Point::ZERO, ramp.clone()).marks();
        assert_eq!(marks.len(), 8, "one stop per step");
        assert_eq!(
            marks[7].payload.bounds().map(|b| (b.x0, b.x1)),
            Some((420.0, 480.0)),
            "last stop ends at the strip edge"
        );
        assert_eq!(
            fill_of(&marks[0]),
            ramp.step(0).map(|t| verdant_core::Fill::from(t.color())),
            "lightest step first"
        );
        let MarkPayload::Rect(first) = &marks[0].payload else {
            panic!("expected a stop rect");
        };
        assert_eq!(
            (first.radii.top_left, first.radii.top_right),
            (6.0, 0.0),
            "only the outer corners are rounded"
        );
    }

    #[test]
    fn index_labels_are_justified() {
        let ramp = PaletteRamp::from_static("index", tokens::INDEX);
        let marks = IndexScaleSpec::new(0, Point::ZERO, ramp)
            .with_labels([
                "Emerging (bottom 25%)",
                "Lower middle",
                "Upper middle",
                "Leading (top 25%)",
            ])
            .marks();
        let placed: std::vec::Vec<(f64, TextAnchor)> = marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some((t.pos.x, t.anchor)),
                _ => None,
            })
            .collect();
        assert_eq!(
            placed,
            vec![
                (0.0, TextAnchor::Start),
                (160.0, TextAnchor::Middle),
                (320.0, TextAnchor::Middle),
                (480.0, TextAnchor::End),
            ],
            "ends hug the strip and the middle labels are evenly spaced"
        );
    }
}
