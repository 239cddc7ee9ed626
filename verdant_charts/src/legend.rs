// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend mark generation: a grid of swatches with text labels.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use peniko::{Brush, Color};
use verdant_core::{Fill, Mark, MarkId, MarkPayload, TextAnchor, TextBaseline};

use crate::measure::TextMeasurer;
use crate::rect_mark::RectMarkSpec;
use crate::text_mark::TextMarkSpec;
use crate::z_order;

fn text_bounds(pos: Point, size: Size, anchor: TextAnchor, baseline: TextBaseline) -> Rect {
    let (w, h) = (size.width, size.height);
    let (x0, x1) = match anchor {
        TextAnchor::Start => (pos.x, pos.x + w),
        TextAnchor::Middle => (pos.x - w * 0.5, pos.x + w * 0.5),
        TextAnchor::End => (pos.x - w, pos.x),
    };
    let (y0, y1) = match baseline {
        TextBaseline::Middle => (pos.y - h * 0.5, pos.y + h * 0.5),
        TextBaseline::Alphabetic => (pos.y - h, pos.y),
        TextBaseline::Hanging => (pos.y, pos.y + h),
    };
    Rect::new(x0, y0, x1, y1)
}

/// Bounds of `marks`, measuring text with `measurer`.
pub(crate) fn marks_bounds(marks: &[Mark], measurer: &impl TextMeasurer) -> Option<Rect> {
    marks
        .iter()
        .filter_map(|m| match &m.payload {
            MarkPayload::Text(t) => Some(text_bounds(
                t.pos,
                measurer.measure(&t.text, t.font_size),
                t.anchor,
                t.baseline,
            )),
            other => other.bounds(),
        })
        .reduce(|a, b| a.union(b))
}

/// Swatch shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LegendShape {
    /// A square with slightly rounded corners.
    #[default]
    Square,
    /// A dot.
    Circle,
}

/// A legend entry.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    /// Label shown next to the swatch.
    pub label: String,
    /// Swatch paint.
    pub fill: Fill,
}

impl LegendItem {
    /// A solid-color swatch.
    pub fn solid(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            fill: Fill::from(color),
        }
    }

    /// A swatch with any fill (e.g. the stripe pattern of a comparison chart).
    pub fn new(label: impl Into<String>, fill: impl Into<Fill>) -> Self {
        Self {
            label: label.into(),
            fill: fill.into(),
        }
    }
}

/// A positioned legend.
///
/// Items are laid out top-to-bottom, then left-to-right into `columns`. Swatch `i` is lane 0
/// and its label lane 1 (see [`MarkId::lane`]).
#[derive(Clone, Debug)]
pub struct LegendSwatches {
    /// Stable-id base.
    pub id_base: u64,
    /// Top-left corner.
    pub origin: Point,
    /// Swatch edge length.
    pub swatch_size: f64,
    /// Swatch shape.
    pub shape: LegendShape,
    /// Vertical gap between rows.
    pub row_gap: f64,
    /// Gap between swatch and label.
    pub label_dx: f64,
    /// Number of columns.
    pub columns: usize,
    /// Width of one column, label included.
    pub column_width: f64,
    /// Label font size.
    pub font_size: f64,
    /// Label paint.
    pub text_fill: Brush,
    /// Items in display order.
    pub items: Vec<LegendItem>,
}

impl LegendSwatches {
    /// Generates swatch and label marks.
    pub fn marks(&self) -> Vec<Mark> {
        let mut out = Vec::with_capacity(self.items.len() * 2);
        let columns = self.columns.max(1);
        let rows_per_col = self.items.len().div_ceil(columns).max(1);
        let row_height = self.swatch_size.max(self.font_size);

        for (i, item) in self.items.iter().enumerate() {
            let col = i / rows_per_col;
            let row = i % rows_per_col;
            let x = self.origin.x + col as f64 * self.column_width;
            let y = self.origin.y + row as f64 * (row_height + self.row_gap);
            let swatch_y = y + (row_height - self.swatch_size) * 0.5;

            let radius = match self.shape {
                LegendShape::Square => self.swatch_size * 0.2,
                LegendShape::Circle => self.swatch_size * 0.5,
            };
            out.push(
                RectMarkSpec::new(
                    MarkId::lane(self.id_base, 0, i),
                    Rect::new(x, swatch_y, x + self.swatch_size, swatch_y + self.swatch_size),
                )
                .with_radius(radius)
                .with_fill(item.fill.clone())
                .with_z_index(z_order::LEGEND_SWATCHES)
                .mark(),
            );
            out.push(
                TextMarkSpec::new(
                    MarkId::lane(self.id_base, 1, i),
                    Point::new(x + self.swatch_size + self.label_dx, y + row_height * 0.5),
                    item.label.clone(),
                )
                .with_font_size(self.font_size)
                .with_fill(self.text_fill.clone())
                .with_z_index(z_order::LEGEND_LABELS)
                .mark(),
            );
        }
        out
    }

    /// Legend bounds, measuring labels with `measurer`.
    pub fn bounds(&self, measurer: &impl TextMeasurer) -> Rect {
        marks_bounds(&self.marks(), measurer)
            .unwrap_or_else(|| Rect::from_origin_size(self.origin, Size::ZERO))
    }
}

/// An unpositioned legend: measure first, then place with [`LegendSwatchesSpec::at`].
#[derive(Clone, Debug)]
pub struct LegendSwatchesSpec {
    /// Stable-id base.
    pub id_base: u64,
    /// Swatch edge length.
    pub swatch_size: f64,
    /// Swatch shape.
    pub shape: LegendShape,
    /// Vertical gap between rows.
    pub row_gap: f64,
    /// Gap between swatch and label.
    pub label_dx: f64,
    /// Number of columns.
    pub columns: usize,
    /// Width of one column, label included.
    pub column_width: f64,
    /// Label font size.
    pub font_size: f64,
    /// Label paint.
    pub text_fill: Brush,
    /// Items in display order.
    pub items: Vec<LegendItem>,
}

impl LegendSwatchesSpec {
    /// Creates a single-column legend with square swatches.
    pub fn new(id_base: u64, items: Vec<LegendItem>) -> Self {
        Self {
            id_base,
            swatch_size: 12.0,
            shape: LegendShape::Square,
            row_gap: 8.0,
            label_dx: 8.0,
            columns: 1,
            column_width: 140.0,
            font_size: 12.0,
            text_fill: Brush::Solid(Color::from_rgb8(0x2A, 0x46, 0x39)),
            items,
        }
    }

    /// Sets the swatch shape.
    pub fn with_shape(mut self, shape: LegendShape) -> Self {
        self.shape = shape;
        self
    }

    /// Sets the number of columns and their width.
    pub fn with_columns(mut self, columns: usize, column_width: f64) -> Self {
        self.columns = columns.max(1);
        self.column_width = column_width.max(0.0);
        self
    }

    /// Sets the label font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the label paint.
    pub fn with_text_fill(mut self, text_fill: impl Into<Brush>) -> Self {
        self.text_fill = text_fill.into();
        self
    }

    /// Desired size.
    pub fn measure(&self, measurer: &impl TextMeasurer) -> Size {
        self.at(Point::ZERO).bounds(measurer).size()
    }

    /// Places the legend at `origin`.
    pub fn at(&self, origin: Point) -> LegendSwatches {
        LegendSwatches {
            id_base: self.id_base,
            origin,
            swatch_size: self.swatch_size,
            shape: self.shape,
            row_gap: self.row_gap,
            label_dx: self.label_dx,
            columns: self.columns,
            column_width: self.column_width,
            font_size: self.font_size,
            text_fill: self.text_fill.clone(),
            items: self.items.clone(),
        }
    }

    /// Generates marks at `origin`.
    pub fn marks(&self, origin: Point) -> Vec<Mark> {
        self.at(origin).marks()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use peniko::color::palette::css;

    use super::*;
    use crate::measure::HeuristicTextMeasurer;

    fn items() -> Vec<LegendItem> {
        vec![
            LegendItem::solid("Direct", css::BLACK),
            LegendItem::solid("Organic Search", css::BLACK),
            LegendItem::solid("Email", css::BLACK),
            LegendItem::solid("Referral", css::BLACK),
        ]
    }

    #[test]
    fn columns_trade_height_for_width() {
        let measurer = HeuristicTextMeasurer::default();
        let one = LegendSwatchesSpec::new(1, items()).measure(&measurer);
        let two = LegendSwatchesSpec::new(1, items())
            .with_columns(2, 140.0)
            .measure(&measurer);
        assert!(two.width > one.width, "wider with two columns");
        assert!(two.height < one.height, "shorter with two columns");
    }

    #[test]
    fn bounds_start_at_the_origin() {
        let measurer = HeuristicTextMeasurer::default();
        let spec = LegendSwatchesSpec::new(1, items());
        let size = spec.measure(&measurer);
        let b = spec.at(Point::new(10.0, 20.0)).bounds(&measurer);
        assert_eq!((b.x0, b.y0), (10.0, 20.0), "origin");
        assert!((b.width() - size.width).abs() < 1e-9, "same width as measured");
    }

    #[test]
    fn circles_are_fully_rounded() {
        let marks = LegendSwatchesSpec::new(1, items())
            .with_shape(LegendShape::Circle)
            .marks(Point::ZERO);
        let MarkPayload::Rect(r) = &marks[0].payload else {
            panic!("expected a swatch rect");
        };
        assert_eq!(r.radii.top_left, 6.0, "radius is half the swatch");
    }

    #[test]
    fn empty_legend_has_empty_bounds() {
        let measurer = HeuristicTextMeasurer::default();
        let size = LegendSwatchesSpec::new(1, Vec::new()).measure(&measurer);
        assert_eq!(size, Size::ZERO, "nothing to draw");
    }
}
