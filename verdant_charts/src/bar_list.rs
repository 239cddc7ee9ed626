// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ranked bar lists ("horizontal bars" and "table bars").
//!
//! Each row shows a label, a track with a fill proportional to the dataset peak and a derived
//! value string. Percent shares and display strings are always computed from the raw value.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Color;
use verdant_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::format::{Magnitude, compact, fixed, grouped, percent, signed_percent};
use crate::measure::TextMeasurer;
use crate::rect_mark::RectMarkSpec;
use crate::scale::ExtentScale;
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// A labeled raw value.
#[derive(Clone, Debug, PartialEq)]
pub struct BarDatum {
    /// Row label.
    pub label: String,
    /// Raw value; everything shown is derived from it.
    pub value: f64,
}

impl BarDatum {
    /// Creates a datum.
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }

    /// Compact display value (`"202.78K"`).
    pub fn formatted(&self) -> String {
        compact(self.value, Magnitude::Thousands, 2)
    }

    /// Share of `total` in percent; `0` when `total` is not positive.
    pub fn share_of(&self, total: f64) -> f64 {
        if !(total.is_finite() && total > 0.0) || !self.value.is_finite() {
            return 0.0;
        }
        self.value / total * 100.0
    }
}

/// A period-over-period change, in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trend {
    /// Signed change.
    pub change: f64,
}

impl Trend {
    /// Creates a trend.
    pub const fn new(change: f64) -> Self {
        Self { change }
    }

    /// Whether the change is a gain (zero counts as a gain).
    pub fn is_positive(&self) -> bool {
        self.change >= 0.0
    }

    /// Signed display text (`"+12.3%"`).
    pub fn formatted(&self) -> String {
        signed_percent(self.change, 1)
    }
}

/// Presentation variant of a bar list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BarListStyle {
    /// Label, bar and value on one line under a header with the total; tooltip shows value
    /// and share.
    #[default]
    Horizontal,
    /// Table with a trend column; tooltip shows the share of total.
    Table,
}

/// A laid-out row.
#[derive(Clone, Debug, PartialEq)]
pub struct BarRow {
    /// Row index.
    pub index: usize,
    /// Fill fraction of the track (`1.0` for the peak).
    pub fraction: f64,
    /// Share of the total, in percent.
    pub share: f64,
    /// Whether the pointer is over this row.
    pub hovered: bool,
    /// Tooltip text, only for the hovered row.
    pub tooltip: Option<String>,
}

/// Computes row fractions, shares and the hovered row's tooltip.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BarListLayout {
    /// Tooltip wording.
    pub style: BarListStyle,
}

impl BarListLayout {
    /// Creates a layout.
    pub fn new(style: BarListStyle) -> Self {
        Self { style }
    }

    /// Sum of the finite values.
    pub fn total(data: &[BarDatum]) -> f64 {
        data.iter()
            .map(|d| d.value)
            .filter(|v| v.is_finite())
            .sum()
    }

    /// Lays out rows; `hovered` outside the data is ignored.
    pub fn rows(&self, data: &[BarDatum], hovered: Option<usize>) -> Vec<BarRow> {
        let scale = ExtentScale::fit(data.iter().map(|d| d.value), 1.0);
        let total = Self::total(data);
        data.iter()
            .enumerate()
            .map(|(index, d)| {
                let share = d.share_of(total);
                let is_hovered = hovered == Some(index);
                BarRow {
                    index,
                    fraction: scale.map(d.value).clamp(0.0, 1.0),
                    share,
                    hovered: is_hovered,
                    tooltip: is_hovered.then(|| self.tooltip(d, share)),
                }
            })
            .collect()
    }

    fn tooltip(&self, datum: &BarDatum, share: f64) -> String {
        match self.style {
            BarListStyle::Horizontal => {
                format!("{} ({})", grouped(datum.value), percent(share, 1))
            }
            BarListStyle::Table => format!("{} of total", percent(share, 1)),
        }
    }
}

/// Paints of a bar list.
#[derive(Clone, Debug, PartialEq)]
pub struct BarListPalette {
    /// Bar fill.
    pub fill: Color,
    /// Bar fill of the hovered row.
    pub hover_fill: Color,
    /// Track behind the bar.
    pub track: Color,
    /// Label and value text.
    pub text: Color,
    /// Secondary header text (the total).
    pub muted: Color,
    /// Positive trend text.
    pub gain: Color,
    /// Negative trend text.
    pub loss: Color,
    /// Tooltip background.
    pub tooltip_background: Color,
    /// Tooltip text.
    pub tooltip_text: Color,
}

impl Default for BarListPalette {
    fn default() -> Self {
        Self {
            fill: Color::from_rgb8(0x11, 0x36, 0x2A),
            hover_fill: Color::from_rgb8(0x2A, 0x46, 0x39),
            track: Color::from_rgb8(0xE8, 0xE8, 0xE5),
            text: Color::from_rgb8(0x0B, 0x24, 0x1C),
            muted: Color::from_rgb8(0x4A, 0x75, 0x61),
            gain: Color::from_rgb8(0x38, 0x5C, 0x4B),
            loss: Color::from_rgb8(0x8B, 0x40, 0x49),
            tooltip_background: Color::from_rgb8(0x0B, 0x24, 0x1C),
            tooltip_text: Color::WHITE,
        }
    }
}

/// A bar list chart.
///
/// Ids per row `i` (see [`MarkId::lane`]): track in lane 0, bar in lane 1, label in lane 2,
/// value in lane 3 and trend in lane 4. The header title and total are entries 0 and 1 of
/// lane 5; the tooltip background and text are entries 0 and 1 of lane 6.
#[derive(Clone, Debug)]
pub struct BarListSpec {
    /// Stable-id base.
    pub id_base: u64,
    /// Rows in display order.
    pub data: Vec<BarDatum>,
    /// Optional per-row trends (table style only).
    pub trends: Vec<Trend>,
    /// Layout and tooltip wording.
    pub layout: BarListLayout,
    /// Title drawn at the left of the header row.
    pub title: Option<String>,
    /// Hovered row.
    pub hovered: Option<usize>,
    /// Top-left corner.
    pub origin: Point,
    /// Width of the label column.
    pub label_width: f64,
    /// Length of a full track.
    pub track_width: f64,
    /// Bar thickness.
    pub bar_height: f64,
    /// Vertical distance between rows.
    pub row_height: f64,
    /// Font size.
    pub font_size: f64,
    /// Paints.
    pub palette: BarListPalette,
}

impl BarListSpec {
    /// Creates a horizontal bar list.
    pub fn new(id_base: u64, origin: Point, data: Vec<BarDatum>) -> Self {
        Self {
            id_base,
            data,
            trends: Vec::new(),
            layout: BarListLayout::default(),
            title: None,
            hovered: None,
            origin,
            label_width: 80.0,
            track_width: 240.0,
            bar_height: 8.0,
            row_height: 32.0,
            font_size: 12.0,
            palette: BarListPalette::default(),
        }
    }

    /// Switches between horizontal and table presentation.
    pub fn with_style(mut self, style: BarListStyle) -> Self {
        self.layout.style = style;
        self
    }

    /// Sets the per-row trends.
    pub fn with_trends(mut self, trends: Vec<Trend>) -> Self {
        self.trends = trends;
        self
    }

    /// Sets the header title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the hovered row.
    pub fn with_hovered(mut self, hovered: Option<usize>) -> Self {
        self.hovered = hovered;
        self
    }

    /// Sets the track geometry.
    pub fn with_track(mut self, track_width: f64, bar_height: f64) -> Self {
        self.track_width = track_width.max(0.0);
        self.bar_height = bar_height.max(0.0);
        self
    }

    /// Total shown at the right of the horizontal header (`"Total: 239.1K"`).
    pub fn total_label(&self) -> String {
        format!(
            "Total: {}",
            fixed(BarListLayout::total(&self.data), Magnitude::Thousands, 1)
        )
    }

    /// Whether the header row carries the total.
    fn shows_total(&self) -> bool {
        self.layout.style == BarListStyle::Horizontal
    }

    fn header_height(&self) -> f64 {
        if self.title.is_some() || self.shows_total() {
            self.row_height
        } else {
            0.0
        }
    }

    /// Row index under `pt`, if any.
    pub fn hit_test(&self, pt: Point) -> Option<usize> {
        let top = self.origin.y + self.header_height();
        let right = self.origin.x + self.label_width + self.track_width;
        if pt.x < self.origin.x || pt.x > right || pt.y < top {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, reason = "non-negative, bounded below")]
        let i = ((pt.y - top) / self.row_height) as usize;
        (i < self.data.len()).then_some(i)
    }

    /// Total size, excluding the tooltip.
    pub fn size(&self) -> kurbo::Size {
        kurbo::Size::new(
            self.label_width + self.track_width + 64.0,
            self.header_height() + self.row_height * self.data.len() as f64,
        )
    }

    /// Generates marks.
    pub fn marks(&self, measurer: &impl TextMeasurer) -> Vec<Mark> {
        let mut out = Vec::new();
        let id = |lane: u16, index: usize| MarkId::lane(self.id_base, lane, index);
        let text = |id: MarkId, pos: Point, s: String| {
            TextMarkSpec::new(id, pos, s)
                .with_font_size(self.font_size)
                .with_fill(self.palette.text)
        };

        if let Some(title) = &self.title {
            out.push(
                text(id(5, 0), self.origin, title.clone())
                    .with_font_weight(600)
                    .with_baseline(TextBaseline::Hanging)
                    .with_z_index(z_order::AXIS_LABELS)
                    .mark(),
            );
        }
        if self.shows_total() {
            let right = Point::new(self.origin.x + self.size().width, self.origin.y);
            out.push(
                text(id(5, 1), right, self.total_label())
                    .with_font_size(self.font_size - 1.0)
                    .with_anchor(TextAnchor::End)
                    .with_baseline(TextBaseline::Hanging)
                    .with_fill(self.palette.muted)
                    .with_z_index(z_order::AXIS_LABELS)
                    .mark(),
            );
        }

        let top = self.origin.y + self.header_height();
        let track_x = self.origin.x + self.label_width;
        let mut tooltip = None;
        for row in self.layout.rows(&self.data, self.hovered) {
            let Some(datum) = self.data.get(row.index) else {
                continue;
            };
            let i = row.index;
            let cy = top + (row.index as f64 + 0.5) * self.row_height;
            let y0 = cy - self.bar_height * 0.5;
            let y1 = cy + self.bar_height * 0.5;
            let radius = self.bar_height * 0.5;

            out.push(
                RectMarkSpec::new(id(0, i), Rect::new(track_x, y0, track_x + self.track_width, y1))
                    .with_radius(radius)
                    .with_fill(self.palette.track)
                    .with_z_index(z_order::BACKGROUND)
                    .mark(),
            );
            let bar_end = track_x + row.fraction * self.track_width;
            let fill = if row.hovered {
                self.palette.hover_fill
            } else {
                self.palette.fill
            };
            out.push(
                RectMarkSpec::new(id(1, i), Rect::new(track_x, y0, bar_end, y1))
                    .with_radius(radius)
                    .with_fill(fill)
                    .mark(),
            );
            out.push(text(id(2, i), Point::new(self.origin.x, cy), datum.label.clone()).mark());
            out.push(
                text(
                    id(3, i),
                    Point::new(track_x + self.track_width + 8.0, cy),
                    datum.formatted(),
                )
                .with_font_weight(600)
                .mark(),
            );
            if self.layout.style == BarListStyle::Table
                && let Some(trend) = self.trends.get(row.index)
            {
                let color = if trend.is_positive() {
                    self.palette.gain
                } else {
                    self.palette.loss
                };
                out.push(
                    text(
                        id(4, i),
                        Point::new(track_x + self.track_width + 64.0, cy),
                        trend.formatted(),
                    )
                    .with_anchor(TextAnchor::End)
                    .with_fill(color)
                    .mark(),
                );
            }
            if let Some(t) = row.tooltip {
                tooltip = Some((Point::new(bar_end, y0 - 6.0), t));
            }
        }

        if let Some((anchor, t)) = tooltip {
            let size = measurer.measure(&t, self.font_size);
            let pad = 6.0;
            let rect = Rect::new(
                anchor.x - size.width * 0.5 - pad,
                anchor.y - size.height - pad * 2.0,
                anchor.x + size.width * 0.5 + pad,
                anchor.y,
            );
            out.push(
                RectMarkSpec::new(id(6, 0), rect)
                    .with_radius(4.0)
                    .with_fill(self.palette.tooltip_background)
                    .with_z_index(z_order::TOOLTIP)
                    .mark(),
            );
            out.push(
                TextMarkSpec::new(id(6, 1), rect.center(), t)
                    .with_font_size(self.font_size)
                    .with_anchor(TextAnchor::Middle)
                    .with_fill(self.palette.tooltip_text)
                    .with_z_index(z_order::TOOLTIP + 1)
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

    use super::*;
    use crate::measure::HeuristicTextMeasurer;

    fn engagement() -> Vec<BarDatum> {
        vec![
            BarDatum::new("Likes", 202_780.0),
            BarDatum::new("Saves", 32_050.0),
            BarDatum::new("Shares", 2_500.0),
            BarDatum::new("Comments", 1_800.0),
        ]
    }

    #[test]
    fn display_strings_are_derived_from_the_value() {
        let likes = BarDatum::new("Likes", 202_780.0);
        assert_eq!(likes.formatted(), "202.78K", "compact");
        let total = BarListLayout::total(&engagement());
        assert_eq!(total, 239_130.0, "sum");
        assert_eq!(percent(likes.share_of(total), 1), "84.8%", "share");
        assert_eq!(likes.share_of(0.0), 0.0, "zero total");
    }

    #[test]
    fn trends_format_with_sign() {
        assert_eq!(Trend::new(12.3).formatted(), "+12.3%", "gain");
        assert_eq!(Trend::new(-2.1).formatted(), "-2.1%", "loss");
        assert!(!Trend::new(-2.1).is_positive(), "loss is negative");
    }

    #[test]
    fn fractions_are_relative_to_the_peak() {
        let rows = BarListLayout::default().rows(&engagement(), None);
        assert_eq!(rows[0].fraction, 1.0, "peak fills the track");
        assert!(rows[3].fraction < rows[2].fraction, "ordered by value");
        assert!(rows.iter().all(|r| r.tooltip.is_none()), "no hover, no tooltip");
    }

    #[test]
    fn only_the_hovered_row_has_a_tooltip() {
        let rows = BarListLayout::new(BarListStyle::Horizontal).rows(&engagement(), Some(0));
        assert_eq!(rows[0].tooltip.as_deref(), Some("202,780 (84.8%)"), "value and share");
        assert_eq!(rows.iter().filter(|r| r.hovered).count(), 1, "exclusive");

        let rows = BarListLayout::new(BarListStyle::Table).rows(&engagement(), Some(1));
        assert_eq!(rows[1].tooltip.as_deref(), Some("13.4% of total"), "share of total");
    }

    #[test]
    fn out_of_range_hover_is_ignored() {
        let rows = BarListLayout::default().rows(&engagement(), Some(9));
        assert!(rows.iter().all(|r| !r.hovered), "no row hovered");
    }

    #[test]
    fn empty_and_zero_lists_have_empty_bars() {
        let rows = BarListLayout::default().rows(&[], None);
        assert!(rows.is_empty(), "no rows");
        let zeros = vec![BarDatum::new("a", 0.0), BarDatum::new("b", 0.0)];
        let rows = BarListLayout::default().rows(&zeros, None);
        assert!(rows.iter().all(|r| r.fraction == 0.0 && r.share == 0.0), "zero-extent");
    }

    fn texts(marks: &[Mark]) -> std::vec::Vec<&str> {
        marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn horizontal_header_carries_the_total() {
        let spec = BarListSpec::new(0, Point::ZERO, engagement()).with_title("Engagement by Type");
        assert_eq!(spec.total_label(), "Total: 239.1K", "derived from the values");
        let marks = spec.marks(&HeuristicTextMeasurer::default());
        let shown = texts(&marks);
        assert!(shown.contains(&"Engagement by Type"), "title on the left");
        assert!(shown.contains(&"Total: 239.1K"), "total on the right");
        assert_eq!(spec.hit_test(Point::new(10.0, 40.0)), Some(0), "below the header");
        assert_eq!(spec.hit_test(Point::new(10.0, 10.0)), None, "header row");
        assert_eq!(spec.hit_test(Point::new(10.0, 500.0)), None, "past the end");
    }

    #[test]
    fn table_header_is_a_title_without_total() {
        let spec = BarListSpec::new(0, Point::ZERO, engagement())
            .with_style(BarListStyle::Table)
            .with_title("Engagement Summary");
        let marks = spec.marks(&HeuristicTextMeasurer::default());
        let shown = texts(&marks);
        assert!(shown.contains(&"Engagement Summary"), "table title");
        assert!(!shown.iter().any(|t| t.starts_with("Total:")), "no total in the table");

        let untitled = BarListSpec::new(0, Point::ZERO, engagement())
            .with_style(BarListStyle::Table);
        assert_eq!(untitled.hit_test(Point::new(10.0, 10.0)), Some(0), "no header row");
    }

    #[test]
    fn hovered_marks_include_a_tooltip() {
        let measurer = HeuristicTextMeasurer::default();
        let plain = BarListSpec::new(0, Point::ZERO, engagement()).marks(&measurer);
        let hovered = BarListSpec::new(0, Point::ZERO, engagement())
            .with_hovered(Some(2))
            .marks(&measurer);
        assert_eq!(hovered.len(), plain.len() + 2, "tooltip box and text");
        let has_tip = hovered.iter().any(|m| {
            matches!(&m.payload, MarkPayload::Text(t) if t.text == "2,500 (1.0%)")
        });
        assert!(has_tip, "tooltip text for the hovered row");
    }
}
