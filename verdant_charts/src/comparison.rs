// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Current-vs-previous ("duotone") comparison bars.
//!
//! Values arrive pre-normalized to a 0..=100 percentage domain; the layout maps them onto a
//! fixed pixel axis and does not normalize them itself. The current series is always drawn
//! with the flat brand fill. Only the previous series switches between a flat muted fill and
//! a diagonal stripe pattern, uniformly for the whole chart.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::{Brush, Color};
use smallvec::SmallVec;
use verdant_core::{Fill, Mark, MarkId, StripePattern, TextAnchor, TextBaseline};

use crate::rect_mark::RectMarkSpec;
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// One current/previous measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComparisonPair {
    /// Current-period value (percent of the axis).
    pub current: f64,
    /// Previous-period value (percent of the axis).
    pub previous: f64,
}

impl ComparisonPair {
    /// Creates a pair.
    pub const fn new(current: f64, previous: f64) -> Self {
        Self { current, previous }
    }

    /// The value of `series`.
    pub fn value(&self, series: Series) -> f64 {
        match series {
            Series::Current => self.current,
            Series::Previous => self.previous,
        }
    }
}

/// A labeled category holding one pair (simple duotone) or several (grouped duotone).
#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonGroup {
    /// Category label.
    pub label: String,
    /// Pairs in display order.
    pub pairs: SmallVec<[ComparisonPair; 4]>,
}

impl ComparisonGroup {
    /// Creates a group from its pairs.
    pub fn new(label: impl Into<String>, pairs: impl IntoIterator<Item = ComparisonPair>) -> Self {
        Self {
            label: label.into(),
            pairs: pairs.into_iter().collect(),
        }
    }

    /// Creates a single-pair group.
    pub fn single(label: impl Into<String>, current: f64, previous: f64) -> Self {
        Self::new(label, [ComparisonPair::new(current, previous)])
    }
}

/// Which period a bar shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Series {
    /// The current period.
    Current,
    /// The comparison period.
    Previous,
}

/// How the previous series is painted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ComparisonStyle {
    /// A flat muted fill.
    #[default]
    Flat,
    /// A 45° two-shade stripe pattern.
    Striped,
}

impl ComparisonStyle {
    /// Maps the single "use stripes" switch onto a style.
    pub fn from_stripes(stripes: bool) -> Self {
        if stripes { Self::Striped } else { Self::Flat }
    }
}

/// Paints for the two series.
#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonPalette {
    /// Fill of the current series.
    pub current: Color,
    /// Flat fill of the previous series.
    pub previous_flat: Color,
    /// Striped fill of the previous series.
    pub previous_stripes: StripePattern,
}

impl Default for ComparisonPalette {
    fn default() -> Self {
        Self {
            current: Color::from_rgb8(0x11, 0x36, 0x2A),
            previous_flat: Color::from_rgb8(0xD6, 0xD6, 0xD2),
            previous_stripes: StripePattern::new(
                Color::from_rgb8(0xBD, 0xC8, 0xAB),
                Color::from_rgb8(0xD5, 0xDC, 0xCA),
            ),
        }
    }
}

impl ComparisonPalette {
    /// The fill for `series` under `style`.
    pub fn fill(&self, series: Series, style: ComparisonStyle) -> Fill {
        match (series, style) {
            (Series::Current, _) => Fill::from(self.current),
            (Series::Previous, ComparisonStyle::Flat) => Fill::from(self.previous_flat),
            (Series::Previous, ComparisonStyle::Striped) => Fill::from(self.previous_stripes),
        }
    }
}

/// A laid-out comparison bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComparisonBar {
    /// Group index.
    pub group: usize,
    /// Pair index within the group.
    pub pair: usize,
    /// Series shown.
    pub series: Series,
    /// Raw value.
    pub value: f64,
    /// Length along the value axis.
    pub extent: f64,
}

/// Maps percentages onto a pixel axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComparisonLayout {
    /// Pixel length of 100 %.
    pub axis_max: f64,
    /// Previous-series treatment.
    pub style: ComparisonStyle,
}

impl Default for ComparisonLayout {
    fn default() -> Self {
        Self::new(140.0)
    }
}

impl ComparisonLayout {
    /// Creates a flat layout with the given axis length.
    pub fn new(axis_max: f64) -> Self {
        Self {
            axis_max,
            style: ComparisonStyle::Flat,
        }
    }

    /// Sets the previous-series style.
    pub fn with_style(mut self, style: ComparisonStyle) -> Self {
        self.style = style;
        self
    }

    /// `percent / 100 * axis_max`; negative and non-finite inputs give `0`.
    ///
    /// Values above 100 are not clamped: the caller owns normalization.
    pub fn extent(&self, percent: f64) -> f64 {
        if !percent.is_finite() || percent <= 0.0 || !self.axis_max.is_finite() {
            return 0.0;
        }
        percent / 100.0 * self.axis_max
    }

    /// Lays out every bar, current before previous within a pair.
    pub fn bars(&self, groups: &[ComparisonGroup]) -> Vec<ComparisonBar> {
        let mut out = Vec::new();
        for (group, g) in groups.iter().enumerate() {
            for (pair, p) in g.pairs.iter().enumerate() {
                for series in [Series::Current, Series::Previous] {
                    let value = p.value(series);
                    out.push(ComparisonBar {
                        group,
                        pair,
                        series,
                        value,
                        extent: self.extent(value),
                    });
                }
            }
        }
        out
    }
}

/// Bar direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Bars grow to the right. Each pair is one row with the previous bar following the
    /// current one, under a label row per group.
    #[default]
    Horizontal,
    /// Bars grow upward; one cluster per group with the label below the baseline.
    Vertical,
}

/// A comparison chart: per-group current/previous bars.
///
/// Ids: bar `b` (in [`ComparisonLayout::bars`] order) is lane 0, group label `i` is lane 1
/// (see [`MarkId::lane`]).
#[derive(Clone, Debug)]
pub struct ComparisonChartSpec {
    /// Stable-id base.
    pub id_base: u64,
    /// Groups in display order.
    pub groups: Vec<ComparisonGroup>,
    /// Value mapping and previous-series style.
    pub layout: ComparisonLayout,
    /// Series paints.
    pub palette: ComparisonPalette,
    /// Bar direction.
    pub orientation: Orientation,
    /// Top-left of the chart.
    pub origin: Point,
    /// Thickness of a single bar.
    pub bar_thickness: f64,
    /// Gap between neighbouring bars of one group.
    pub bar_gap: f64,
    /// Gap between groups.
    pub group_gap: f64,
    /// Space reserved for group labels (row above a horizontal group, row below the
    /// vertical baseline).
    pub label_space: f64,
    /// Corner radius of the bars.
    pub corner_radius: f64,
    /// Label paint.
    pub text_fill: Brush,
    /// Label font size.
    pub font_size: f64,
}

impl ComparisonChartSpec {
    /// Creates a horizontal chart with flat previous bars.
    pub fn new(id_base: u64, origin: Point, groups: Vec<ComparisonGroup>) -> Self {
        Self {
            id_base,
            groups,
            layout: ComparisonLayout::default(),
            palette: ComparisonPalette::default(),
            orientation: Orientation::Horizontal,
            origin,
            bar_thickness: 12.0,
            bar_gap: 4.0,
            group_gap: 16.0,
            label_space: 20.0,
            corner_radius: 2.0,
            text_fill: Brush::Solid(Color::from_rgb8(0x2A, 0x46, 0x39)),
            font_size: 12.0,
        }
    }

    /// Sets the value layout.
    pub fn with_layout(mut self, layout: ComparisonLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Switches the previous series between flat and striped.
    pub fn with_stripes(mut self, stripes: bool) -> Self {
        self.layout.style = ComparisonStyle::from_stripes(stripes);
        self
    }

    /// Sets the series paints.
    pub fn with_palette(mut self, palette: ComparisonPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Sets the bar direction.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets bar thickness and gaps.
    pub fn with_spacing(mut self, bar_thickness: f64, bar_gap: f64, group_gap: f64) -> Self {
        self.bar_thickness = bar_thickness.max(0.0);
        self.bar_gap = bar_gap.max(0.0);
        self.group_gap = group_gap.max(0.0);
        self
    }

    /// Sets the label row height.
    pub fn with_label_space(mut self, label_space: f64) -> Self {
        self.label_space = label_space.max(0.0);
        self
    }

    /// Extent of `group` across the bars, its label row included when horizontal.
    fn group_span(&self, group: &ComparisonGroup) -> f64 {
        let (lanes, label) = match self.orientation {
            Orientation::Horizontal => (group.pairs.len(), self.label_space),
            Orientation::Vertical => (group.pairs.len() * 2, 0.0),
        };
        if lanes == 0 {
            return label;
        }
        label + lanes as f64 * self.bar_thickness + (lanes - 1) as f64 * self.bar_gap
    }

    /// Length of the longest horizontal row (current, gap, previous).
    fn longest_row(&self) -> f64 {
        self.groups
            .iter()
            .flat_map(|g| g.pairs.iter())
            .map(|p| {
                let current = self.layout.extent(p.current);
                let previous = self.layout.extent(p.previous);
                let gap = if current > 0.0 && previous > 0.0 {
                    self.bar_gap
                } else {
                    0.0
                };
                current + gap + previous
            })
            .fold(0.0, f64::max)
    }

    /// Total size of the chart, labels included.
    pub fn size(&self) -> kurbo::Size {
        let across: f64 = self.groups.iter().map(|g| self.group_span(g)).sum::<f64>()
            + self.groups.len().saturating_sub(1) as f64 * self.group_gap;
        match self.orientation {
            Orientation::Horizontal => kurbo::Size::new(self.longest_row(), across),
            Orientation::Vertical => {
                kurbo::Size::new(across, self.label_space + self.layout.axis_max.max(0.0))
            }
        }
    }

    /// Generates bar and label marks.
    pub fn marks(&self) -> Vec<Mark> {
        let mut out = Vec::new();
        let bars = self.layout.bars(&self.groups);
        let mut bar_iter = bars.iter().enumerate().peekable();
        let pitch = self.bar_thickness + self.bar_gap;
        let (x0, y0) = (self.origin.x, self.origin.y);
        let baseline = y0 + self.layout.axis_max.max(0.0);
        let mut cursor = 0.0;

        for (gi, group) in self.groups.iter().enumerate() {
            let span = self.group_span(group);
            // Extent of the current bar of the pair being laid out.
            let mut lead = 0.0;
            let mut slot = 0_usize;
            while let Some((b, bar)) = bar_iter.next_if(|(_, bar)| bar.group == gi) {
                let rect = match self.orientation {
                    Orientation::Horizontal => {
                        let start = match bar.series {
                            Series::Current => {
                                lead = bar.extent;
                                0.0
                            }
                            Series::Previous if lead > 0.0 => lead + self.bar_gap,
                            Series::Previous => 0.0,
                        };
                        let y = y0 + cursor + self.label_space + bar.pair as f64 * pitch;
                        let x = x0 + start;
                        Rect::new(x, y, x + bar.extent, y + self.bar_thickness)
                    }
                    Orientation::Vertical => {
                        let x = x0 + cursor + slot as f64 * pitch;
                        Rect::new(x, baseline - bar.extent, x + self.bar_thickness, baseline)
                    }
                };
                out.push(self.bar_mark(b, bar, rect));
                slot += 1;
            }
            out.push(self.group_label(gi, group, cursor, span));
            cursor += span + self.group_gap;
        }
        out
    }

    fn bar_mark(&self, index: usize, bar: &ComparisonBar, rect: Rect) -> Mark {
        let spec = RectMarkSpec::new(MarkId::lane(self.id_base, 0, index), rect);
        let spec = match self.orientation {
            Orientation::Horizontal => spec.with_radius(self.corner_radius),
            Orientation::Vertical => spec.with_top_radius(self.corner_radius),
        };
        spec.with_fill(self.palette.fill(bar.series, self.layout.style))
            .mark()
    }

    fn group_label(&self, index: usize, group: &ComparisonGroup, start: f64, span: f64) -> Mark {
        let id = MarkId::lane(self.id_base, 1, index);
        let (x0, y0) = (self.origin.x, self.origin.y);
        let spec = match self.orientation {
            Orientation::Horizontal => TextMarkSpec::new(
                id,
                Point::new(x0, y0 + start + self.label_space * 0.5),
                group.label.clone(),
            )
            .with_anchor(TextAnchor::Start)
            .with_baseline(TextBaseline::Middle),
            Orientation::Vertical => {
                let baseline = y0 + self.layout.axis_max.max(0.0);
                TextMarkSpec::new(
                    id,
                    Point::new(x0 + start + span * 0.5, baseline + 8.0),
                    group.label.clone(),
                )
                .with_anchor(TextAnchor::Middle)
                .with_baseline(TextBaseline::Hanging)
            }
        };
        spec.with_font_size(self.font_size)
            .with_fill(self.text_fill.clone())
            .with_z_index(z_order::AXIS_LABELS)
            .mark()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use verdant_core::MarkPayload;

    use super::*;

    fn duotone() -> Vec<ComparisonGroup> {
        vec![
            ComparisonGroup::single("Likes", 85.0, 70.0),
            ComparisonGroup::single("Comments", 45.0, 55.0),
        ]
    }

    #[test]
    fn extent_is_a_percentage_of_the_axis() {
        let layout = ComparisonLayout::new(140.0);
        assert_eq!(layout.extent(100.0), 140.0, "full axis");
        assert_eq!(layout.extent(50.0), 70.0, "half axis");
        assert_eq!(layout.extent(0.0), 0.0, "zero");
        assert_eq!(layout.extent(-10.0), 0.0, "negative clamps to zero");
        assert_eq!(layout.extent(f64::NAN), 0.0, "nan clamps to zero");
        assert_eq!(layout.extent(150.0), 210.0, "not normalized");
    }

    #[test]
    fn bars_pair_current_then_previous() {
        let bars = ComparisonLayout::new(100.0).bars(&duotone());
        let series: std::vec::Vec<_> = bars.iter().map(|b| (b.group, b.series)).collect();
        assert_eq!(
            series,
            vec![
                (0, Series::Current),
                (0, Series::Previous),
                (1, Series::Current),
                (1, Series::Previous),
            ],
            "stable order"
        );
        assert!((bars[1].extent - 70.0).abs() < 1e-9, "previous Likes");
    }

    #[test]
    fn only_the_previous_series_switches_fill() {
        let palette = ComparisonPalette::default();
        for style in [ComparisonStyle::Flat, ComparisonStyle::Striped] {
            assert_eq!(
                palette.fill(Series::Current, style),
                Fill::from(palette.current),
                "current is always flat brand"
            );
        }
        assert!(
            palette
                .fill(Series::Previous, ComparisonStyle::Striped)
                .stripes()
                .is_some(),
            "striped previous"
        );
        assert!(
            palette
                .fill(Series::Previous, ComparisonStyle::Flat)
                .stripes()
                .is_none(),
            "flat previous"
        );
    }

    #[test]
    fn stripe_flag_applies_to_every_previous_bar() {
        let marks = ComparisonChartSpec::new(0, Point::ZERO, duotone())
            .with_stripes(true)
            .marks();
        let striped = marks
            .iter()
            .filter(|m| matches!(&m.payload, MarkPayload::Rect(r) if r.fill.stripes().is_some()))
            .count();
        assert_eq!(striped, 2, "both previous bars are striped");
    }

    #[test]
    fn vertical_bars_grow_up_from_the_baseline() {
        let groups = vec![ComparisonGroup::new(
            "Instagram",
            [ComparisonPair::new(85.0, 60.0), ComparisonPair::new(78.0, 65.0)],
        )];
        let spec = ComparisonChartSpec::new(0, Point::new(0.0, 10.0), groups)
            .with_orientation(Orientation::Vertical);
        let marks = spec.marks();
        let Some(MarkPayload::Rect(first)) = marks.first().map(|m| &m.payload) else {
            panic!("expected a rect first");
        };
        assert_eq!(first.rect.y1, 150.0, "baseline is origin + axis");
        assert!((first.rect.height() - 119.0).abs() < 1e-9, "85 % of 140");
        assert_eq!(marks.len(), 5, "four bars and one label");
    }

    #[test]
    fn horizontal_pairs_share_one_row() {
        let marks = ComparisonChartSpec::new(0, Point::ZERO, duotone()).marks();
        let rects: std::vec::Vec<Rect> = marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Rect(r) => Some(r.rect),
                _ => None,
            })
            .collect();
        assert_eq!(rects.len(), 4, "two pairs");
        assert_eq!(rects[0].y0, rects[1].y0, "current and previous on one row");
        assert_eq!(rects[0].y0, 20.0, "below the label row");
        assert!((rects[0].x1 - 119.0).abs() < 1e-9, "85 % of 140");
        assert!((rects[1].x0 - 123.0).abs() < 1e-9, "previous follows after the gap");
        assert!((rects[1].width() - 98.0).abs() < 1e-9, "70 % of 140");
        assert_eq!(rects[2].y0, 68.0, "next group after label, bar and group gap");
    }

    #[test]
    fn horizontal_size_covers_the_longest_row() {
        let spec = ComparisonChartSpec::new(0, Point::ZERO, duotone());
        let size = spec.size();
        assert!((size.width - 221.0).abs() < 1e-9, "119 + 4 + 98");
        assert_eq!(size.height, 80.0, "two groups of 32 plus one gap");
    }

    #[test]
    fn many_groups_keep_distinct_mark_ids() {
        let groups = (0..600)
            .map(|i| ComparisonGroup::single(std::format!("g{i}"), 50.0, 40.0))
            .collect();
        let marks = ComparisonChartSpec::new(0, Point::ZERO, groups).marks();
        let ids: std::collections::BTreeSet<MarkId> = marks.iter().map(|m| m.id).collect();
        assert_eq!(marks.len(), 1_800, "1200 bars and 600 labels");
        assert_eq!(ids.len(), marks.len(), "bars never collide with labels");
    }

    #[test]
    fn empty_groups_produce_only_labels() {
        let spec = ComparisonChartSpec::new(0, Point::ZERO, vec![ComparisonGroup::new("x", [])]);
        assert_eq!(spec.marks().len(), 1, "label only");
        assert_eq!(spec.size().height, 20.0, "only the label row");
        assert_eq!(spec.size().width, 0.0, "no bars, no width");
    }
}
