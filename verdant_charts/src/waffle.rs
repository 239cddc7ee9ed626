// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waffle charts: shares drawn as a grid of equal cells, one cell per percent by default.
//!
//! Shares are apportioned to whole cells with the largest-remainder method, so the counts
//! always fill the grid exactly, even when the inputs were rounded for display and sum to
//! 99 or 101.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use peniko::{Brush, Color};
use verdant_core::{Mark, MarkId};
use verdant_palette::ColorToken;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::format::percent;
use crate::legend::{LegendItem, LegendSwatchesSpec};
use crate::rect_mark::RectMarkSpec;

/// Splits `cells` between `shares` in proportion, by largest remainder.
///
/// Shares are normalized by their sum first. Non-finite and negative shares count as zero.
/// The result sums to exactly `cells` unless every share is zero, in which case every count
/// is zero. Ties between equal remainders go to the earlier share.
pub fn apportion(shares: &[f64], cells: usize) -> Vec<usize> {
    let weights: Vec<f64> = shares
        .iter()
        .map(|&s| if s.is_finite() && s > 0.0 { s } else { 0.0 })
        .collect();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        log::debug!("waffle has no positive share; every cell stays empty");
        return vec![0; weights.len()];
    }

    let quotas: Vec<f64> = weights.iter().map(|w| w / total * cells as f64).collect();
    #[allow(clippy::cast_possible_truncation, reason = "quotas lie in 0..=cells")]
    let mut counts: Vec<usize> = quotas.iter().map(|q| q.floor() as usize).collect();
    let assigned: usize = counts.iter().sum();
    let remaining = cells.saturating_sub(assigned);

    let mut order: Vec<usize> = (0..weights.len()).filter(|&i| weights[i] > 0.0).collect();
    order.sort_by(|&a, &b| {
        let fa = quotas[a] - quotas[a].floor();
        let fb = quotas[b] - quotas[b].floor();
        fb.total_cmp(&fa)
    });
    for &i in order.iter().cycle().take(remaining) {
        counts[i] += 1;
    }
    counts
}

/// One category of a waffle chart.
#[derive(Clone, Debug, PartialEq)]
pub struct WaffleCategory {
    /// Category name (legend text).
    pub label: String,
    /// Share of the whole, in percent.
    pub percent: f64,
    /// Cell color.
    pub color: ColorToken,
}

impl WaffleCategory {
    /// Creates a category.
    pub fn new(label: impl Into<String>, percent: f64, color: ColorToken) -> Self {
        Self {
            label: label.into(),
            percent,
            color,
        }
    }
}

/// Grid shape of a waffle chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaffleLayout {
    /// Cells per row.
    pub columns: usize,
    /// Number of rows.
    pub rows: usize,
}

impl Default for WaffleLayout {
    fn default() -> Self {
        Self {
            columns: 10,
            rows: 10,
        }
    }
}

impl WaffleLayout {
    /// Total number of cells.
    pub fn cells(&self) -> usize {
        self.columns * self.rows
    }

    /// Whole-cell counts per category.
    pub fn counts(&self, categories: &[WaffleCategory]) -> Vec<usize> {
        let shares: Vec<f64> = categories.iter().map(|c| c.percent).collect();
        apportion(&shares, self.cells())
    }

    /// The category filling each cell, row-major; categories fill in order.
    ///
    /// Cells are `None` only when no category has a positive share.
    pub fn owners(&self, categories: &[WaffleCategory]) -> Vec<Option<usize>> {
        self.owners_of(&self.counts(categories))
    }

    fn owners_of(&self, counts: &[usize]) -> Vec<Option<usize>> {
        let mut owners = Vec::with_capacity(self.cells());
        for (i, &count) in counts.iter().enumerate() {
            owners.extend(core::iter::repeat_n(Some(i), count));
        }
        owners.resize(self.cells(), None);
        owners
    }
}

/// A waffle chart with a legend row underneath.
///
/// Cell `(row, column)` is [`MarkId::cell`] in lane 0. Legend swatches and labels sit in
/// lanes 1 and 2.
#[derive(Clone, Debug)]
pub struct WaffleChartSpec {
    /// Stable-id base.
    pub id_base: u64,
    /// Top-left corner of the grid.
    pub origin: Point,
    /// Categories in fill order.
    pub categories: Vec<WaffleCategory>,
    /// Grid shape.
    pub layout: WaffleLayout,
    /// Cell edge length.
    pub cell: f64,
    /// Gap between cells.
    pub gap: f64,
    /// Cell corner radius.
    pub corner_radius: f64,
    /// Fill of cells no category owns.
    pub empty_fill: Color,
    /// Gap between the grid and the legend.
    pub legend_gap: f64,
    /// Width of one legend column.
    pub legend_column_width: f64,
    /// Legend label paint.
    pub text_fill: Brush,
}

impl WaffleChartSpec {
    /// Creates a 10 × 10 waffle with 16 px cells.
    pub fn new(id_base: u64, origin: Point, categories: Vec<WaffleCategory>) -> Self {
        Self {
            id_base,
            origin,
            categories,
            layout: WaffleLayout::default(),
            cell: 16.0,
            gap: 3.0,
            corner_radius: 2.0,
            empty_fill: Color::from_rgb8(0xE8, 0xE8, 0xE5),
            legend_gap: 16.0,
            legend_column_width: 120.0,
            text_fill: Brush::Solid(Color::from_rgb8(0x4A, 0x75, 0x61)),
        }
    }

    /// Sets the grid shape.
    pub fn with_layout(mut self, layout: WaffleLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the cell size and gap.
    pub fn with_cell(mut self, cell: f64, gap: f64) -> Self {
        self.cell = cell.max(0.0);
        self.gap = gap.max(0.0);
        self
    }

    /// Size of the cell grid alone.
    pub fn grid_size(&self) -> Size {
        let side = |n: usize| {
            if n == 0 {
                0.0
            } else {
                n as f64 * self.cell + (n - 1) as f64 * self.gap
            }
        };
        Size::new(side(self.layout.columns), side(self.layout.rows))
    }

    fn legend(&self, counts: &[usize]) -> LegendSwatchesSpec {
        let cells = self.layout.cells().max(1) as f64;
        let items = self
            .categories
            .iter()
            .zip(counts)
            .map(|(c, &n)| {
                let share = percent(n as f64 * 100.0 / cells, 0);
                LegendItem::solid(format!("{} {share}", c.label), c.color.color())
            })
            .collect();
        LegendSwatchesSpec::new(MarkId::lane(self.id_base, 1, 0).0, items)
            .with_columns(self.categories.len(), self.legend_column_width)
            .with_text_fill(self.text_fill.clone())
    }

    /// Generates cells and legend.
    pub fn marks(&self) -> Vec<Mark> {
        let counts = self.layout.counts(&self.categories);
        let owners = self.layout.owners_of(&counts);

        let columns = self.layout.columns.max(1);
        let pitch = self.cell + self.gap;
        let mut out = Vec::with_capacity(owners.len() + self.categories.len() * 2);
        for (i, owner) in owners.iter().enumerate() {
            let (row, column) = (i / columns, i % columns);
            let x = self.origin.x + column as f64 * pitch;
            let y = self.origin.y + row as f64 * pitch;
            let fill = owner
                .and_then(|c| self.categories.get(c))
                .map_or(self.empty_fill, |c| c.color.color());
            out.push(
                RectMarkSpec::new(
                    MarkId::cell(self.id_base, 0, row, column),
                    Rect::new(x, y, x + self.cell, y + self.cell),
                )
                .with_radius(self.corner_radius)
                .with_fill(fill)
                .mark(),
            );
        }

        if !self.categories.is_empty() {
            let legend_y = self.origin.y + self.grid_size().height + self.legend_gap;
            out.extend(
                self.legend(&counts)
                    .marks(Point::new(self.origin.x, legend_y)),
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use verdant_core::{Fill, MarkPayload};
    use verdant_palette::tokens;

    use super::*;

    fn tasks(shares: [f64; 3]) -> Vec<WaffleCategory> {
        tokens::TASK
            .iter()
            .zip(shares)
            .map(|(t, s)| WaffleCategory::new(t.name.clone(), s, t.clone()))
            .collect()
    }

    #[test]
    fn whole_percent_shares_keep_their_counts() {
        assert_eq!(apportion(&[35.0, 30.0, 35.0], 100), vec![35, 30, 35], "content creation");
        assert_eq!(apportion(&[52.0, 33.0, 15.0], 100), vec![52, 33, 15], "data analysis");
    }

    #[test]
    fn largest_remainders_receive_the_leftover_cells() {
        assert_eq!(apportion(&[1.0, 1.0, 1.0], 100), vec![34, 33, 33], "tie goes to the first");
        assert_eq!(
            apportion(&[33.3, 33.3, 33.4], 100),
            vec![33, 33, 34],
            "largest fraction wins"
        );
        assert_eq!(
            apportion(&[10.6, 20.3, 69.1], 100),
            vec![11, 20, 69],
            "one leftover cell"
        );
    }

    #[test]
    fn counts_fill_the_grid_when_display_rounding_drifts() {
        for shares in [[33.0, 33.0, 33.0], [34.0, 34.0, 33.0], [0.4, 0.4, 99.0]] {
            let counts = apportion(&shares, 100);
            assert_eq!(counts.iter().sum::<usize>(), 100, "{shares:?} -> {counts:?}");
        }
    }

    #[test]
    fn invalid_shares_count_as_zero() {
        assert_eq!(
            apportion(&[f64::NAN, -5.0, 50.0, 50.0], 100),
            vec![0, 0, 50, 50],
            "only positive shares get cells"
        );
    }

    #[test]
    fn empty_datasets_leave_every_cell_empty() {
        assert!(apportion(&[], 100).is_empty(), "no categories");
        assert_eq!(apportion(&[0.0, 0.0], 100), vec![0, 0], "all-zero shares");

        let marks = WaffleChartSpec::new(0, Point::ZERO, Vec::new()).marks();
        assert_eq!(marks.len(), 100, "cells without a legend");
        let empty = Fill::from(Color::from_rgb8(0xE8, 0xE8, 0xE5));
        assert!(
            marks
                .iter()
                .all(|m| matches!(&m.payload, MarkPayload::Rect(r) if r.fill == empty)),
            "every cell uses the empty fill"
        );
    }

    #[test]
    fn categories_fill_cells_in_order() {
        let owners = WaffleLayout::default().owners(&tasks([35.0, 30.0, 35.0]));
        assert_eq!(owners.len(), 100, "ten by ten");
        assert_eq!(owners[34], Some(0), "last automated cell");
        assert_eq!(owners[35], Some(1), "first augmented cell");
        assert_eq!(owners[99], Some(2), "manual fills the tail");
    }

    #[test]
    fn chart_wraps_rows_and_labels_the_legend() {
        let spec = WaffleChartSpec::new(0, Point::ZERO, tasks([52.0, 33.0, 15.0]));
        let marks = spec.marks();
        assert_eq!(marks.len(), 106, "100 cells plus three legend entries");
        assert_eq!(
            marks[10].payload.bounds().map(|b| (b.x0, b.y0)),
            Some((0.0, 19.0)),
            "eleventh cell starts the second row"
        );
        let labels: std::vec::Vec<&str> = marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, ["Automated 52%", "Augmented 33%", "Manual 15%"], "legend");
    }

    #[test]
    fn grid_size_excludes_the_trailing_gap() {
        let size = WaffleChartSpec::new(0, Point::ZERO, Vec::new()).grid_size();
        assert_eq!(size, Size::new(187.0, 187.0), "10 cells and 9 gaps");
    }
}
