// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Squarified treemaps.
//!
//! Tiles are laid out in rows along the shorter side of the remaining space, and a row is
//! closed as soon as adding the next tile would worsen its most elongated aspect ratio.

extern crate alloc;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Color;
use verdant_core::{Mark, MarkId, TextBaseline};
use verdant_palette::ColorToken;

use crate::format::percent;
use crate::rect_mark::RectMarkSpec;
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// Computes squarified tiles for `values` inside `bounds`.
///
/// Tiles are returned in input order; larger values are placed first. Non-finite and
/// non-positive values get `None`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreemapLayout {
    /// Area to fill.
    pub bounds: Rect,
}

impl TreemapLayout {
    /// Creates a layout filling `bounds`.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds: bounds.abs(),
        }
    }

    /// One tile per value.
    pub fn tiles(&self, values: &[f64]) -> Vec<Option<Rect>> {
        let mut tiles = vec![None; values.len()];
        let mut order: Vec<usize> = (0..values.len())
            .filter(|&i| values[i].is_finite() && values[i] > 0.0)
            .collect();
        let total: f64 = order.iter().map(|&i| values[i]).sum();
        if order.is_empty() || self.bounds.area() <= 0.0 {
            return tiles;
        }
        order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

        let scale = self.bounds.area() / total;
        let areas: Vec<(usize, f64)> = order.iter().map(|&i| (i, values[i] * scale)).collect();

        let mut free = self.bounds;
        let mut start = 0;
        while start < areas.len() {
            let side = free.width().min(free.height());
            let mut end = start + 1;
            while end < areas.len()
                && worst(&areas[start..=end], side) <= worst(&areas[start..end], side)
            {
                end += 1;
            }
            free = place_row(&areas[start..end], free, &mut tiles);
            start = end;
        }
        tiles
    }
}

/// The most elongated aspect ratio in a row laid along a side of length `side`.
fn worst(row: &[(usize, f64)], side: f64) -> f64 {
    let sum: f64 = row.iter().map(|(_, a)| a).sum();
    if sum <= 0.0 || side <= 0.0 {
        return f64::INFINITY;
    }
    let (min, max) = row
        .iter()
        .fold((f64::INFINITY, 0.0_f64), |(lo, hi), &(_, a)| (lo.min(a), hi.max(a)));
    let side2 = side * side;
    let sum2 = sum * sum;
    (side2 * max / sum2).max(sum2 / (side2 * min))
}

/// Lays `row` along the shorter side of `free` and returns the space left over.
fn place_row(row: &[(usize, f64)], free: Rect, tiles: &mut [Option<Rect>]) -> Rect {
    let sum: f64 = row.iter().map(|(_, a)| a).sum();
    if free.width() >= free.height() {
        let w = if free.height() > 0.0 { sum / free.height() } else { 0.0 };
        let mut y = free.y0;
        for &(i, a) in row {
            let h = if w > 0.0 { a / w } else { 0.0 };
            tiles[i] = Some(Rect::new(free.x0, y, free.x0 + w, y + h));
            y += h;
        }
        Rect::new((free.x0 + w).min(free.x1), free.y0, free.x1, free.y1)
    } else {
        let h = if free.width() > 0.0 { sum / free.width() } else { 0.0 };
        let mut x = free.x0;
        for &(i, a) in row {
            let w = if h > 0.0 { a / h } else { 0.0 };
            tiles[i] = Some(Rect::new(x, free.y0, x + w, free.y0 + h));
            x += w;
        }
        Rect::new(free.x0, (free.y0 + h).min(free.y1), free.x1, free.y1)
    }
}

/// One category of a treemap.
#[derive(Clone, Debug, PartialEq)]
pub struct TreemapItem {
    /// Category name.
    pub label: String,
    /// Share of the whole, in percent.
    pub percent: f64,
    /// Tile color.
    pub color: ColorToken,
}

impl TreemapItem {
    /// Creates an item.
    pub fn new(label: impl Into<String>, percent: f64, color: ColorToken) -> Self {
        Self {
            label: label.into(),
            percent,
            color,
        }
    }
}

/// A labeled treemap.
///
/// Tile `i` is entry `i` of lane 0, its name lane 1 and its share lane 2.
#[derive(Clone, Debug)]
pub struct TreemapSpec {
    /// Stable-id base.
    pub id_base: u64,
    /// Area to fill.
    pub bounds: Rect,
    /// Items in input order.
    pub items: Vec<TreemapItem>,
    /// Gap between tiles.
    pub gap: f64,
    /// Tile corner radius.
    pub corner_radius: f64,
    /// Inset of the labels from the tile edges.
    pub padding: f64,
    /// Label font size.
    pub font_size: f64,
}

impl TreemapSpec {
    /// Creates a treemap with 4 px gaps and 8 px corners.
    pub fn new(id_base: u64, bounds: Rect, items: Vec<TreemapItem>) -> Self {
        Self {
            id_base,
            bounds,
            items,
            gap: 4.0,
            corner_radius: 8.0,
            padding: 10.0,
            font_size: 11.0,
        }
    }

    /// Generates tiles, names and shares.
    pub fn marks(&self) -> Vec<Mark> {
        let values: Vec<f64> = self.items.iter().map(|i| i.percent).collect();
        let tiles = TreemapLayout::new(self.bounds).tiles(&values);
        let half = self.gap * 0.5;
        let name_fill = Color::WHITE;
        let share_fill = Color::from_rgba8(0xFF, 0xFF, 0xFF, 0xB3);

        let mut out = Vec::with_capacity(self.items.len() * 3);
        for (i, (item, tile)) in self.items.iter().zip(tiles).enumerate() {
            let Some(tile) = tile else {
                continue;
            };
            let tile = tile.inset(-half);
            if tile.width() <= 0.0 || tile.height() <= 0.0 {
                continue;
            }
            out.push(
                RectMarkSpec::new(MarkId::lane(self.id_base, 0, i), tile)
                    .with_radius(self.corner_radius)
                    .with_fill(item.color.color())
                    .mark(),
            );
            let x = tile.x0 + self.padding;
            out.push(
                TextMarkSpec::new(
                    MarkId::lane(self.id_base, 1, i),
                    Point::new(x, tile.y0 + self.padding),
                    item.label.clone(),
                )
                .with_font_size(self.font_size)
                .with_font_weight(500)
                .with_baseline(TextBaseline::Hanging)
                .with_fill(name_fill)
                .with_z_index(z_order::SERIES_LABELS)
                .mark(),
            );
            out.push(
                TextMarkSpec::new(
                    MarkId::lane(self.id_base, 2, i),
                    Point::new(x, tile.y1 - self.padding),
                    percent(item.percent, 1),
                )
                .with_font_size(self.font_size)
                .with_baseline(TextBaseline::Alphabetic)
                .with_fill(share_fill)
                .with_z_index(z_order::SERIES_LABELS)
                .mark(),
            );
        }
        out
    }
}
