// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Palette swatch cards.
//!
//! A card is a rounded tile filled with the token color, showing the token name and hex value
//! in the tone that stays legible on that color. The card whose value was just copied shows a
//! "Copied!" overlay.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use peniko::Color;
use verdant_core::{Mark, MarkId, TextAnchor, TextBaseline};
use verdant_palette::ColorToken;

use crate::rect_mark::RectMarkSpec;
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// A grid of swatch cards.
///
/// Ids per card `i` (see [`MarkId::lane`]): tile in lane 0, name in lane 1, hex in lane 2 and
/// hover ring in lane 4. The overlay is entries 0 and 1 of lane 3.
#[derive(Clone, Debug)]
pub struct SwatchGridSpec {
    /// Stable-id base.
    pub id_base: u64,
    /// Cards in display order.
    pub tokens: Vec<ColorToken>,
    /// Top-left corner.
    pub origin: Point,
    /// Cards per row.
    pub columns: usize,
    /// Card size.
    pub card: Size,
    /// Gap between cards.
    pub gap: f64,
    /// Card corner radius.
    pub corner_radius: f64,
    /// Index of the card showing the copy confirmation.
    pub copied: Option<usize>,
    /// Index of the card under the pointer (drawn with a border).
    pub hovered: Option<usize>,
}

impl SwatchGridSpec {
    /// Creates a single-row grid.
    pub fn new(id_base: u64, origin: Point, tokens: Vec<ColorToken>) -> Self {
        let columns = tokens.len().max(1);
        Self {
            id_base,
            tokens,
            origin,
            columns,
            card: Size::new(96.0, 72.0),
            gap: 8.0,
            corner_radius: 8.0,
            copied: None,
            hovered: None,
        }
    }

    /// Sets the number of cards per row.
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    /// Sets the card size.
    pub fn with_card(mut self, card: Size) -> Self {
        self.card = card;
        self
    }

    /// Marks `index` as just copied.
    pub fn with_copied(mut self, copied: Option<usize>) -> Self {
        self.copied = copied;
        self
    }

    /// Marks `index` as hovered.
    pub fn with_hovered(mut self, hovered: Option<usize>) -> Self {
        self.hovered = hovered;
        self
    }

    /// Card rectangle for `index`.
    pub fn card_rect(&self, index: usize) -> Rect {
        let columns = self.columns.max(1);
        let col = (index % columns) as f64;
        let row = (index / columns) as f64;
        let x = self.origin.x + col * (self.card.width + self.gap);
        let y = self.origin.y + row * (self.card.height + self.gap);
        Rect::from_origin_size((x, y), self.card)
    }

    /// Total grid size.
    pub fn size(&self) -> Size {
        let columns = self.columns.max(1).min(self.tokens.len().max(1));
        let rows = self.tokens.len().div_ceil(self.columns.max(1));
        let span = |n: usize, edge: f64| {
            if n == 0 {
                0.0
            } else {
                n as f64 * edge + (n - 1) as f64 * self.gap
            }
        };
        if self.tokens.is_empty() {
            return Size::ZERO;
        }
        Size::new(span(columns, self.card.width), span(rows, self.card.height))
    }

    /// Index of the card under `pt`.
    pub fn hit_test(&self, pt: Point) -> Option<usize> {
        (0..self.tokens.len()).find(|&i| self.card_rect(i).contains(pt))
    }

    /// Generates card marks and the copy overlay.
    pub fn marks(&self) -> Vec<Mark> {
        let mut out = Vec::with_capacity(self.tokens.len() * 3 + 2);
        for (i, token) in self.tokens.iter().enumerate() {
            let rect = self.card_rect(i);
            let tone = token.text_tone().color();

            if self.hovered == Some(i) {
                out.push(
                    RectMarkSpec::new(
                        MarkId::lane(self.id_base, 4, i),
                        rect.inflate(2.0, 2.0),
                    )
                    .with_radius(self.corner_radius + 2.0)
                    .with_fill(Color::from_rgb8(0x4A, 0x75, 0x61))
                    .with_z_index(z_order::BACKGROUND)
                    .mark(),
                );
            }
            out.push(
                RectMarkSpec::new(MarkId::lane(self.id_base, 0, i), rect)
                    .with_radius(self.corner_radius)
                    .with_fill(token.color())
                    .mark(),
            );
            out.push(
                TextMarkSpec::new(
                    MarkId::lane(self.id_base, 1, i),
                    Point::new(rect.x0 + 10.0, rect.y1 - 24.0),
                    token.name.clone(),
                )
                .with_font_size(12.0)
                .with_font_weight(600)
                .with_baseline(TextBaseline::Alphabetic)
                .with_fill(tone)
                .mark(),
            );
            out.push(
                TextMarkSpec::new(
                    MarkId::lane(self.id_base, 2, i),
                    Point::new(rect.x0 + 10.0, rect.y1 - 10.0),
                    token.hex.clone(),
                )
                .with_font_size(10.0)
                .with_baseline(TextBaseline::Alphabetic)
                .with_fill(tone)
                .mark(),
            );
        }

        if let Some(i) = self.copied.filter(|&i| i < self.tokens.len()) {
            let rect = self.card_rect(i);
            out.push(
                RectMarkSpec::new(MarkId::lane(self.id_base, 3, 0), rect)
                    .with_radius(self.corner_radius)
                    .with_fill(Color::from_rgba8(0, 0, 0, 204))
                    .with_z_index(z_order::OVERLAY)
                    .mark(),
            );
            out.push(
                TextMarkSpec::new(MarkId::lane(self.id_base, 3, 1), rect.center(), "Copied!")
                    .with_font_size(12.0)
                    .with_font_weight(600)
                    .with_anchor(TextAnchor::Middle)
                    .with_fill(Color::WHITE)
                    .with_z_index(z_order::OVERLAY + 1)
                    .mark(),
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use verdant_core::MarkPayload;
    use verdant_palette::{TextTone, tokens};

    use super::*;

    fn primary() -> SwatchGridSpec {
        SwatchGridSpec::new(0, Point::ZERO, tokens::PRIMARY.to_vec()).with_columns(5)
    }

    fn text_fill(marks: &[Mark], id: MarkId) -> Option<peniko::Brush> {
        marks.iter().find_map(|m| match &m.payload {
            MarkPayload::Text(t) if m.id == id => Some(t.fill.clone()),
            _ => None,
        })
    }

    #[test]
    fn label_tone_follows_luma() {
        let marks = primary().marks();
        assert_eq!(
            text_fill(&marks, MarkId::lane(0, 1, 0)),
            Some(peniko::Brush::from(TextTone::Dark.color())),
            "50 is light, so dark text"
        );
        assert_eq!(
            text_fill(&marks, MarkId::lane(0, 1, 8)),
            Some(peniko::Brush::from(TextTone::Light.color())),
            "800 is dark, so light text"
        );
    }

    #[test]
    fn grid_wraps_into_rows() {
        let grid = primary();
        assert_eq!(grid.card_rect(5).y0, 80.0, "second row");
        assert_eq!(grid.size(), Size::new(512.0, 152.0), "5 x 2 cards");
        assert_eq!(grid.hit_test(Point::new(110.0, 10.0)), Some(1), "second card");
        assert_eq!(grid.hit_test(Point::new(100.0, 10.0)), None, "gap");
    }

    #[test]
    fn large_grids_keep_distinct_mark_ids() {
        let many = (0..1_200).map(|_| ColorToken::new("x", "#11362A")).collect();
        let marks = SwatchGridSpec::new(0, Point::ZERO, many)
            .with_columns(40)
            .with_copied(Some(1_100))
            .marks();
        let ids: std::collections::BTreeSet<MarkId> = marks.iter().map(|m| m.id).collect();
        assert_eq!(marks.len(), 3_602, "three marks per card plus the overlay");
        assert_eq!(ids.len(), marks.len(), "tiles never collide with names or overlay");
    }

    #[test]
    fn overlay_only_for_the_copied_card() {
        let base = primary().marks().len();
        let copied = primary().with_copied(Some(3)).marks();
        assert_eq!(copied.len(), base + 2, "overlay and text");
        let overlay = copied.iter().any(|m| {
            matches!(&m.payload, MarkPayload::Text(t) if t.text == "Copied!")
        });
        assert!(overlay, "confirmation text");
        assert_eq!(
            primary().with_copied(Some(99)).marks().len(),
            base,
            "out of range index is ignored"
        );
    }
}
