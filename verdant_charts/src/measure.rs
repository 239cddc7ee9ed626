// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks.
//!
//! Shaping happens downstream; layout only needs rough extents to size legends, tooltips
//! and view boxes.

use kurbo::Size;

/// Measures a single line of text.
pub trait TextMeasurer {
    /// Extent of `text` at `font_size`, in mark coordinates.
    fn measure(&self, text: &str, font_size: f64) -> Size;
}

/// Fixed-advance estimate: every glyph is `glyph_width` em wide and lines are 1em tall.
#[derive(Clone, Copy, Debug)]
pub struct HeuristicTextMeasurer {
    /// Average advance in em.
    pub glyph_width: f64,
}

impl HeuristicTextMeasurer {
    /// Sets the average glyph advance (in em).
    pub fn with_glyph_width(mut self, glyph_width: f64) -> Self {
        self.glyph_width = glyph_width.max(0.0);
        self
    }
}

impl Default for HeuristicTextMeasurer {
    fn default() -> Self {
        Self { glyph_width: 0.6 }
    }
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> Size {
        let width = self.glyph_width * font_size * text.chars().count() as f64;
        Size::new(width, font_size)
    }
}
