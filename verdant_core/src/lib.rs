// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mark model for the Verdant design-system catalogue.
//!
//! Every chart and swatch layout in Verdant lowers its geometry to a flat list of [`Mark`]s:
//! - **Rects** (with per-corner radii and a solid or striped [`Fill`]),
//! - **Text** (unshaped strings with anchor/baseline),
//! - **Paths** (rules and leader lines), and
//! - **Rings** (stroke-dashed circles used to draw donut arcs).
//!
//! A [`Scene`] keeps the marks of the previous frame and turns each new frame into
//! [`MarkDiff`]s, so a renderer only touches marks whose payload actually changed (for
//! example the single bar that just became hovered).

#![no_std]

extern crate alloc;

mod fill;
mod mark;
mod scene;

pub use fill::{Fill, StripePattern};
pub use mark::{
    Mark, MarkId, MarkKind, MarkPayload, PathPayload, RectPayload, RingPayload, TextAnchor,
    TextBaseline, TextPayload,
};
pub use scene::{MarkDiff, Scene};
