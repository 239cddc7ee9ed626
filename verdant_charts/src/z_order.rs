// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint-order conventions for chart-generated marks.
//!
//! Renderers sort by `(z_index, MarkId)`, so equal layers fall back to id order.

/// Card and track backgrounds.
pub const BACKGROUND: i32 = -100;
/// Axis domain lines and gridlines.
pub const AXIS_RULES: i32 = -50;

/// Filled series marks (bars, segments, swatches).
pub const SERIES_FILL: i32 = 0;
/// Donut rings.
pub const SERIES_RINGS: i32 = 5;
/// Labels drawn on top of series fills.
pub const SERIES_LABELS: i32 = 20;

/// Leader lines from small slices to their callouts.
pub const LEADER_LINES: i32 = 30;
/// Axis tick labels and category names.
pub const AXIS_LABELS: i32 = 40;
/// Callout text at the end of leader lines.
pub const CALLOUT_LABELS: i32 = 50;

/// Legend swatches.
pub const LEGEND_SWATCHES: i32 = 60;
/// Legend labels.
pub const LEGEND_LABELS: i32 = 70;

/// Hover tooltips.
pub const TOOLTIP: i32 = 90;
/// Transient overlays ("Copied!").
pub const OVERLAY: i32 = 100;
