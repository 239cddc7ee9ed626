// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart geometry for the Verdant design-system catalogue.
//!
//! Every chart here is a pure function from data to [`verdant_core::Mark`]s:
//! - **Scales** ([`to_extent`], [`ExtentScale`], [`ScaleLinear`], [`ScaleBand`]) map raw values
//!   onto pixels.
//! - **Layouts** ([`StackedBarLayout`], [`ComparisonLayout`], [`DonutLayout`],
//!   [`BarListLayout`], [`WaffleLayout`], [`TreemapLayout`]) compute geometry without
//!   allocating marks, so they can be tested directly.
//! - **Chart specs** (`*ChartSpec`, [`BarListSpec`], [`SwatchGridSpec`], ...) lower that
//!   geometry to marks with stable ids, so a [`verdant_core::Scene`] only reports the marks
//!   a hover or a copy actually touched.
//!
//! Text shaping is out of scope; text marks store unshaped strings and sizes are estimated
//! through a [`TextMeasurer`].

#![no_std]

extern crate alloc;

mod bar_list;
#[cfg(test)]
mod chart_tests;
mod comparison;
mod donut;
mod donut_labels;
#[cfg(not(feature = "std"))]
mod float;
pub mod format;
mod legend;
mod measure;
mod rect_mark;
mod rule_mark;
mod scale;
mod sequential;
mod stacked_bar;
mod swatch;
mod text_mark;
mod treemap;
mod waffle;
mod z_order;

pub use bar_list::{
    BarDatum, BarListLayout, BarListPalette, BarListSpec, BarListStyle, BarRow, Trend,
};
pub use comparison::{
    ComparisonBar, ComparisonChartSpec, ComparisonGroup, ComparisonLayout, ComparisonPair,
    ComparisonPalette, ComparisonStyle, Orientation, Series,
};
pub use donut::{
    CalloutStyle, DonutArc, DonutChartSpec, DonutLayout, DonutSegment, polar,
};
pub use donut_labels::{DonutLabel, DonutLabels, FixedLabel, RadialLabels};
pub use legend::{LegendItem, LegendShape, LegendSwatches, LegendSwatchesSpec};
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use rect_mark::RectMarkSpec;
pub use rule_mark::RuleMarkSpec;
pub use scale::{ExtentScale, ScaleBand, ScaleLinear, to_extent};
pub use sequential::{ColumnBarsSpec, HeatmapSpec, IndexScaleSpec};
pub use stacked_bar::{
    DEFAULT_LABEL_THRESHOLD, SegmentGeometry, StackSegment, StackedBar, StackedBarChartSpec,
    StackedBarLayout, ValueFormat,
};
pub use swatch::SwatchGridSpec;
pub use text_mark::TextMarkSpec;
pub use treemap::{TreemapItem, TreemapLayout, TreemapSpec};
pub use waffle::{WaffleCategory, WaffleChartSpec, WaffleLayout, apportion};
pub use z_order::*;
