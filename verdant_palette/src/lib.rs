// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color tokens and palette ramps for the Verdant catalogue.
//!
//! - [`Rgb8`] parses `#RRGGBB` tokens and computes BT.601 luma.
//! - [`is_light`] / [`TextTone`] pick a legible foreground for any swatch.
//! - [`PaletteRamp`] keeps tokens in display order; [`SequentialBins`] maps values onto it.
//! - [`tokens`] holds the catalogue's literal token tables.

#![no_std]

extern crate alloc;

mod color;
mod ramp;
pub mod tokens;

pub use color::{LUMA_THRESHOLD, ParseHexError, Rgb8, TextTone, is_light};
pub use ramp::{ColorToken, PaletteRamp, SequentialBins};
