// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value-to-extent scales.
//!
//! Bars in the catalogue are sized relative to the peak of their own dataset: the domain
//! maximum is the largest value currently shown, never a fixed constant. That keeps every
//! chart legible regardless of absolute magnitude, at the cost of axes not being comparable
//! between charts.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Linear mapping of `value` into `[0, range_max]`: `(value / domain_max) * range_max`.
///
/// Not finite when `domain_max == 0`. Use [`ExtentScale`] to get the empty-chart guard.
pub fn to_extent(value: f64, domain_max: f64, range_max: f64) -> f64 {
    (value / domain_max) * range_max
}

/// A [`to_extent`] mapping whose domain is the peak of the active dataset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtentScale {
    domain_max: f64,
    range_max: f64,
}

impl ExtentScale {
    /// Creates a scale with an explicit domain maximum.
    pub fn new(domain_max: f64, range_max: f64) -> Self {
        Self {
            domain_max,
            range_max,
        }
    }

    /// Creates a scale whose domain maximum is the largest finite value in `values`.
    ///
    /// An empty, all-zero or all-negative dataset yields an empty scale.
    pub fn fit(values: impl IntoIterator<Item = f64>, range_max: f64) -> Self {
        let domain_max = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);
        let scale = Self::new(domain_max, range_max);
        if scale.is_empty() {
            log::debug!("extent scale fitted to an empty or all-zero dataset");
        }
        scale
    }

    /// Whether the domain is degenerate; such a scale maps everything to `0`.
    pub fn is_empty(&self) -> bool {
        !(self.domain_max.is_finite() && self.domain_max > 0.0)
    }

    /// The domain maximum.
    pub fn domain_max(&self) -> f64 {
        self.domain_max
    }

    /// The range maximum.
    pub fn range_max(&self) -> f64 {
        self.range_max
    }

    /// Maps a value to an extent; `0` for empty scales and non-finite values.
    pub fn map(&self, value: f64) -> f64 {
        if self.is_empty() || !value.is_finite() {
            return 0.0;
        }
        to_extent(value, self.domain_max, self.range_max)
    }

    /// Maps a value to a fraction of the range (`1.0` at the dataset peak).
    pub fn fraction(&self, value: f64) -> f64 {
        if self.is_empty() || !value.is_finite() {
            return 0.0;
        }
        value / self.domain_max
    }
}

/// A linear mapping from a continuous domain to a continuous range (used for axis ticks).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// The configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Round-number tick values covering the domain, restricted to it.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        let eps = (hi - lo).abs() * 1e-9;
        nice_ticks(lo, hi, count)
            .into_iter()
            .filter(|t| *t >= lo - eps && *t <= hi + eps)
            .collect()
    }
}

fn nice_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    let step = nice_step((max - min) / count as f64);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;

    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f.min(10_000.0) as u64
        }
    } else {
        0
    };
    (0..=n).map(|i| start + step * i as f64).collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// A discrete band scale placing categories along an axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBand {
    range: (f64, f64),
    count: usize,
    padding_inner: f64,
    padding_outer: f64,
}

impl ScaleBand {
    /// Creates a band scale covering `count` bands over `range`.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding_inner: 0.1,
            padding_outer: 0.1,
        }
    }

    /// Sets inner and outer padding in band units.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.max(0.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// The band width.
    pub fn band_width(&self) -> f64 {
        let (r0, r1) = self.range;
        let n = self.count as f64;
        if n <= 0.0 {
            return 0.0;
        }
        let span = (r1 - r0).abs();
        let denom = n + self.padding_inner * (n - 1.0) + 2.0 * self.padding_outer;
        if denom == 0.0 { 0.0 } else { span / denom }
    }

    /// Number of bands.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Start position of the band at `index`.
    pub fn x(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let bw = self.band_width();
        let step = bw * (1.0 + self.padding_inner);
        let start = if r1 >= r0 { r0 } else { r1 };
        start + bw * self.padding_outer + step * index as f64
    }

    /// Center position of the band at `index`.
    pub fn center(&self, index: usize) -> f64 {
        self.x(index) + self.band_width() * 0.5
    }
}
