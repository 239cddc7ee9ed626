// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-point display strings for chart labels.
//!
//! Everything here is derived from a raw number at render time; no formatted string is
//! ever stored next to the value it describes.

extern crate alloc;

use alloc::format;
use alloc::string::String;

/// A display magnitude: divisor plus suffix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Magnitude {
    /// Raw units.
    Units,
    /// Thousands (`K`).
    Thousands,
    /// Millions (`M`).
    Millions,
}

impl Magnitude {
    fn divisor(self) -> f64 {
        match self {
            Self::Units => 1.0,
            Self::Thousands => 1_000.0,
            Self::Millions => 1_000_000.0,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Self::Units => "",
            Self::Thousands => "K",
            Self::Millions => "M",
        }
    }
}

/// `value` in `magnitude` with at most `max_decimals` digits, trailing zeros dropped.
///
/// `202_780 → "202.78K"`, `2_500 → "2.5K"`, `140 → "0.14K"`.
pub fn compact(value: f64, magnitude: Magnitude, max_decimals: usize) -> String {
    let s = format!("{:.*}", max_decimals, value / magnitude.divisor());
    let s = trim_fraction(&s);
    format!("{s}{}", magnitude.suffix())
}

/// `value` in `magnitude` with exactly `decimals` digits (`239_130 → "239.1K"`).
pub fn fixed(value: f64, magnitude: Magnitude, decimals: usize) -> String {
    format!(
        "{:.*}{}",
        decimals,
        value / magnitude.divisor(),
        magnitude.suffix()
    )
}

/// A percentage with exactly `decimals` digits (`84.79 → "84.8%"`).
pub fn percent(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}%")
}

/// A signed percentage change (`12.3 → "+12.3%"`, `-2.1 → "-2.1%"`).
pub fn signed_percent(change: f64, decimals: usize) -> String {
    if change >= 0.0 {
        format!("+{change:.decimals$}%")
    } else {
        format!("{change:.decimals$}%")
    }
}

/// A whole number with comma thousands separators (`202_780 → "202,780"`).
pub fn grouped(value: f64) -> String {
    let digits = format!("{value:.0}");
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits.as_str()),
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push_str(sign);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn trim_fraction(s: &str) -> &str {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.')
}
