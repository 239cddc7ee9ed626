// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The catalogue's token tables.
//!
//! Ramps run lightest (index 0) to darkest. Usage notes are shown on the large cards.

use crate::ramp::{ColorToken, PaletteRamp};

const fn t(name: &'static str, hex: &'static str) -> ColorToken {
    ColorToken::from_static(name, hex)
}

const fn u(name: &'static str, hex: &'static str, usage: &'static str) -> ColorToken {
    ColorToken::with_static_usage(name, hex, usage)
}

/// Primary brand ramp (forest green); step `800` is the brand primary.
pub const PRIMARY: &[ColorToken] = &[
    t("50", "#F2F5F4"),
    t("100", "#E0E7E4"),
    t("200", "#C1CFC9"),
    t("300", "#9AB3A9"),
    t("400", "#6E9484"),
    t("500", "#4A7561"),
    t("600", "#385C4B"),
    t("700", "#2A4639"),
    t("800", "#11362A"),
    t("900", "#0B241C"),
];

/// Sage / olive accent ramp.
pub const SAGE: &[ColorToken] = &[
    t("50", "#F4F6F0"),
    t("100", "#E8ECDF"),
    t("200", "#D5DCCA"),
    t("300", "#BDC8AB"),
    t("400", "#A3B288"),
    t("500", "#889A68"),
    t("600", "#6B7A50"),
    t("700", "#525D3E"),
    t("800", "#3A422C"),
    t("900", "#24291B"),
];

/// Warm, cream-tinted neutral grays.
pub const NEUTRAL: &[ColorToken] = &[
    t("50", "#FAFAF9"),
    t("100", "#F5F5F3"),
    t("200", "#E8E8E5"),
    t("300", "#D6D6D2"),
    t("400", "#A8A8A3"),
    t("500", "#737370"),
    t("600", "#5C5C59"),
    t("700", "#434340"),
    t("800", "#2B2B29"),
    t("900", "#1A1A18"),
];

/// Core UI colors.
pub const CORE: &[ColorToken] = &[
    u("Primary", "#11362A", "Buttons, nav, key actions"),
    u("Background", "#F5F5F3", "Page background"),
    u("Surface", "#FFFFFF", "Cards, panels, modals"),
    u("Border", "#E8E8E5", "Dividers, card borders"),
];

/// Text colors.
pub const TEXT: &[ColorToken] = &[
    u("Primary", "#0B241C", "Headings, body text"),
    u("Secondary", "#2A4639", "Subheads, supporting text"),
    u("Tertiary", "#4A7561", "Captions, labels"),
    u("Muted", "#9AB3A9", "Disabled, placeholders"),
];

/// Engagement / performance status levels, low to high.
pub const STATUS: &[ColorToken] = &[
    u("Low", "#F4F6F0", "Below average performance"),
    u("Average", "#E8ECDF", "Meeting baseline"),
    u("Good", "#BDC8AB", "Above average"),
    u("High", "#889A68", "Strong performance"),
    u("Excellent", "#525D3E", "Top performing"),
];

/// Ten-step sequential ramp for data visualization.
pub const SEQUENTIAL: &[ColorToken] = &[
    t("1", "#F4F6F0"),
    t("2", "#E8ECDF"),
    t("3", "#D5DCCA"),
    t("4", "#BDC8AB"),
    t("5", "#A3B288"),
    t("6", "#889A68"),
    t("7", "#6B7A50"),
    t("8", "#525D3E"),
    t("9", "#3A422C"),
    t("10", "#11362A"),
];

/// Semantic feedback colors.
pub const SEMANTIC: &[ColorToken] = &[
    u("Success", "#385C4B", "Confirmations, positive"),
    u("Warning", "#A3824A", "Caution, attention"),
    u("Error", "#8B4049", "Errors, destructive"),
    u("Info", "#4A6B7C", "Informational"),
];

/// Categorical palette for infographics and treemaps.
pub const CATEGORICAL: &[ColorToken] = &[
    u("Teal", "#2D6A6A", "Computer & Technology"),
    u("Sage", "#7A9A7A", "Education & Research"),
    u("Lavender", "#8B7BA8", "Arts & Entertainment"),
    u("Rose", "#C4A0A0", "Community & Social"),
    u("Slate", "#6B7D8A", "Business & Finance"),
    u("Sand", "#C4B49A", "Agriculture & Resources"),
    u("Coral", "#C49A8B", "Healthcare & Services"),
    u("Mauve", "#9A7A8B", "Administrative"),
];

/// Extended categorical palette for large datasets.
pub const EXTENDED_CATEGORICAL: &[ColorToken] = &[
    t("Cat-01", "#2D6A6A"),
    t("Cat-02", "#7A9A7A"),
    t("Cat-03", "#8B7BA8"),
    t("Cat-04", "#C4A0A0"),
    t("Cat-05", "#6B7D8A"),
    t("Cat-06", "#C4B49A"),
    t("Cat-07", "#C49A8B"),
    t("Cat-08", "#9A7A8B"),
    t("Cat-09", "#5A8A7A"),
    t("Cat-10", "#A89A6B"),
    t("Cat-11", "#7A8BA8"),
    t("Cat-12", "#B8A090"),
];

/// Task automation classes (waffle charts).
pub const TASK: &[ColorToken] = &[
    u("Automated", "#5A8A6A", "Fully automated tasks"),
    u("Augmented", "#8B7BA8", "Human-AI collaboration"),
    u("Manual", "#D6D6D2", "Human-only tasks"),
];

/// Eight-step index scale for choropleth strips, lightest (lowest quartile) first.
pub const INDEX: &[ColorToken] = &[
    t("1", "#E8EEEB"),
    t("2", "#C5D5CC"),
    t("3", "#9EBAA9"),
    t("4", "#779F87"),
    t("5", "#5A8A6D"),
    t("6", "#3D7553"),
    t("7", "#2B5C40"),
    t("8", "#11362A"),
];

/// Every table as a named ramp, in catalogue order.
pub const RAMPS: &[PaletteRamp] = &[
    PaletteRamp::from_static("core", CORE),
    PaletteRamp::from_static("text", TEXT),
    PaletteRamp::from_static("primary", PRIMARY),
    PaletteRamp::from_static("sage", SAGE),
    PaletteRamp::from_static("neutral", NEUTRAL),
    PaletteRamp::from_static("status", STATUS),
    PaletteRamp::from_static("sequential", SEQUENTIAL),
    PaletteRamp::from_static("semantic", SEMANTIC),
    PaletteRamp::from_static("categorical", CATEGORICAL),
    PaletteRamp::from_static("extended", EXTENDED_CATEGORICAL),
    PaletteRamp::from_static("task", TASK),
    PaletteRamp::from_static("index", INDEX),
];

/// Returns the ramp called `name` (ASCII case-insensitive).
pub fn ramp(name: &str) -> Option<&'static PaletteRamp> {
    RAMPS.iter().find(|r| r.name.eq_ignore_ascii_case(name))
}

/// Looks up a token by `"ramp/name"` (e.g. `"primary/800"`, `"core/surface"`).
pub fn lookup(path: &str) -> Option<&'static ColorToken> {
    let (ramp_name, token_name) = path.split_once('/')?;
    ramp(ramp_name)?.find(token_name)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn every_table_token_parses() {
        for ramp in RAMPS {
            for token in ramp.tokens() {
                assert!(
                    token.rgb().is_ok(),
                    "{}/{} has invalid hex {}",
                    ramp.name,
                    token.name,
                    token.hex
                );
            }
        }
    }

    #[test]
    fn brand_ramps_run_light_to_dark() {
        for name in ["primary", "sage", "neutral", "sequential", "index"] {
            let ramp = ramp(name).expect("known ramp");
            let lumas: std::vec::Vec<f64> = ramp
                .tokens()
                .iter()
                .map(|t| t.rgb().expect("valid hex").luma())
                .collect();
            assert!(
                lumas.windows(2).all(|w| w[0] > w[1]),
                "{name} should darken monotonically: {lumas:?}"
            );
        }
    }

    #[test]
    fn lookup_resolves_paths() {
        assert_eq!(lookup("primary/800").map(|t| &*t.hex), Some("#11362A"), "ramp step");
        assert_eq!(lookup("CORE/Surface").map(|t| &*t.hex), Some("#FFFFFF"), "core card");
        assert!(lookup("primary").is_none(), "missing separator");
        assert!(lookup("nope/800").is_none(), "unknown ramp");
    }
}
