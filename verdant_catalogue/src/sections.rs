// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Catalogue sections: literal datasets lowered to marks and rendered to SVG.

use kurbo::{Point, Rect};
use verdant_charts::{
    BarDatum, BarListSpec, BarListStyle, ColumnBarsSpec, ComparisonChartSpec, ComparisonGroup,
    ComparisonLayout, ComparisonPair, ComparisonPalette, ComparisonStyle, DonutChartSpec,
    DonutLabels, DonutSegment, HeatmapSpec, HeuristicTextMeasurer, IndexScaleSpec, LegendItem,
    LegendShape, LegendSwatchesSpec, Orientation, Series, StackSegment, StackedBar,
    StackedBarChartSpec, SwatchGridSpec, TreemapItem, TreemapSpec, Trend, WaffleCategory,
    WaffleChartSpec,
    format::{Magnitude, compact},
};
use verdant_core::{Mark, Scene};
use verdant_interact::HoverTracker;
use verdant_palette::{ColorToken, PaletteRamp, tokens};

use crate::html::HtmlSection;
use crate::svg::SvgScene;

/// Knobs taken from the command line.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RenderOptions {
    pub(crate) stripes: bool,
    pub(crate) label_threshold: f64,
    pub(crate) hover: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            stripes: false,
            label_threshold: verdant_charts::DEFAULT_LABEL_THRESHOLD,
            hover: None,
        }
    }
}

/// Ramp name, section title and description, in catalogue order.
const RAMP_SECTIONS: &[(&str, &str, &str)] = &[
    ("core", "Core", "Primary action, page background and surface colors."),
    ("text", "Text", "Foreground colors for headings, body copy and captions."),
    ("primary", "Primary", "Forest green brand ramp; 800 is the brand primary."),
    ("sage", "Sage", "Olive accent ramp for secondary UI and data."),
    ("neutral", "Neutral", "Warm grays for borders, dividers and disabled states."),
    ("status", "Status", "Performance tiers from low to excellent."),
    ("sequential", "Sequential", "Ordered data scale for heatmaps and ranked values."),
    ("semantic", "Semantic", "Feedback colors for success, warning, error and info."),
    ("categorical", "Categorical", "Distinct hues for unordered categories."),
    ("extended", "Extended categorical", "Twelve hues for dense category sets."),
    ("task", "Task automation", "Automated, augmented and manual task classes."),
    ("index", "Index scale", "Eight steps from the bottom to the top quartile of an index."),
];

/// Offset between a chart's id base and its legend's; lanes stay below bit 48.
const LEGEND: u64 = 1 << 48;

/// Renders one section; `slug` keeps its `<defs>` ids apart from other sections'.
fn render(marks: Vec<Mark>, view_box: Option<Rect>, slug: &str) -> String {
    let mut scene = Scene::new();
    let diffs = scene.tick(marks);
    let mut svg = SvgScene::default();
    svg.set_id_prefix(slug);
    if let Some(view_box) = view_box {
        svg.set_view_box(view_box);
    }
    svg.apply_diffs(&diffs);
    log::debug!("rendered {} marks", svg.len());
    svg.to_svg_string()
}

fn token(name: &'static str, hex: &'static str) -> ColorToken {
    ColorToken::from_static(name, hex)
}

/// Builds every section.
pub(crate) fn build(opts: &RenderOptions) -> Vec<HtmlSection> {
    let mut sections: Vec<HtmlSection> = RAMP_SECTIONS
        .iter()
        .filter_map(|&(name, title, description)| {
            let Some(ramp) = tokens::ramp(name) else {
                log::warn!("no ramp named {name}");
                return None;
            };
            Some(palette_section(ramp, title, description))
        })
        .collect();

    let mut hover = HoverTracker::new();
    if let Some(i) = opts.hover {
        if i >= engagement().len() {
            log::warn!("hover index {i} is past the last row; nothing is highlighted");
        }
        hover.enter(i);
    }

    sections.extend([
        stacked_section(opts.label_threshold),
        bar_list_section(hover.hovered()),
        table_bars_section(hover.hovered()),
        duotone_section(opts.stripes),
        grouped_section(opts.stripes),
        heatmap_section(),
        reach_section(),
        donut_section(
            DonutLabels::radial(),
            "Traffic sources: radial callouts",
            "donut-radial",
        ),
        donut_section(
            fixed_traffic_labels(),
            "Traffic sources: hand-placed callouts",
            "donut-fixed",
        ),
        waffle_section(
            "Content Creation Tasks",
            "content-waffle",
            [35.0, 30.0, 35.0],
        ),
        waffle_section("Data Analysis Tasks", "analysis-waffle", [52.0, 33.0, 15.0]),
        index_scale_section(),
        treemap_section(),
    ]);
    sections
}

fn palette_section(
    ramp: &PaletteRamp,
    title: &'static str,
    description: &'static str,
) -> HtmlSection {
    let grid =
        SwatchGridSpec::new(0x100_000, Point::ZERO, ramp.tokens().to_vec()).with_columns(6);
    HtmlSection {
        title,
        description,
        svg: render(grid.marks(), None, &ramp.name),
    }
}

fn engagement_bars() -> Vec<StackedBar> {
    let dark = || token("800", "#11362A");
    let light = || token("100", "#E8ECDF");
    vec![
        StackedBar::new("Likes")
            .with_segment(StackSegment::new(40.68, dark()))
            .with_segment(StackSegment::new(162.1, light()))
            .with_segment(StackSegment::new(12.0, token("Coral", "#C49A8B")).unlabeled()),
        StackedBar::new("Saves").with_segment(StackSegment::new(32.05, light())),
        StackedBar::new("Shares").with_segment(StackSegment::new(2.5, dark()).unlabeled()),
        StackedBar::new("Comments").with_segment(StackSegment::new(1.8, light()).unlabeled()),
    ]
}

fn stacked_section(label_threshold: f64) -> HtmlSection {
    // One pixel per thousand: the 200 px plot spans 0.2M.
    let plot = Rect::new(48.0, 16.0, 448.0, 216.0);
    let spec = StackedBarChartSpec::new(0x200_000, plot, engagement_bars())
        .with_axis(200.0, 2)
        .with_label_threshold(label_threshold)
        .with_tick_format(|v| format!("{:.1}M", v / 1000.0))
        .with_value_format(|v| compact(v, Magnitude::Units, 2) + "K");
    HtmlSection {
        title: "Stacked engagement",
        description: "Segments stack from the baseline in declaration order; only segments taller than the label threshold carry an inline label.",
        svg: render(spec.marks(), None, "stacked"),
    }
}

fn engagement() -> Vec<BarDatum> {
    vec![
        BarDatum::new("Likes", 202_780.0),
        BarDatum::new("Saves", 32_050.0),
        BarDatum::new("Shares", 2_500.0),
        BarDatum::new("Comments", 1_800.0),
    ]
}

fn bar_list_section(hovered: Option<usize>) -> HtmlSection {
    let spec = BarListSpec::new(0x300_000, Point::new(0.0, 24.0), engagement())
        .with_title("Engagement by Type")
        .with_hovered(hovered);
    HtmlSection {
        title: "Horizontal bars",
        description: "High-variance data as a ranked list under a header with the total; the hovered row shows its raw value and share.",
        svg: render(spec.marks(&HeuristicTextMeasurer::default()), None, "bar-list"),
    }
}

fn table_bars_section(hovered: Option<usize>) -> HtmlSection {
    let spec = BarListSpec::new(0x310_000, Point::new(0.0, 24.0), engagement())
        .with_style(BarListStyle::Table)
        .with_title("Engagement Summary")
        .with_trends(vec![
            Trend::new(12.3),
            Trend::new(8.7),
            Trend::new(-2.1),
            Trend::new(5.4),
        ])
        .with_hovered(hovered);
    HtmlSection {
        title: "Table bars",
        description: "Engagement summary with trends and share-of-total tooltips.",
        svg: render(spec.marks(&HeuristicTextMeasurer::default()), None, "table-bars"),
    }
}

fn period_legend(id_base: u64, style: ComparisonStyle) -> LegendSwatchesSpec {
    let palette = ComparisonPalette::default();
    LegendSwatchesSpec::new(
        id_base,
        vec![
            LegendItem::new("This Period", palette.fill(Series::Current, style)),
            LegendItem::new("Last Period", palette.fill(Series::Previous, style)),
        ],
    )
    .with_columns(2, 120.0)
}

fn duotone_section(stripes: bool) -> HtmlSection {
    let groups = vec![
        ComparisonGroup::single("Likes", 85.0, 70.0),
        ComparisonGroup::single("Comments", 45.0, 55.0),
        ComparisonGroup::single("Shares", 60.0, 48.0),
        ComparisonGroup::single("Saves", 35.0, 30.0),
    ];
    let spec = ComparisonChartSpec::new(0x400_000, Point::new(0.0, 32.0), groups)
        .with_layout(ComparisonLayout::new(140.0))
        .with_stripes(stripes);
    let mut marks = spec.marks();
    marks.extend(period_legend(0x400_000 + LEGEND, spec.layout.style).marks(Point::ZERO));
    HtmlSection {
        title: "Duotone comparison",
        description: "One row per category: the current period in brand green, then the previous period in flat gray or stripes.",
        svg: render(marks, None, "duotone"),
    }
}

fn grouped_section(stripes: bool) -> HtmlSection {
    let pairs = |v: [(f64, f64); 4]| v.into_iter().map(|(c, p)| ComparisonPair::new(c, p));
    let groups = vec![
        ComparisonGroup::new(
            "Instagram",
            pairs([(85.0, 60.0), (78.0, 65.0), (92.0, 70.0), (88.0, 75.0)]),
        ),
        ComparisonGroup::new(
            "Facebook",
            pairs([(65.0, 50.0), (58.0, 55.0), (72.0, 48.0), (68.0, 52.0)]),
        ),
        ComparisonGroup::new(
            "Twitter",
            pairs([(75.0, 55.0), (70.0, 68.0), (82.0, 60.0), (78.0, 58.0)]),
        ),
        ComparisonGroup::new(
            "LinkedIn",
            pairs([(80.0, 65.0), (75.0, 70.0), (88.0, 62.0), (85.0, 68.0)]),
        ),
    ];
    let spec = ComparisonChartSpec::new(0x500_000, Point::new(0.0, 32.0), groups)
        .with_orientation(Orientation::Vertical)
        .with_spacing(8.0, 2.0, 24.0)
        .with_label_space(24.0)
        .with_stripes(stripes);
    let mut marks = spec.marks();
    marks.extend(period_legend(0x500_000 + LEGEND, spec.layout.style).marks(Point::ZERO));
    HtmlSection {
        title: "Grouped comparison",
        description: "Four weekly pairs per platform, current and previous side by side.",
        svg: render(marks, None, "grouped"),
    }
}

const HEATMAP: [f64; 28] = [
    1.0, 3.0, 5.0, 2.0, 7.0, 4.0, 6.0, 8.0, 2.0, 4.0, 6.0, 3.0, 5.0, 7.0, 9.0, 1.0, 4.0, 6.0,
    8.0, 3.0, 5.0, 2.0, 7.0, 4.0, 6.0, 8.0, 3.0, 5.0,
];

fn sequential_ramp() -> PaletteRamp {
    PaletteRamp::from_static("sequential", tokens::SEQUENTIAL)
}

fn heatmap_section() -> HtmlSection {
    let spec = HeatmapSpec::new(0x600_000, Point::ZERO, sequential_ramp(), HEATMAP.to_vec());
    HtmlSection {
        title: "Engagement heatmap",
        description: "Weekly posting activity; each value indexes the sequential ramp.",
        svg: render(spec.marks(), None, "heatmap"),
    }
}

fn reach_section() -> HtmlSection {
    let data = [("IG", 90.0), ("FB", 70.0), ("TW", 50.0), ("LI", 40.0), ("YT", 60.0)]
        .into_iter()
        .map(|(label, value)| BarDatum::new(label, value))
        .collect();
    let spec = ColumnBarsSpec::new(0x700_000, Point::new(0.0, 110.0), sequential_ramp(), data);
    HtmlSection {
        title: "Reach per platform",
        description: "Column color steps through the sequential ramp every ten units.",
        svg: render(spec.marks(), None, "reach"),
    }
}

fn traffic() -> Vec<DonutSegment> {
    [
        ("Organic Video", 65.35, 204_160.0, "#2A4639"),
        ("Direct", 20.02, 62_560.0, "#7A9A7A"),
        ("Organic Social", 7.02, 21_930.0, "#C1CFC9"),
        ("Referral", 3.42, 10_700.0, "#5A8A7A"),
        ("Paid Search", 2.07, 6_480.0, "#E8ECDF"),
        ("Paid Social", 0.92, 2_870.0, "#C49A8B"),
        ("Email", 0.27, 840.0, "#D5DCCA"),
        ("Unassigned", 0.05, 140.0, "#D6D6D2"),
    ]
    .into_iter()
    .map(|(label, percent, value, hex)| {
        DonutSegment::new(label, percent, token(label, hex)).with_value(value)
    })
    .collect()
}

fn fixed_traffic_labels() -> DonutLabels {
    DonutLabels::fixed([
        (40.0, 95.0),
        (130.0, -30.0),
        (-80.0, -70.0),
        (-120.0, -40.0),
        (-130.0, -10.0),
        (-120.0, 15.0),
        (130.0, 30.0),
        (70.0, -90.0),
    ])
}

fn donut_section(labels: DonutLabels, title: &'static str, slug: &str) -> HtmlSection {
    let segments = traffic();
    let legend = LegendSwatchesSpec::new(
        0x800_000 + LEGEND,
        segments
            .iter()
            .map(|s| LegendItem::solid(s.label.clone(), s.color.color()))
            .collect(),
    )
    .with_shape(LegendShape::Circle);
    let spec =
        DonutChartSpec::new(0x800_000, Point::new(200.0, 150.0), segments).with_labels(labels);
    let mut marks = spec.marks();
    marks.extend(legend.marks(Point::new(420.0, 60.0)));
    HtmlSection {
        title,
        description: "Stroke-dash arcs clockwise from 12 o'clock; shares that drift past 100% are scaled to close the ring exactly once.",
        svg: render(marks, Some(Rect::new(0.0, 0.0, 400.0, 300.0)), slug),
    }
}

fn waffle_section(title: &'static str, slug: &str, shares: [f64; 3]) -> HtmlSection {
    let categories = tokens::TASK
        .iter()
        .zip(shares)
        .map(|(t, share)| WaffleCategory::new(t.name.clone(), share, t.clone()))
        .collect();
    let spec = WaffleChartSpec::new(0x900_000, Point::ZERO, categories);
    HtmlSection {
        title,
        description: "One cell per percent; shares are rounded by largest remainder so the grid always holds exactly 100 cells.",
        svg: render(spec.marks(), None, slug),
    }
}

fn index_scale_section() -> HtmlSection {
    let ramp = PaletteRamp::from_static("index", tokens::INDEX);
    let spec = IndexScaleSpec::new(0xA00_000, Point::ZERO, ramp).with_labels([
        "Emerging (bottom 25%)",
        "Lower middle",
        "Upper middle",
        "Leading (top 25%)",
    ]);
    HtmlSection {
        title: "Index scale",
        description: "Eight-step strip for choropleths, lowest quartile on the left.",
        svg: render(spec.marks(), None, "index-scale"),
    }
}

fn treemap_section() -> HtmlSection {
    let items = [
        ("Technology & Development", 26.1, "#2D6A6A"),
        ("Business & Finance", 7.4, "#6B7D8A"),
        ("Life Sciences", 7.9, "#5A8A7A"),
        ("Education & Research", 10.7, "#7A9A7A"),
        ("Arts & Entertainment", 9.1, "#8B7BA8"),
        ("Community", 2.6, "#C4A0A0"),
        ("Healthcare", 2.8, "#C49A8B"),
    ]
    .into_iter()
    .map(|(label, share, hex)| TreemapItem::new(label, share, token(label, hex)))
    .collect();
    let spec = TreemapSpec::new(0xB00_000, Rect::new(0.0, 0.0, 600.0, 256.0), items);
    HtmlSection {
        title: "Treemap",
        description: "Proportional areas in categorical colors, laid out as squarified tiles.",
        svg: render(spec.marks(), None, "treemap"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_section_renders() {
        let sections = build(&RenderOptions::default());
        assert_eq!(sections.len(), RAMP_SECTIONS.len() + 13, "ramps plus charts");
        for s in &sections {
            assert!(s.svg.starts_with("<svg "), "{} renders an svg", s.title);
            assert!(s.svg.trim_end().ends_with("</svg>"), "{} is closed", s.title);
        }
    }

    #[test]
    fn stripes_flag_adds_patterns() {
        let flat = duotone_section(false);
        let striped = duotone_section(true);
        assert!(!flat.svg.contains("<pattern"), "flat previous bars");
        assert!(striped.svg.contains("<pattern"), "striped previous bars");
    }

    #[test]
    fn pattern_ids_are_unique_across_the_report() {
        let opts = RenderOptions {
            stripes: true,
            ..RenderOptions::default()
        };
        let mut ids = std::collections::HashSet::new();
        for section in build(&opts) {
            for (start, _) in section.svg.match_indices("<pattern id=\"") {
                let rest = &section.svg[start + "<pattern id=\"".len()..];
                let id = rest.split('"').next().unwrap_or_default().to_string();
                assert!(ids.insert(id.clone()), "{id} is defined twice");
            }
        }
        assert!(ids.len() >= 2, "both comparison sections define stripes: {ids:?}");
    }

    #[test]
    fn bar_list_headers_match_their_style() {
        let list = bar_list_section(None);
        let table = table_bars_section(None);
        assert!(list.svg.contains(">Engagement by Type<"), "list title");
        assert!(list.svg.contains(">Total: 239.1K<"), "list header carries the total");
        assert!(table.svg.contains(">Engagement Summary<"), "table title");
        assert!(!table.svg.contains("Total:"), "table has no total");
    }

    #[test]
    fn waffles_hold_exactly_one_hundred_cells() {
        let s = waffle_section("Content Creation Tasks", "content-waffle", [35.0, 30.0, 35.0]);
        assert!(s.svg.contains(">Automated 35%<"), "legend share");
        assert!(s.svg.contains(">Manual 35%<"), "legend share");
        assert_eq!(s.svg.matches(r#"rx="2""#).count(), 100, "one rounded rect per cell");
    }

    #[test]
    fn hover_adds_a_tooltip() {
        let idle = bar_list_section(None);
        let hovered = bar_list_section(Some(0));
        assert!(!idle.svg.contains("202,780"), "no tooltip when idle");
        assert!(hovered.svg.contains("202,780 (84.8%)"), "derived tooltip text");
    }

    #[test]
    fn threshold_hides_short_segment_labels() {
        let default = stacked_section(20.0);
        let raised = stacked_section(35.0);
        assert!(default.svg.contains("32.05K"), "Saves is labeled at 20 px");
        assert!(!raised.svg.contains("32.05K"), "Saves is too short at 35 px");
        assert!(raised.svg.contains("162.1K"), "tall segments keep labels");
    }

    #[test]
    fn fixed_callouts_show_thousands() {
        let s = donut_section(fixed_traffic_labels(), "fixed", "donut-fixed");
        assert!(s.svg.contains(">204.16K (65.35%)<"), "largest slice");
        assert!(
            s.svg.contains(">0.14K (0.05%)<"),
            "smallest slice keeps its hand-placed callout"
        );
    }
}
