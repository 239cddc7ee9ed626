// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use verdant_core::{MarkDiff, MarkId, MarkKind, Scene};
use verdant_palette::{ColorToken, tokens};

use crate::{
    BarDatum, BarListSpec, ComparisonChartSpec, ComparisonGroup, DonutChartSpec, DonutSegment,
    HeuristicTextMeasurer, StackSegment, StackedBar, StackedBarChartSpec, SwatchGridSpec,
};

fn ids(diffs: &[MarkDiff], pick: fn(&MarkDiff) -> bool) -> Vec<MarkId> {
    let mut out: Vec<MarkId> = diffs.iter().filter(|d| pick(d)).map(MarkDiff::id).collect();
    out.sort_unstable();
    out
}

fn lane(lane: u16, index: usize) -> MarkId {
    MarkId::lane(0, lane, index)
}

fn updated(diffs: &[MarkDiff]) -> Vec<MarkId> {
    ids(diffs, |d| matches!(d, MarkDiff::Update { .. }))
}

fn entered(diffs: &[MarkDiff]) -> Vec<MarkId> {
    ids(diffs, |d| matches!(d, MarkDiff::Enter { .. }))
}

fn exited(diffs: &[MarkDiff]) -> Vec<MarkId> {
    ids(diffs, |d| matches!(d, MarkDiff::Exit { .. }))
}

fn channels() -> Vec<BarDatum> {
    vec![
        BarDatum::new("Direct", 202_780.0),
        BarDatum::new("Organic", 32_040.0),
        BarDatum::new("Referral", 4_280.0),
    ]
}

#[test]
fn hovering_a_row_touches_only_that_row_and_the_tooltip() {
    let measurer = HeuristicTextMeasurer::default();
    let spec = |hovered| BarListSpec::new(0, Point::ZERO, channels()).with_hovered(hovered);
    let mut scene = Scene::new();

    let first = scene.tick(spec(None).marks(&measurer));
    assert!(
        first.iter().all(|d| matches!(d, MarkDiff::Enter { .. })),
        "first frame only enters"
    );

    let hover = scene.tick(spec(Some(1)).marks(&measurer));
    assert_eq!(updated(&hover), vec![lane(1, 1)], "only the hovered bar repaints");
    assert_eq!(entered(&hover), vec![lane(6, 0), lane(6, 1)], "tooltip appears");
    assert!(exited(&hover).is_empty(), "nothing leaves");

    let moved = scene.tick(spec(Some(2)).marks(&measurer));
    assert_eq!(
        updated(&moved),
        vec![lane(1, 1), lane(1, 2), lane(6, 0), lane(6, 1)],
        "old and new bar repaint, tooltip moves"
    );

    let leave = scene.tick(spec(None).marks(&measurer));
    assert_eq!(updated(&leave), vec![lane(1, 2)], "last hovered bar reverts");
    assert_eq!(exited(&leave), vec![lane(6, 0), lane(6, 1)], "tooltip leaves");

    let idle = scene.tick(spec(None).marks(&measurer));
    assert!(idle.is_empty(), "an identical frame produces no diffs");
}

#[test]
fn toggling_stripes_repaints_only_previous_bars() {
    let groups = vec![
        ComparisonGroup::single("Likes", 85.0, 70.0),
        ComparisonGroup::single("Comments", 45.0, 55.0),
    ];
    let spec = |stripes| {
        ComparisonChartSpec::new(0, Point::ZERO, groups.clone()).with_stripes(stripes)
    };
    let mut scene = Scene::new();
    scene.tick(spec(false).marks());

    let diffs = scene.tick(spec(true).marks());
    assert_eq!(
        updated(&diffs),
        vec![lane(0, 1), lane(0, 3)],
        "previous bars get the stripe pattern"
    );
    assert!(entered(&diffs).is_empty(), "no new marks");
    for d in &diffs {
        let MarkDiff::Update {
            old_bounds,
            new_bounds,
            ..
        } = d
        else {
            continue;
        };
        assert_eq!(old_bounds, new_bounds, "geometry is unchanged");
    }
}

#[test]
fn copy_overlay_enters_and_exits_without_touching_cards() {
    let spec = |copied| {
        SwatchGridSpec::new(0, Point::ZERO, tokens::PRIMARY.to_vec())
            .with_columns(5)
            .with_copied(copied)
    };
    let mut scene = Scene::new();
    scene.tick(spec(None).marks());

    let copied = scene.tick(spec(Some(8)).marks());
    assert_eq!(entered(&copied), vec![lane(3, 0), lane(3, 1)], "overlay and confirmation");
    assert!(updated(&copied).is_empty(), "cards untouched");

    let recopy = scene.tick(spec(Some(2)).marks());
    assert_eq!(
        updated(&recopy),
        vec![lane(3, 0), lane(3, 1)],
        "overlay moves to the new card"
    );

    let reverted = scene.tick(spec(None).marks());
    assert_eq!(exited(&reverted), vec![lane(3, 0), lane(3, 1)], "overlay leaves on revert");
}

#[test]
fn raising_the_label_threshold_only_drops_labels() {
    let bar = StackedBar::new("Likes")
        .with_segment(StackSegment::new(40.68, ColorToken::new("800", "#11362A")))
        .with_segment(StackSegment::new(162.1, ColorToken::new("100", "#E8ECDF")))
        .with_segment(StackSegment::new(12.0, ColorToken::new("Coral", "#C49A8B")));
    let plot = Rect::new(40.0, 0.0, 240.0, 240.0);
    let spec = |threshold| {
        StackedBarChartSpec::new(0, plot, vec![bar.clone()]).with_label_threshold(threshold)
    };
    let mut scene = Scene::new();
    let first = scene.tick(spec(20.0).marks());
    assert_eq!(
        ids(&first, |d| matches!(
            d,
            MarkDiff::Enter {
                kind: MarkKind::Rect,
                ..
            }
        )),
        vec![lane(0, 0), lane(0, 1), lane(0, 2)],
        "every segment is drawn"
    );

    let diffs = scene.tick(spec(50.0).marks());
    assert_eq!(
        exited(&diffs),
        vec![MarkId::cell(0, 1, 0, 0)],
        "the 40.68 px label is hidden"
    );
    assert!(updated(&diffs).is_empty(), "segments are unchanged");
}

#[test]
fn donut_rings_paint_below_callouts() {
    let color = |hex: &'static str| ColorToken::new("c", hex);
    let segments = vec![
        DonutSegment::new("Direct", 65.35, color("#11362A")),
        DonutSegment::new("Organic", 20.02, color("#4A7561")),
        DonutSegment::new("Email", 7.02, color("#889A68")),
        DonutSegment::new("Referral", 3.42, color("#BDC8AB")),
        DonutSegment::new("Social", 2.07, color("#C49A8B")),
        DonutSegment::new("Paid", 0.92, color("#7A8BA8")),
        DonutSegment::new("Display", 0.27, color("#B8A090")),
        DonutSegment::new("Other", 0.05, color("#D6D6D2")),
    ];
    let mut scene = Scene::new();
    scene.tick(DonutChartSpec::new(0, Point::new(200.0, 150.0), segments).marks());

    let ordered = scene.ordered();
    let last_ring = ordered
        .iter()
        .rposition(|(_, _, p)| p.kind() == MarkKind::Ring);
    let first_text = ordered
        .iter()
        .position(|(_, _, p)| p.kind() == MarkKind::Text);
    assert!(
        matches!((last_ring, first_text), (Some(r), Some(t)) if r < t),
        "rings paint before any callout text"
    );
    assert_eq!(
        ordered
            .iter()
            .filter(|(_, _, p)| p.kind() == MarkKind::Ring)
            .count(),
        8,
        "one ring per segment"
    );
    assert!(scene.get(lane(2, 0)).is_some(), "first callout");
}
