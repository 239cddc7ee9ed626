// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Donut callout placement.
//!
//! Two strategies:
//! - [`DonutLabels::Fixed`] places each callout at a hand-picked offset from the center. This
//!   only suits a known, static dataset.
//! - [`DonutLabels::Radial`] derives the anchor from each arc's mid-angle and routes an
//!   elbowed leader line outwards. Each run of adjacent thin slices shares one "Other"
//!   callout, and same-side callouts are spread vertically so they never overlap.

extern crate alloc;

use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use smallvec::{SmallVec, smallvec};
use verdant_core::TextAnchor;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::donut::{DonutArc, DonutLayout, DonutSegment, polar};
use crate::format::percent;

/// Gap between the end of a leader line and its text.
const TEXT_GAP: f64 = 4.0;

/// A placed callout.
#[derive(Clone, Debug, PartialEq)]
pub struct DonutLabel {
    /// Segments described by this callout (several for the "Other" bucket).
    pub segments: SmallVec<[usize; 4]>,
    /// Callout text.
    pub text: String,
    /// Leader line vertices, ring edge first.
    pub leader: SmallVec<[Point; 3]>,
    /// Text anchor position.
    pub pos: Point,
    /// Horizontal text anchor (`Start` right of the ring, `End` left of it).
    pub text_anchor: TextAnchor,
}

/// A hand-placed callout, relative to the ring center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedLabel {
    /// Horizontal offset from the center.
    pub dx: f64,
    /// Vertical offset from the center.
    pub dy: f64,
}

impl FixedLabel {
    /// Creates an offset.
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// Mid-angle callout placement.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialLabels {
    /// Radial length of the leader beyond the ring edge.
    pub leader_length: f64,
    /// Horizontal leg after the elbow.
    pub leg_length: f64,
    /// Adjacent slices with a smaller share are bucketed together.
    pub min_percent: f64,
    /// Minimum vertical distance between callouts on one side.
    pub line_height: f64,
    /// Text of the bucketed callout.
    pub other_label: Cow<'static, str>,
}

impl Default for RadialLabels {
    fn default() -> Self {
        Self {
            leader_length: 14.0,
            leg_length: 12.0,
            min_percent: 1.0,
            line_height: 14.0,
            other_label: Cow::Borrowed("Other"),
        }
    }
}

impl RadialLabels {
    /// Sets the bucket threshold in percent.
    pub fn with_min_percent(mut self, min_percent: f64) -> Self {
        self.min_percent = min_percent.max(0.0);
        self
    }

    /// Sets leader segment lengths.
    pub fn with_leader(mut self, leader_length: f64, leg_length: f64) -> Self {
        self.leader_length = leader_length.max(0.0);
        self.leg_length = leg_length.max(0.0);
        self
    }

    /// Sets the minimum vertical spacing of callouts.
    pub fn with_line_height(mut self, line_height: f64) -> Self {
        self.line_height = line_height.max(0.0);
        self
    }

    fn place(
        &self,
        center: Point,
        layout: &DonutLayout,
        arcs: &[DonutArc],
        segments: &[DonutSegment],
    ) -> Vec<DonutLabel> {
        let mut labels = Vec::new();
        let mut run: Vec<&DonutArc> = Vec::new();
        for arc in arcs.iter().filter(|a| a.sweep > 0.0) {
            if arc.percent < self.min_percent {
                run.push(arc);
                continue;
            }
            self.close_run(&mut run, center, layout, segments, &mut labels);
            labels.extend(self.own_callout(center, layout, arc, segments));
        }
        self.close_run(&mut run, center, layout, segments, &mut labels);

        self.spread(&mut labels, center);
        labels.sort_by_key(|l| l.segments.first().copied().unwrap_or(usize::MAX));
        labels
    }

    fn own_callout(
        &self,
        center: Point,
        layout: &DonutLayout,
        arc: &DonutArc,
        segments: &[DonutSegment],
    ) -> Option<DonutLabel> {
        let segment = segments.get(arc.index)?;
        Some(self.callout(
            center,
            layout,
            arc.mid_angle(),
            smallvec![arc.index],
            segment.display_value(),
        ))
    }

    /// Emits the callout for a run of adjacent thin slices, then clears the run.
    ///
    /// A lone thin slice keeps its own callout. Longer runs share one bucket anchored at the
    /// middle of the run; runs do not wrap past 12 o'clock.
    fn close_run(
        &self,
        run: &mut Vec<&DonutArc>,
        center: Point,
        layout: &DonutLayout,
        segments: &[DonutSegment],
        labels: &mut Vec<DonutLabel>,
    ) {
        match run[..] {
            [] => {}
            [arc] => labels.extend(self.own_callout(center, layout, arc, segments)),
            [first, .., last] => {
                let start = first.start_angle();
                let mid = start + (last.end_angle() - start) * 0.5;
                let share: f64 = run.iter().map(|a| a.percent).sum();
                log::debug!("bucketing {} adjacent thin donut slices", run.len());
                labels.push(self.callout(
                    center,
                    layout,
                    mid,
                    run.iter().map(|a| a.index).collect(),
                    format!("{} {}", self.other_label, percent(share, 2)),
                ));
            }
        }
        run.clear();
    }

    fn callout(
        &self,
        center: Point,
        layout: &DonutLayout,
        angle: f64,
        segments: SmallVec<[usize; 4]>,
        text: String,
    ) -> DonutLabel {
        let edge = layout.outer_radius();
        let anchor = polar(center, edge, angle);
        let elbow = polar(center, edge + self.leader_length, angle);
        let right = angle.sin() >= 0.0;
        let dir = if right { 1.0 } else { -1.0 };
        let end = Point::new(elbow.x + dir * self.leg_length, elbow.y);
        DonutLabel {
            segments,
            text,
            leader: smallvec![anchor, elbow, end],
            pos: Point::new(end.x + dir * TEXT_GAP, end.y),
            text_anchor: if right {
                TextAnchor::Start
            } else {
                TextAnchor::End
            },
        }
    }

    /// Pushes overlapping callouts down, independently on each side of the ring.
    fn spread(&self, labels: &mut [DonutLabel], center: Point) {
        for right in [true, false] {
            let mut side: Vec<&mut DonutLabel> = labels
                .iter_mut()
                .filter(|l| (l.pos.x >= center.x) == right)
                .collect();
            side.sort_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
            let mut floor = f64::NEG_INFINITY;
            for label in side {
                if label.pos.y < floor {
                    log::trace!("moving donut callout {:?} down to {floor}", label.text);
                    label.pos.y = floor;
                    if let Some(end) = label.leader.last_mut() {
                        end.y = floor;
                    }
                }
                floor = label.pos.y + self.line_height;
            }
        }
    }
}

/// Callout placement strategy.
#[derive(Clone, Debug, PartialEq)]
pub enum DonutLabels {
    /// No callouts.
    None,
    /// Hand-placed offsets, one per segment in order.
    Fixed(Vec<FixedLabel>),
    /// Mid-angle placement.
    Radial(RadialLabels),
}

impl DonutLabels {
    /// Hand-placed offsets (`(dx, dy)` from the center), matched to segments by index.
    pub fn fixed(offsets: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self::Fixed(
            offsets
                .into_iter()
                .map(|(dx, dy)| FixedLabel::new(dx, dy))
                .collect(),
        )
    }

    /// Mid-angle placement with default spacing.
    pub fn radial() -> Self {
        Self::Radial(RadialLabels::default())
    }

    /// Places callouts for `arcs`.
    ///
    /// Fixed offsets beyond the number of arcs are ignored; arcs beyond the number of offsets
    /// get no callout.
    pub fn place(
        &self,
        center: Point,
        layout: &DonutLayout,
        arcs: &[DonutArc],
        segments: &[DonutSegment],
    ) -> Vec<DonutLabel> {
        match self {
            Self::None => Vec::new(),
            Self::Fixed(offsets) => arcs
                .iter()
                .zip(offsets)
                .filter(|(arc, _)| arc.sweep > 0.0)
                .filter_map(|(arc, offset)| {
                    let segment = segments.get(arc.index)?;
                    let anchor = polar(center, layout.outer_radius(), arc.mid_angle());
                    let end = Point::new(center.x + offset.dx, center.y + offset.dy);
                    let dir = if offset.dx >= 0.0 { 1.0 } else { -1.0 };
                    Some(DonutLabel {
                        segments: smallvec![arc.index],
                        text: segment.display_value(),
                        leader: smallvec![anchor, end],
                        pos: Point::new(end.x + dir * TEXT_GAP, end.y),
                        text_anchor: if offset.dx >= 0.0 {
                            TextAnchor::Start
                        } else {
                            TextAnchor::End
                        },
                    })
                })
                .collect(),
            Self::Radial(radial) => radial.place(center, layout, arcs, segments),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use verdant_palette::ColorToken;

    use super::*;

    fn traffic() -> Vec<DonutSegment> {
        [
            ("Organic Video", 65.35, "#2A4639"),
            ("Direct", 20.02, "#7A9A7A"),
            ("Organic Social", 7.02, "#C1CFC9"),
            ("Referral", 3.42, "#5A8A7A"),
            ("Paid Search", 2.07, "#E8ECDF"),
            ("Paid Social", 0.92, "#C49A8B"),
            ("Email", 0.27, "#D5DCCA"),
            ("Unassigned", 0.05, "#D6D6D2"),
        ]
        .into_iter()
        .map(|(label, p, hex)| DonutSegment::new(label, p, ColorToken::new(label, hex)))
        .collect()
    }

    fn place(labels: &DonutLabels) -> Vec<DonutLabel> {
        let layout = DonutLayout::default();
        let segments = traffic();
        let arcs = layout.arcs(segments.iter().map(|s| s.percent));
        labels.place(Point::new(200.0, 150.0), &layout, &arcs, &segments)
    }

    #[test]
    fn fixed_labels_use_the_given_offsets() {
        let labels = place(&DonutLabels::fixed([(40.0, 95.0), (130.0, -30.0)]));
        assert_eq!(labels.len(), 2, "only as many callouts as offsets");
        assert_eq!(labels[0].leader[1], Point::new(240.0, 245.0), "center + offset");
        assert_eq!(labels[1].text_anchor, TextAnchor::Start, "right side");
    }

    #[test]
    fn radial_labels_bucket_thin_slices() {
        let labels = place(&DonutLabels::radial());
        assert_eq!(labels.len(), 6, "five own callouts plus one bucket");
        let other = labels.last().map(|l| (&l.segments[..], l.text.as_str()));
        assert_eq!(
            other,
            Some((&[5_usize, 6, 7][..], "Other 1.24%")),
            "sub-1 % slices share a callout"
        );
    }

    fn place_shares(shares: &[f64]) -> (Vec<DonutArc>, Vec<DonutLabel>) {
        let layout = DonutLayout::default();
        let segments: Vec<DonutSegment> = shares
            .iter()
            .map(|&p| DonutSegment::new("s", p, ColorToken::new("s", "#000000")))
            .collect();
        let arcs = layout.arcs(shares.iter().copied());
        let labels = DonutLabels::radial().place(Point::ZERO, &layout, &arcs, &segments);
        (arcs, labels)
    }

    #[test]
    fn separated_thin_slices_point_at_their_own_arcs() {
        let (arcs, labels) = place_shares(&[40.0, 0.5, 30.0, 29.0, 0.5]);
        assert_eq!(labels.len(), 5, "no bucket spans the large slices");
        for index in [1, 4] {
            let label = labels
                .iter()
                .find(|l| l.segments[..] == [index])
                .expect("thin slice has its own callout");
            let anchor = polar(Point::ZERO, 90.0, arcs[index].mid_angle());
            assert!(
                label.leader[0].distance(anchor) < 1e-9,
                "leader of slice {index} starts on its own arc"
            );
        }
    }

    #[test]
    fn each_adjacent_run_gets_its_own_bucket() {
        let (arcs, labels) = place_shares(&[0.4, 0.3, 50.0, 0.2, 0.1, 49.0]);
        let buckets: Vec<&DonutLabel> = labels.iter().filter(|l| l.segments.len() > 1).collect();
        assert_eq!(buckets.len(), 2, "two separate runs");
        assert_eq!(&buckets[1].segments[..], &[3, 4], "second run");
        let mid = (arcs[3].start_angle() + arcs[4].end_angle()) * 0.5;
        assert!(
            buckets[1].leader[0].distance(polar(Point::ZERO, 90.0, mid)) < 1e-9,
            "bucket leader starts inside its run"
        );
    }

    #[test]
    fn a_single_thin_slice_keeps_its_own_callout() {
        let layout = DonutLayout::default();
        let segments = vec![
            DonutSegment::new("big", 99.5, ColorToken::new("a", "#000000")),
            DonutSegment::new("tiny", 0.5, ColorToken::new("b", "#000000")),
        ];
        let arcs = layout.arcs(segments.iter().map(|s| s.percent));
        let labels = DonutLabels::radial().place(Point::ZERO, &layout, &arcs, &segments);
        assert_eq!(labels.len(), 2, "no bucket for one slice");
        assert_eq!(labels[1].text, "0.50%", "own text");
    }

    #[test]
    fn radial_labels_sit_outside_the_ring_on_the_matching_side() {
        let center = Point::new(200.0, 150.0);
        for label in place(&DonutLabels::radial()) {
            let edge = label.leader[0];
            assert!(
                (edge.distance(center) - 90.0).abs() < 1e-9,
                "leader starts on the outer edge"
            );
            match label.text_anchor {
                TextAnchor::Start => assert!(label.pos.x > center.x, "{} right", label.text),
                TextAnchor::End => assert!(label.pos.x < center.x, "{} left", label.text),
                TextAnchor::Middle => panic!("callouts are never centered"),
            }
        }
    }

    #[test]
    fn same_side_labels_do_not_overlap() {
        let labels = place(&DonutLabels::radial());
        for right in [true, false] {
            let mut ys: std::vec::Vec<f64> = labels
                .iter()
                .filter(|l| (l.text_anchor == TextAnchor::Start) == right)
                .map(|l| l.pos.y)
                .collect();
            ys.sort_by(f64::total_cmp);
            for w in ys.windows(2) {
                assert!(w[1] - w[0] >= 14.0 - 1e-9, "spacing {w:?}");
            }
        }
    }

    #[test]
    fn no_arcs_no_labels() {
        let layout = DonutLayout::default();
        let labels = DonutLabels::radial().place(Point::ZERO, &layout, &[], &[]);
        assert!(labels.is_empty(), "empty donut has no callouts");
    }
}
