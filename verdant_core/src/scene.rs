// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-to-frame mark diffing.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};
use kurbo::Rect;

use crate::mark::{Mark, MarkId, MarkKind, MarkPayload};

/// A change between two consecutive frames.
#[derive(Clone, Debug)]
pub enum MarkDiff {
    /// The mark did not exist in the previous frame.
    Enter {
        /// Mark id.
        id: MarkId,
        /// Mark kind.
        kind: MarkKind,
        /// Paint order.
        z_index: i32,
        /// New payload.
        new: Arc<MarkPayload>,
        /// Bounds of the new payload.
        bounds: Option<Rect>,
    },
    /// The mark existed before and its payload or paint order changed.
    Update {
        /// Mark id.
        id: MarkId,
        /// Mark kind (after the update).
        kind: MarkKind,
        /// Previous paint order.
        old_z_index: i32,
        /// New paint order.
        new_z_index: i32,
        /// Previous payload.
        old: Arc<MarkPayload>,
        /// New payload.
        new: Arc<MarkPayload>,
        /// Bounds of the previous payload.
        old_bounds: Option<Rect>,
        /// Bounds of the new payload.
        new_bounds: Option<Rect>,
    },
    /// The mark is absent from the new frame.
    Exit {
        /// Mark id.
        id: MarkId,
        /// Mark kind.
        kind: MarkKind,
        /// Previous payload.
        old: Arc<MarkPayload>,
        /// Bounds of the previous payload.
        bounds: Option<Rect>,
    },
}

impl MarkDiff {
    /// The id of the mark this diff refers to.
    pub fn id(&self) -> MarkId {
        match self {
            Self::Enter { id, .. } | Self::Update { id, .. } | Self::Exit { id, .. } => *id,
        }
    }
}

#[derive(Clone, Debug)]
struct Entry {
    z_index: i32,
    payload: Arc<MarkPayload>,
}

/// Retained marks of the last frame.
#[derive(Debug, Default)]
pub struct Scene {
    marks: HashMap<MarkId, Entry>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of retained marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Whether the scene holds no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Returns the retained payload for `id`.
    pub fn get(&self, id: MarkId) -> Option<&MarkPayload> {
        self.marks.get(&id).map(|e| &*e.payload)
    }

    /// Replaces the retained frame with `marks`, returning what changed.
    ///
    /// Enter/Update diffs follow the input order; Exit diffs follow ascending id. If an id
    /// appears twice, the later mark wins and produces an Update against the earlier one.
    pub fn tick(&mut self, marks: impl IntoIterator<Item = Mark>) -> Vec<MarkDiff> {
        let mut diffs = Vec::new();
        let mut seen = HashSet::new();

        for mark in marks {
            seen.insert(mark.id);
            let kind = mark.payload.kind();
            match self.marks.get_mut(&mark.id) {
                Some(entry) => {
                    if entry.z_index == mark.z_index && *entry.payload == mark.payload {
                        continue;
                    }
                    let new = Arc::new(mark.payload);
                    let old = core::mem::replace(&mut entry.payload, new.clone());
                    let old_z_index = core::mem::replace(&mut entry.z_index, mark.z_index);
                    diffs.push(MarkDiff::Update {
                        id: mark.id,
                        kind,
                        old_z_index,
                        new_z_index: mark.z_index,
                        old_bounds: old.bounds(),
                        new_bounds: new.bounds(),
                        old,
                        new,
                    });
                }
                None => {
                    let new = Arc::new(mark.payload);
                    diffs.push(MarkDiff::Enter {
                        id: mark.id,
                        kind,
                        z_index: mark.z_index,
                        bounds: new.bounds(),
                        new: new.clone(),
                    });
                    self.marks.insert(
                        mark.id,
                        Entry {
                            z_index: mark.z_index,
                            payload: new,
                        },
                    );
                }
            }
        }

        let mut gone: Vec<MarkId> = self
            .marks
            .keys()
            .copied()
            .filter(|id| !seen.contains(id))
            .collect();
        gone.sort_unstable();
        for id in gone {
            if let Some(entry) = self.marks.remove(&id) {
                diffs.push(MarkDiff::Exit {
                    id,
                    kind: entry.payload.kind(),
                    bounds: entry.payload.bounds(),
                    old: entry.payload,
                });
            }
        }

        diffs
    }

    /// Retained marks in paint order: ascending `(z_index, id)`.
    pub fn ordered(&self) -> Vec<(MarkId, i32, &MarkPayload)> {
        let mut out: Vec<_> = self
            .marks
            .iter()
            .map(|(id, e)| (*id, e.z_index, &*e.payload))
            .collect();
        out.sort_by_key(|(id, z, _)| (*z, *id));
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use peniko::color::palette::css;

    use super::*;

    fn bar(id: u64, height: f64) -> Mark {
        Mark::rect(
            MarkId::from_raw(id),
            Rect::new(0.0, 100.0 - height, 10.0, 100.0),
            css::DARK_GREEN,
        )
    }

    #[test]
    fn first_tick_enters_every_mark() {
        let mut scene = Scene::new();
        let diffs = scene.tick(vec![bar(1, 10.0), bar(2, 20.0)]);
        assert_eq!(diffs.len(), 2, "two marks enter");
        assert!(
            diffs.iter().all(|d| matches!(d, MarkDiff::Enter { .. })),
            "all diffs are enters"
        );
        assert_eq!(scene.len(), 2, "scene retains both marks");
    }

    #[test]
    fn unchanged_marks_produce_no_diffs() {
        let mut scene = Scene::new();
        scene.tick(vec![bar(1, 10.0), bar(2, 20.0)]);
        let diffs = scene.tick(vec![bar(1, 10.0), bar(2, 25.0)]);
        let [MarkDiff::Update { id, old_bounds, new_bounds, .. }] = &diffs[..] else {
            panic!("expected a single update diff, got {diffs:?}");
        };
        assert_eq!(*id, MarkId::from_raw(2), "only the resized bar updates");
        assert_ne!(old_bounds, new_bounds, "bounds follow the payload");
    }

    #[test]
    fn missing_marks_exit_in_id_order() {
        let mut scene = Scene::new();
        scene.tick(vec![bar(3, 1.0), bar(1, 1.0), bar(2, 1.0)]);
        let diffs = scene.tick(vec![bar(2, 1.0)]);
        let ids: std::vec::Vec<_> = diffs.iter().map(MarkDiff::id).collect();
        assert_eq!(ids, vec![MarkId::from_raw(1), MarkId::from_raw(3)], "sorted exits");
        assert!(scene.get(MarkId::from_raw(1)).is_none(), "exited mark is dropped");
    }

    #[test]
    fn z_index_change_is_an_update() {
        let mut scene = Scene::new();
        scene.tick(vec![bar(1, 10.0)]);
        let diffs = scene.tick(vec![bar(1, 10.0).with_z_index(5)]);
        assert!(
            matches!(
                diffs[..],
                [MarkDiff::Update {
                    old_z_index: 0,
                    new_z_index: 5,
                    ..
                }]
            ),
            "paint order change is reported"
        );
    }

    #[test]
    fn ordered_sorts_by_z_then_id() {
        let mut scene = Scene::new();
        scene.tick(vec![
            bar(2, 1.0).with_z_index(1),
            bar(9, 1.0),
            bar(1, 1.0).with_z_index(1),
        ]);
        let ids: std::vec::Vec<_> = scene.ordered().iter().map(|(id, ..)| id.0).collect();
        assert_eq!(ids, vec![9, 1, 2], "z first, id second");
    }
}
