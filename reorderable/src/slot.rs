use alloc::collections::BTreeMap;

use crate::progress::{AnimationTracker, Progress, ProgressStatus};
use crate::{Axis, Easing, Offset, Rect};

/// Displacement of the item at `index` while the item at `drag_index` would land at `gap_index`.
///
/// `gap_index` uses insertion semantics over the original indices: the dragged item lands before
/// the item currently at `gap_index`. Items strictly between the origin and the landing spot move
/// one `gap_extent` towards the origin; everything else stays put. `reverse` flips the sign for
/// lists whose index 0 sits at the trailing edge.
pub fn gap_offset(
    axis: Axis,
    index: usize,
    drag_index: usize,
    gap_index: usize,
    gap_extent: f32,
    reverse: bool,
) -> Offset {
    let towards_end = if reverse { -gap_extent } else { gap_extent };
    let main = if gap_index > drag_index && index > drag_index && index < gap_index {
        -towards_end
    } else if gap_index < drag_index && index >= gap_index && index < drag_index {
        towards_end
    } else {
        0.0
    };
    axis.extent_offset(main)
}

/// Parameters shared by every slot during one gap update.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Gap {
    pub(crate) drag_index: usize,
    pub(crate) gap_index: usize,
    pub(crate) gap_extent: f32,
    pub(crate) axis: Axis,
    pub(crate) reverse: bool,
    pub(crate) duration_ms: u64,
}

/// One mounted item.
#[derive(Debug)]
pub(crate) struct Slot {
    key: u64,
    start_offset: Offset,
    target_offset: Offset,
    animation: Option<Progress>,
    pub(crate) dragging: bool,
}

impl Slot {
    fn new(key: u64) -> Self {
        Self {
            key,
            start_offset: Offset::ZERO,
            target_offset: Offset::ZERO,
            animation: None,
            dragging: false,
        }
    }

    /// Current (possibly animating) translation.
    pub(crate) fn offset(&self, easing: Easing) -> Offset {
        match &self.animation {
            Some(progress) => Offset::lerp(
                self.start_offset,
                self.target_offset,
                easing.sample(progress.value()),
            ),
            None => self.target_offset,
        }
    }

    /// Layout rectangle moved to where this slot is heading.
    pub(crate) fn target_geometry(&self, layout: Rect) -> Rect {
        layout.translate(self.target_offset)
    }

    pub(crate) fn update_for_gap(
        &mut self,
        index: usize,
        gap: Gap,
        animate: bool,
        easing: Easing,
        tracker: &AnimationTracker,
        now_ms: u64,
    ) {
        let target = gap_offset(
            gap.axis,
            index,
            gap.drag_index,
            gap.gap_index,
            gap.gap_extent,
            gap.reverse,
        );
        if target == self.target_offset {
            return;
        }
        if animate {
            match &mut self.animation {
                Some(progress) => {
                    self.start_offset = Offset::lerp(
                        self.start_offset,
                        self.target_offset,
                        easing.sample(progress.value()),
                    );
                    progress.forward_from(0.0, now_ms);
                }
                None => {
                    let mut progress = Progress::new(tracker, gap.duration_ms, 0.0);
                    progress.forward(now_ms);
                    self.animation = Some(progress);
                }
            }
            self.target_offset = target;
            if self
                .animation
                .as_ref()
                .is_some_and(|p| p.status() == ProgressStatus::Completed)
            {
                self.settle();
            }
        } else {
            self.animation = None;
            self.target_offset = target;
            self.start_offset = target;
        }
    }

    fn settle(&mut self) {
        self.start_offset = self.target_offset;
        self.animation = None;
    }

    pub(crate) fn reset_gap(&mut self) {
        self.animation = None;
        self.start_offset = Offset::ZERO;
        self.target_offset = Offset::ZERO;
    }

    /// Returns `true` while the gap animation is still running.
    fn tick(&mut self, now_ms: u64) -> bool {
        let Some(progress) = &mut self.animation else {
            return false;
        };
        if progress.tick(now_ms) == ProgressStatus::Completed {
            self.settle();
            return false;
        }
        true
    }
}

/// Mounted items by slot index. Iteration is in ascending slot order.
#[derive(Debug, Default)]
pub(crate) struct SlotRegistry {
    slots: BTreeMap<usize, Slot>,
}

impl SlotRegistry {
    pub(crate) fn register(&mut self, index: usize, key: u64) -> &mut Slot {
        let slot = self.slots.entry(index).or_insert_with(|| Slot::new(key));
        if slot.key != key {
            *slot = Slot::new(key);
        }
        slot
    }

    /// Removes the registration at `index` if it still belongs to `key`.
    pub(crate) fn unregister(&mut self, index: usize, key: u64) -> bool {
        if self.slots.get(&index).is_some_and(|s| s.key == key) {
            self.slots.remove(&index);
            return true;
        }
        false
    }

    pub(crate) fn contains(&self, index: usize) -> bool {
        self.slots.contains_key(&index)
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(&index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Slot> {
        self.slots.get_mut(&index)
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, &Slot)> {
        self.slots.iter().map(|(i, s)| (*i, s))
    }

    pub(crate) fn indexes(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.keys().copied()
    }

    /// Applies `gap` to every slot except the dragged one.
    pub(crate) fn update_for_gap(
        &mut self,
        gap: Gap,
        animate: bool,
        easing: Easing,
        tracker: &AnimationTracker,
        now_ms: u64,
    ) {
        for (&index, slot) in self.slots.iter_mut() {
            if index == gap.drag_index {
                continue;
            }
            slot.update_for_gap(index, gap, animate, easing, tracker, now_ms);
        }
    }

    pub(crate) fn reset_gaps(&mut self) {
        for slot in self.slots.values_mut() {
            slot.reset_gap();
            slot.dragging = false;
        }
    }

    /// Advances every gap animation. Returns `true` while any is running.
    pub(crate) fn tick(&mut self, now_ms: u64) -> bool {
        let mut running = false;
        for slot in self.slots.values_mut() {
            running |= slot.tick(now_ms);
        }
        running
    }

    /// Moves every registration at or after `from` one slot later.
    pub(crate) fn shift_up_from(&mut self, from: usize) {
        let tail = self.slots.split_off(&from);
        for (index, slot) in tail {
            self.slots.insert(index + 1, slot);
        }
    }

    /// Drops the registration at `index` and moves every later one a slot earlier.
    pub(crate) fn collapse(&mut self, index: usize) {
        let mut tail = self.slots.split_off(&index);
        tail.remove(&index);
        for (i, slot) in tail {
            self.slots.insert(i - 1, slot);
        }
    }

    pub(crate) fn clear_animations(&mut self) {
        for slot in self.slots.values_mut() {
            slot.animation = None;
            slot.start_offset = slot.target_offset;
        }
    }
}
