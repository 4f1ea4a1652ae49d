use alloc::vec::Vec;

use crate::progress::{AnimationTracker, Progress, ProgressStatus};
use crate::slot::SlotRegistry;
use crate::{ReorderError, Result};

/// An item animating into or out of the list.
#[derive(Debug)]
struct ActiveItem<B> {
    slot_index: usize,
    progress: Progress,
    removed: Option<B>,
}

/// What the host should render at a slot.
#[derive(Debug)]
pub enum SlotContent<'a, B> {
    /// A live item. `appear` is 1.0 once any insert animation has finished.
    Item { index: usize, appear: f32 },
    /// An item mid-removal, rendered from the builder it was removed with.
    Removed { builder: &'a B, disappear: f32 },
}

/// Reconciles stable indices (the consumer's data) with slot indices (what is rendered).
///
/// Owns the incoming items, the outgoing items and the slot registry so that every index shift
/// is applied to all three in one place.
#[derive(Debug)]
pub(crate) struct ItemLedger<B> {
    incoming: Vec<ActiveItem<B>>,
    outgoing: Vec<ActiveItem<B>>,
    slot_count: usize,
    pub(crate) slots: SlotRegistry,
}

fn position_of<B>(items: &[ActiveItem<B>], slot_index: usize) -> Option<usize> {
    items.iter().position(|i| i.slot_index == slot_index)
}

fn insert_sorted<B>(items: &mut Vec<ActiveItem<B>>, item: ActiveItem<B>) {
    let at = items.partition_point(|i| i.slot_index < item.slot_index);
    items.insert(at, item);
}

impl<B> ItemLedger<B> {
    pub(crate) fn new(item_count: usize) -> Self {
        Self {
            incoming: Vec::new(),
            outgoing: Vec::new(),
            slot_count: item_count,
            slots: SlotRegistry::default(),
        }
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Number of items the consumer's data holds (slots minus departing items).
    pub(crate) fn item_count(&self) -> usize {
        self.slot_count - self.outgoing.len()
    }

    pub(crate) fn incoming_len(&self) -> usize {
        self.incoming.len()
    }

    pub(crate) fn outgoing_len(&self) -> usize {
        self.outgoing.len()
    }

    pub(crate) fn is_animating(&self) -> bool {
        !self.incoming.is_empty() || !self.outgoing.is_empty()
    }

    /// Slot of the item at stable `index`, skipping departing items.
    ///
    /// `index == item_count()` maps to the slot just past the last live item.
    pub(crate) fn stable_to_slot(&self, index: usize) -> usize {
        let mut slot = index;
        for item in &self.outgoing {
            if item.slot_index <= slot {
                slot += 1;
            } else {
                break;
            }
        }
        slot
    }

    /// Stable index of the live item at `slot`; `None` for departing items.
    pub(crate) fn slot_to_stable(&self, slot: usize) -> Option<usize> {
        if position_of(&self.outgoing, slot).is_some() {
            return None;
        }
        Some(self.boundary_to_stable(slot))
    }

    /// Stable index of the insertion boundary before `slot`.
    pub(crate) fn boundary_to_stable(&self, slot: usize) -> usize {
        let before = self
            .outgoing
            .iter()
            .take_while(|i| i.slot_index < slot)
            .count();
        slot - before
    }

    pub(crate) fn content(&self, slot: usize) -> Option<SlotContent<'_, B>> {
        if slot >= self.slot_count {
            return None;
        }
        if let Some(pos) = position_of(&self.outgoing, slot) {
            let item = &self.outgoing[pos];
            let builder = item.removed.as_ref()?;
            return Some(SlotContent::Removed {
                builder,
                disappear: item.progress.value(),
            });
        }
        let appear = position_of(&self.incoming, slot)
            .map(|pos| self.incoming[pos].progress.value())
            .unwrap_or(1.0);
        Some(SlotContent::Item {
            index: self.boundary_to_stable(slot),
            appear,
        })
    }

    pub(crate) fn insert(
        &mut self,
        index: usize,
        duration_ms: u64,
        tracker: &AnimationTracker,
        now_ms: u64,
    ) -> Result<usize> {
        let len = self.item_count();
        if index > len {
            return Err(ReorderError::IndexOutOfRange { index, len });
        }
        let slot = self.stable_to_slot(index);

        for item in self.incoming.iter_mut().chain(self.outgoing.iter_mut()) {
            if item.slot_index >= slot {
                item.slot_index += 1;
            }
        }
        self.slots.shift_up_from(slot);

        let mut progress = Progress::new(tracker, duration_ms, 0.0);
        progress.forward(now_ms);
        let item = ActiveItem {
            slot_index: slot,
            progress,
            removed: None,
        };
        self.slot_count += 1;
        rdebug!(index, slot, duration_ms, "ledger insert");

        if item.progress.status() == ProgressStatus::Completed {
            return Ok(slot);
        }
        insert_sorted(&mut self.incoming, item);
        Ok(slot)
    }

    pub(crate) fn remove(
        &mut self,
        index: usize,
        builder: B,
        duration_ms: u64,
        tracker: &AnimationTracker,
        now_ms: u64,
    ) -> Result<usize> {
        let len = self.item_count();
        if index >= len {
            return Err(ReorderError::IndexOutOfRange { index, len });
        }
        let slot = self.stable_to_slot(index);
        self.remove_slot(slot, builder, duration_ms, tracker, now_ms)?;
        Ok(slot)
    }

    pub(crate) fn remove_slot(
        &mut self,
        slot: usize,
        builder: B,
        duration_ms: u64,
        tracker: &AnimationTracker,
        now_ms: u64,
    ) -> Result<()> {
        if slot >= self.slot_count {
            return Err(ReorderError::IndexOutOfRange {
                index: slot,
                len: self.slot_count,
            });
        }
        if position_of(&self.outgoing, slot).is_some() {
            return Err(ReorderError::DuplicateRemoval { slot_index: slot });
        }

        // An item still animating in reverses from where it is.
        let mut progress = match position_of(&self.incoming, slot) {
            Some(pos) => self.incoming.remove(pos).progress,
            None => Progress::new(tracker, duration_ms, 1.0),
        };
        progress.reverse(now_ms);
        rdebug!(slot, duration_ms, "ledger remove");

        if progress.status() == ProgressStatus::Dismissed {
            drop(progress);
            self.finish_removal(slot);
            return Ok(());
        }
        insert_sorted(
            &mut self.outgoing,
            ActiveItem {
                slot_index: slot,
                progress,
                removed: Some(builder),
            },
        );
        Ok(())
    }

    fn finish_removal(&mut self, slot: usize) {
        for item in self.incoming.iter_mut().chain(self.outgoing.iter_mut()) {
            if item.slot_index > slot {
                item.slot_index -= 1;
            }
        }
        self.slots.collapse(slot);
        self.slot_count -= 1;
    }

    /// Advances every insert/remove animation and retires finished ones.
    ///
    /// Returns `true` while any animation is still running.
    pub(crate) fn tick(&mut self, now_ms: u64) -> bool {
        self.incoming
            .retain_mut(|item| item.progress.tick(now_ms) != ProgressStatus::Completed);

        loop {
            let done = self
                .outgoing
                .iter_mut()
                .position(|item| item.progress.tick(now_ms) == ProgressStatus::Dismissed);
            let Some(pos) = done else {
                break;
            };
            let item = self.outgoing.remove(pos);
            rtrace!(slot = item.slot_index, "ledger removal finished");
            self.finish_removal(item.slot_index);
        }

        self.is_animating()
    }

    /// Resets the ledger to `item_count` settled items. Registrations are kept.
    pub(crate) fn reset(&mut self, item_count: usize) {
        self.incoming.clear();
        self.outgoing.clear();
        self.slot_count = item_count;
    }

    /// Drops every animation, completing pending removals immediately.
    pub(crate) fn dispose(&mut self) {
        self.incoming.clear();
        while let Some(item) = self.outgoing.pop() {
            self.finish_removal(item.slot_index);
        }
        self.slots.clear_animations();
    }
}
