//! Property-based tests for stable ↔ slot index translation under insert/remove animations.
//!
//! 1. stable → slot → stable round-trips at every point in time.
//! 2. Slots of live items are strictly increasing.
//! 3. Every departing slot renders the builder it was removed with.
//! 4. Once animations drain, slots and stable indices coincide.
//! 5. No progress controller outlives its animation.

use proptest::prelude::*;
use reorderable::{
    AutoScroller, Easing, ItemExtent, ListGeometry, ProxyFrame, ProxyOverlay, Rect,
    ReorderController, ReorderOptions, Scrollable, SlotContent,
};

// ── Helpers ─────────────────────────────────────────────────────────────

/// A host with nothing mounted; the ledger never consults it.
struct NullHost;

impl ListGeometry for NullHost {
    fn item_rect(&self, _index: usize) -> Option<Rect> {
        None
    }

    fn viewport_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, 100.0, 100.0)
    }
}

impl Scrollable for NullHost {
    fn scroll_offset(&self) -> f32 {
        0.0
    }

    fn max_scroll_offset(&self) -> f32 {
        0.0
    }

    fn animate_scroll_to(&mut self, _offset: f32, _duration_ms: u64, _easing: Easing, _now_ms: u64) {}

    fn is_scroll_animating(&self) -> bool {
        false
    }
}

impl AutoScroller for NullHost {
    fn start_auto_scroll_if_necessary(&mut self, _drag_target: Rect, _velocity_scalar: f32) {}

    fn stop_auto_scroll(&mut self) {}
}

impl ProxyOverlay for NullHost {
    fn insert_proxy(&mut self, _frame: &ProxyFrame) {}

    fn update_proxy(&mut self, _frame: &ProxyFrame) {}

    fn remove_proxy(&mut self) {}
}

#[derive(Clone, Debug)]
enum Op {
    Insert { at: usize, duration_ms: u64 },
    Remove { at: usize, duration_ms: u64 },
    Advance { ms: u64 },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..64, 0u64..200).prop_map(|(at, duration_ms)| Op::Insert { at, duration_ms }),
        (0usize..64, 0u64..200).prop_map(|(at, duration_ms)| Op::Remove { at, duration_ms }),
        (1u64..150).prop_map(|ms| Op::Advance { ms }),
    ]
}

fn check_mapping(
    ctrl: &ReorderController<u64>,
    model: &[u64],
    departing: &[u64],
) -> Result<(), TestCaseError> {
    prop_assert_eq!(ctrl.item_count(), model.len());

    let mut previous = None;
    for stable in 0..model.len() {
        let slot = ctrl.stable_to_slot(stable);
        prop_assert!(slot.is_some(), "stable {} has no slot", stable);
        let slot = slot.unwrap_or_default();
        prop_assert_eq!(ctrl.slot_to_stable(slot), Some(stable));
        if let Some(prev) = previous {
            prop_assert!(slot > prev, "slots not increasing: {} after {}", slot, prev);
        }
        previous = Some(slot);
    }
    prop_assert_eq!(ctrl.stable_to_slot(model.len()), None);

    let mut removed = 0;
    for slot in 0..ctrl.slot_count() {
        match ctrl.slot_content(slot) {
            Some(SlotContent::Item { index, .. }) => {
                prop_assert_eq!(ctrl.stable_to_slot(index), Some(slot));
            }
            Some(SlotContent::Removed { builder, .. }) => {
                prop_assert!(departing.contains(builder), "unknown builder {}", builder);
                removed += 1;
            }
            None => prop_assert!(false, "slot {} has no content", slot),
        }
    }
    prop_assert_eq!(removed + model.len(), ctrl.slot_count());
    Ok(())
}

// ═════════════════════════════════════════════════════════════════════════
// 1-4. Translation stays a bijection through any insert/remove sequence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn translation_is_a_bijection(
        initial in 0usize..12,
        ops in proptest::collection::vec(op(), 1..60),
    ) {
        let mut ctrl: ReorderController<u64> =
            ReorderController::from_options(ReorderOptions::new(initial, ItemExtent::Fixed(10.0)));
        let mut host = NullHost;
        let mut model: Vec<u64> = (0..initial as u64).collect();
        let mut departing = Vec::new();
        let mut next_id = initial as u64;
        let mut now = 0u64;

        for op in ops {
            match op {
                Op::Insert { at, duration_ms } => {
                    let at = at % (model.len() + 1);
                    ctrl.insert_item(at, duration_ms, now).unwrap();
                    model.insert(at, next_id);
                    next_id += 1;
                }
                Op::Remove { at, duration_ms } => {
                    if model.is_empty() {
                        prop_assert!(ctrl.remove_item(0, 0, duration_ms, now).is_err());
                        continue;
                    }
                    let at = at % model.len();
                    let id = model.remove(at);
                    ctrl.remove_item(at, id, duration_ms, now).unwrap();
                    departing.push(id);
                }
                Op::Advance { ms } => {
                    now += ms;
                    ctrl.tick(&mut host, now);
                }
            }
            check_mapping(&ctrl, &model, &departing)?;
        }

        now += 1_000;
        prop_assert!(!ctrl.tick(&mut host, now));
        check_mapping(&ctrl, &model, &departing)?;
        prop_assert_eq!(ctrl.slot_count(), model.len());
        for stable in 0..model.len() {
            prop_assert_eq!(ctrl.stable_to_slot(stable), Some(stable));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. No leaked progress controllers
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn drained_controller_holds_no_animations(
        count in 1usize..10,
        at in 0usize..10,
        insert_ms in 0u64..300,
        remove_ms in 0u64..300,
        gap_ms in 0u64..300,
    ) {
        let mut ctrl = ReorderController::new(ReorderOptions::new(0, ItemExtent::Fixed(10.0)));
        let mut host = NullHost;

        ctrl.insert_all_items(0, count, insert_ms, 0).unwrap();
        ctrl.tick(&mut host, gap_ms);
        let at = at % count;
        ctrl.remove_item(at, (), remove_ms, gap_ms).unwrap();
        ctrl.remove_all_items((), remove_ms, gap_ms).unwrap();
        prop_assert_eq!(ctrl.item_count(), 0);

        ctrl.tick(&mut host, gap_ms + 1_000);
        prop_assert_eq!(ctrl.slot_count(), 0);
        prop_assert_eq!(ctrl.animation_stats().live(), 0);
    }
}
