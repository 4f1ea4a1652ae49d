use crate::*;

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use reorderable::{
    AutoScroller, Axis, DragGesture, DragGestureRecognizer, ItemExtent, ListGeometry,
    ManualReorder, Offset, PointerDown, PointerEvent, Rect, ReorderController, ReorderOptions,
    ReorderPhase, Ticker,
};
use std::sync::Mutex;

const VIEWPORT: Rect = Rect::new(0.0, 0.0, 100.0, 200.0);

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn down(pointer: u32, x: f32, y: f32) -> PointerDown {
    PointerDown {
        pointer,
        position: Offset::new(x, y),
    }
}

fn move_to(pointer: u32, x: f32, y: f32) -> PointerEvent {
    PointerEvent::Move {
        pointer,
        position: Offset::new(x, y),
    }
}

struct NoopTicker;

impl Ticker for NoopTicker {
    fn schedule_frame(&self) {}
}

#[derive(Clone, Default)]
struct Reorders(Arc<Mutex<Vec<(usize, usize)>>>);

impl Reorders {
    fn attach(&self, options: ReorderOptions) -> ReorderOptions {
        let log = self.clone();
        options.with_on_reorder(Some(move |from, to| log.0.lock().unwrap().push((from, to))))
    }

    fn take(&self) -> Vec<(usize, usize)> {
        core::mem::take(&mut *self.0.lock().unwrap())
    }
}

/// One frame of a host loop: scroll, relayout, then the controller.
fn frame(ctrl: &mut ReorderController, list: &mut SimulatedList, now_ms: u64) -> bool {
    if list.tick(now_ms) {
        list.layout(ctrl);
        ctrl.on_scroll(list, now_ms);
    }
    let busy = ctrl.tick(list, now_ms);
    busy || list.scroll().is_animating() || list.auto_scroller().is_scrolling()
}

fn run_until_idle(ctrl: &mut ReorderController, list: &mut SimulatedList, mut now_ms: u64) -> u64 {
    for _ in 0..1_000 {
        if !frame(ctrl, list, now_ms) {
            return now_ms;
        }
        now_ms += 16;
    }
    panic!("host loop never went idle");
}

#[test]
fn tween_drives_scroll_position() {
    let mut scroll = ScrollPosition::new(100.0, 10_000.0);
    let to = scroll.animate_to(5_000.0, 0, 100, Easing::SmoothStep);
    assert_eq!(to, 5_000.0);

    let mut last = 0.0;
    for now_ms in [0u64, 10, 20, 40, 80, 100, 120] {
        if let Some(off) = scroll.tick(now_ms) {
            assert!(off >= last);
            last = off;
        }
    }
    assert!(!scroll.is_animating());
    assert_eq!(scroll.offset(), to);
}

#[test]
fn scroll_position_clamps_and_jumps_cancel_tweens() {
    let mut scroll = ScrollPosition::new(200.0, 500.0);
    assert_eq!(scroll.max_offset(), 300.0);
    assert_eq!(scroll.animate_to(1_000.0, 0, 100, Easing::Linear), 300.0);
    assert_eq!(scroll.jump_to(-20.0), 0.0);
    assert!(!scroll.is_animating());
    assert_eq!(scroll.tick(50), None);

    scroll.jump_to(300.0);
    scroll.set_extents(200.0, 250.0);
    assert_eq!(scroll.offset(), 50.0);
}

#[test]
fn retargeting_continues_from_the_current_value() {
    let mut scroll = ScrollPosition::new(100.0, 10_000.0);
    scroll.animate_to(1_000.0, 0, 100, Easing::Linear);
    assert!(approx(scroll.tick(50).unwrap(), 500.0));

    scroll.animate_to(0.0, 50, 100, Easing::Linear);
    assert!(approx(scroll.tick(100).unwrap(), 250.0));
    assert_eq!(scroll.tick(150), Some(0.0));
    assert!(!scroll.is_animating());
}

#[test]
fn edge_auto_scroller_speed_follows_the_overlap() {
    let mut auto = EdgeAutoScroller::new(Axis::Vertical, VIEWPORT);
    let mut scroll = ScrollPosition::new(200.0, 1_000.0);

    // Half of the target hangs below the viewport.
    auto.start_auto_scroll_if_necessary(Rect::new(0.0, 175.0, 100.0, 50.0), 50.0);
    assert!(auto.is_scrolling());
    assert_eq!(auto.step(), 25.0);

    assert_eq!(auto.tick(&mut scroll, 0), None);
    assert_eq!(auto.tick(&mut scroll, 16), Some(25.0));
    assert_eq!(auto.tick(&mut scroll, 48), Some(50.0));
    assert_eq!(scroll.offset(), 75.0);

    // Entirely above: full speed towards index 0.
    auto.start_auto_scroll_if_necessary(Rect::new(0.0, -60.0, 100.0, 50.0), 50.0);
    assert_eq!(auto.step(), -50.0);

    auto.start_auto_scroll_if_necessary(Rect::new(0.0, 100.0, 100.0, 50.0), 50.0);
    assert!(!auto.is_scrolling());
    assert_eq!(auto.tick(&mut scroll, 64), None);
}

#[test]
fn edge_auto_scroller_flips_for_reversed_lists() {
    let mut auto = EdgeAutoScroller::new(Axis::Vertical, VIEWPORT).with_reverse(true);
    auto.start_auto_scroll_if_necessary(Rect::new(0.0, 175.0, 100.0, 50.0), 50.0);
    assert_eq!(auto.step(), -25.0);
    auto.start_auto_scroll_if_necessary(Rect::new(0.0, -60.0, 100.0, 50.0), 50.0);
    assert_eq!(auto.step(), 50.0);

    // A barely overlapping target still moves.
    auto.start_auto_scroll_if_necessary(Rect::new(0.0, -0.01, 100.0, 50.0), 50.0);
    assert_eq!(auto.step(), 1.0);
}

#[test]
fn edge_auto_scroller_stops_at_the_scroll_limit() {
    let mut auto = EdgeAutoScroller::new(Axis::Vertical, VIEWPORT);
    let mut scroll = ScrollPosition::new(200.0, 250.0);
    auto.start_auto_scroll_if_necessary(Rect::new(0.0, 260.0, 100.0, 50.0), 50.0);

    assert_eq!(auto.tick(&mut scroll, 0), None);
    assert_eq!(auto.tick(&mut scroll, 16), Some(50.0));
    assert_eq!(auto.tick(&mut scroll, 32), None);
    assert!(!auto.is_scrolling());
    assert_eq!(scroll.offset(), 50.0);
}

#[test]
fn immediate_recognizer_waits_for_the_slop() {
    let mut r = ImmediateDragRecognizer::default();
    r.add_pointer(down(1, 10.0, 10.0), 0);

    assert_eq!(r.handle_event(&move_to(1, 10.0, 20.0), 5), None);
    assert_eq!(r.handle_event(&move_to(2, 10.0, 90.0), 6), None);
    assert_eq!(
        r.handle_event(&move_to(1, 10.0, 40.0), 10),
        Some(DragGesture::Start {
            position: Offset::new(10.0, 10.0)
        })
    );
    assert!(r.is_accepted());
    assert_eq!(
        r.handle_event(&move_to(1, 10.0, 50.0), 20),
        Some(DragGesture::Update {
            delta: Offset::new(0.0, 40.0)
        })
    );
    assert_eq!(
        r.handle_event(&PointerEvent::Up { pointer: 1 }, 30),
        Some(DragGesture::End)
    );
    assert!(!r.is_accepted());
}

#[test]
fn immediate_recognizer_rejects_a_tap() {
    let mut r = ImmediateDragRecognizer::new(4.0);
    r.add_pointer(down(1, 0.0, 0.0), 0);
    assert_eq!(r.handle_event(&move_to(1, 2.0, 2.0), 5), None);
    assert_eq!(
        r.handle_event(&PointerEvent::Up { pointer: 1 }, 10),
        Some(DragGesture::Cancel)
    );
    // Nothing is tracked anymore.
    assert_eq!(r.handle_event(&move_to(1, 50.0, 50.0), 20), None);
}

#[test]
fn delayed_recognizer_accepts_after_the_hold() {
    let mut r = DelayedDragRecognizer::new(100);
    r.add_pointer(down(1, 0.0, 0.0), 0);

    assert_eq!(r.handle_event(&move_to(1, 0.0, 5.0), 40), None);
    assert_eq!(r.poll(99), None);
    assert_eq!(
        r.poll(100),
        Some(DragGesture::Start {
            position: Offset::new(0.0, 5.0)
        })
    );
    assert_eq!(r.poll(200), None);
    assert_eq!(
        r.handle_event(&move_to(1, 0.0, 65.0), 210),
        Some(DragGesture::Update {
            delta: Offset::new(0.0, 60.0)
        })
    );
    assert_eq!(
        r.handle_event(&PointerEvent::Up { pointer: 1 }, 220),
        Some(DragGesture::End)
    );
}

#[test]
fn delayed_recognizer_rejects_early_movement() {
    let mut r = DelayedDragRecognizer::new(100).with_slop(10.0);
    r.add_pointer(down(1, 0.0, 0.0), 0);
    assert_eq!(
        r.handle_event(&move_to(1, 0.0, 30.0), 50),
        Some(DragGesture::Cancel)
    );
    assert_eq!(r.poll(500), None);

    // A late event after the hold accepts first, then still counts.
    r.add_pointer(down(2, 0.0, 0.0), 1_000);
    assert_eq!(
        r.handle_event(&move_to(2, 0.0, 30.0), 1_200),
        Some(DragGesture::Start {
            position: Offset::new(0.0, 0.0)
        })
    );
    assert!(r.needs_poll());
    assert_eq!(
        r.poll(1_200),
        Some(DragGesture::Update {
            delta: Offset::new(0.0, 30.0)
        })
    );
    assert_eq!(r.poll(1_216), None);
    assert!(!r.needs_poll());
}

#[test]
fn delayed_recognizer_ends_on_a_release_that_arrives_after_the_hold() {
    let mut r = DelayedDragRecognizer::new(100);
    r.add_pointer(down(1, 0.0, 0.0), 0);
    assert!(r.needs_poll());
    assert_eq!(
        r.handle_event(&PointerEvent::Up { pointer: 1 }, 150),
        Some(DragGesture::Start {
            position: Offset::new(0.0, 0.0)
        })
    );
    assert_eq!(r.poll(150), Some(DragGesture::End));
    assert_eq!(r.poll(166), None);
    assert!(!r.needs_poll());
}

#[test]
fn simulated_list_lays_out_the_visible_window() {
    let mut list = SimulatedList::uniform(Axis::Vertical, VIEWPORT, 10, 50.0);
    assert_eq!(list.visible_range(), 0..4);
    assert_eq!(list.item_rect(1), Some(Rect::new(0.0, 50.0, 100.0, 50.0)));
    assert_eq!(list.item_rect(4), None);

    list.scroll_mut().jump_to(75.0);
    assert_eq!(list.visible_range(), 1..6);
    assert_eq!(list.item_rect(1), Some(Rect::new(0.0, -25.0, 100.0, 50.0)));

    let mut ctrl = ReorderController::new(ReorderOptions::new(10, ItemExtent::Fixed(50.0)));
    list.layout(&mut ctrl);
    assert!(!ctrl.is_mounted(0));
    assert!(ctrl.is_mounted(5));
    assert!(!ctrl.is_mounted(6));

    let reversed = SimulatedList::uniform(Axis::Vertical, VIEWPORT, 10, 50.0).with_reverse(true);
    assert_eq!(
        reversed.item_rect(0),
        Some(Rect::new(0.0, 150.0, 100.0, 50.0))
    );

    let mut mixed = SimulatedList::new(Axis::Horizontal, VIEWPORT, alloc::vec![30.0, 80.0]);
    assert_eq!(mixed.item_rect(1), Some(Rect::new(30.0, 0.0, 80.0, 200.0)));
    mixed.apply_reorder(0, 2);
    assert_eq!(mixed.item_rect(0), Some(Rect::new(0.0, 0.0, 80.0, 200.0)));
}

#[test]
fn pointer_drag_through_the_simulated_list() {
    let reorders = Reorders::default();
    let mut ctrl = ReorderController::new(
        reorders.attach(ReorderOptions::new(10, ItemExtent::Fixed(50.0))),
    );
    let mut list = SimulatedList::uniform(Axis::Vertical, VIEWPORT, 10, 50.0);
    list.layout(&mut ctrl);

    ctrl.start_item_drag_reorder(
        &mut list,
        1,
        down(1, 10.0, 60.0),
        Box::new(ImmediateDragRecognizer::default()),
        0,
    )
    .unwrap();
    ctrl.handle_pointer(&mut list, &move_to(1, 10.0, 70.0), 8);
    assert_eq!(ctrl.phase(), ReorderPhase::Armed);
    ctrl.handle_pointer(&mut list, &move_to(1, 10.0, 90.0), 16);
    assert_eq!(ctrl.phase(), ReorderPhase::Dragging);
    assert!(approx(list.proxy().unwrap().position.y, 50.0));

    // The proxy now covers item 3 exactly.
    ctrl.handle_pointer(&mut list, &move_to(1, 10.0, 160.0), 32);
    assert_eq!(ctrl.insertion_cursor(), Some(3));
    assert!(!list.auto_scroller().is_scrolling());
    // A live drag keeps requesting frames.
    for now_ms in (48..=400).step_by(16) {
        assert!(frame(&mut ctrl, &mut list, now_ms));
    }
    assert!(approx(ctrl.item_offset(2).y, -50.0));

    ctrl.handle_pointer(&mut list, &PointerEvent::Up { pointer: 1 }, 416);
    run_until_idle(&mut ctrl, &mut list, 432);

    assert_eq!(reorders.take(), [(1, 3)]);
    list.apply_reorder(1, 3);
    assert_eq!(ctrl.phase(), ReorderPhase::Idle);
    assert_eq!(ctrl.item_offset(2), Offset::ZERO);
    assert_eq!(list.proxy(), None);
    assert_eq!(list.proxy_inserts(), 1);
    assert_eq!(list.proxy_removes(), 1);
    assert_eq!(ctrl.animation_stats().live(), 0);
}

#[test]
fn tap_leaves_the_controller_idle() {
    let mut ctrl = ReorderController::new(ReorderOptions::new(4, ItemExtent::Fixed(50.0)));
    let mut list = SimulatedList::uniform(Axis::Vertical, VIEWPORT, 4, 50.0);
    list.layout(&mut ctrl);

    ctrl.start_item_drag_reorder(
        &mut list,
        0,
        down(1, 10.0, 10.0),
        Box::new(ImmediateDragRecognizer::default()),
        0,
    )
    .unwrap();
    assert_eq!(ctrl.phase(), ReorderPhase::Armed);
    // Only pointer input can start this drag; no frames are needed meanwhile.
    assert!(!ctrl.tick(&mut list, 16));
    ctrl.handle_pointer(&mut list, &PointerEvent::Up { pointer: 1 }, 50);
    assert_eq!(ctrl.phase(), ReorderPhase::Idle);
    assert!(!ctrl.tick(&mut list, 66));
    assert_eq!(list.proxy_inserts(), 0);
}

#[test]
fn long_press_starts_from_tick() {
    let reorders = Reorders::default();
    let mut ctrl = ReorderController::new(
        reorders.attach(ReorderOptions::new(4, ItemExtent::Fixed(50.0))),
    );
    let mut list = SimulatedList::uniform(Axis::Vertical, VIEWPORT, 4, 50.0);
    list.layout(&mut ctrl);

    ctrl.start_item_drag_reorder(
        &mut list,
        2,
        down(1, 10.0, 110.0),
        Box::new(DelayedDragRecognizer::new(100)),
        0,
    )
    .unwrap();
    assert!(frame(&mut ctrl, &mut list, 50));
    assert_eq!(ctrl.phase(), ReorderPhase::Armed);
    frame(&mut ctrl, &mut list, 100);
    assert_eq!(ctrl.phase(), ReorderPhase::Dragging);
    assert!(ctrl.is_item_dragging(2));

    ctrl.handle_pointer(&mut list, &PointerEvent::Up { pointer: 1 }, 116);
    run_until_idle(&mut ctrl, &mut list, 132);
    assert!(reorders.take().is_empty());
    assert_eq!(ctrl.phase(), ReorderPhase::Idle);
}

#[test]
fn manual_reorder_scrolls_the_simulated_list() {
    let reorders = Reorders::default();
    let mut ctrl = ReorderController::new(
        reorders
            .attach(ReorderOptions::new(20, ItemExtent::Fixed(50.0)))
            .with_ticker(Some(Arc::new(NoopTicker) as Arc<dyn Ticker>)),
    );
    let mut list = SimulatedList::uniform(Axis::Vertical, VIEWPORT, 20, 50.0);
    list.layout(&mut ctrl);

    ctrl.start_item_manual_reorder(&mut list, ManualReorder::new(0, 10), 0)
        .unwrap();
    assert!(list.scroll().is_animating());

    run_until_idle(&mut ctrl, &mut list, 16);

    assert_eq!(reorders.take(), [(0, 11)]);
    assert!(approx(list.scroll().offset(), 400.0));
    assert!(!list.auto_scroller().is_scrolling());
    assert_eq!(list.proxy(), None);
    assert_eq!(ctrl.phase(), ReorderPhase::Idle);
    assert_eq!(ctrl.animation_stats().live(), 0);
}

#[test]
fn long_press_released_before_the_next_frame_still_drops() {
    let reorders = Reorders::default();
    let mut ctrl = ReorderController::new(
        reorders.attach(ReorderOptions::new(4, ItemExtent::Fixed(50.0))),
    );
    let mut list = SimulatedList::uniform(Axis::Vertical, VIEWPORT, 4, 50.0);
    list.layout(&mut ctrl);

    ctrl.start_item_drag_reorder(
        &mut list,
        2,
        down(1, 10.0, 110.0),
        Box::new(DelayedDragRecognizer::new(100)),
        0,
    )
    .unwrap();
    // The hold elapsed at 100 but the host never ticked before the release.
    ctrl.handle_pointer(&mut list, &PointerEvent::Up { pointer: 1 }, 150);
    run_until_idle(&mut ctrl, &mut list, 166);

    assert_eq!(ctrl.phase(), ReorderPhase::Idle);
    assert!(reorders.take().is_empty());
    assert_eq!(list.proxy(), None);
    assert_eq!(list.proxy_inserts(), 1);
    assert_eq!(list.proxy_removes(), 1);
    assert_eq!(ctrl.animation_stats().live(), 0);
}

#[test]
fn long_press_keeps_the_move_that_revealed_the_hold() {
    let mut ctrl = ReorderController::new(ReorderOptions::new(4, ItemExtent::Fixed(50.0)));
    let mut list = SimulatedList::uniform(Axis::Vertical, VIEWPORT, 4, 50.0);
    list.layout(&mut ctrl);

    ctrl.start_item_drag_reorder(
        &mut list,
        1,
        down(1, 10.0, 60.0),
        Box::new(DelayedDragRecognizer::new(100)),
        0,
    )
    .unwrap();
    ctrl.handle_pointer(&mut list, &move_to(1, 10.0, 70.0), 150);
    assert_eq!(ctrl.phase(), ReorderPhase::Dragging);
    assert!(approx(list.proxy().unwrap().position.y, 60.0));

    ctrl.handle_pointer(&mut list, &PointerEvent::Up { pointer: 1 }, 166);
    run_until_idle(&mut ctrl, &mut list, 182);
    assert_eq!(ctrl.phase(), ReorderPhase::Idle);
}

#[test]
fn auto_scroll_moves_the_insertion_cursor() {
    let reorders = Reorders::default();
    let mut ctrl = ReorderController::new(
        reorders.attach(ReorderOptions::new(20, ItemExtent::Fixed(50.0))),
    );
    let mut list = SimulatedList::uniform(Axis::Vertical, VIEWPORT, 20, 50.0);
    list.layout(&mut ctrl);

    ctrl.start_item_drag_reorder(
        &mut list,
        1,
        down(1, 10.0, 60.0),
        Box::new(ImmediateDragRecognizer::default()),
        0,
    )
    .unwrap();
    ctrl.handle_pointer(&mut list, &move_to(1, 10.0, 90.0), 16);
    // The proxy now hangs 30 px below the viewport.
    ctrl.handle_pointer(&mut list, &move_to(1, 10.0, 190.0), 32);
    assert!(list.auto_scroller().is_scrolling());
    let before = ctrl.insertion_cursor().unwrap();

    let mut now_ms = 32;
    for _ in 0..10 {
        now_ms += 16;
        assert!(frame(&mut ctrl, &mut list, now_ms));
    }
    assert!(list.scroll().offset() > 100.0);
    assert!(!ctrl.is_mounted(1));
    let cursor = ctrl.insertion_cursor().unwrap();
    assert!(cursor > before && cursor > 4, "{before} -> {cursor}");

    ctrl.handle_pointer(&mut list, &PointerEvent::Up { pointer: 1 }, now_ms);
    assert!(!list.auto_scroller().is_scrolling());
    run_until_idle(&mut ctrl, &mut list, now_ms + 16);
    assert_eq!(reorders.take(), [(1, cursor)]);
    assert_eq!(ctrl.animation_stats().live(), 0);
}
