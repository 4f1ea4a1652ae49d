use std::sync::{Arc, Mutex};

use reorderable::{
    Axis, ItemExtent, Offset, PointerDown, PointerEvent, Rect, ReorderController, ReorderOptions,
};
use reorderable_adapter::{ImmediateDragRecognizer, SimulatedList};

fn main() {
    // Example: a headless host loop dragging the second row of a list down past two others.
    //
    // An adapter would:
    // - register mounted rows after every layout
    // - forward pointer input to the controller
    // - tick the scroll/auto-scroll state and the controller every frame
    // - paint rows translated by `item_offset` and the proxy from the overlay
    let mut rows: Vec<&str> = vec!["alpha", "bravo", "charlie", "delta", "echo", "foxtrot"];
    let moved = Arc::new(Mutex::new(None));

    let sink = Arc::clone(&moved);
    let options = ReorderOptions::new(rows.len(), ItemExtent::Fixed(40.0))
        .with_on_reorder(Some(move |from, to| {
            if let Ok(mut slot) = sink.lock() {
                *slot = Some((from, to));
            }
        }));
    let mut ctrl = ReorderController::new(options);
    let mut list =
        SimulatedList::uniform(Axis::Vertical, Rect::new(0.0, 0.0, 120.0, 240.0), rows.len(), 40.0);
    list.layout(&mut ctrl);

    let down = PointerDown {
        pointer: 1,
        position: Offset::new(20.0, 50.0),
    };
    if let Err(err) = ctrl.start_item_drag_reorder(
        &mut list,
        1,
        down,
        Box::new(ImmediateDragRecognizer::default()),
        0,
    ) {
        eprintln!("drag refused: {err}");
        return;
    }

    let mut now_ms = 0u64;
    for y in (50..=140).step_by(10) {
        now_ms += 16;
        let event = PointerEvent::Move {
            pointer: 1,
            position: Offset::new(20.0, y as f32),
        };
        ctrl.handle_pointer(&mut list, &event, now_ms);
        if list.tick(now_ms) {
            list.layout(&mut ctrl);
            ctrl.on_scroll(&mut list, now_ms);
        }
        ctrl.tick(&mut list, now_ms);
        println!(
            "t={now_ms} cursor={:?} proxy_y={:?}",
            ctrl.insertion_cursor(),
            list.proxy().map(|p| p.position.y)
        );
    }

    // Let the gap finish opening before the release.
    for _ in 0..20 {
        now_ms += 16;
        ctrl.tick(&mut list, now_ms);
    }
    ctrl.handle_pointer(&mut list, &PointerEvent::Up { pointer: 1 }, now_ms);
    while ctrl.tick(&mut list, now_ms) {
        now_ms += 16;
    }

    if let Some((from, to)) = moved.lock().ok().and_then(|m| *m) {
        let row = rows.remove(from);
        rows.insert(if to > from { to - 1 } else { to }, row);
        list.apply_reorder(from, to);
        println!("moved {from} -> {to}");
    }
    println!("done at t={now_ms}: {rows:?}");
}
