use std::sync::Arc;

use reorderable::{
    Axis, ItemExtent, ManualReorder, Rect, ReorderController, ReorderOptions, Ticker,
};
use reorderable_adapter::SimulatedList;

/// Programmatic reorders need someone to keep frames coming; this host loop ticks anyway.
struct LoopTicker;

impl Ticker for LoopTicker {
    fn schedule_frame(&self) {}
}

fn main() {
    // Example: move the first item of a long list to a destination far below the viewport.
    //
    // The controller scrolls the list first, then animates the item into place exactly as if
    // it had been dragged there.
    let count = 100;
    let options = ReorderOptions::new(count, ItemExtent::Fixed(32.0))
        .with_ticker(Some(Arc::new(LoopTicker) as Arc<dyn Ticker>))
        .with_on_reorder(Some(|from, to| println!("on_reorder({from}, {to})")))
        .with_on_reorder_end(Some(|index| println!("on_reorder_end({index})")));
    let mut ctrl = ReorderController::new(options);
    let mut list =
        SimulatedList::uniform(Axis::Vertical, Rect::new(0.0, 0.0, 200.0, 320.0), count, 32.0);
    list.layout(&mut ctrl);

    if let Err(err) = ctrl.start_item_manual_reorder(&mut list, ManualReorder::new(0, 40), 0) {
        eprintln!("reorder refused: {err}");
        return;
    }

    let mut now_ms = 0u64;
    loop {
        now_ms += 16;
        if list.tick(now_ms) {
            list.layout(&mut ctrl);
            ctrl.on_scroll(&mut list, now_ms);
        }
        let busy = ctrl.tick(&mut list, now_ms);
        if now_ms % 160 == 0 {
            println!(
                "t={now_ms} phase={:?} scroll={} visible={:?}",
                ctrl.phase(),
                list.scroll().offset(),
                list.visible_range()
            );
        }
        if !busy && !list.scroll().is_animating() {
            break;
        }
    }
    println!("done at t={now_ms}: scroll={}", list.scroll().offset());
}
