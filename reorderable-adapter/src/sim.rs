use alloc::vec::Vec;
use core::ops::Range;

use reorderable::{
    AutoScroller, Axis, Easing, ListGeometry, ProxyFrame, ProxyOverlay, Rect, ReorderController,
    Scrollable,
};

use crate::{EdgeAutoScroller, ScrollPosition};

/// A headless list host: per-index extents laid out in a scrollable viewport.
///
/// Useful for tests, demos and as a reference for real adapters. Only items intersecting the
/// viewport are mounted; call [`SimulatedList::layout`] after anything that moves them.
#[derive(Clone, Debug)]
pub struct SimulatedList {
    axis: Axis,
    reverse: bool,
    viewport: Rect,
    extents: Vec<f32>,
    starts: Vec<f32>,
    scroll: ScrollPosition,
    auto_scroll: EdgeAutoScroller,
    proxy: Option<ProxyFrame>,
    proxy_frames: usize,
    proxy_inserts: usize,
    proxy_removes: usize,
}

impl SimulatedList {
    pub fn new(axis: Axis, viewport: Rect, extents: Vec<f32>) -> Self {
        let mut list = Self {
            axis,
            reverse: false,
            viewport,
            extents: Vec::new(),
            starts: Vec::new(),
            scroll: ScrollPosition::new(axis.main_extent(viewport), 0.0),
            auto_scroll: EdgeAutoScroller::new(axis, viewport),
            proxy: None,
            proxy_frames: 0,
            proxy_inserts: 0,
            proxy_removes: 0,
        };
        list.set_extents(extents);
        list
    }

    /// `count` items of the same extent.
    pub fn uniform(axis: Axis, viewport: Rect, count: usize, extent: f32) -> Self {
        Self::new(axis, viewport, alloc::vec![extent; count])
    }

    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self.auto_scroll = self.auto_scroll.with_reverse(reverse);
        self
    }

    pub fn len(&self) -> usize {
        self.extents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    pub fn scroll(&self) -> &ScrollPosition {
        &self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut ScrollPosition {
        &mut self.scroll
    }

    pub fn auto_scroller(&self) -> &EdgeAutoScroller {
        &self.auto_scroll
    }

    /// The proxy currently shown in the overlay.
    pub fn proxy(&self) -> Option<&ProxyFrame> {
        self.proxy.as_ref()
    }

    /// Number of proxy frames received (inserts plus updates).
    pub fn proxy_frames(&self) -> usize {
        self.proxy_frames
    }

    pub fn proxy_inserts(&self) -> usize {
        self.proxy_inserts
    }

    pub fn proxy_removes(&self) -> usize {
        self.proxy_removes
    }

    /// Replaces every extent (for example after applying a reorder to the data).
    pub fn set_extents(&mut self, extents: Vec<f32>) {
        let mut starts = Vec::with_capacity(extents.len());
        let mut total = 0.0;
        for extent in &extents {
            starts.push(total);
            total += extent;
        }
        self.extents = extents;
        self.starts = starts;
        self.scroll
            .set_extents(self.axis.main_extent(self.viewport), total);
    }

    pub fn insert_extent(&mut self, index: usize, extent: f32) {
        let mut extents = core::mem::take(&mut self.extents);
        extents.insert(index.min(extents.len()), extent);
        self.set_extents(extents);
    }

    pub fn remove_extent(&mut self, index: usize) {
        let mut extents = core::mem::take(&mut self.extents);
        if index < extents.len() {
            extents.remove(index);
        }
        self.set_extents(extents);
    }

    /// Moves the extent at `from` to `to`, with the reorder callback's index convention.
    pub fn apply_reorder(&mut self, from: usize, to: usize) {
        let mut extents = core::mem::take(&mut self.extents);
        if from < extents.len() {
            let extent = extents.remove(from);
            let to = if to > from { to - 1 } else { to };
            extents.insert(to.min(extents.len()), extent);
        }
        self.set_extents(extents);
    }

    /// Main-axis screen position of item `index` ignoring visibility.
    fn main_start_of(&self, index: usize) -> f32 {
        let visible = self.starts[index] - self.scroll.offset();
        if self.reverse {
            self.axis.main_end(self.viewport) - visible - self.extents[index]
        } else {
            self.axis.main_start(self.viewport) + visible
        }
    }

    /// Indices intersecting the viewport.
    pub fn visible_range(&self) -> Range<usize> {
        let offset = self.scroll.offset();
        let end_offset = offset + self.axis.main_extent(self.viewport);
        let start = self
            .starts
            .partition_point(|&s| s < offset)
            .saturating_sub(1);
        let mut start = start.min(self.len());
        while start < self.len() && self.starts[start] + self.extents[start] <= offset {
            start += 1;
        }
        let end = self.starts.partition_point(|&s| s < end_offset);
        start..end.max(start)
    }

    /// Registers visible items with the controller and unregisters the rest.
    pub fn layout<B>(&self, ctrl: &mut ReorderController<B>) {
        let visible = self.visible_range();
        let slots = ctrl.slot_count();
        for index in 0..slots.max(self.len()) {
            if index < slots && visible.contains(&index) {
                ctrl.register_item(index, index as u64);
            } else if ctrl.is_mounted(index) {
                ctrl.unregister_item(index, index as u64);
            }
        }
    }

    /// Advances the scroll tween and the auto-scroller.
    ///
    /// Returns `true` when the scroll offset changed; report that to the controller with
    /// `on_scroll` after calling `layout`.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let before = self.scroll.offset();
        self.scroll.tick(now_ms);
        self.auto_scroll.tick(&mut self.scroll, now_ms);
        self.scroll.offset() != before
    }
}

impl ListGeometry for SimulatedList {
    fn item_rect(&self, index: usize) -> Option<Rect> {
        if !self.visible_range().contains(&index) {
            return None;
        }
        let main = self.main_start_of(index);
        let extent = self.extents[index];
        let rect = match self.axis {
            Axis::Vertical => Rect::new(self.viewport.x, main, self.viewport.width, extent),
            Axis::Horizontal => Rect::new(main, self.viewport.y, extent, self.viewport.height),
        };
        Some(rect)
    }

    fn viewport_rect(&self) -> Rect {
        self.viewport
    }
}

impl Scrollable for SimulatedList {
    fn scroll_offset(&self) -> f32 {
        self.scroll.scroll_offset()
    }

    fn max_scroll_offset(&self) -> f32 {
        self.scroll.max_scroll_offset()
    }

    fn animate_scroll_to(&mut self, offset: f32, duration_ms: u64, easing: Easing, now_ms: u64) {
        self.auto_scroll.stop_auto_scroll();
        self.scroll
            .animate_scroll_to(offset, duration_ms, easing, now_ms);
    }

    fn is_scroll_animating(&self) -> bool {
        self.scroll.is_scroll_animating()
    }
}

impl AutoScroller for SimulatedList {
    fn start_auto_scroll_if_necessary(&mut self, drag_target: Rect, velocity_scalar: f32) {
        self.auto_scroll
            .start_auto_scroll_if_necessary(drag_target, velocity_scalar);
    }

    fn stop_auto_scroll(&mut self) {
        self.auto_scroll.stop_auto_scroll();
    }
}

impl ProxyOverlay for SimulatedList {
    fn insert_proxy(&mut self, frame: &ProxyFrame) {
        self.proxy_inserts += 1;
        self.proxy_frames += 1;
        self.proxy = Some(*frame);
    }

    fn update_proxy(&mut self, frame: &ProxyFrame) {
        self.proxy_frames += 1;
        self.proxy = Some(*frame);
    }

    fn remove_proxy(&mut self) {
        self.proxy_removes += 1;
        self.proxy = None;
    }
}
