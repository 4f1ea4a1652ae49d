//! Capabilities the engine borrows from its host.
//!
//! The controller never stores UI objects. Every operation that needs geometry, scrolling or
//! the overlay takes the host by `&mut` for the duration of the call.

use crate::{DragGesture, Easing, PointerDown, PointerEvent, ProxyFrame, Rect};

/// Render-tree geometry queries.
pub trait ListGeometry {
    /// Layout rectangle of the mounted item at `index`, in the same coordinate space as pointer
    /// positions.
    ///
    /// The rectangle must not include the gap translation reported by
    /// [`crate::ReorderController::item_offset`]. Returns `None` when the item is not mounted.
    fn item_rect(&self, index: usize) -> Option<Rect>;

    /// Rectangle of the scroll viewport.
    fn viewport_rect(&self) -> Rect;
}

/// A scroll position that can be read and animated.
pub trait Scrollable {
    fn scroll_offset(&self) -> f32;

    fn min_scroll_offset(&self) -> f32 {
        0.0
    }

    fn max_scroll_offset(&self) -> f32;

    /// Starts animating the scroll position to `offset`. Completion is observed through
    /// [`Scrollable::is_scroll_animating`].
    fn animate_scroll_to(&mut self, offset: f32, duration_ms: u64, easing: Easing, now_ms: u64);

    fn is_scroll_animating(&self) -> bool;
}

/// Edge-triggered continuous scrolling while dragging.
///
/// The engine only supplies the drag rectangle; the implementation decides whether it is close
/// enough to an edge and how fast to scroll. Scroll changes are reported back through
/// [`crate::ReorderController::on_scroll`].
pub trait AutoScroller {
    fn start_auto_scroll_if_necessary(&mut self, drag_target: Rect, velocity_scalar: f32);

    fn stop_auto_scroll(&mut self);
}

/// The floating layer the drag proxy is painted in.
pub trait ProxyOverlay {
    fn insert_proxy(&mut self, frame: &ProxyFrame);

    fn update_proxy(&mut self, frame: &ProxyFrame);

    fn remove_proxy(&mut self);
}

/// Everything a [`crate::ReorderController`] needs from its host.
pub trait ReorderHost: ListGeometry + Scrollable + AutoScroller + ProxyOverlay {}
impl<T: ListGeometry + Scrollable + AutoScroller + ProxyOverlay + ?Sized> ReorderHost for T {}

/// Requests frames from the host's event loop.
///
/// Programmatic reorders have no pointer feeding them events, so they rely on this to keep
/// `tick` calls coming.
pub trait Ticker: Send + Sync {
    fn schedule_frame(&self);
}

/// Recognizes a drag from a pointer-down event.
pub trait DragGestureRecognizer {
    /// Starts tracking `event.pointer`.
    fn add_pointer(&mut self, event: PointerDown, now_ms: u64);

    /// Feeds raw pointer input. Returns a gesture once one is recognized.
    fn handle_event(&mut self, event: &PointerEvent, now_ms: u64) -> Option<DragGesture>;

    /// Gestures produced without new input: time-based acceptance (for example a long-press
    /// delay) or a follow-up queued by `handle_event`.
    ///
    /// Called repeatedly until it returns `None`, so each gesture must be returned once.
    fn poll(&mut self, _now_ms: u64) -> Option<DragGesture> {
        None
    }

    /// Whether `poll` may still produce a gesture without further input. The controller keeps
    /// requesting frames while this holds.
    fn needs_poll(&self) -> bool {
        false
    }

    /// Stops tracking all pointers.
    fn dispose(&mut self) {}
}
