//! A headless drag-to-reorder engine for scrollable lists.
//!
//! For adapter-level utilities (scroll positions, edge auto-scrolling, gesture recognizers, a
//! simulated host), see the `reorderable-adapter` crate.
//!
//! The engine owns the reorder state machine: which item is being dragged, where it would land
//! (the insertion cursor), how every other visible item is displaced to open a gap, how the
//! floating proxy settles on release, and how items animate in and out when the list changes.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide, through [`ReorderHost`]:
//! - item and viewport rectangles
//! - a scroll position that can be read and animated
//! - an edge auto-scroller and an overlay for the proxy
//!
//! and to drive time by calling [`ReorderController::tick`] with a monotonic clock in
//! milliseconds.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod curve;
mod error;
mod host;
mod ledger;
mod manual;
mod options;
mod progress;
mod proxy;
mod session;
mod slot;
mod state;
mod types;


pub use controller::ReorderController;
pub use curve::Easing;
pub use error::{ReorderError, Result};
pub use host::{
    AutoScroller, DragGestureRecognizer, ListGeometry, ProxyOverlay, ReorderHost, Scrollable,
    Ticker,
};
pub use ledger::SlotContent;
pub use manual::{ManualReorder, PreHook};
pub use options::{
    ItemExtent, OnIndexCallback, OnReorderCallback, ProxyDecorator, ReorderMode, ReorderOptions,
};
pub use progress::{AnimationStats, ProgressStatus};
pub use proxy::{DEFAULT_PROXY_ELEVATION, ProxyFrame};
pub use slot::gap_offset;
pub use state::{ReorderPhase, ReorderSnapshot};
pub use types::{Axis, DragGesture, Offset, PointerDown, PointerEvent, Rect, Size};
