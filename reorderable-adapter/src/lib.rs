//! Adapter utilities for the `reorderable` crate.
//!
//! The `reorderable` crate is UI-agnostic and only borrows geometry, scrolling and an overlay
//! from its host. This crate provides small, framework-neutral pieces an adapter usually needs:
//!
//! - A tween-driven scroll position ([`ScrollPosition`])
//! - An edge auto-scroller driven by the drag target ([`EdgeAutoScroller`])
//! - Immediate and long-press drag recognizers
//! - [`SimulatedList`], a complete headless host for tests and demos
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod auto_scroll;
mod recognizer;
mod scroll;
mod sim;
mod tween;

#[cfg(test)]
mod tests;

pub use auto_scroll::EdgeAutoScroller;
pub use recognizer::{
    DEFAULT_LONG_PRESS_MS, DEFAULT_TOUCH_SLOP, DelayedDragRecognizer, ImmediateDragRecognizer,
};
pub use reorderable::Easing;
pub use scroll::ScrollPosition;
pub use sim::SimulatedList;
pub use tween::Tween;
