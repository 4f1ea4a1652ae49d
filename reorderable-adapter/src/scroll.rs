use reorderable::{Easing, Scrollable};

use crate::Tween;

/// A framework-neutral scroll position with tween-driven animation.
///
/// The offset is measured in the list's growth direction: 0 shows index 0.
///
/// Adapters drive it by calling:
/// - `set_extents` when the viewport or content size changes
/// - `jump_to` when the UI reports a scroll (wheel, scrollbar drag)
/// - `tick(now_ms)` each frame while `is_animating`
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollPosition {
    offset: f32,
    viewport_extent: f32,
    content_extent: f32,
    tween: Option<Tween>,
}

impl ScrollPosition {
    pub fn new(viewport_extent: f32, content_extent: f32) -> Self {
        Self {
            offset: 0.0,
            viewport_extent,
            content_extent,
            tween: None,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn viewport_extent(&self) -> f32 {
        self.viewport_extent
    }

    pub fn content_extent(&self) -> f32 {
        self.content_extent
    }

    pub fn max_offset(&self) -> f32 {
        (self.content_extent - self.viewport_extent).max(0.0)
    }

    pub fn clamp(&self, offset: f32) -> f32 {
        offset.clamp(0.0, self.max_offset())
    }

    /// Updates the extents and re-clamps the offset.
    pub fn set_extents(&mut self, viewport_extent: f32, content_extent: f32) {
        self.viewport_extent = viewport_extent;
        self.content_extent = content_extent;
        self.offset = self.clamp(self.offset);
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.tween = None;
    }

    /// Applies a scroll immediately (no animation). Cancels any active tween.
    ///
    /// Returns the applied (clamped) offset.
    pub fn jump_to(&mut self, offset: f32) -> f32 {
        self.cancel_animation();
        self.offset = self.clamp(offset);
        self.offset
    }

    /// Starts a tween to `offset`. An active tween is retargeted from its current value.
    ///
    /// Returns the clamped target offset.
    pub fn animate_to(&mut self, offset: f32, now_ms: u64, duration_ms: u64, easing: Easing) -> f32 {
        let to = self.clamp(offset);
        match &mut self.tween {
            Some(tween) => {
                tween.easing = easing;
                tween.retarget(now_ms, to, duration_ms);
            }
            None => self.tween = Some(Tween::new(self.offset, to, now_ms, duration_ms, easing)),
        }
        to
    }

    /// Advances the tween.
    ///
    /// Returns the new offset while a tween is active, `None` otherwise.
    pub fn tick(&mut self, now_ms: u64) -> Option<f32> {
        let tween = self.tween?;
        self.offset = self.clamp(tween.sample(now_ms));
        if tween.is_done(now_ms) {
            self.tween = None;
        }
        Some(self.offset)
    }
}

impl Scrollable for ScrollPosition {
    fn scroll_offset(&self) -> f32 {
        self.offset
    }

    fn max_scroll_offset(&self) -> f32 {
        self.max_offset()
    }

    fn animate_scroll_to(&mut self, offset: f32, duration_ms: u64, easing: Easing, now_ms: u64) {
        self.animate_to(offset, now_ms, duration_ms, easing);
    }

    fn is_scroll_animating(&self) -> bool {
        self.is_animating()
    }
}
