use reorderable::{AutoScroller, Axis, Rect};

use crate::ScrollPosition;

/// Frame length the velocity is expressed against.
const FRAME_MS: f32 = 16.0;

/// Slowest auto-scroll, in pixels per frame.
const MIN_STEP: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Run {
    /// Scroll offset change per frame; negative scrolls towards index 0.
    step: f32,
    last_ms: Option<u64>,
}

/// Scrolls continuously while the drag target hangs over a viewport edge.
///
/// The further the target crosses the edge, the faster it scrolls: `velocity_scalar` pixels per
/// 16 ms frame when the whole target is outside. Drive it with [`EdgeAutoScroller::tick`] and
/// report the scroll to the reorder controller whenever it returns a delta.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeAutoScroller {
    axis: Axis,
    reverse: bool,
    viewport: Rect,
    run: Option<Run>,
}

impl EdgeAutoScroller {
    pub fn new(axis: Axis, viewport: Rect) -> Self {
        Self {
            axis,
            reverse: false,
            viewport,
            run: None,
        }
    }

    /// Index 0 sits at the trailing edge.
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    pub fn is_scrolling(&self) -> bool {
        self.run.is_some()
    }

    /// Current scroll speed in pixels per frame (signed, in offset space).
    pub fn step(&self) -> f32 {
        self.run.map(|r| r.step).unwrap_or(0.0)
    }

    /// Applies the scroll accumulated since the previous tick.
    ///
    /// Returns the applied offset delta, or `None` when idle. Stops by itself once the scroll
    /// position hits its limit.
    pub fn tick(&mut self, scroll: &mut ScrollPosition, now_ms: u64) -> Option<f32> {
        let run = self.run.as_mut()?;
        let Some(last_ms) = run.last_ms.replace(now_ms) else {
            return None;
        };
        let frames = now_ms.saturating_sub(last_ms) as f32 / FRAME_MS;
        let before = scroll.offset();
        let applied = scroll.jump_to(before + run.step * frames) - before;
        if applied == 0.0 && frames > 0.0 {
            adebug!(offset = before, "auto-scroll reached the scroll limit");
            self.run = None;
            return None;
        }
        Some(applied)
    }
}

impl AutoScroller for EdgeAutoScroller {
    fn start_auto_scroll_if_necessary(&mut self, drag_target: Rect, velocity_scalar: f32) {
        let axis = self.axis;
        let extent = axis.main_extent(drag_target);
        let leading = axis.main_start(self.viewport) - axis.main_start(drag_target);
        let trailing = axis.main_end(drag_target) - axis.main_end(self.viewport);

        // Screen-space direction: -1 over the leading edge, +1 over the trailing edge.
        let (direction, overlap) = if leading > 0.0 {
            (-1.0, leading)
        } else if trailing > 0.0 {
            (1.0, trailing)
        } else {
            if self.run.take().is_some() {
                atrace!("drag target back inside the viewport");
            }
            return;
        };

        let fraction = if extent > 0.0 {
            (overlap / extent).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let speed = (velocity_scalar * fraction).max(MIN_STEP);
        let step = if self.reverse {
            -direction * speed
        } else {
            direction * speed
        };
        match &mut self.run {
            Some(run) => run.step = step,
            None => {
                adebug!(step, "auto-scroll started");
                self.run = Some(Run {
                    step,
                    last_ms: None,
                });
            }
        }
    }

    fn stop_auto_scroll(&mut self) {
        if self.run.take().is_some() {
            atrace!("auto-scroll stopped");
        }
    }
}
