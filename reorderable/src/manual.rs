use alloc::boxed::Box;
use core::task::Poll;

use crate::Offset;
use crate::progress::Progress;

/// A consumer step run before a programmatic reorder touches any state.
///
/// Polled with the current time on every tick until it returns `Poll::Ready`.
pub type PreHook = Box<dyn FnMut(u64) -> Poll<()>>;

/// A request to move one item to another position without a pointer.
pub struct ManualReorder {
    /// Current index of the item to move.
    pub start_index: usize,
    /// Index the item should end up at.
    pub end_index: usize,
    pub pre_hook: Option<PreHook>,
    /// Overrides the per-index scroll duration.
    pub scroll_duration_ms: Option<u64>,
    /// Overrides the item animation duration.
    pub item_duration_ms: Option<u64>,
}

impl ManualReorder {
    pub fn new(start_index: usize, end_index: usize) -> Self {
        Self {
            start_index,
            end_index,
            pre_hook: None,
            scroll_duration_ms: None,
            item_duration_ms: None,
        }
    }

    pub fn with_pre_hook(mut self, hook: impl FnMut(u64) -> Poll<()> + 'static) -> Self {
        self.pre_hook = Some(Box::new(hook));
        self
    }

    pub fn with_scroll_duration_ms(mut self, duration_ms: u64) -> Self {
        self.scroll_duration_ms = Some(duration_ms);
        self
    }

    pub fn with_item_duration_ms(mut self, duration_ms: u64) -> Self {
        self.item_duration_ms = Some(duration_ms);
        self
    }
}

impl core::fmt::Debug for ManualReorder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ManualReorder")
            .field("start_index", &self.start_index)
            .field("end_index", &self.end_index)
            .field("has_pre_hook", &self.pre_hook.is_some())
            .field("scroll_duration_ms", &self.scroll_duration_ms)
            .field("item_duration_ms", &self.item_duration_ms)
            .finish()
    }
}

pub(crate) enum ManualStep {
    PreHook(PreHook),
    Begin,
    ScrollingToTarget,
    Animating {
        progress: Progress,
        from: Offset,
        to: Offset,
    },
}

impl core::fmt::Debug for ManualStep {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::PreHook(_) => f.write_str("PreHook(..)"),
            Self::Begin => f.write_str("Begin"),
            Self::ScrollingToTarget => f.write_str("ScrollingToTarget"),
            Self::Animating { from, to, .. } => f
                .debug_struct("Animating")
                .field("from", from)
                .field("to", to)
                .finish_non_exhaustive(),
        }
    }
}

/// A programmatic reorder in flight. Slot indices throughout.
#[derive(Debug)]
pub(crate) struct ManualTask {
    pub(crate) start: usize,
    pub(crate) end: usize,
    /// Cursor the drop is forced to once the item animation finishes.
    pub(crate) cursor: usize,
    pub(crate) session_id: Option<u64>,
    pub(crate) scroll_duration_ms: Option<u64>,
    pub(crate) item_duration_ms: Option<u64>,
    pub(crate) step: ManualStep,
}

impl ManualTask {
    pub(crate) fn new(start: usize, end: usize, request: ManualReorder) -> Self {
        let step = match request.pre_hook {
            Some(hook) => ManualStep::PreHook(hook),
            None => ManualStep::Begin,
        };
        Self {
            start,
            end,
            cursor: if end > start { end + 1 } else { end },
            session_id: None,
            scroll_duration_ms: request.scroll_duration_ms,
            item_duration_ms: request.item_duration_ms,
            step,
        }
    }

    pub(crate) fn index_distance(&self) -> usize {
        self.start.abs_diff(self.end)
    }
}

/// Scroll geometry in the list's growth direction (index 0 at offset 0).
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ScrollWindow {
    pub(crate) offset: f32,
    pub(crate) viewport_extent: f32,
    pub(crate) min_offset: f32,
    pub(crate) max_offset: f32,
}

/// Decides whether an item at list position `item_start` with `item_extent` needs scrolling to
/// be shown with one item of context on either side, and where to scroll to.
pub(crate) fn plan_scroll(window: ScrollWindow, item_start: f32, item_extent: f32) -> Option<f32> {
    let ScrollWindow {
        offset,
        viewport_extent,
        min_offset,
        max_offset,
    } = window;
    let target = if item_start < offset + item_extent {
        item_start - item_extent
    } else if item_start + item_extent > offset + viewport_extent - item_extent {
        item_start + 2.0 * item_extent - viewport_extent
    } else {
        return None;
    };
    let target = target.min(max_offset).max(min_offset);
    let delta = target - offset;
    if (-0.5..0.5).contains(&delta) {
        return None;
    }
    Some(target)
}

/// Scroll duration for a programmatic reorder travelling `distance` indices.
pub(crate) fn scroll_duration_ms(
    explicit: Option<u64>,
    per_index_ms: u64,
    max_ms: u64,
    distance: usize,
) -> u64 {
    explicit.unwrap_or_else(|| per_index_ms.saturating_mul(distance as u64).min(max_ms))
}

/// Item travel duration for a programmatic reorder travelling `distance` indices.
pub(crate) fn item_duration_ms(
    explicit: Option<u64>,
    base_ms: u64,
    per_index_ms: u64,
    distance: usize,
) -> u64 {
    explicit.unwrap_or_else(|| base_ms.max(per_index_ms.saturating_mul(distance as u64)))
}
