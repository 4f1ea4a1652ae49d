use crate::progress::{AnimationTracker, Progress, ProgressStatus};
use crate::{Axis, Easing, Offset, ProxyFrame, Rect, Size};

/// Where a session is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Stage {
    /// Following the pointer (or the synthetic position of a programmatic reorder).
    Live,
    /// Released; the proxy is travelling to `drop_position`.
    Settling { drop_position: Offset },
    /// The settle animation finished. Reported once.
    Dropped,
}

/// Result of advancing a session by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SessionTick {
    Running,
    /// The proxy reached its drop position; the controller must finalize exactly now.
    DropCompleted,
}

/// One dragged item.
#[derive(Debug)]
pub(crate) struct DragSession {
    pub(crate) id: u64,
    pub(crate) index: usize,
    position: Offset,
    drag_offset: Offset,
    item_size: Size,
    item_extent: f32,
    axis: Axis,
    proxy: Option<Progress>,
    stage: Stage,
}

impl DragSession {
    /// Captures the item at `index`, whose layout rectangle is `item_rect`, grabbed at `position`.
    pub(crate) fn new(id: u64, index: usize, item_rect: Rect, position: Offset, axis: Axis) -> Self {
        let item_size = item_rect.size();
        Self {
            id,
            index,
            position,
            drag_offset: position - item_rect.origin(),
            item_size,
            item_extent: axis.extent_of_size(item_size),
            axis,
            proxy: None,
            stage: Stage::Live,
        }
    }

    /// Runs the proxy's lift animation.
    pub(crate) fn start(&mut self, tracker: &AnimationTracker, duration_ms: u64, now_ms: u64) {
        let mut proxy = Progress::new(tracker, duration_ms, 0.0);
        proxy.forward(now_ms);
        self.proxy = Some(proxy);
    }

    pub(crate) fn is_live(&self) -> bool {
        self.stage == Stage::Live
    }

    pub(crate) fn item_extent(&self) -> f32 {
        self.item_extent
    }

    /// Accumulates a pointer delta, restricted to the scroll axis.
    pub(crate) fn update(&mut self, delta: Offset) {
        if self.is_live() {
            self.position = self.position + self.axis.restrict(delta);
        }
    }

    /// Moves the proxy so that its origin sits at `origin`.
    pub(crate) fn move_origin_to(&mut self, origin: Offset) {
        if self.is_live() {
            self.position = origin + self.drag_offset;
        }
    }

    /// Top-left corner of the proxy while it follows the drag.
    pub(crate) fn proxy_origin(&self) -> Offset {
        self.position - self.drag_offset
    }

    /// Rectangle handed to the auto-scroller.
    pub(crate) fn drag_target_rect(&self) -> Rect {
        Rect::from_origin_size(self.proxy_origin(), self.item_size)
    }

    /// Releases the drag; the proxy travels to `drop_position` while its animation reverses.
    pub(crate) fn end(&mut self, drop_position: Offset, now_ms: u64) {
        if !self.is_live() {
            return;
        }
        self.stage = Stage::Settling { drop_position };
        match &mut self.proxy {
            Some(proxy) => proxy.reverse(now_ms),
            None => self.stage = Stage::Dropped,
        }
    }

    pub(crate) fn tick(&mut self, now_ms: u64) -> SessionTick {
        let status = self.proxy.as_mut().map(|p| p.tick(now_ms));
        match self.stage {
            Stage::Live => SessionTick::Running,
            Stage::Settling { .. } => {
                if matches!(status, None | Some(ProgressStatus::Dismissed)) {
                    self.proxy = None;
                    self.stage = Stage::Dropped;
                    SessionTick::DropCompleted
                } else {
                    SessionTick::Running
                }
            }
            Stage::Dropped => {
                self.proxy = None;
                SessionTick::DropCompleted
            }
        }
    }

    /// Releases the proxy animation without signalling a drop.
    pub(crate) fn cancel(&mut self) {
        self.proxy = None;
    }

    /// The floating visual for this frame.
    pub(crate) fn frame(&self, drop_easing: Easing) -> ProxyFrame {
        let animation = self.proxy.as_ref().map(|p| p.value()).unwrap_or(0.0);
        let origin = self.proxy_origin();
        let position = match self.stage {
            Stage::Live => origin,
            Stage::Settling { drop_position } => {
                Offset::lerp(drop_position, origin, drop_easing.sample(animation))
            }
            Stage::Dropped => origin,
        };
        ProxyFrame::new(self.index, position, self.item_size, animation)
    }
}
