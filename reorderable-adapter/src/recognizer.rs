use reorderable::{DragGesture, DragGestureRecognizer, Offset, PointerDown, PointerEvent};

/// Movement (in logical pixels) below which a pointer is still considered a tap.
pub const DEFAULT_TOUCH_SLOP: f32 = 18.0;

/// Hold time before a delayed drag is accepted.
pub const DEFAULT_LONG_PRESS_MS: u64 = 500;

fn distance_squared(a: Offset, b: Offset) -> f32 {
    let d = a - b;
    d.x * d.x + d.y * d.y
}

/// Pointer bookkeeping shared by both recognizers.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Tracked {
    pointer: u32,
    origin: Offset,
    last: Offset,
    down_ms: u64,
    accepted: bool,
}

impl Tracked {
    fn matches(this: &Option<Self>, event: &PointerEvent) -> bool {
        this.is_some_and(|t| t.pointer == event.pointer())
    }

    /// Delta since the previous report.
    fn advance(&mut self, position: Offset) -> Offset {
        let delta = position - self.last;
        self.last = position;
        delta
    }
}

/// Accepts a drag as soon as the pointer moves past the touch slop.
///
/// The drag starts at the pointer-down position; the movement that crossed the slop arrives with
/// the next update.
#[derive(Clone, Debug, PartialEq)]
pub struct ImmediateDragRecognizer {
    slop: f32,
    tracked: Option<Tracked>,
}

impl Default for ImmediateDragRecognizer {
    fn default() -> Self {
        Self::new(DEFAULT_TOUCH_SLOP)
    }
}

impl ImmediateDragRecognizer {
    pub fn new(slop: f32) -> Self {
        Self {
            slop,
            tracked: None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.tracked.is_some_and(|t| t.accepted)
    }
}

impl DragGestureRecognizer for ImmediateDragRecognizer {
    fn add_pointer(&mut self, event: PointerDown, now_ms: u64) {
        self.tracked = Some(Tracked {
            pointer: event.pointer,
            origin: event.position,
            last: event.position,
            down_ms: now_ms,
            accepted: false,
        });
    }

    fn handle_event(&mut self, event: &PointerEvent, _now_ms: u64) -> Option<DragGesture> {
        if !Tracked::matches(&self.tracked, event) {
            return None;
        }
        let tracked = self.tracked.as_mut()?;
        match *event {
            PointerEvent::Down(_) => None,
            PointerEvent::Move { position, .. } if tracked.accepted => Some(DragGesture::Update {
                delta: tracked.advance(position),
            }),
            PointerEvent::Move { position, .. } => {
                if distance_squared(position, tracked.origin) <= self.slop * self.slop {
                    return None;
                }
                tracked.accepted = true;
                tracked.last = tracked.origin;
                atrace!(pointer = tracked.pointer, "immediate drag accepted");
                Some(DragGesture::Start {
                    position: tracked.origin,
                })
            }
            PointerEvent::Up { .. } if tracked.accepted => {
                self.tracked = None;
                Some(DragGesture::End)
            }
            // A tap or a lost pointer: nothing to drag.
            PointerEvent::Up { .. } | PointerEvent::Cancel { .. } => {
                self.tracked = None;
                Some(DragGesture::Cancel)
            }
        }
    }

    fn dispose(&mut self) {
        self.tracked = None;
    }
}

/// Accepts a drag once the pointer has been held still for `delay_ms`.
///
/// Moving past the touch slop before the delay elapses rejects the gesture. An event that
/// arrives after the delay but before the next `poll` first accepts the drag, then is handled as
/// a follow-up returned by the next `poll`.
#[derive(Clone, Debug, PartialEq)]
pub struct DelayedDragRecognizer {
    delay_ms: u64,
    slop: f32,
    tracked: Option<Tracked>,
    pending: Option<DragGesture>,
}

impl Default for DelayedDragRecognizer {
    fn default() -> Self {
        Self::new(DEFAULT_LONG_PRESS_MS)
    }
}

impl DelayedDragRecognizer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            slop: DEFAULT_TOUCH_SLOP,
            tracked: None,
            pending: None,
        }
    }

    pub fn with_slop(mut self, slop: f32) -> Self {
        self.slop = slop;
        self
    }

    pub fn is_accepted(&self) -> bool {
        self.tracked.is_some_and(|t| t.accepted)
    }

    fn reject(&mut self) -> Option<DragGesture> {
        atrace!("delayed drag rejected");
        self.tracked = None;
        Some(DragGesture::Cancel)
    }

    fn accept_if_due(&mut self, now_ms: u64) -> Option<DragGesture> {
        let tracked = self.tracked.as_mut()?;
        if tracked.accepted || now_ms.saturating_sub(tracked.down_ms) < self.delay_ms {
            return None;
        }
        tracked.accepted = true;
        atrace!(pointer = tracked.pointer, "delayed drag accepted");
        Some(DragGesture::Start {
            position: tracked.last,
        })
    }

    fn follow(&mut self, event: &PointerEvent) -> Option<DragGesture> {
        let tracked = self.tracked.as_mut()?;
        match *event {
            PointerEvent::Down(_) => None,
            PointerEvent::Move { position, .. } if tracked.accepted => Some(DragGesture::Update {
                delta: tracked.advance(position),
            }),
            PointerEvent::Move { position, .. } => {
                if distance_squared(position, tracked.origin) > self.slop * self.slop {
                    return self.reject();
                }
                tracked.last = position;
                None
            }
            PointerEvent::Up { .. } if tracked.accepted => {
                self.tracked = None;
                Some(DragGesture::End)
            }
            PointerEvent::Up { .. } | PointerEvent::Cancel { .. } => self.reject(),
        }
    }
}

impl DragGestureRecognizer for DelayedDragRecognizer {
    fn add_pointer(&mut self, event: PointerDown, now_ms: u64) {
        self.pending = None;
        self.tracked = Some(Tracked {
            pointer: event.pointer,
            origin: event.position,
            last: event.position,
            down_ms: now_ms,
            accepted: false,
        });
    }

    fn handle_event(&mut self, event: &PointerEvent, now_ms: u64) -> Option<DragGesture> {
        if !Tracked::matches(&self.tracked, event) {
            return None;
        }
        // The host has not ticked since the hold elapsed.
        if let Some(start) = self.accept_if_due(now_ms) {
            self.pending = self.follow(event);
            return Some(start);
        }
        self.follow(event)
    }

    fn poll(&mut self, now_ms: u64) -> Option<DragGesture> {
        self.pending.take().or_else(|| self.accept_if_due(now_ms))
    }

    fn needs_poll(&self) -> bool {
        self.pending.is_some() || self.tracked.is_some_and(|t| !t.accepted)
    }

    fn dispose(&mut self) {
        self.tracked = None;
        self.pending = None;
    }
}
