use alloc::boxed::Box;
use core::mem;

use crate::ledger::ItemLedger;
use crate::manual::{
    ManualStep, ManualTask, ScrollWindow, item_duration_ms, plan_scroll, scroll_duration_ms,
};
use crate::progress::{AnimationTracker, Progress, ProgressStatus};
use crate::proxy::ProxySlot;
use crate::session::{DragSession, SessionTick};
use crate::slot::Gap;
use crate::{
    AnimationStats, DragGesture, DragGestureRecognizer, ListGeometry, ManualReorder, Offset,
    PointerDown, PointerEvent, Rect, ReorderError, ReorderHost, ReorderOptions, ReorderPhase,
    ReorderSnapshot, Result, SlotContent,
};

/// A headless drag-to-reorder engine for one scrollable list.
///
/// This type does not hold any UI objects. Adapters drive it by:
/// - registering mounted items with `register_item` / `unregister_item`
/// - forwarding pointer input (`start_item_drag_reorder`, `handle_pointer`) or calling
///   `start_item_manual_reorder`
/// - calling `tick(host, now_ms)` every frame while it reports work, and `on_scroll` whenever
///   the scroll position changes
/// - painting each item translated by `item_offset(index)` and the proxy frames handed to
///   the overlay
///
/// Indices passed to `register_item`, `start_item_drag_reorder` and the geometry queries are
/// slot indices (what is rendered). Indices reported to observers and accepted by the
/// insert/remove and manual reorder APIs are stable indices (the consumer's data).
///
/// `B` is whatever the host needs to render an item that is animating out after
/// `remove_item`.
pub struct ReorderController<B = ()> {
    options: ReorderOptions,
    ledger: ItemLedger<B>,
    tracker: AnimationTracker,
    session: Option<DragSession>,
    drag_index: Option<usize>,
    cursor: Option<usize>,
    recognizer: Option<Box<dyn DragGestureRecognizer>>,
    recognizer_pointer: Option<u32>,
    proxy: ProxySlot,
    manual: Option<ManualTask>,
    next_session_id: u64,
}

impl ReorderController {
    pub fn new(options: ReorderOptions) -> Self {
        Self::from_options(options)
    }
}

impl<B> ReorderController<B> {
    /// Creates a controller whose removed items are rendered from a `B`.
    pub fn from_options(options: ReorderOptions) -> Self {
        rdebug!(
            item_count = options.item_count,
            enabled = options.enabled,
            "ReorderController::new"
        );
        Self {
            ledger: ItemLedger::new(options.item_count),
            options,
            tracker: AnimationTracker::default(),
            session: None,
            drag_index: None,
            cursor: None,
            recognizer: None,
            recognizer_pointer: None,
            proxy: ProxySlot::default(),
            manual: None,
            next_session_id: 1,
        }
    }

    pub fn options(&self) -> &ReorderOptions {
        &self.options
    }

    /// Replaces the options.
    ///
    /// Disabling reordering cancels any active session. A changed `item_count` means the data was
    /// replaced wholesale: the session is canceled and insert/remove animations are dropped.
    pub fn set_options<H: ReorderHost + ?Sized>(&mut self, host: &mut H, options: ReorderOptions) {
        let count_changed = options.item_count != self.ledger.item_count();
        self.options = options;
        rtrace!(
            item_count = self.options.item_count,
            enabled = self.options.enabled,
            "ReorderController::set_options"
        );
        if !self.options.enabled || count_changed {
            self.cancel_reorder(host);
        }
        if count_changed {
            self.ledger.reset(self.options.item_count);
        }
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options<H: ReorderHost + ?Sized>(
        &mut self,
        host: &mut H,
        f: impl FnOnce(&mut ReorderOptions),
    ) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(host, next);
    }

    pub fn animation_stats(&self) -> AnimationStats {
        self.tracker.stats()
    }

    /// Items in the consumer's data.
    pub fn item_count(&self) -> usize {
        self.ledger.item_count()
    }

    /// Rendered slots, including items still animating out.
    pub fn slot_count(&self) -> usize {
        self.ledger.slot_count()
    }

    pub fn slot_content(&self, slot: usize) -> Option<SlotContent<'_, B>> {
        self.ledger.content(slot)
    }

    pub fn stable_to_slot(&self, index: usize) -> Option<usize> {
        (index < self.ledger.item_count()).then(|| self.ledger.stable_to_slot(index))
    }

    pub fn slot_to_stable(&self, slot: usize) -> Option<usize> {
        if slot >= self.ledger.slot_count() {
            return None;
        }
        self.ledger.slot_to_stable(slot)
    }

    pub fn is_mounted(&self, slot: usize) -> bool {
        self.ledger.slots.contains(slot)
    }

    pub fn phase(&self) -> ReorderPhase {
        match &self.session {
            Some(session) if session.is_live() => ReorderPhase::Dragging,
            Some(_) => ReorderPhase::Settling,
            None if self.recognizer.is_some() || self.manual.is_some() => ReorderPhase::Armed,
            None => ReorderPhase::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn drag_index(&self) -> Option<usize> {
        self.drag_index
    }

    pub fn insertion_cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Current translation of the item at `slot`.
    pub fn item_offset(&self, slot: usize) -> Offset {
        self.ledger
            .slots
            .get(slot)
            .map(|s| s.offset(self.options.gap_easing))
            .unwrap_or(Offset::ZERO)
    }

    /// Whether the item at `slot` is the one being dragged (the host hides it).
    pub fn is_item_dragging(&self, slot: usize) -> bool {
        self.ledger.slots.get(slot).is_some_and(|s| s.dragging)
    }

    pub fn snapshot(&self) -> ReorderSnapshot {
        ReorderSnapshot {
            phase: self.phase(),
            drag_index: self.drag_index,
            cursor: self.cursor,
            manual: self.manual.is_some(),
            item_count: self.ledger.item_count(),
            slot_count: self.ledger.slot_count(),
            mounted: self.ledger.slots.len(),
            incoming: self.ledger.incoming_len(),
            outgoing: self.ledger.outgoing_len(),
        }
    }

    // ---------------------------------------------------------------------
    // Insert / remove
    // ---------------------------------------------------------------------

    /// Inserts an item at stable `index`, animating it in over `duration_ms`.
    ///
    /// Structural changes must not happen under an active drag: call `cancel_reorder` first.
    pub fn insert_item(&mut self, index: usize, duration_ms: u64, now_ms: u64) -> Result<()> {
        self.ledger
            .insert(index, duration_ms, &self.tracker, now_ms)?;
        self.options.item_count = self.ledger.item_count();
        self.request_frame();
        Ok(())
    }

    /// Inserts `count` items starting at `index`, each with its own animation.
    pub fn insert_all_items(
        &mut self,
        index: usize,
        count: usize,
        duration_ms: u64,
        now_ms: u64,
    ) -> Result<()> {
        let len = self.ledger.item_count();
        if index > len {
            return Err(ReorderError::IndexOutOfRange { index, len });
        }
        for offset in 0..count {
            self.insert_item(index + offset, duration_ms, now_ms)?;
        }
        Ok(())
    }

    /// Removes the item at stable `index`; `builder` renders it while it animates out.
    pub fn remove_item(
        &mut self,
        index: usize,
        builder: B,
        duration_ms: u64,
        now_ms: u64,
    ) -> Result<()> {
        self.ledger
            .remove(index, builder, duration_ms, &self.tracker, now_ms)?;
        self.options.item_count = self.ledger.item_count();
        self.request_frame();
        Ok(())
    }

    /// Removes every item, last to first.
    pub fn remove_all_items(&mut self, builder: B, duration_ms: u64, now_ms: u64) -> Result<()>
    where
        B: Clone,
    {
        for index in (0..self.ledger.item_count()).rev() {
            self.remove_item(index, builder.clone(), duration_ms, now_ms)?;
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Slot registration
    // ---------------------------------------------------------------------

    /// Registers the mounted item at `slot`. `key` identifies the host's item instance.
    ///
    /// An item mounted mid-drag immediately takes its place in the gap.
    pub fn register_item(&mut self, slot: usize, key: u64) {
        let gap = self.session.as_ref().map(|s| {
            let drag = s.index;
            self.gap(drag, self.cursor.unwrap_or(drag), s.item_extent())
        });
        let easing = self.options.gap_easing;
        let entry = self.ledger.slots.register(slot, key);
        if let Some(gap) = gap {
            if slot == gap.drag_index {
                entry.dragging = true;
            } else {
                entry.update_for_gap(slot, gap, false, easing, &self.tracker, 0);
            }
        }
    }

    /// Unregisters the item at `slot` if it is still registered under `key`.
    pub fn unregister_item(&mut self, slot: usize, key: u64) {
        if self.ledger.slots.unregister(slot, key) {
            rtrace!(slot, key, "unregister_item");
        }
    }

    // ---------------------------------------------------------------------
    // Pointer-driven reorder
    // ---------------------------------------------------------------------

    /// Arms a drag of the item at `slot`, starting from `event`.
    ///
    /// `recognizer` decides when the pointer becomes a drag; feed it with `handle_pointer` and
    /// `tick`. Any active session is canceled first. Ignored when reordering is disabled or the
    /// mode excludes pointer drags.
    pub fn start_item_drag_reorder<H: ReorderHost + ?Sized>(
        &mut self,
        host: &mut H,
        slot: usize,
        event: PointerDown,
        mut recognizer: Box<dyn DragGestureRecognizer>,
        now_ms: u64,
    ) -> Result<()> {
        if !self.options.enabled || !self.options.mode.allows_pointer() {
            recognizer.dispose();
            return Ok(());
        }
        let len = self.ledger.slot_count();
        if slot >= len {
            recognizer.dispose();
            return Err(ReorderError::IndexOutOfRange { index: slot, len });
        }

        if self.session.is_some() || self.manual.is_some() {
            self.cancel_reorder(host);
        } else if self.recognizer.is_some() && self.recognizer_pointer != Some(event.pointer) {
            self.drop_recognizer();
            self.drag_index = None;
        }

        if !self.ledger.slots.contains(slot) {
            recognizer.dispose();
            return Err(ReorderError::NotVisible { index: slot });
        }
        if self.ledger.slot_to_stable(slot).is_none() {
            recognizer.dispose();
            return Err(ReorderError::InvalidArgument {
                reason: "item is animating out",
            });
        }

        rdebug!(slot, pointer = event.pointer, "start_item_drag_reorder");
        recognizer.add_pointer(event, now_ms);
        if let Some(mut previous) = self.recognizer.replace(recognizer) {
            previous.dispose();
        }
        self.recognizer_pointer = Some(event.pointer);
        self.drag_index = Some(slot);
        self.request_frame();
        Ok(())
    }

    /// Routes raw pointer input to the armed recognizer.
    pub fn handle_pointer<H: ReorderHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &PointerEvent,
        now_ms: u64,
    ) {
        let Some(recognizer) = self.recognizer.as_mut() else {
            return;
        };
        if let Some(gesture) = recognizer.handle_event(event, now_ms) {
            self.dispatch_gesture(host, gesture, now_ms);
        }
        self.poll_recognizer(host, now_ms);
    }

    /// Dispatches every gesture the recognizer produces without new input.
    fn poll_recognizer<H: ReorderHost + ?Sized>(&mut self, host: &mut H, now_ms: u64) {
        while let Some(gesture) = self.recognizer.as_mut().and_then(|r| r.poll(now_ms)) {
            self.dispatch_gesture(host, gesture, now_ms);
        }
    }

    fn dispatch_gesture<H: ReorderHost + ?Sized>(
        &mut self,
        host: &mut H,
        gesture: DragGesture,
        now_ms: u64,
    ) {
        match gesture {
            DragGesture::Start { position } => {
                self.drag_start(host, position, now_ms);
            }
            DragGesture::Update { delta } => self.drag_update(host, delta, now_ms),
            DragGesture::End => self.drag_end(host, now_ms),
            DragGesture::Cancel => self.drag_cancel(host),
        }
    }

    /// Starts the session for the armed item, grabbed at `position`.
    ///
    /// Hosts with their own gesture handling may call this directly after
    /// `start_item_drag_reorder`. Returns `false` when nothing is armed or the item is gone.
    pub fn drag_start<H: ReorderHost + ?Sized>(
        &mut self,
        host: &mut H,
        position: Offset,
        now_ms: u64,
    ) -> bool {
        if self.session.is_some() {
            rwarn!("drag_start while a session is active");
            return false;
        }
        let Some(index) = self.drag_index else {
            return false;
        };
        let rect = if self.ledger.slots.contains(index) {
            host.item_rect(index)
        } else {
            None
        };
        let Some(rect) = rect else {
            rwarn!(index, "drag_start: item is no longer mounted");
            self.reset(host);
            return false;
        };

        let id = self.next_session_id;
        self.next_session_id += 1;
        let mut session = DragSession::new(id, index, rect, position, self.options.axis);
        session.start(&self.tracker, self.options.proxy_duration_ms, now_ms);
        let extent = session.item_extent();
        rdebug!(id, index, extent, "drag session started");

        if let Some(slot) = self.ledger.slots.get_mut(index) {
            slot.dragging = true;
        }
        self.notify_reorder_start(index);
        self.cursor = Some(index);
        self.session = Some(session);
        self.refresh_proxy(host);

        let gap = self.gap(index, index, extent);
        let easing = self.options.gap_easing;
        self.ledger
            .slots
            .update_for_gap(gap, false, easing, &self.tracker, now_ms);
        self.request_frame();
        true
    }

    /// Moves the dragged item by `delta` (restricted to the scroll axis).
    pub fn drag_update<H: ReorderHost + ?Sized>(&mut self, host: &mut H, delta: Offset, now_ms: u64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.is_live() {
            return;
        }
        session.update(delta);
        self.refresh_proxy(host);
        self.update_insertion_cursor(host, now_ms);
        self.submit_auto_scroll(host);
    }

    /// Releases the dragged item. The drop completes once the proxy has settled.
    pub fn drag_end<H: ReorderHost + ?Sized>(&mut self, host: &mut H, now_ms: u64) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if !session.is_live() {
            return;
        }
        let drop_position = self.final_drop_position(&*host, session);
        rdebug!(
            index = session.index,
            cursor = self.cursor,
            "drag released"
        );
        host.stop_auto_scroll();
        if let Some(session) = self.session.as_mut() {
            session.end(drop_position, now_ms);
        }
        self.poll_session(host, now_ms);
        self.request_frame();
    }

    /// The recognizer lost the pointer; same as `cancel_reorder`.
    pub fn drag_cancel<H: ReorderHost + ?Sized>(&mut self, host: &mut H) {
        self.cancel_reorder(host);
    }

    // ---------------------------------------------------------------------
    // Programmatic reorder
    // ---------------------------------------------------------------------

    /// Moves the item at stable `request.start_index` so it ends up at `request.end_index`,
    /// animating exactly as if it were dragged there.
    ///
    /// Sequence: pre-hook, scroll-to-target (when the destination is out of view), item
    /// animation, settle, callbacks. `cancel_reorder` at any point abandons the remaining steps.
    /// A no-op when reordering is disabled, the mode excludes programmatic reorders, or another
    /// reorder is in progress.
    pub fn start_item_manual_reorder<H: ReorderHost + ?Sized>(
        &mut self,
        host: &mut H,
        request: ManualReorder,
        now_ms: u64,
    ) -> Result<()> {
        let len = self.ledger.item_count();
        let (start, end) = (request.start_index, request.end_index);
        if start == end {
            return Err(ReorderError::InvalidArgument {
                reason: "start and end index must differ",
            });
        }
        for index in [start, end] {
            if index >= len {
                return Err(ReorderError::IndexOutOfRange { index, len });
            }
        }
        if self.options.ticker.is_none() {
            return Err(ReorderError::MissingAnimationDriver);
        }
        if !self.options.enabled
            || !self.options.mode.allows_manual()
            || self.session.is_some()
            || self.manual.is_some()
        {
            rdebug!(start, end, "start_item_manual_reorder ignored");
            return Ok(());
        }

        let start_slot = self.ledger.stable_to_slot(start);
        let end_slot = self.ledger.stable_to_slot(end);
        if !self.ledger.slots.contains(start_slot) || host.item_rect(start_slot).is_none() {
            return Err(ReorderError::NotVisible { index: start });
        }
        if self.recognizer.is_some() {
            self.drop_recognizer();
            self.drag_index = None;
        }

        rdebug!(start, end, start_slot, end_slot, "start_item_manual_reorder");
        self.manual = Some(ManualTask::new(start_slot, end_slot, request));
        self.drive_manual(host, now_ms);
        self.request_frame();
        Ok(())
    }

    fn set_step(&mut self, step: ManualStep) {
        if let Some(task) = self.manual.as_mut() {
            task.step = step;
        }
    }

    /// Advances the programmatic task. Returns `true` while it still needs frames.
    fn drive_manual<H: ReorderHost + ?Sized>(&mut self, host: &mut H, now_ms: u64) -> bool {
        loop {
            let Some(task) = self.manual.as_mut() else {
                return false;
            };
            if let Some(id) = task.session_id {
                if self.session.as_ref().map(|s| s.id) != Some(id) {
                    rwarn!(id, "programmatic reorder lost its session");
                    self.manual = None;
                    return false;
                }
            }

            match mem::replace(&mut task.step, ManualStep::Begin) {
                ManualStep::PreHook(mut hook) => {
                    if hook(now_ms).is_pending() {
                        self.set_step(ManualStep::PreHook(hook));
                        return true;
                    }
                }
                ManualStep::Begin => match self.begin_manual(host, now_ms) {
                    Some(step) => self.set_step(step),
                    None => return false,
                },
                ManualStep::ScrollingToTarget => {
                    if host.is_scroll_animating() {
                        self.set_step(ManualStep::ScrollingToTarget);
                        self.update_insertion_cursor(host, now_ms);
                        return true;
                    }
                    match self.item_animation(host, now_ms) {
                        Some(step) => self.set_step(step),
                        None => return false,
                    }
                }
                ManualStep::Animating {
                    mut progress,
                    from,
                    to,
                } => {
                    let status = progress.tick(now_ms);
                    let t = self.options.item_easing.sample(progress.value());
                    if let Some(session) = self.session.as_mut() {
                        session.move_origin_to(Offset::lerp(from, to, t));
                    }
                    self.refresh_proxy(host);
                    self.update_insertion_cursor(host, now_ms);
                    if status != ProgressStatus::Completed {
                        self.set_step(ManualStep::Animating { progress, from, to });
                        return true;
                    }
                    drop(progress);
                    let Some(task) = self.manual.take() else {
                        return false;
                    };
                    rdebug!(cursor = task.cursor, "programmatic reorder arrived");
                    self.set_cursor(task.cursor, now_ms);
                    self.drag_end(host, now_ms);
                    return self.session.is_some();
                }
            }
        }
    }

    /// Starts the synthetic drag and, when needed, the scroll towards the destination.
    fn begin_manual<H: ReorderHost + ?Sized>(&mut self, host: &mut H, now_ms: u64) -> Option<ManualStep> {
        let task = self.manual.as_ref()?;
        let (start, end) = (task.start, task.end);
        let (explicit, distance) = (task.scroll_duration_ms, task.index_distance());

        let rect = if self.ledger.slots.contains(start) {
            host.item_rect(start)
        } else {
            None
        };
        let Some(rect) = rect else {
            rwarn!(start, "programmatic reorder aborted: item is no longer mounted");
            self.reset(host);
            return None;
        };

        self.drag_index = Some(start);
        if !self.drag_start(host, rect.origin(), now_ms) {
            self.manual = None;
            return None;
        }
        let session_id = self.session.as_ref().map(|s| s.id);
        if let Some(task) = self.manual.as_mut() {
            task.session_id = session_id;
        }

        let window = self.scroll_window(&*host);
        if let Some(end_start) = self.list_position(&*host, end) {
            let extent = self.slot_extent(&*host, end);
            if let Some(target) = plan_scroll(window, end_start, extent) {
                let duration = scroll_duration_ms(
                    explicit,
                    self.options.scroll_duration_per_index_ms,
                    self.options.max_scroll_duration_ms,
                    distance,
                );
                rdebug!(target, duration, "programmatic reorder scrolls to target");
                host.animate_scroll_to(target, duration, self.options.scroll_easing, now_ms);
                return Some(ManualStep::ScrollingToTarget);
            }
        }
        self.item_animation(host, now_ms)
    }

    /// Builds the item animation from fresh geometry.
    fn item_animation<H: ReorderHost + ?Sized>(&self, host: &H, now_ms: u64) -> Option<ManualStep> {
        let task = self.manual.as_ref()?;
        let session = self.session.as_ref()?;
        let (start, end) = (task.start, task.end);
        let duration = item_duration_ms(
            task.item_duration_ms,
            self.options.item_animation_duration_ms,
            self.options.item_animation_per_index_ms,
            task.index_distance(),
        );

        let dragged_extent = session.item_extent();
        let from = session.proxy_origin();
        let to = match self.list_position(host, end) {
            Some(end_start) => {
                let end_extent = self.slot_extent(host, end);
                let landing = if end > start {
                    end_start + end_extent - dragged_extent
                } else {
                    end_start
                };
                let main = self.screen_main(host, landing, dragged_extent);
                self.options.axis.with_main(from, main)
            }
            None => from,
        };

        let mut progress = Progress::new(&self.tracker, duration, 0.0);
        progress.forward(now_ms);
        Some(ManualStep::Animating { progress, from, to })
    }

    fn scroll_window<H: ReorderHost + ?Sized>(&self, host: &H) -> ScrollWindow {
        ScrollWindow {
            offset: host.scroll_offset(),
            viewport_extent: self.options.axis.main_extent(host.viewport_rect()),
            min_offset: host.min_scroll_offset(),
            max_offset: host.max_scroll_offset(),
        }
    }

    /// Distance of `rect` from the viewport's leading edge, in the list's growth direction.
    fn leading_distance<H: ReorderHost + ?Sized>(&self, host: &H, rect: Rect) -> f32 {
        let axis = self.options.axis;
        let viewport = host.viewport_rect();
        if self.options.reverse {
            axis.main_end(viewport) - axis.main_end(rect)
        } else {
            axis.main_start(rect) - axis.main_start(viewport)
        }
    }

    /// Screen coordinate of an item's start for list position `position` and `extent`.
    fn screen_main<H: ReorderHost + ?Sized>(&self, host: &H, position: f32, extent: f32) -> f32 {
        let axis = self.options.axis;
        let viewport = host.viewport_rect();
        let visible = position - host.scroll_offset();
        if self.options.reverse {
            axis.main_end(viewport) - visible - extent
        } else {
            axis.main_start(viewport) + visible
        }
    }

    /// List position (growth direction, scroll offset included) of `slot`'s leading edge.
    ///
    /// Unmounted slots are placed from the nearest mounted one using the configured extents.
    fn list_position<H: ReorderHost + ?Sized>(&self, host: &H, slot: usize) -> Option<f32> {
        let offset = host.scroll_offset();
        if self.ledger.slots.contains(slot) {
            if let Some(rect) = host.item_rect(slot) {
                return Some(self.leading_distance(host, rect) + offset);
            }
        }
        let (anchor, rect) = self
            .ledger
            .slots
            .indexes()
            .filter_map(|i| host.item_rect(i).map(|r| (i, r)))
            .min_by_key(|(i, _)| i.abs_diff(slot))?;
        let base = self.leading_distance(host, rect) + offset;
        Some(if slot > anchor {
            base + self.span(anchor, slot)
        } else {
            base - self.span(slot, anchor)
        })
    }

    fn span(&self, start_slot: usize, end_slot: usize) -> f32 {
        let start = self.ledger.boundary_to_stable(start_slot);
        let end = self.ledger.boundary_to_stable(end_slot);
        self.options.item_extent.span(start, end, self.options.axis)
    }

    fn slot_extent<H: ReorderHost + ?Sized>(&self, host: &H, slot: usize) -> f32 {
        match host.item_rect(slot) {
            Some(rect) if self.ledger.slots.contains(slot) => self.options.axis.main_extent(rect),
            _ => self
                .options
                .extent_at(self.ledger.boundary_to_stable(slot)),
        }
    }

    // ---------------------------------------------------------------------
    // Cancellation, scrolling, ticking
    // ---------------------------------------------------------------------

    /// Abandons any armed, active or settling reorder without calling `on_reorder`.
    ///
    /// Call this before structurally changing the list under an active drag.
    pub fn cancel_reorder<H: ReorderHost + ?Sized>(&mut self, host: &mut H) {
        if self.phase() == ReorderPhase::Idle && !self.proxy.is_inserted() {
            return;
        }
        rdebug!(drag_index = self.drag_index, "cancel_reorder");
        self.reset(host);
    }

    /// Call when the scroll position changed (auto-scroll ticks included).
    pub fn on_scroll<H: ReorderHost + ?Sized>(&mut self, host: &mut H, now_ms: u64) {
        if !self.session.as_ref().is_some_and(|s| s.is_live()) {
            return;
        }
        self.update_insertion_cursor(host, now_ms);
        self.submit_auto_scroll(host);
    }

    /// Advances every animation the controller owns.
    ///
    /// Returns `true` while another frame is needed.
    pub fn tick<H: ReorderHost + ?Sized>(&mut self, host: &mut H, now_ms: u64) -> bool {
        self.poll_recognizer(host, now_ms);

        let mut busy = self.ledger.tick(now_ms);
        busy |= self.ledger.slots.tick(now_ms);
        busy |= self.poll_session(host, now_ms);
        busy |= self.drive_manual(host, now_ms);
        busy |= self.recognizer.as_ref().is_some_and(|r| r.needs_poll());
        if busy {
            self.request_frame();
        }
        busy
    }

    /// Cancels any reorder and releases every animation the controller owns.
    pub fn dispose<H: ReorderHost + ?Sized>(&mut self, host: &mut H) {
        self.cancel_reorder(host);
        self.ledger.dispose();
        self.options.item_count = self.ledger.item_count();
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn gap(&self, drag_index: usize, gap_index: usize, gap_extent: f32) -> Gap {
        Gap {
            drag_index,
            gap_index,
            gap_extent,
            axis: self.options.axis,
            reverse: self.options.reverse,
            duration_ms: self.options.gap_duration_ms,
        }
    }

    fn update_insertion_cursor<H: ReorderHost + ?Sized>(&mut self, host: &H, now_ms: u64) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if !session.is_live() {
            return;
        }
        let current = self.cursor.unwrap_or(session.index);
        let next = self.scan_cursor(host, session, current);
        self.set_cursor(next, now_ms);
    }

    /// Finds where the proxy would land, scanning mounted slots in ascending order.
    fn scan_cursor<H: ListGeometry + ?Sized>(
        &self,
        host: &H,
        session: &DragSession,
        current: usize,
    ) -> usize {
        let axis = self.options.axis;
        let drag = session.index;
        let proxy_start = axis.extent_of(session.proxy_origin());
        let proxy_end = proxy_start + session.item_extent();

        let mut next = current;
        for (index, slot) in self.ledger.slots.iter() {
            if index == drag || self.ledger.slot_to_stable(index).is_none() {
                continue;
            }
            let Some(layout) = host.item_rect(index) else {
                continue;
            };
            let geometry = slot.target_geometry(layout);
            let start = axis.main_start(geometry);
            let extent = axis.main_extent(geometry);
            let end = start + extent;
            let middle = start + extent / 2.0;

            if self.options.reverse {
                if end >= proxy_end && proxy_end >= middle {
                    next = index;
                    break;
                } else if middle >= proxy_start && proxy_start >= start {
                    next = index + 1;
                    break;
                } else if start > proxy_end && next < index + 1 {
                    next = index + 1;
                } else if proxy_start > end && next > index {
                    next = index;
                }
            } else if start <= proxy_start && proxy_start <= middle {
                next = index;
                break;
            } else if middle <= proxy_end && proxy_end <= end {
                next = index + 1;
                break;
            } else if end < proxy_start && next < index + 1 {
                next = index + 1;
            } else if proxy_end < start && next > index {
                next = index;
            }
        }

        // Landing right after itself is the same as not moving.
        if next == drag + 1 { drag } else { next }
    }

    fn set_cursor(&mut self, next: usize, now_ms: u64) {
        let Some((drag, extent)) = self.session.as_ref().map(|s| (s.index, s.item_extent())) else {
            return;
        };
        if self.cursor == Some(next) {
            return;
        }
        rtrace!(drag, from = ?self.cursor, to = next, "insertion cursor moved");
        self.cursor = Some(next);
        let gap = self.gap(drag, next, extent);
        let easing = self.options.gap_easing;
        self.ledger
            .slots
            .update_for_gap(gap, true, easing, &self.tracker, now_ms);
    }

    fn submit_auto_scroll<H: ReorderHost + ?Sized>(&self, host: &mut H) {
        if self.manual.is_some() || host.is_scroll_animating() {
            return;
        }
        if let Some(session) = self.session.as_ref().filter(|s| s.is_live()) {
            host.start_auto_scroll_if_necessary(
                session.drag_target_rect(),
                self.options.auto_scroll_velocity,
            );
        }
    }

    /// Where the proxy settles: next to whichever slot now borders the insertion cursor.
    fn final_drop_position<H: ListGeometry + ?Sized>(&self, host: &H, session: &DragSession) -> Offset {
        let axis = self.options.axis;
        let reverse = self.options.reverse;
        let origin = session.proxy_origin();
        let drag = session.index;
        let cursor = self.cursor.unwrap_or(drag);
        let extent = session.item_extent();
        let target = |index: usize| -> Option<Rect> {
            let slot = self.ledger.slots.get(index)?;
            host.item_rect(index).map(|r| slot.target_geometry(r))
        };

        let main = if cursor == drag {
            host.item_rect(drag).map(|r| axis.main_start(r))
        } else if cursor > drag {
            target(cursor - 1).map(|g| {
                if reverse {
                    axis.main_start(g) - extent
                } else {
                    axis.main_end(g)
                }
            })
        } else {
            target(cursor).map(|g| {
                if reverse {
                    axis.main_end(g)
                } else {
                    axis.main_start(g) - extent
                }
            })
        };

        match main {
            Some(main) => axis.with_main(origin, main),
            None => {
                rwarn!(cursor, "drop target is not mounted; settling in place");
                origin
            }
        }
    }

    /// Advances the session. Returns `true` while it is still around.
    fn poll_session<H: ReorderHost + ?Sized>(&mut self, host: &mut H, now_ms: u64) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        match session.tick(now_ms) {
            SessionTick::Running => {
                self.refresh_proxy(host);
                true
            }
            SessionTick::DropCompleted => {
                self.finish_drop(host);
                false
            }
        }
    }

    fn finish_drop<H: ReorderHost + ?Sized>(&mut self, host: &mut H) {
        let Some(session) = self.session.take() else {
            return;
        };
        let from = session.index;
        let to = self.cursor.unwrap_or(from);
        drop(session);

        let source = self.ledger.boundary_to_stable(from);
        let destination = self.ledger.boundary_to_stable(to);
        rdebug!(from, to, source, destination, "drop completed");
        if from != to {
            if let Some(cb) = &self.options.on_reorder {
                cb(source, destination);
            }
        }
        if let Some(cb) = &self.options.on_reorder_end {
            cb(destination);
        }
        self.reset(host);
    }

    /// Unconditional teardown shared by drop and cancel.
    fn reset<H: ReorderHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(mut session) = self.session.take() {
            session.cancel();
        }
        host.stop_auto_scroll();
        self.ledger.slots.reset_gaps();
        self.drop_recognizer();
        self.proxy.release(host);
        self.manual = None;
        self.drag_index = None;
        self.cursor = None;
    }

    fn drop_recognizer(&mut self) {
        if let Some(mut recognizer) = self.recognizer.take() {
            recognizer.dispose();
        }
        self.recognizer_pointer = None;
    }

    fn refresh_proxy<H: ReorderHost + ?Sized>(&mut self, host: &mut H) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let mut frame = session.frame(self.options.drop_easing);
        if let Some(decorate) = &self.options.proxy_decorator {
            frame = decorate(frame);
        }
        self.proxy.show(host, &frame);
    }

    fn notify_reorder_start(&self, slot: usize) {
        if let Some(cb) = &self.options.on_reorder_start {
            cb(self.ledger.boundary_to_stable(slot));
        }
    }

    fn request_frame(&self) {
        if let Some(ticker) = &self.options.ticker {
            ticker.schedule_frame();
        }
    }
}

impl<B> core::fmt::Debug for ReorderController<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReorderController")
            .field("options", &self.options)
            .field("phase", &self.phase())
            .field("drag_index", &self.drag_index)
            .field("cursor", &self.cursor)
            .field("slot_count", &self.ledger.slot_count())
            .field("mounted", &self.ledger.slots.len())
            .field("manual", &self.manual)
            .finish_non_exhaustive()
    }
}
