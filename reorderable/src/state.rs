/// Where the controller is in the `Idle → Dragging → (dropped | canceled) → Idle` cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReorderPhase {
    #[default]
    Idle,
    /// A recognizer or a programmatic pre-hook is pending; no session yet.
    Armed,
    Dragging,
    /// Released; the proxy is settling onto its drop position.
    Settling,
}

/// A lightweight, serializable snapshot of the controller.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReorderSnapshot {
    pub phase: ReorderPhase,
    /// Slot index of the dragged (or armed) item.
    pub drag_index: Option<usize>,
    pub cursor: Option<usize>,
    pub manual: bool,
    pub item_count: usize,
    pub slot_count: usize,
    pub mounted: usize,
    pub incoming: usize,
    pub outgoing: usize,
}
