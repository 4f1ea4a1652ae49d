use crate::{Easing, Offset, ProxyOverlay, Rect, Size};

/// Elevation of a fully lifted proxy.
pub const DEFAULT_PROXY_ELEVATION: f32 = 6.0;

/// The floating representation of the dragged item for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProxyFrame {
    /// Slot index of the dragged item.
    pub index: usize,
    /// Top-left corner, in the same space as pointer positions.
    pub position: Offset,
    pub size: Size,
    /// Lift progress: 0 at rest, 1 fully lifted. Runs back to 0 while settling.
    pub animation: f32,
    pub elevation: f32,
}

impl ProxyFrame {
    pub fn new(index: usize, position: Offset, size: Size, animation: f32) -> Self {
        Self {
            index,
            position,
            size,
            animation,
            elevation: DEFAULT_PROXY_ELEVATION * Easing::EaseInOut.sample(animation),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }
}

/// The controller's single overlay entry.
///
/// Acquired when a session starts and released on every way out of it.
#[derive(Debug, Default)]
pub(crate) struct ProxySlot {
    inserted: bool,
}

impl ProxySlot {
    pub(crate) fn is_inserted(&self) -> bool {
        self.inserted
    }

    pub(crate) fn show<O: ProxyOverlay + ?Sized>(&mut self, overlay: &mut O, frame: &ProxyFrame) {
        if self.inserted {
            overlay.update_proxy(frame);
        } else {
            overlay.insert_proxy(frame);
            self.inserted = true;
        }
    }

    pub(crate) fn release<O: ProxyOverlay + ?Sized>(&mut self, overlay: &mut O) {
        if self.inserted {
            overlay.remove_proxy();
            self.inserted = false;
        }
    }
}
