use alloc::sync::Arc;

use crate::{Axis, Easing, ProxyFrame, Size, Ticker};

/// Fired with `(source_index, destination_index)` when a drop changes an item's position.
pub type OnReorderCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Fired with a single index (drag start, drag end).
pub type OnIndexCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// Rewrites the proxy frame before it is handed to the overlay.
pub type ProxyDecorator = Arc<dyn Fn(ProxyFrame) -> ProxyFrame + Send + Sync>;

/// Which entry points may start a reorder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReorderMode {
    /// Only pointer-driven drags.
    Pointer,
    /// Only programmatic reorders.
    Manual,
    #[default]
    Both,
}

impl ReorderMode {
    pub fn allows_pointer(self) -> bool {
        matches!(self, Self::Pointer | Self::Both)
    }

    pub fn allows_manual(self) -> bool {
        matches!(self, Self::Manual | Self::Both)
    }
}

/// How the engine learns item extents along the scroll axis.
///
/// Used to place items that are not mounted (programmatic reorders scrolling to a far target).
#[derive(Clone)]
pub enum ItemExtent {
    /// Every item has the same extent.
    Fixed(f32),
    /// Extent computed per index.
    PerItem(Arc<dyn Fn(usize) -> f32 + Send + Sync>),
    /// Every item has the size of a measured prototype.
    Prototype(Size),
}

impl ItemExtent {
    pub fn per_item(f: impl Fn(usize) -> f32 + Send + Sync + 'static) -> Self {
        Self::PerItem(Arc::new(f))
    }

    pub fn extent(&self, index: usize, axis: Axis) -> f32 {
        match self {
            Self::Fixed(extent) => *extent,
            Self::PerItem(f) => f(index),
            Self::Prototype(size) => axis.extent_of_size(*size),
        }
    }

    /// Sum of the extents of items in `start..end`.
    pub fn span(&self, start: usize, end: usize, axis: Axis) -> f32 {
        match self {
            Self::Fixed(extent) => *extent * end.saturating_sub(start) as f32,
            _ => (start..end).map(|i| self.extent(i, axis)).sum(),
        }
    }
}

impl core::fmt::Debug for ItemExtent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Fixed(v) => f.debug_tuple("Fixed").field(v).finish(),
            Self::PerItem(_) => f.write_str("PerItem(..)"),
            Self::Prototype(size) => f.debug_tuple("Prototype").field(size).finish(),
        }
    }
}

/// Configuration for [`crate::ReorderController`].
///
/// Cheap to clone: callbacks live in `Arc`s.
#[derive(Clone)]
pub struct ReorderOptions {
    pub item_count: usize,
    pub item_extent: ItemExtent,
    pub axis: Axis,
    /// When `true`, index 0 sits at the trailing edge (bottom-to-top / right-to-left).
    pub reverse: bool,

    /// Gate for starting any reorder.
    pub enabled: bool,
    pub mode: ReorderMode,

    /// Passed to the auto-scroller with every drag rectangle.
    pub auto_scroll_velocity: f32,

    pub gap_duration_ms: u64,
    pub gap_easing: Easing,

    /// Duration of the proxy's lift and settle animations.
    pub proxy_duration_ms: u64,
    /// Curve of the proxy's travel to its final drop position.
    pub drop_easing: Easing,

    pub scroll_easing: Easing,
    pub scroll_duration_per_index_ms: u64,
    pub max_scroll_duration_ms: u64,

    pub item_animation_duration_ms: u64,
    /// When non-zero, programmatic item animations last at least this long per index travelled.
    pub item_animation_per_index_ms: u64,
    pub item_easing: Easing,

    pub ticker: Option<Arc<dyn Ticker>>,

    pub on_reorder_start: Option<OnIndexCallback>,
    pub on_reorder_end: Option<OnIndexCallback>,
    pub on_reorder: Option<OnReorderCallback>,

    pub proxy_decorator: Option<ProxyDecorator>,
}

impl ReorderOptions {
    pub fn new(item_count: usize, item_extent: ItemExtent) -> Self {
        Self {
            item_count,
            item_extent,
            axis: Axis::Vertical,
            reverse: false,
            enabled: true,
            mode: ReorderMode::Both,
            auto_scroll_velocity: 50.0,
            gap_duration_ms: 250,
            gap_easing: Easing::EaseInOut,
            proxy_duration_ms: 250,
            drop_easing: Easing::EaseOut,
            scroll_easing: Easing::EaseInOut,
            scroll_duration_per_index_ms: 40,
            max_scroll_duration_ms: 1000,
            item_animation_duration_ms: 300,
            item_animation_per_index_ms: 0,
            item_easing: Easing::EaseInOut,
            ticker: None,
            on_reorder_start: None,
            on_reorder_end: None,
            on_reorder: None,
            proxy_decorator: None,
        }
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_mode(mut self, mode: ReorderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_auto_scroll_velocity(mut self, velocity: f32) -> Self {
        self.auto_scroll_velocity = velocity;
        self
    }

    pub fn with_gap_animation(mut self, duration_ms: u64, easing: Easing) -> Self {
        self.gap_duration_ms = duration_ms;
        self.gap_easing = easing;
        self
    }

    pub fn with_proxy_animation(mut self, duration_ms: u64, drop_easing: Easing) -> Self {
        self.proxy_duration_ms = duration_ms;
        self.drop_easing = drop_easing;
        self
    }

    /// Scroll-to-target timing for programmatic reorders.
    pub fn with_scroll_animation(
        mut self,
        per_index_ms: u64,
        max_duration_ms: u64,
        easing: Easing,
    ) -> Self {
        self.scroll_duration_per_index_ms = per_index_ms;
        self.max_scroll_duration_ms = max_duration_ms;
        self.scroll_easing = easing;
        self
    }

    /// Item travel timing for programmatic reorders.
    pub fn with_item_animation(mut self, duration_ms: u64, per_index_ms: u64, easing: Easing) -> Self {
        self.item_animation_duration_ms = duration_ms;
        self.item_animation_per_index_ms = per_index_ms;
        self.item_easing = easing;
        self
    }

    pub fn with_ticker(mut self, ticker: Option<Arc<dyn Ticker>>) -> Self {
        self.ticker = ticker;
        self
    }

    pub fn with_on_reorder(
        mut self,
        f: Option<impl Fn(usize, usize) + Send + Sync + 'static>,
    ) -> Self {
        self.on_reorder = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_reorder_start(mut self, f: Option<impl Fn(usize) + Send + Sync + 'static>) -> Self {
        self.on_reorder_start = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_reorder_end(mut self, f: Option<impl Fn(usize) + Send + Sync + 'static>) -> Self {
        self.on_reorder_end = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_proxy_decorator(
        mut self,
        f: Option<impl Fn(ProxyFrame) -> ProxyFrame + Send + Sync + 'static>,
    ) -> Self {
        self.proxy_decorator = f.map(|f| Arc::new(f) as _);
        self
    }

    pub(crate) fn extent_at(&self, index: usize) -> f32 {
        self.item_extent.extent(index, self.axis)
    }
}

impl core::fmt::Debug for ReorderOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReorderOptions")
            .field("item_count", &self.item_count)
            .field("item_extent", &self.item_extent)
            .field("axis", &self.axis)
            .field("reverse", &self.reverse)
            .field("enabled", &self.enabled)
            .field("mode", &self.mode)
            .field("auto_scroll_velocity", &self.auto_scroll_velocity)
            .field("gap_duration_ms", &self.gap_duration_ms)
            .field("proxy_duration_ms", &self.proxy_duration_ms)
            .field(
                "scroll_duration_per_index_ms",
                &self.scroll_duration_per_index_ms,
            )
            .field("max_scroll_duration_ms", &self.max_scroll_duration_ms)
            .field(
                "item_animation_duration_ms",
                &self.item_animation_duration_ms,
            )
            .field(
                "item_animation_per_index_ms",
                &self.item_animation_per_index_ms,
            )
            .field("has_ticker", &self.ticker.is_some())
            .finish_non_exhaustive()
    }
}
