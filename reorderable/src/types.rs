use core::ops::{Add, Mul, Neg, Sub};

/// The scroll axis of the list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation between `a` and `b`.
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        Self {
            x: a.x + (b.x - a.x) * t,
            y: a.y + (b.y - a.y) * t,
        }
    }
}

impl Add for Offset {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Offset {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Offset {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<f32> for Offset {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in the host's logical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Offset, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Offset {
        Offset::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn translate(&self, by: Offset) -> Self {
        Self::new(self.x + by.x, self.y + by.y, self.width, self.height)
    }
}

impl Axis {
    /// Extent of `size` along this axis.
    pub fn extent_of_size(self, size: Size) -> f32 {
        match self {
            Self::Vertical => size.height,
            Self::Horizontal => size.width,
        }
    }

    /// Component of `offset` along this axis.
    pub fn extent_of(self, offset: Offset) -> f32 {
        match self {
            Self::Vertical => offset.y,
            Self::Horizontal => offset.x,
        }
    }

    /// An offset of `extent` along this axis (zero on the cross axis).
    pub fn extent_offset(self, extent: f32) -> Offset {
        match self {
            Self::Vertical => Offset::new(0.0, extent),
            Self::Horizontal => Offset::new(extent, 0.0),
        }
    }

    /// Zeroes the cross-axis component of `offset`.
    pub fn restrict(self, offset: Offset) -> Offset {
        match self {
            Self::Vertical => Offset::new(0.0, offset.y),
            Self::Horizontal => Offset::new(offset.x, 0.0),
        }
    }

    /// Replaces the main-axis component of `offset` with `main`.
    pub fn with_main(self, offset: Offset, main: f32) -> Offset {
        match self {
            Self::Vertical => Offset::new(offset.x, main),
            Self::Horizontal => Offset::new(main, offset.y),
        }
    }

    pub fn main_start(self, rect: Rect) -> f32 {
        self.extent_of(rect.origin())
    }

    pub fn main_extent(self, rect: Rect) -> f32 {
        self.extent_of_size(rect.size())
    }

    pub fn main_end(self, rect: Rect) -> f32 {
        self.main_start(rect) + self.main_extent(rect)
    }
}

/// A pointer-down event that may start a drag.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerDown {
    pub pointer: u32,
    pub position: Offset,
}

/// Raw pointer input routed to a pending drag recognizer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerEvent {
    Down(PointerDown),
    Move { pointer: u32, position: Offset },
    Up { pointer: u32 },
    Cancel { pointer: u32 },
}

impl PointerEvent {
    pub fn pointer(&self) -> u32 {
        match *self {
            Self::Down(down) => down.pointer,
            Self::Move { pointer, .. } | Self::Up { pointer } | Self::Cancel { pointer } => pointer,
        }
    }
}

/// A drag gesture as reported by a recognizer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DragGesture {
    /// The drag was accepted; `position` is the pointer position at acceptance.
    Start { position: Offset },
    Update { delta: Offset },
    End,
    Cancel,
}
