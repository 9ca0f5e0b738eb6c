//! Geometric types for window coordinates and dimensions
//!
//! Provides type-safe wrappers for positions and sizes to avoid
//! common integer confusion (e.g., swapping width/height or x/y).

/// A position in 2D space (top-left origin, sub-pixel precision)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Create a new position
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Top-left position that centers `inner` within `outer`.
    ///
    /// Goes negative when `inner` is larger than `outer`.
    pub fn centered(outer: Dimensions, inner: Dimensions) -> Self {
        Self {
            x: (outer.width as f32 - inner.width as f32) / 2.0,
            y: (outer.height as f32 - inner.height as f32) / 2.0,
        }
    }
}

/// Pixel dimensions (width × height)
/// Using a newtype prevents accidentally swapping width and height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// Create new dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Integer destination rectangle for draw calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Rectangle of the given size with its top-left corner at `position`
    /// (rounded to the nearest pixel)
    pub fn at(position: Position, size: Dimensions) -> Self {
        Self {
            x: position.x.round() as i32,
            y: position.y.round() as i32,
            width: size.width,
            height: size.height,
        }
    }
}
