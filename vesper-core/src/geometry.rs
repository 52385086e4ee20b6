//! Geometry primitives in slide-pixel space.

use serde::{Deserialize, Serialize};

/// Axis-aligned region in slide-pixel space.
///
/// Width and height are never negative; [`Rectangle::new`] clamps them to zero,
/// and deserialization goes through the same clamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RectangleDocument")]
pub struct Rectangle {
    /// X position (pixels from left).
    pub x: f32,
    /// Y position (pixels from top).
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

/// Wire form of a [`Rectangle`], before clamping.
#[derive(Deserialize)]
struct RectangleDocument {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl From<RectangleDocument> for Rectangle {
    fn from(doc: RectangleDocument) -> Self {
        Self::new(doc.x, doc.y, doc.width, doc.height)
    }
}

impl Rectangle {
    /// Create a rectangle, clamping negative sizes to zero.
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Create a rectangle at the origin.
    #[must_use]
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Area in square pixels.
    #[must_use]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Whether the rectangle has no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside this rectangle (edges inclusive).
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Check if `other` lies entirely inside this rectangle.
    #[must_use]
    pub fn contains_rect(&self, other: &Rectangle) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Overlapping region of two rectangles, if any.
    #[must_use]
    pub fn intersection(&self, other: &Rectangle) -> Option<Rectangle> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return None;
        }
        Some(Rectangle::new(x, y, right - x, bottom - y))
    }

    /// Shrink the rectangle by the given insets.
    #[must_use]
    pub fn inset(&self, insets: &Insets) -> Rectangle {
        Rectangle::new(
            self.x + insets.left,
            self.y + insets.top,
            self.width - insets.left - insets.right,
            self.height - insets.top - insets.bottom,
        )
    }

    /// Scale position and size independently on each axis.
    #[must_use]
    pub fn scaled(&self, sx: f32, sy: f32) -> Rectangle {
        Rectangle::new(self.x * sx, self.y * sy, self.width * sx, self.height * sy)
    }
}

/// Position of a text element: a rectangle plus layering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementPosition {
    /// X position (pixels from left).
    pub x: f32,
    /// Y position (pixels from top).
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// Z-index for layering.
    #[serde(default)]
    pub z_index: i32,
}

impl ElementPosition {
    /// Build a position from bounds and a z-index.
    #[must_use]
    pub fn from_bounds(bounds: Rectangle, z_index: i32) -> Self {
        Self {
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            z_index,
        }
    }

    /// The rectangle this position occupies.
    #[must_use]
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(self.x, self.y, self.width, self.height)
    }
}

/// Edge insets (padding, margins).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    /// Top inset in pixels.
    pub top: f32,
    /// Right inset in pixels.
    pub right: f32,
    /// Bottom inset in pixels.
    pub bottom: f32,
    /// Left inset in pixels.
    pub left: f32,
}

impl Insets {
    /// Same inset on every edge.
    #[must_use]
    pub const fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// Output slide dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlideSize {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl SlideSize {
    /// Full HD, the default projection size.
    pub const HD: SlideSize = SlideSize {
        width: 1920.0,
        height: 1080.0,
    };

    /// Create a slide size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The whole slide as a rectangle.
    #[must_use]
    pub fn bounds(&self) -> Rectangle {
        Rectangle::from_size(self.width, self.height)
    }

    /// Per-axis scale factors mapping `self` onto `target`.
    #[must_use]
    pub fn scale_to(&self, target: &SlideSize) -> (f32, f32) {
        let sx = if self.width > 0.0 {
            target.width / self.width
        } else {
            1.0
        };
        let sy = if self.height > 0.0 {
            target.height / self.height
        } else {
            1.0
        };
        (sx, sy)
    }
}

impl Default for SlideSize {
    fn default() -> Self {
        Self::HD
    }
}
