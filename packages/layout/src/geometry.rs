//! Integer geometry primitives shared by every layout strategy.
//!
//! Layout runs entirely in whole pixels: strategies read and write `i32`
//! positions, and the physics solver truncates its floating point deltas
//! back onto the pixel grid after every step.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Geometric Types
// ============================================================================

/// A point in 2D pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Point {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self { Self { x, y } }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Size {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Size {
    /// A size of zero in both dimensions.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a new size.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self { Self { width, height } }

    /// Width over height, with a zero height treated as one pixel.
    #[must_use]
    pub fn aspect(&self) -> f64 { f64::from(self.width) / f64::from(self.height.max(1)) }

    /// Returns true when either dimension is zero or negative.
    #[must_use]
    pub const fn is_empty(&self) -> bool { self.width <= 0 || self.height <= 0 }
}

/// A rectangle defined by its top-left corner and size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Rect {
    /// X coordinate of the origin (top-left corner).
    pub x: i32,
    /// Y coordinate of the origin (top-left corner).
    pub y: i32,
    /// Width of the rectangle.
    pub width: i32,
    /// Height of the rectangle.
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle from an origin point and a size.
    #[must_use]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Returns the origin point of the rectangle.
    #[must_use]
    pub const fn origin(&self) -> Point { Point::new(self.x, self.y) }

    /// Returns the size of the rectangle.
    #[must_use]
    pub const fn size(&self) -> Size { Size::new(self.width, self.height) }

    /// Right edge (exclusive).
    #[must_use]
    pub const fn right(&self) -> i32 { self.x + self.width }

    /// Bottom edge (exclusive).
    #[must_use]
    pub const fn bottom(&self) -> i32 { self.y + self.height }

    /// Returns the center of mass, rounded toward zero per axis.
    #[must_use]
    pub const fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Returns the area of the rectangle.
    #[must_use]
    pub fn area(&self) -> i64 { i64::from(self.width) * i64::from(self.height) }

    /// Grows the rectangle by `margin` on every side.
    #[must_use]
    pub const fn expanded(&self, margin: i32) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.width + 2 * margin,
            self.height + 2 * margin,
        )
    }

    /// Returns the area shared by two rectangles, or zero when they are apart.
    ///
    /// Touching edges share no area.
    #[must_use]
    pub fn intersection_area(&self, other: &Self) -> i64 {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right < left || bottom < top {
            return 0;
        }

        i64::from(right - left) * i64::from(bottom - top)
    }

    /// Returns true when the rectangles overlap once each is grown by half
    /// of `spacing`.
    #[must_use]
    pub fn overlaps_with_spacing(&self, other: &Self, spacing: i32) -> bool {
        let half = spacing / 2;
        self.expanded(half).intersection_area(&other.expanded(half)) > 0
    }

    /// Returns the smallest rectangle enclosing every rectangle in `rects`,
    /// or `None` when the iterator is empty.
    pub fn bounding<I>(rects: I) -> Option<Self>
    where I: IntoIterator<Item = Self> {
        rects.into_iter().fold(None, |acc, rect| {
            Some(match acc {
                None => rect,
                Some(bounds) => {
                    let x = bounds.x.min(rect.x);
                    let y = bounds.y.min(rect.y);
                    let right = bounds.right().max(rect.right());
                    let bottom = bounds.bottom().max(rect.bottom());
                    Self::new(x, y, right - x, bottom - y)
                }
            })
        })
    }
}
