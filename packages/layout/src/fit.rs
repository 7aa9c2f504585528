//! Mapping an arranged layout onto the screen.
//!
//! Layouts are computed in unscaled pixels. [`Fit`] scales the bounding box
//! down (or up, when allowed) so it fits the screen minus a margin and any
//! space reserved by panels, then centers it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};

// ============================================================================
// Panel Insets
// ============================================================================

/// Screen space reserved along each edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Insets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Insets {
    /// Creates insets.
    #[must_use]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self { Self { left, top, right, bottom } }

    /// Derives insets from panel frames.
    ///
    /// A panel wider than tall is horizontal and reserves the top or bottom
    /// edge depending on which half of the screen it starts in; any other
    /// panel reserves the left or right edge.
    #[must_use]
    pub fn from_panels(screen: Rect, panels: &[Rect]) -> Self {
        let mid_x = screen.x + screen.width / 2;
        let mid_y = screen.y + screen.height / 2;

        let mut left = 0;
        let mut top = 0;
        let mut right = screen.right();
        let mut bottom = screen.bottom();

        for panel in panels {
            if panel.width >= panel.height {
                if panel.y < mid_y {
                    top = top.max(panel.bottom());
                } else {
                    bottom = bottom.min(panel.y);
                }
            } else if panel.x < mid_x {
                left = left.max(panel.right());
            } else {
                right = right.min(panel.x);
            }
        }

        Self {
            left,
            top,
            right: screen.right() - right,
            bottom: screen.bottom() - bottom,
        }
    }

    /// Total horizontal inset.
    #[must_use]
    pub const fn horizontal(&self) -> i32 { self.left + self.right }

    /// Total vertical inset.
    #[must_use]
    pub const fn vertical(&self) -> i32 { self.top + self.bottom }
}

// ============================================================================
// Fit
// ============================================================================

/// Uniform scale plus offset placing a layout on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Fit {
    /// Scale applied to layout coordinates and sizes.
    pub scale: f64,
    /// Horizontal offset of the scaled layout.
    pub x_offset: i32,
    /// Vertical offset of the scaled layout.
    pub y_offset: i32,
}

impl Default for Fit {
    fn default() -> Self {
        Self {
            scale: 1.0,
            x_offset: 0,
            y_offset: 0,
        }
    }
}

impl Fit {
    /// Computes the transform for a layout of `size` on `screen`.
    ///
    /// # Arguments
    ///
    /// * `size` - Bounding size of the arranged layout
    /// * `screen` - Size of the overview surface
    /// * `margin` - Total empty border, split evenly between opposite sides
    /// * `insets` - Space reserved by panels
    /// * `allow_upscale` - Whether layouts smaller than the screen may grow
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn compute(size: Size, screen: Size, margin: i32, insets: Insets, allow_upscale: bool) -> Self {
        if size.is_empty() {
            return Self {
                scale: 1.0,
                x_offset: insets.left + (screen.width - insets.horizontal()) / 2,
                y_offset: insets.top + (screen.height - insets.vertical()) / 2,
            };
        }

        let width = f64::from(size.width + insets.horizontal());
        let height = f64::from(size.height + insets.vertical());
        let room_w = f64::from(screen.width - margin - insets.horizontal());
        let room_h = f64::from(screen.height - margin - insets.vertical());

        let mut scale = room_w / width;
        if scale * height > room_h {
            scale = room_h / height;
        }
        if !allow_upscale {
            scale = scale.min(1.0);
        }

        let x_offset = (f64::from(screen.width - insets.horizontal()) - f64::from(size.width) * scale) / 2.0;
        let y_offset = (f64::from(screen.height - insets.vertical()) - f64::from(size.height) * scale) / 2.0;

        Self {
            scale,
            x_offset: x_offset as i32 + insets.left,
            y_offset: y_offset as i32 + insets.top,
        }
    }

    /// Maps a layout position to the screen.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn point(&self, position: Point) -> Point {
        Point::new(
            self.x_offset + (f64::from(position.x) * self.scale) as i32,
            self.y_offset + (f64::from(position.y) * self.scale) as i32,
        )
    }

    /// Maps a layout rectangle to the screen.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn apply(&self, rect: Rect) -> Rect {
        let size = Size::new(
            (f64::from(rect.width) * self.scale) as i32,
            (f64::from(rect.height) * self.scale) as i32,
        );
        Rect::from_origin_size(self.point(rect.origin()), size)
    }
}
