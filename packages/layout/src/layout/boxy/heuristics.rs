//! Tie-break heuristics for the boxy solver.

use super::grid::CellGrid;
use crate::geometry::{Rect, Size};

/// How much wider than the container the grid may grow before new cells are
/// added below instead of to the right.
pub const ASPECT_TOLERANCE: f64 = 1.4;

/// Share of occupied cells in the upper-left triangle above which the grid is
/// considered lopsided.
pub const TRIANGULAR_TOLERANCE: f64 = 0.7;

/// How strongly a window's span leans from cell `(i, j)` toward `direction`.
///
/// The window's span in fractional cell units is compared against the
/// contested cell: a window that already extends past the cell in the move
/// direction scores higher. Truncated toward zero.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn affinity(frame: &Rect, cell: Size, (i, j): (i32, i32), (di, dj): (i32, i32)) -> i32 {
    let start_x = f64::from(frame.x) / f64::from(cell.width);
    let start_y = f64::from(frame.y) / f64::from(cell.height);
    let end_x = start_x + f64::from(frame.width) / f64::from(cell.width);
    let end_y = start_y + f64::from(frame.height) / f64::from(cell.height);

    let lean_x = f64::from(di) * (start_x + end_x - 2.0 * f64::from(i));
    let lean_y = f64::from(dj) * (start_y + end_y - 2.0 * f64::from(j));
    (lean_x + lean_y) as i32
}

/// Aspect ratio of the area the grid currently spans, in pixels.
#[must_use]
pub fn grid_aspect(grid: &CellGrid, cell: Size) -> f64 {
    let width = f64::from(grid.width()) * f64::from(cell.width);
    let height = f64::from(grid.height()) * f64::from(cell.height);
    if height <= 0.0 {
        return f64::INFINITY;
    }
    width / height
}

/// Returns true when the grid is narrow enough, relative to the container,
/// that it should grow sideways.
#[must_use]
pub fn prefers_columns(grid: &CellGrid, cell: Size, container_aspect: f64) -> bool {
    grid_aspect(grid, cell) < container_aspect * ASPECT_TOLERANCE
}

/// Returns true when cell `(i, j)` falls in the upper-left triangle of the
/// grid, split along the anti-diagonal scaled by the grid dimensions.
#[must_use]
pub const fn is_upper_left(grid: &CellGrid, i: i32, j: i32) -> bool {
    let (w, h) = (grid.width(), grid.height());
    w * (j - grid.min_y()) + h * (i - grid.min_x()) < w * h + 1
}

/// Share of occupied cells that lie in the upper-left triangle.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn triangular_ratio(grid: &CellGrid) -> f64 {
    let (upper_left, total) = grid
        .cells()
        .filter(|&(i, j)| grid.count(i, j) > 0)
        .fold((0_usize, 0_usize), |(upper_left, total), (i, j)| {
            (upper_left + usize::from(is_upper_left(grid, i, j)), total + 1)
        });

    if total == 0 {
        return 0.0;
    }
    upper_left as f64 / total as f64
}
