//! Grid layout ("boxy").
//!
//! Windows are snapped onto a coarse grid whose cell size comes from the
//! smallest window. The solver then repeats, rebuilding the grid each pass:
//!
//! 1. **Prune**: empty rows and columns are removed by pulling everything
//!    beyond them back one cell.
//! 2. **Expand**: the last contested cell (scanning bottom-up, right to left)
//!    gives up one window, the one leaning furthest toward a new row below or
//!    a new column to the right, depending on the grid's aspect ratio.
//! 3. **Rotate-contract**: when nothing was pruned or expanded and the
//!    occupied cells bunch up in the upper-left triangle, one window from the
//!    far corner is rotated into an empty cell next to the occupied edge.
//!
//! The loop ends on the first pass that changes nothing, or after
//! [`MAX_ITERATIONS`] passes. Each window is finally placed at the center of
//! the cells it occupies, with `distance` pixels between cells.

mod grid;
mod heuristics;

pub use heuristics::{ASPECT_TOLERANCE, TRIANGULAR_TOLERANCE, affinity};

use self::grid::{CellGrid, CellRange};
use self::heuristics::{prefers_columns, triangular_ratio};
use super::{LayoutParams, LayoutReport, normalize, participants};
use crate::geometry::Size;
use crate::window::Window;

/// Upper bound on solver passes. Hitting it is not an error; the last grid is
/// used as is.
pub const MAX_ITERATIONS: usize = 100;

/// Grid layout.
///
/// # Arguments
///
/// * `windows` - Windows in processing order, with working positions seeded
///   (placeholders are skipped)
/// * `params` - Spacing and container size
///
/// # Returns
///
/// The bounding size of the arrangement and the number of passes taken.
pub fn layout(windows: &mut [&mut Window], params: &LayoutParams) -> LayoutReport {
    let mut windows = participants(windows);
    if windows.is_empty() {
        return LayoutReport::default();
    }

    let cell = cell_size(&windows, params.container);
    let container_aspect = params.container.aspect();
    tracing::debug!("boxy: {} windows, cell size {}x{}", windows.len(), cell.width, cell.height);

    let mut iterations = 0;
    let grid = loop {
        iterations += 1;
        let grid = CellGrid::build(windows.iter().map(|w| CellRange::of(&w.frame(), cell)).collect());

        let changed = prune(&grid, &mut windows, cell)
            || expand(&grid, &mut windows, cell, container_aspect)
            || rotate_contract(&grid, &mut windows, cell, container_aspect);

        if !changed {
            break grid;
        }
        if iterations >= MAX_ITERATIONS {
            tracing::debug!("boxy: stopped after {iterations} passes with work left");
            break grid;
        }
    };

    place(&grid, &mut windows, cell, params.distance);
    let size = normalize(&mut windows);

    tracing::debug!("boxy: {}x{} grid after {iterations} passes", grid.width(), grid.height());
    LayoutReport { size, iterations }
}

/// Cell size: the smallest window dimension, but no smaller than a fifth of
/// the container.
fn cell_size(windows: &[&mut Window], container: Size) -> Size {
    let min_w = windows.iter().map(|w| w.width()).min().unwrap_or(0);
    let min_h = windows.iter().map(|w| w.height()).min().unwrap_or(0);
    Size::new(min_w.max(container.width / 5).max(1), min_h.max(container.height / 5).max(1))
}

/// Removes empty rows, then empty columns, by shifting everything at or past
/// them back one cell.
///
/// Rows are visited in ascending order against the grid as built, so several
/// empty rows collapse in one pass.
fn prune(grid: &CellGrid, windows: &mut [&mut Window], cell: Size) -> bool {
    let mut pruned = false;

    for j in grid.min_y()..grid.max_y() {
        if grid.is_row_empty(j) {
            tracing::trace!("boxy: prune row {j}");
            for window in windows.iter_mut() {
                if window.position.y.div_euclid(cell.height) >= j {
                    window.position.y -= cell.height;
                }
            }
            pruned = true;
        }
    }

    for i in grid.min_x()..grid.max_x() {
        if grid.is_column_empty(i) {
            tracing::trace!("boxy: prune column {i}");
            for window in windows.iter_mut() {
                if window.position.x.div_euclid(cell.width) >= i {
                    window.position.x -= cell.width;
                }
            }
            pruned = true;
        }
    }

    pruned
}

/// Resolves the last contested cell by moving one of its windows one cell
/// down or right.
fn expand(grid: &CellGrid, windows: &mut [&mut Window], cell: Size, container_aspect: f64) -> bool {
    for j in (grid.min_y()..grid.max_y()).rev() {
        for i in (grid.min_x()..grid.max_x()).rev() {
            if grid.count(i, j) <= 1 {
                continue;
            }

            let direction = if prefers_columns(grid, cell, container_aspect) { (1, 0) } else { (0, 1) };

            let mut moving = None;
            let mut max_affinity = i32::MIN;
            for &member in grid.members(i, j) {
                let score = affinity(&windows[member].frame(), cell, (i, j), direction);
                if score > max_affinity {
                    max_affinity = score;
                    moving = Some(member);
                }
            }

            if let Some(member) = moving {
                tracing::trace!(
                    "boxy: collision on cell ({i},{j}) with {} windows, moving {} by {direction:?}",
                    grid.count(i, j),
                    windows[member].id
                );
                let window = &mut windows[member];
                window.position.x += direction.0 * cell.width;
                window.position.y += direction.1 * cell.height;
            }
            return true;
        }
    }

    false
}

/// Rotates one window out of the far corner of a lopsided grid.
///
/// Row contraction (for narrow grids) takes the last occupied cell below the
/// first row, walks right along its row while the cell above is occupied and
/// moves a window into the empty cell above where the walk stopped. Column
/// contraction is the same with rows and columns swapped.
fn rotate_contract(grid: &CellGrid, windows: &mut [&mut Window], cell: Size, container_aspect: f64) -> bool {
    if triangular_ratio(grid) <= TRIANGULAR_TOLERANCE {
        return false;
    }

    let rows = prefers_columns(grid, cell, container_aspect);
    let Some(pivot) = find_pivot(grid, rows) else {
        return false;
    };

    // Walk direction, and the offset from the walk to the neighbor it checks.
    let (step, side) = if rows { ((1, 0), (0, -1)) } else { ((0, 1), (-1, 0)) };
    let neighbor = |(i, j): (i32, i32)| (i + side.0, j + side.1);

    let mut walk = pivot;
    loop {
        let (ni, nj) = neighbor(walk);
        if ni >= grid.max_x() - 1 || nj >= grid.max_y() - 1 || grid.count(ni, nj) == 0 {
            break;
        }
        walk = (walk.0 + step.0, walk.1 + step.1);
    }

    let target = neighbor(walk);
    if walk == pivot || !in_grid(grid, target) || grid.count(target.0, target.1) != 0 {
        return false;
    }

    let delta = (target.0 - pivot.0, target.1 - pivot.1);
    let mut moving = None;
    let mut max_affinity = i32::MIN;
    for &member in grid.members(pivot.0, pivot.1) {
        let score = affinity(&windows[member].frame(), cell, pivot, delta);
        if score > max_affinity && !collides(grid, grid.range(member), delta) {
            moving = Some(member);
        }
        max_affinity = max_affinity.max(score);
    }

    let Some(member) = moving else {
        return false;
    };

    tracing::trace!(
        "boxy: rotate contraction of {} from ({},{}) to ({},{})",
        windows[member].id,
        pivot.0,
        pivot.1,
        target.0,
        target.1
    );
    let window = &mut windows[member];
    window.position.x += delta.0 * cell.width;
    window.position.y += delta.1 * cell.height;
    true
}

/// Finds the occupied cell rotate-contraction starts from.
///
/// For rows: scanning rows bottom-up (excluding the first) and columns right
/// to left. For columns: columns right to left (excluding the first), rows
/// bottom-up.
fn find_pivot(grid: &CellGrid, rows: bool) -> Option<(i32, i32)> {
    if rows {
        for j in (grid.min_y() + 1..grid.max_y()).rev() {
            for i in (grid.min_x()..grid.max_x()).rev() {
                if grid.count(i, j) > 0 {
                    return Some((i, j));
                }
            }
        }
    } else {
        for i in (grid.min_x() + 1..grid.max_x()).rev() {
            for j in (grid.min_y()..grid.max_y()).rev() {
                if grid.count(i, j) > 0 {
                    return Some((i, j));
                }
            }
        }
    }
    None
}

const fn in_grid(grid: &CellGrid, (i, j): (i32, i32)) -> bool {
    i >= grid.min_x() && i < grid.max_x() && j >= grid.min_y() && j < grid.max_y()
}

/// Returns true when moving a window's cells by `delta` would land on a cell
/// held by another window. A cell the window alone holds does not count.
fn collides(grid: &CellGrid, range: CellRange, delta: (i32, i32)) -> bool {
    let moved = range.shifted(delta.0, delta.1);
    for j in moved.y0..moved.y1.min(grid.max_y()) {
        for i in moved.x0..moved.x1.min(grid.max_x()) {
            let count = grid.count(i, j);
            if count > 0 && !(count == 1 && range.contains(i, j)) {
                return true;
            }
        }
    }
    false
}

/// Places every window at the mean of `cell * (cell_size + distance)` over
/// the cells it holds, centered on that point.
fn place(grid: &CellGrid, windows: &mut [&mut Window], cell: Size, distance: i32) {
    for (index, window) in windows.iter_mut().enumerate() {
        let range = grid.range(index);
        let slots = range.cell_count().max(1);
        window.position.x = -window.width() / 2 - grid.min_x() * cell.width;
        window.position.y = -window.height() / 2 - grid.min_y() * cell.height;

        for j in range.y0..range.y1 {
            for i in range.x0..range.x1 {
                window.position.x += i * (cell.width + distance) / slots;
                window.position.y += j * (cell.height + distance) / slots;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Rect};

    const PARAMS: LayoutParams = LayoutParams::new(20, Size::new(1920, 1080));

    fn run(windows: &mut [Window], params: &LayoutParams) -> LayoutReport {
        let mut handles: Vec<&mut Window> = windows.iter_mut().collect();
        layout(&mut handles, params)
    }

    fn assert_no_overlap(windows: &[Window], spacing: i32) {
        for (n, a) in windows.iter().enumerate() {
            for b in &windows[n + 1..] {
                assert!(
                    !a.frame().overlaps_with_spacing(&b.frame(), spacing),
                    "{:?} overlaps {:?}",
                    a.frame(),
                    b.frame()
                );
            }
        }
    }

    #[test]
    fn test_layout_empty() {
        assert_eq!(run(&mut [], &PARAMS), LayoutReport::default());
    }

    #[test]
    fn test_layout_single_window() {
        let mut windows = vec![Window::new(1, Rect::new(700, 300, 640, 480))];
        let report = run(&mut windows, &PARAMS);
        assert_eq!(report.size, Size::new(640, 480));
        assert_eq!(report.iterations, 1);
        assert_eq!(windows[0].position, Point::new(0, 0));
    }

    #[test]
    fn test_identical_windows_spread_into_grid() {
        let mut windows: Vec<Window> =
            (1..=3).map(|id| Window::new(id, Rect::new(0, 0, 400, 300))).collect();
        let report = run(&mut windows, &PARAMS);

        assert_eq!(windows[2].position, Point::new(0, 0));
        assert_eq!(windows[0].position, Point::new(420, 0));
        assert_eq!(windows[1].position, Point::new(0, 320));
        assert_eq!(report.size, Size::new(820, 620));
        assert_eq!(report.iterations, 3);
        assert_no_overlap(&windows, PARAMS.distance);
    }

    #[test]
    fn test_empty_columns_are_pruned() {
        let mut windows = vec![
            Window::new(1, Rect::new(0, 0, 400, 300)),
            Window::new(2, Rect::new(2000, 0, 400, 300)),
        ];
        let report = run(&mut windows, &PARAMS);

        assert_eq!(windows[1].position.x - windows[0].position.x, 420);
        assert_eq!(windows[0].position.y, windows[1].position.y);
        assert_eq!(report.size, Size::new(820, 300));
    }

    #[test]
    fn test_rotate_contraction_fills_corner() {
        // A column of three with one window beside the top: the bottom
        // window rotates up into the empty cell.
        let mut windows = vec![
            Window::new(1, Rect::new(0, 0, 400, 300)),
            Window::new(2, Rect::new(400, 0, 400, 300)),
            Window::new(3, Rect::new(0, 300, 400, 300)),
            Window::new(4, Rect::new(0, 600, 400, 300)),
        ];
        let report = run(&mut windows, &PARAMS);

        assert_eq!(windows[3].position, Point::new(420, 320));
        assert_eq!(report.size, Size::new(820, 620));
        assert_no_overlap(&windows, PARAMS.distance);
    }

    #[test]
    fn test_converged_layout_has_no_overlap() {
        let mut windows = vec![
            Window::new(1, Rect::new(0, 0, 800, 600)),
            Window::new(2, Rect::new(100, 100, 800, 600)),
            Window::new(3, Rect::new(900, 300, 500, 400)),
            Window::new(4, Rect::new(1200, 700, 600, 300)),
            Window::new(5, Rect::new(50, 500, 400, 400)),
        ];
        let report = run(&mut windows, &PARAMS);

        assert!(report.iterations < MAX_ITERATIONS);
        assert_no_overlap(&windows, PARAMS.distance);
        let bounds = Rect::bounding(windows.iter().map(Window::frame));
        assert_eq!(bounds.map(|b| b.origin()), Some(Point::new(0, 0)));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let make = || -> Vec<Window> {
            (0_u8..9)
                .map(|n| {
                    let step = i32::from(n);
                    Window::new(u64::from(n), Rect::new((step % 3) * 150, (step / 4) * 90, 500, 350))
                })
                .collect()
        };
        let mut first = make();
        let mut second = make();
        let a = run(&mut first, &PARAMS);
        let b = run(&mut second, &PARAMS);
        assert_eq!(a, b);
        assert_eq!(first, second);
    }

    #[test]
    fn test_stacked_windows_respect_iteration_cap() {
        let mut windows: Vec<Window> =
            (0..40).map(|id| Window::new(id, Rect::new(10, 10, 300, 200))).collect();
        let report = run(&mut windows, &PARAMS);
        assert!(report.iterations <= MAX_ITERATIONS);
        assert!(report.size.width > 0 && report.size.height > 0);
    }

    #[test]
    fn test_placeholders_are_not_moved() {
        let mut windows = vec![
            Window::new(1, Rect::new(0, 0, 400, 300)),
            Window::new(2, Rect::new(0, 0, 400, 300)).placeholder(),
        ];
        windows[1].position = Point::new(5000, 5000);
        let report = run(&mut windows, &PARAMS);
        assert_eq!(windows[1].position, Point::new(5000, 5000));
        assert_eq!(report.size, Size::new(400, 300));
    }

    #[test]
    fn test_zero_sized_window_does_not_divide_by_zero() {
        let mut windows = vec![
            Window::new(1, Rect::new(0, 0, 0, 0)),
            Window::new(2, Rect::new(0, 0, 40, 30)),
        ];
        let report = run(&mut windows, &LayoutParams::new(10, Size::new(0, 0)));
        assert!(report.iterations <= MAX_ITERATIONS);
    }
}
