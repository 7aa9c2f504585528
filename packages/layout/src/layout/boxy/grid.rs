//! Dense cell grid used by the boxy solver.
//!
//! The grid covers the union of every window's cell range. Cell indices are
//! signed because windows may sit left of or above the container origin;
//! all index math lives here and lookups outside the grid read as empty.

use smallvec::SmallVec;

use crate::geometry::{Rect, Size};

/// Inline capacity for per-cell membership. Cells rarely hold more than a
/// handful of windows.
const CELL_INLINE_CAP: usize = 4;

/// Half-open range of cells `[x0, x1) x [y0, y1)` covered by one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    /// First column.
    pub x0: i32,
    /// First row.
    pub y0: i32,
    /// One past the last column.
    pub x1: i32,
    /// One past the last row.
    pub y1: i32,
}

impl CellRange {
    /// Computes the cells a window frame occupies.
    ///
    /// The range starts at `floor(position / cell)` and spans
    /// `ceil(size / cell)` cells, at least one per axis.
    #[must_use]
    pub fn of(frame: &Rect, cell: Size) -> Self {
        let x0 = frame.x.div_euclid(cell.width);
        let y0 = frame.y.div_euclid(cell.height);
        Self {
            x0,
            y0,
            x1: x0 + span(frame.width, cell.width),
            y1: y0 + span(frame.height, cell.height),
        }
    }

    /// Shifts the range by whole cells.
    #[must_use]
    pub const fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x0: self.x0 + dx,
            y0: self.y0 + dy,
            x1: self.x1 + dx,
            y1: self.y1 + dy,
        }
    }

    /// Returns true when the cell lies in the range.
    #[must_use]
    pub const fn contains(&self, i: i32, j: i32) -> bool {
        self.x0 <= i && i < self.x1 && self.y0 <= j && j < self.y1
    }

    /// Number of cells in the range.
    #[must_use]
    pub const fn cell_count(&self) -> i32 { (self.x1 - self.x0) * (self.y1 - self.y0) }
}

/// Number of cells needed to hold `length`, never fewer than one.
const fn span(length: i32, cell: i32) -> i32 {
    let cells = (length + cell - 1).div_euclid(cell);
    if cells < 1 { 1 } else { cells }
}

/// Occupancy table over a rectangular block of cells.
#[derive(Debug, Clone)]
pub struct CellGrid {
    min_x: i32,
    min_y: i32,
    width: i32,
    height: i32,
    counts: Vec<usize>,
    members: Vec<SmallVec<[usize; CELL_INLINE_CAP]>>,
    ranges: Vec<CellRange>,
}

impl CellGrid {
    /// Builds the grid for the given window ranges. Window `n` is recorded in
    /// every cell of `ranges[n]`, in window order.
    #[must_use]
    pub fn build(ranges: Vec<CellRange>) -> Self {
        let min_x = ranges.iter().map(|r| r.x0).min().unwrap_or(0);
        let min_y = ranges.iter().map(|r| r.y0).min().unwrap_or(0);
        let max_x = ranges.iter().map(|r| r.x1).max().unwrap_or(0);
        let max_y = ranges.iter().map(|r| r.y1).max().unwrap_or(0);

        let width = max_x - min_x;
        let height = max_y - min_y;
        let len = usize::try_from(width * height).unwrap_or(0);

        let mut grid = Self {
            min_x,
            min_y,
            width,
            height,
            counts: vec![0; len],
            members: vec![SmallVec::new(); len],
            ranges: Vec::new(),
        };

        for (window, range) in ranges.iter().enumerate() {
            for j in range.y0..range.y1 {
                for i in range.x0..range.x1 {
                    if let Some(index) = grid.index(i, j) {
                        grid.counts[index] += 1;
                        grid.members[index].push(window);
                    }
                }
            }
        }

        grid.ranges = ranges;
        grid
    }

    /// Flat index of a cell, `None` outside the grid.
    fn index(&self, i: i32, j: i32) -> Option<usize> {
        if i < self.min_x || i >= self.max_x() || j < self.min_y || j >= self.max_y() {
            return None;
        }
        usize::try_from((j - self.min_y) * self.width + (i - self.min_x)).ok()
    }

    /// First column.
    #[must_use]
    pub const fn min_x(&self) -> i32 { self.min_x }

    /// First row.
    #[must_use]
    pub const fn min_y(&self) -> i32 { self.min_y }

    /// One past the last column.
    #[must_use]
    pub const fn max_x(&self) -> i32 { self.min_x + self.width }

    /// One past the last row.
    #[must_use]
    pub const fn max_y(&self) -> i32 { self.min_y + self.height }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> i32 { self.width }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> i32 { self.height }

    /// Number of windows covering a cell; zero outside the grid.
    #[must_use]
    pub fn count(&self, i: i32, j: i32) -> usize { self.index(i, j).map_or(0, |index| self.counts[index]) }

    /// Windows covering a cell, in window order.
    #[must_use]
    pub fn members(&self, i: i32, j: i32) -> &[usize] {
        match self.index(i, j) {
            Some(index) => &self.members[index],
            None => &[],
        }
    }

    /// Cell range of window `n`.
    #[must_use]
    pub fn range(&self, window: usize) -> CellRange { self.ranges[window] }

    /// Returns true when no window covers any cell of row `j`.
    #[must_use]
    pub fn is_row_empty(&self, j: i32) -> bool { (self.min_x..self.max_x()).all(|i| self.count(i, j) == 0) }

    /// Returns true when no window covers any cell of column `i`.
    #[must_use]
    pub fn is_column_empty(&self, i: i32) -> bool {
        (self.min_y..self.max_y()).all(|j| self.count(i, j) == 0)
    }

    /// Iterates over every cell as `(i, j)`, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (self.min_y..self.max_y()).flat_map(move |j| (self.min_x..self.max_x()).map(move |i| (i, j)))
    }
}
