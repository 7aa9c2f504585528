//! Virtual desktop queries and the desktop grid they imply.
//!
//! Desktops are arranged on a square grid of `ceil(sqrt(count))` columns.
//! The expose pre-pass and the paging layout both use that grid to place
//! windows from other desktops beside the current one.

use crate::geometry::{Point, Size};
use crate::window::Window;

// ============================================================================
// Desktop Queries
// ============================================================================

/// Answers the two questions the layout engine asks the windowing system.
pub trait DesktopInfo {
    /// Number of virtual desktops, or `None` when the window manager does not
    /// say.
    fn desktop_count(&self) -> Option<usize>;

    /// Index of the active desktop.
    fn current_desktop(&self) -> usize;

    /// Desktop the window lives on, or `None` for sticky or unknown windows.
    fn window_desktop(&self, window: &Window) -> Option<usize>;
}

/// A single desktop; every window is on it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleDesktop;

impl DesktopInfo for SingleDesktop {
    fn desktop_count(&self) -> Option<usize> { Some(1) }

    fn current_desktop(&self) -> usize { 0 }

    fn window_desktop(&self, _window: &Window) -> Option<usize> { None }
}

/// Fixed desktop information, reading each window's desktop from the window
/// itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticDesktops {
    /// Number of desktops.
    pub count: Option<usize>,
    /// Active desktop.
    pub current: usize,
}

impl StaticDesktops {
    /// Creates desktop information for `count` desktops with `current` active.
    #[must_use]
    pub const fn new(count: usize, current: usize) -> Self {
        Self { count: Some(count), current }
    }
}

impl DesktopInfo for StaticDesktops {
    fn desktop_count(&self) -> Option<usize> { self.count }

    fn current_desktop(&self) -> usize { self.current }

    fn window_desktop(&self, window: &Window) -> Option<usize> { window.desktop }
}

// ============================================================================
// Desktop Grid
// ============================================================================

/// The square grid virtual desktops are laid out on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesktopGrid {
    /// Number of desktops.
    pub count: usize,
    /// Grid columns, `ceil(sqrt(count))`.
    pub columns: usize,
    /// Grid rows, `ceil(count / columns)`.
    pub rows: usize,
}

impl DesktopGrid {
    /// Builds the grid for `count` desktops; an unknown or zero count is one
    /// desktop.
    #[must_use]
    pub fn new(count: Option<usize>) -> Self {
        let count = count.unwrap_or(1).max(1);
        let columns = integer_sqrt_ceil(count);
        let rows = count.div_ceil(columns);
        Self { count, columns, rows }
    }

    /// Builds the grid from a desktop collaborator.
    #[must_use]
    pub fn from_info(info: &dyn DesktopInfo) -> Self { Self::new(info.desktop_count()) }

    /// Column and row of a desktop index.
    #[must_use]
    pub const fn cell(&self, desktop: usize) -> (usize, usize) {
        (desktop % self.columns, desktop / self.columns)
    }

    /// Pixel offset of `desktop` relative to `current`, where each page is
    /// `page` sized and pages are `distance` apart.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    #[must_use]
    pub const fn offset(&self, desktop: usize, current: usize, page: Size, distance: i32) -> Point {
        let (col, row) = self.cell(desktop);
        let (cur_col, cur_row) = self.cell(current);
        Point::new(
            (col as i32 - cur_col as i32) * (page.width + distance),
            (row as i32 - cur_row as i32) * (page.height + distance),
        )
    }
}

/// Smallest `n` with `n * n >= value`.
const fn integer_sqrt_ceil(value: usize) -> usize {
    let mut n = 1;
    while n * n < value {
        n += 1;
    }
    n
}

/// Resolves the desktop a window should be treated as living on.
#[must_use]
pub fn resolve_desktop(info: &dyn DesktopInfo, window: &Window) -> usize {
    info.window_desktop(window).unwrap_or_else(|| info.current_desktop())
}
