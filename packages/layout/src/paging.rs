//! Paging layout: every virtual desktop as one page on the desktop grid.
//!
//! Pages are container sized and `distance` apart. A window keeps its
//! position relative to its desktop and moves with its page.

use crate::desktop::{DesktopGrid, DesktopInfo, resolve_desktop};
use crate::geometry::{Point, Rect, Size};
use crate::layout::{LayoutParams, LayoutReport, participants};
use crate::window::Window;

/// Places every participating window on its desktop's page.
///
/// # Arguments
///
/// * `windows` - Windows to place (placeholders are skipped)
/// * `params` - Page spacing and page size
/// * `desktops` - Virtual desktop queries
///
/// # Returns
///
/// The size of the whole page grid, which does not depend on the windows.
pub fn layout(windows: &mut [&mut Window], params: &LayoutParams, desktops: &dyn DesktopInfo) -> LayoutReport {
    let grid = DesktopGrid::from_info(desktops);

    for window in participants(windows) {
        let desktop = resolve_desktop(desktops, window);
        let page = page_origin(&grid, desktop, params);
        window.position = Point::new(window.origin.x + page.x, window.origin.y + page.y);
    }

    let size = total_size(&grid, params);
    tracing::debug!(
        "paging: {} desktops on {}x{} grid, {}x{}",
        grid.count,
        grid.columns,
        grid.rows,
        size.width,
        size.height
    );

    LayoutReport::sized(size)
}

/// Rectangles of every page, in desktop index order.
#[must_use]
pub fn pages(grid: &DesktopGrid, params: &LayoutParams) -> Vec<Rect> {
    (0..grid.count)
        .map(|desktop| Rect::from_origin_size(page_origin(grid, desktop, params), params.container))
        .collect()
}

/// Size of the page grid, without trailing spacing.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
#[must_use]
pub const fn total_size(grid: &DesktopGrid, params: &LayoutParams) -> Size {
    let page = params.container;
    Size::new(
        grid.columns as i32 * (page.width + params.distance) - params.distance,
        grid.rows as i32 * (page.height + params.distance) - params.distance,
    )
}

/// Top-left corner of a desktop's page.
const fn page_origin(grid: &DesktopGrid, desktop: usize, params: &LayoutParams) -> Point {
    grid.offset(desktop, 0, params.container, params.distance)
}
