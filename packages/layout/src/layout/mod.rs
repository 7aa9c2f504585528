//! Layout strategies for the window overview.
//!
//! [`run`] is the single entry point. It picks a strategy from the layout
//! mode and the configured expose strategy, fixes the processing order of the
//! windows and seeds their working positions, then hands the participating
//! windows to the strategy.
//!
//! # Strategies
//!
//! - **Xd**: row packing into vertical slots, centered rows
//! - **Boxy**: grid snapping with collision expansion and rotate-contraction
//! - **Cosmos**: repulsive expansion followed by attractive collapse
//!
//! Every strategy leaves placeholder windows untouched and returns the tight
//! bounding size of what it arranged. None of them fail: an empty collection
//! produces a zero-sized report and iteration caps end solvers silently.

pub mod boxy;
pub mod cosmos;
pub mod xd;

use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::desktop::{DesktopGrid, DesktopInfo, resolve_desktop};
use crate::geometry::{Rect, Size};
use crate::paging;
use crate::window::Window;

// ============================================================================
// Parameters and Results
// ============================================================================

/// What the overview is being opened for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    /// Show every window, using the configured strategy.
    #[default]
    Expose,
    /// Alt-tab style switcher; always row-packed.
    Switch,
    /// One page per virtual desktop.
    Paging,
}

/// Strategy used by expose mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutStrategy {
    /// Legacy row packing.
    Xd,
    /// Grid solver.
    Boxy,
    /// Physics solver.
    #[default]
    Cosmos,
}

impl LayoutStrategy {
    /// Lowercase name as used in configuration files.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Xd => "xd",
            Self::Boxy => "boxy",
            Self::Cosmos => "cosmos",
        }
    }
}

impl std::fmt::Display for LayoutStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for LayoutStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xd" => Ok(Self::Xd),
            "boxy" => Ok(Self::Boxy),
            "cosmos" => Ok(Self::Cosmos),
            _ => Err(format!(
                "Invalid layout strategy '{s}'. Expected 'xd', 'boxy', or 'cosmos'."
            )),
        }
    }
}

impl std::fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Expose => "expose",
            Self::Switch => "switch",
            Self::Paging => "paging",
        })
    }
}

impl FromStr for LayoutMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "expose" => Ok(Self::Expose),
            "switch" => Ok(Self::Switch),
            "paging" => Ok(Self::Paging),
            _ => Err(format!(
                "Invalid layout mode '{s}'. Expected 'expose', 'switch', or 'paging'."
            )),
        }
    }
}

/// Per-run layout parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutParams {
    /// Spacing between windows, in pixels.
    pub distance: i32,
    /// Size of the region the overview is shown in.
    pub container: Size,
}

impl LayoutParams {
    /// Creates layout parameters.
    #[must_use]
    pub const fn new(distance: i32, container: Size) -> Self { Self { distance, container } }
}

/// Outcome of one layout run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReport {
    /// Bounding width and height of the arranged windows.
    pub size: Size,
    /// Solver passes consumed. Zero for single-pass strategies.
    pub iterations: usize,
}

impl LayoutReport {
    /// Report for a single-pass strategy.
    #[must_use]
    pub const fn sized(size: Size) -> Self { Self { size, iterations: 0 } }
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Arranges `windows` and returns the bounding size of the result.
///
/// # Arguments
///
/// * `windows` - Windows in front-to-back stacking order
/// * `params` - Spacing and container size
/// * `mode` - Why the overview is shown
/// * `strategy` - Strategy used in expose mode
/// * `desktops` - Virtual desktop queries
///
/// # Returns
///
/// The bounding size and iteration count. The order of `windows` is never
/// changed; only working positions of participating windows are written.
pub fn run(
    windows: &mut [Window],
    params: &LayoutParams,
    mode: LayoutMode,
    strategy: LayoutStrategy,
    desktops: &dyn DesktopInfo,
) -> LayoutReport {
    tracing::debug!(
        "layout: {} windows, mode={mode}, strategy={strategy}, container={}x{}, distance={}",
        windows.len(),
        params.container.width,
        params.container.height,
        params.distance
    );

    let report = match mode {
        LayoutMode::Paging => {
            let mut handles: Vec<&mut Window> = windows.iter_mut().collect();
            paging::layout(&mut handles, params, desktops)
        }
        LayoutMode::Expose if strategy != LayoutStrategy::Xd => {
            run_solver(windows, params, strategy, desktops)
        }
        LayoutMode::Expose | LayoutMode::Switch => {
            // Front-to-back stacking order becomes back-to-front for packing.
            let mut handles: Vec<&mut Window> = windows.iter_mut().rev().collect();
            xd::layout(&mut handles, params)
        }
    };

    tracing::debug!(
        "layout: finished at {}x{} after {} iterations",
        report.size.width,
        report.size.height,
        report.iterations
    );
    report
}

/// Seeds positions with the desktop offset, fixes the processing order and
/// runs one of the iterative solvers.
fn run_solver(
    windows: &mut [Window],
    params: &LayoutParams,
    strategy: LayoutStrategy,
    desktops: &dyn DesktopInfo,
) -> LayoutReport {
    let grid = DesktopGrid::from_info(desktops);
    let current = desktops.current_desktop();

    let mut handles: Vec<(usize, &mut Window)> = Vec::with_capacity(windows.len());
    for window in windows.iter_mut() {
        let desktop = resolve_desktop(desktops, window);
        if window.participates() {
            let offset = grid.offset(desktop, current, params.container, params.distance);
            window.reset_position();
            window.position.x += offset.x;
            window.position.y += offset.y;
        }
        handles.push((grid.cell(desktop).1, window));
    }

    handles.sort_by_key(|(_, window)| window.id);
    if strategy == LayoutStrategy::Cosmos {
        handles.sort_by_key(|(row, _)| *row);
    }

    let mut handles: Vec<&mut Window> = handles.into_iter().map(|(_, window)| window).collect();
    match strategy {
        LayoutStrategy::Boxy => boxy::layout(&mut handles, params),
        LayoutStrategy::Cosmos => cosmos::layout(&mut handles, params),
        LayoutStrategy::Xd => xd::layout(&mut handles, params),
    }
}

// ============================================================================
// Shared Helpers
// ============================================================================

/// Reborrows the participating windows, keeping their order.
pub(crate) fn participants<'a>(windows: &'a mut [&mut Window]) -> Vec<&'a mut Window> {
    windows.iter_mut().filter(|w| w.participates()).map(|w| &mut **w).collect()
}

/// Tight bounding rectangle of the working frames, if any.
pub(crate) fn bounds(windows: &[&mut Window]) -> Option<Rect> {
    Rect::bounding(windows.iter().map(|w| w.frame()))
}

/// Moves the arrangement so its bounding box starts at the origin and returns
/// its size.
pub(crate) fn normalize(windows: &mut [&mut Window]) -> Size {
    let Some(bounds) = bounds(windows) else {
        return Size::ZERO;
    };

    for window in windows.iter_mut() {
        window.position.x -= bounds.x;
        window.position.y -= bounds.y;
    }

    bounds.size()
}
