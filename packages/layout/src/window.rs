//! The unit of layout: a window with a fixed origin and a mutable position.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};

/// Stable window identity, as handed out by the windowing system.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct WindowId(pub u64);

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{:#x}", self.0) }
}

/// Whether a window takes part in layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum WindowMode {
    /// A regular client window; laid out by every strategy.
    #[default]
    Client,
    /// Stand-in entry (for example a minimized window's slot) that strategies
    /// skip and never move.
    Placeholder,
}

/// A window being arranged.
///
/// `origin` is the window's true screen geometry and never changes during
/// layout. `position` is the working top-left corner that strategies mutate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    /// Window identity.
    pub id: WindowId,
    /// Original on-screen rectangle.
    pub origin: Rect,
    /// Working position, written by the strategies.
    #[serde(default)]
    pub position: Point,
    /// Participation flag.
    #[serde(default)]
    pub mode: WindowMode,
    /// Virtual desktop the window lives on, `None` for the current one or
    /// sticky windows.
    #[serde(default)]
    pub desktop: Option<usize>,
}

impl Window {
    /// Creates a participating window whose working position starts at its
    /// origin.
    #[must_use]
    pub const fn new(id: u64, origin: Rect) -> Self {
        Self {
            id: WindowId(id),
            origin,
            position: origin.origin(),
            mode: WindowMode::Client,
            desktop: None,
        }
    }

    /// Marks the window as a placeholder.
    #[must_use]
    pub const fn placeholder(mut self) -> Self {
        self.mode = WindowMode::Placeholder;
        self
    }

    /// Places the window on a virtual desktop.
    #[must_use]
    pub const fn on_desktop(mut self, desktop: usize) -> Self {
        self.desktop = Some(desktop);
        self
    }

    /// Returns true when strategies should arrange this window.
    #[must_use]
    pub const fn participates(&self) -> bool { matches!(self.mode, WindowMode::Client) }

    /// Window width; invariant during layout.
    #[must_use]
    pub const fn width(&self) -> i32 { self.origin.width }

    /// Window height; invariant during layout.
    #[must_use]
    pub const fn height(&self) -> i32 { self.origin.height }

    /// Window size.
    #[must_use]
    pub const fn size(&self) -> Size { self.origin.size() }

    /// The working rectangle: current position with the original size.
    #[must_use]
    pub const fn frame(&self) -> Rect { Rect::from_origin_size(self.position, self.origin.size()) }

    /// Resets the working position to the original one.
    pub const fn reset_position(&mut self) { self.position = self.origin.origin(); }
}
