//! Window overview layout engine.
//!
//! Given the windows on a screen, this crate computes where each one goes
//! when all of them are shown side by side, scaled to fit. Three expose
//! strategies are available ([`LayoutStrategy`]), plus row packing for the
//! window switcher and a page-per-desktop view.
//!
//! The usual entry point is [`Scene::arrange`]; [`layout::run`] works on a
//! bare window list.

pub mod config;
pub mod desktop;
pub mod fit;
pub mod geometry;
pub mod layout;
pub mod paging;
pub mod scene;
pub mod schema;
pub mod window;

pub use config::{ConfigError, ExposeConfig, LayoutConfig, PanelConfig, load_config, load_config_from_path};
pub use desktop::{DesktopGrid, DesktopInfo, SingleDesktop, StaticDesktops};
pub use fit::{Fit, Insets};
pub use geometry::{Point, Rect, Size};
pub use layout::{LayoutMode, LayoutParams, LayoutReport, LayoutStrategy};
pub use scene::{Arrangement, Placement, Scene};
pub use schema::{generate_schema, generate_schema_json};
pub use window::{Window, WindowId, WindowMode};
