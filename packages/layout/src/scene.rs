//! A snapshot of the screen and its windows, and the arrangement computed
//! for it.
//!
//! A [`Scene`] is what a window manager integration hands over: the screen,
//! the virtual desktops, any panels and the windows in stacking order. It
//! answers the desktop queries itself, so arranging it needs nothing else.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::ExposeConfig;
use crate::desktop::{DesktopGrid, DesktopInfo};
use crate::fit::{Fit, Insets};
use crate::geometry::{Rect, Size};
use crate::layout::{self, LayoutMode, LayoutParams, LayoutReport};
use crate::paging;
use crate::window::{Window, WindowId};

/// Screen, desktops and windows to arrange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Overview surface, in screen coordinates.
    pub screen: Rect,
    /// Number of virtual desktops, if known.
    #[serde(default)]
    pub desktop_count: Option<usize>,
    /// Active desktop.
    #[serde(default)]
    pub current_desktop: usize,
    /// Docks and panels on the screen.
    #[serde(default)]
    pub panels: Vec<Rect>,
    /// Windows in front-to-back stacking order.
    #[serde(default)]
    pub windows: Vec<Window>,
}

impl DesktopInfo for Scene {
    fn desktop_count(&self) -> Option<usize> { self.desktop_count }

    fn current_desktop(&self) -> usize { self.current_desktop }

    fn window_desktop(&self, window: &Window) -> Option<usize> { window.desktop }
}

/// Where one window ends up on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub id: WindowId,
    /// Scaled frame in screen coordinates.
    pub frame: Rect,
}

/// Result of arranging a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Arrangement {
    /// Unscaled layout size and solver passes.
    pub report: LayoutReport,
    /// Transform from layout coordinates to the screen.
    pub fit: Fit,
    /// One entry per participating window, in input order.
    pub placements: Vec<Placement>,
    /// Scaled page of every desktop, in index order. Only filled in paging
    /// mode.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<Rect>,
}

impl Arrangement {
    /// Unscaled bounding size of the layout.
    #[must_use]
    pub const fn size(&self) -> Size { self.report.size }
}

impl Scene {
    /// Creates a scene with a single desktop and no panels.
    #[must_use]
    pub const fn new(screen: Rect, windows: Vec<Window>) -> Self {
        Self {
            screen,
            desktop_count: None,
            current_desktop: 0,
            panels: Vec::new(),
            windows,
        }
    }

    /// Space reserved by panels, or none when the configuration says to
    /// ignore them.
    #[must_use]
    pub fn insets(&self, config: &ExposeConfig) -> Insets {
        if config.panel.reserve_space {
            Insets::from_panels(self.screen, &self.panels)
        } else {
            Insets::default()
        }
    }

    /// Arranges the scene's windows for `mode` and fits the result on screen.
    ///
    /// The scene itself is left untouched; the arrangement works on a copy
    /// of the windows.
    #[must_use]
    pub fn arrange(&self, config: &ExposeConfig, mode: LayoutMode) -> Arrangement {
        let distance = config.layout.effective_distance();
        let params = LayoutParams::new(distance, self.screen.size());

        let mut windows = self.windows.clone();
        let report = layout::run(&mut windows, &params, mode, config.layout.expose_layout, self);

        let (margin, allow_upscale) = match mode {
            // The page grid always fills the screen.
            LayoutMode::Paging => (distance, true),
            LayoutMode::Expose | LayoutMode::Switch => (2 * distance, config.layout.allow_upscale),
        };
        let fit = Fit::compute(report.size, self.screen.size(), margin, self.insets(config), allow_upscale);

        let placements = windows
            .iter()
            .filter(|window| window.participates())
            .map(|window| Placement {
                id: window.id,
                frame: fit.apply(window.frame()),
            })
            .collect();

        let pages = match mode {
            LayoutMode::Paging => paging::pages(&DesktopGrid::from_info(self), &params)
                .into_iter()
                .map(|page| fit.apply(page))
                .collect(),
            LayoutMode::Expose | LayoutMode::Switch => Vec::new(),
        };

        Arrangement {
            report,
            fit,
            placements,
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::layout::LayoutStrategy;

    fn scene() -> Scene {
        Scene::new(
            Rect::new(0, 0, 1920, 1080),
            vec![
                Window::new(1, Rect::new(100, 100, 800, 600)),
                Window::new(2, Rect::new(1000, 100, 800, 600)),
                Window::new(3, Rect::new(0, 0, 200, 40)).placeholder(),
            ],
        )
    }

    #[test]
    fn test_scene_deserializes_camel_case() {
        let json = r#"{
            "screen": { "x": 0, "y": 0, "width": 1280, "height": 800 },
            "desktopCount": 4,
            "currentDesktop": 1,
            "windows": [
                { "id": 17, "origin": { "x": 10, "y": 20, "width": 300, "height": 200 }, "desktop": 2 }
            ]
        }"#;
        let scene: Scene = serde_json::from_str(json).unwrap();

        assert_eq!(scene.desktop_count(), Some(4));
        assert_eq!(scene.current_desktop(), 1);
        assert!(scene.panels.is_empty());
        assert_eq!(scene.windows[0].id, WindowId(17));
        assert_eq!(scene.window_desktop(&scene.windows[0]), Some(2));
    }

    #[test]
    fn test_arrange_places_participants_only() {
        let arrangement = scene().arrange(&ExposeConfig::default(), LayoutMode::Expose);
        let ids: Vec<WindowId> = arrangement.placements.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![WindowId(1), WindowId(2)]);
    }

    #[test]
    fn test_arrange_fits_on_screen() {
        for strategy in [LayoutStrategy::Xd, LayoutStrategy::Boxy, LayoutStrategy::Cosmos] {
            let mut config = ExposeConfig::default();
            config.layout.expose_layout = strategy;
            let arrangement = scene().arrange(&config, LayoutMode::Expose);

            assert!(arrangement.fit.scale <= 1.0, "{strategy}");
            for placement in &arrangement.placements {
                let frame = placement.frame;
                assert!(frame.x >= 0 && frame.y >= 0, "{strategy}: {frame:?}");
                assert!(frame.right() <= 1920 && frame.bottom() <= 1080, "{strategy}: {frame:?}");
            }
        }
    }

    #[test]
    fn test_arrange_does_not_touch_scene() {
        let scene = scene();
        let before = scene.clone();
        let _ = scene.arrange(&ExposeConfig::default(), LayoutMode::Expose);
        assert_eq!(scene, before);
    }

    #[test]
    fn test_arrange_small_layout_is_not_upscaled() {
        let scene = Scene::new(
            Rect::new(0, 0, 1920, 1080),
            vec![Window::new(1, Rect::new(0, 0, 400, 300))],
        );
        let arrangement = scene.arrange(&ExposeConfig::default(), LayoutMode::Expose);

        assert_eq!(arrangement.size(), Size::new(400, 300));
        assert_eq!(arrangement.placements[0].frame, Rect::new(760, 390, 400, 300));
    }

    #[test]
    fn test_arrange_paging_fills_screen() {
        let mut scene = scene();
        scene.desktop_count = Some(4);
        scene.windows[1].desktop = Some(3);
        let arrangement = scene.arrange(&ExposeConfig::default(), LayoutMode::Paging);

        assert_eq!(arrangement.size(), Size::new(3890, 2210));
        let second = arrangement.placements[1].frame;
        assert!(second.x > 960 && second.y > 540, "{second:?}");
    }

    #[test]
    fn test_arrange_paging_reports_scaled_pages() {
        let mut scene = scene();
        scene.desktop_count = Some(4);
        scene.windows[1].desktop = Some(3);
        let arrangement = scene.arrange(&ExposeConfig::default(), LayoutMode::Paging);

        let pages = &arrangement.pages;
        assert_eq!(pages.len(), 4);
        assert_eq!(pages[0].origin(), arrangement.fit.point(Point::new(0, 0)));
        assert!(pages[1].x > pages[0].right() && pages[1].y == pages[0].y);
        assert!(pages[2].y > pages[0].bottom() && pages[2].x == pages[0].x);
        for page in pages {
            assert!(page.x >= 0 && page.right() <= 1920, "{page:?}");
            assert!(page.y >= 0 && page.bottom() <= 1080, "{page:?}");
        }

        let window = arrangement.placements[1].frame;
        assert!(window.x >= pages[3].x && window.y >= pages[3].y, "{window:?}");
    }

    #[test]
    fn test_arrange_without_paging_has_no_pages() {
        let arrangement = scene().arrange(&ExposeConfig::default(), LayoutMode::Expose);
        assert!(arrangement.pages.is_empty());

        let json = serde_json::to_value(&arrangement).unwrap();
        assert!(json.get("pages").is_none());
    }

    #[test]
    fn test_panels_ignored_when_space_not_reserved() {
        let mut scene = scene();
        scene.panels.push(Rect::new(0, 0, 1920, 40));

        let mut config = ExposeConfig::default();
        assert_eq!(scene.insets(&config).top, 40);

        config.panel.reserve_space = false;
        assert_eq!(scene.insets(&config), Insets::default());
    }
}
