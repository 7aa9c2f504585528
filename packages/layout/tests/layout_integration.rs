//! End-to-end tests through the public API.

use expose_layout::layout::{self, LayoutMode, LayoutParams, LayoutStrategy};
use expose_layout::{ExposeConfig, Rect, Scene, SingleDesktop, Size, StaticDesktops, Window, WindowId};

const PARAMS: LayoutParams = LayoutParams::new(50, Size::new(1920, 1080));

fn assert_no_overlap(windows: &[Window], spacing: i32) {
    for (n, a) in windows.iter().enumerate() {
        for b in &windows[n + 1..] {
            assert!(
                !a.frame().overlaps_with_spacing(&b.frame(), spacing),
                "{} at {:?} overlaps {} at {:?}",
                a.id,
                a.frame(),
                b.id,
                b.frame()
            );
        }
    }
}

fn assert_at_origin(windows: &[Window], size: Size) {
    let bounds = Rect::bounding(windows.iter().map(Window::frame)).unwrap();
    assert_eq!((bounds.x, bounds.y), (0, 0));
    assert_eq!(bounds.size(), size);
}

#[test]
fn test_row_packing_never_overlaps() {
    let mut windows: Vec<Window> = (1..=7)
        .map(|n| Window::new(n, Rect::new(0, 0, 300 + 70 * i32::try_from(n).unwrap(), 200 + 40 * i32::try_from(n % 3).unwrap())))
        .collect();
    let report = layout::run(&mut windows, &PARAMS, LayoutMode::Switch, LayoutStrategy::Cosmos, &SingleDesktop);

    assert_no_overlap(&windows, 0);
    assert!(report.size.width > 0 && report.size.height > 0);
}

#[test]
fn test_grid_separates_stacked_windows() {
    let mut windows: Vec<Window> = (1..=4).map(|n| Window::new(n, Rect::new(300, 200, 800, 600))).collect();
    let report = layout::run(&mut windows, &PARAMS, LayoutMode::Expose, LayoutStrategy::Boxy, &SingleDesktop);

    assert_no_overlap(&windows, PARAMS.distance);
    assert_at_origin(&windows, report.size);
}

#[test]
fn test_physics_is_reproducible() {
    let make = || -> Vec<Window> {
        vec![
            Window::new(10, Rect::new(100, 100, 900, 700)),
            Window::new(11, Rect::new(120, 110, 900, 700)),
            Window::new(12, Rect::new(800, 400, 600, 500)),
            Window::new(13, Rect::new(1200, 50, 500, 400)),
            Window::new(14, Rect::new(1200, 50, 500, 400)),
        ]
    };

    let mut first = make();
    let mut second = make();
    let a = layout::run(&mut first, &PARAMS, LayoutMode::Expose, LayoutStrategy::Cosmos, &SingleDesktop);
    let b = layout::run(&mut second, &PARAMS, LayoutMode::Expose, LayoutStrategy::Cosmos, &SingleDesktop);

    assert_eq!(a, b);
    assert_eq!(first, second);
    assert_at_origin(&first, a.size);
}

#[test]
fn test_other_desktops_are_laid_out_beside_current() {
    let mut windows = vec![
        Window::new(1, Rect::new(0, 0, 600, 400)).on_desktop(0),
        Window::new(2, Rect::new(0, 0, 600, 400)).on_desktop(1),
    ];
    let report = layout::run(
        &mut windows,
        &PARAMS,
        LayoutMode::Expose,
        LayoutStrategy::Boxy,
        &StaticDesktops::new(2, 0),
    );

    assert!(windows[1].position.x > windows[0].position.x);
    assert_eq!(windows[0].position.y, windows[1].position.y);
    assert_at_origin(&windows, report.size);
}

#[test]
fn test_scene_from_json_end_to_end() {
    let json = r#"{
        "screen": { "x": 0, "y": 0, "width": 1920, "height": 1080 },
        "desktopCount": 2,
        "panels": [{ "x": 0, "y": 1040, "width": 1920, "height": 40 }],
        "windows": [
            { "id": 1, "origin": { "x": 0, "y": 0, "width": 1200, "height": 900 } },
            { "id": 2, "origin": { "x": 400, "y": 100, "width": 1200, "height": 900 } },
            { "id": 3, "origin": { "x": 900, "y": 500, "width": 640, "height": 480 }, "desktop": 1 },
            { "id": 4, "origin": { "x": 0, "y": 0, "width": 200, "height": 40 }, "mode": "placeholder" }
        ]
    }"#;
    let scene: Scene = serde_json::from_str(json).unwrap();

    for mode in [LayoutMode::Expose, LayoutMode::Switch, LayoutMode::Paging] {
        let arrangement = scene.arrange(&ExposeConfig::default(), mode);
        let ids: Vec<WindowId> = arrangement.placements.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![WindowId(1), WindowId(2), WindowId(3)], "{mode}");

        for placement in &arrangement.placements {
            let frame = placement.frame;
            assert!(frame.x >= 0 && frame.right() <= 1920, "{mode}: {frame:?}");
            assert!(frame.y >= 0 && frame.bottom() <= 1040, "{mode}: {frame:?}");
        }
    }
}
