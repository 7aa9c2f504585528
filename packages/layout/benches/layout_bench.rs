//! Benchmarks for the layout strategies.
//!
//! Run with: `cargo bench -p expose-layout`
//!
//! Results are saved to `target/criterion/` with HTML reports.
//!
//! ## Benchmark Groups
//!
//! - `layouts`: Every strategy at various window counts
//! - `layouts_stacked`: Windows piled on the same spot, the slow path for the
//!   iterative solvers
//! - `scene`: Full pipeline including the fit transform

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use expose_layout::layout::{self, LayoutMode, LayoutParams, LayoutStrategy};
use expose_layout::{ExposeConfig, Point, Rect, Scene, SingleDesktop, Size, Window};

// ============================================================================
// Test Data
// ============================================================================

const SCREEN: Size = Size::new(1920, 1080);

const STRATEGIES: [LayoutStrategy; 3] = [LayoutStrategy::Xd, LayoutStrategy::Boxy, LayoutStrategy::Cosmos];

/// Creates windows spread over the screen in a repeating pattern of sizes.
fn spread_windows(count: u64) -> Vec<Window> {
    (0..count)
        .map(|n| {
            let step = i32::try_from(n).unwrap_or(0);
            let width = 400 + (step % 4) * 120;
            let height = 300 + (step % 3) * 90;
            Window::new(n + 1, Rect::new((step * 173) % 1400, (step * 97) % 700, width, height))
        })
        .collect()
}

/// Creates identical windows at the same position.
fn stacked_windows(count: u64) -> Vec<Window> {
    (0..count).map(|n| Window::new(n + 1, Rect::new(200, 150, 800, 600))).collect()
}

// ============================================================================
// Layout Benchmarks
// ============================================================================

fn bench_layouts(c: &mut Criterion) {
    let mut group = c.benchmark_group("layouts");
    let params = LayoutParams::new(50, SCREEN);

    for count in [2, 4, 8, 16] {
        let windows = spread_windows(count);

        for strategy in STRATEGIES {
            group.bench_with_input(BenchmarkId::new(strategy.as_str(), count), &count, |b, _| {
                b.iter(|| {
                    let mut windows = windows.clone();
                    layout::run(
                        black_box(&mut windows),
                        black_box(&params),
                        LayoutMode::Expose,
                        strategy,
                        &SingleDesktop,
                    )
                });
            });
        }
    }

    group.finish();
}

fn bench_layouts_stacked(c: &mut Criterion) {
    let mut group = c.benchmark_group("layouts_stacked");
    group.sample_size(20);
    let params = LayoutParams::new(50, SCREEN);

    for count in [4, 12] {
        let windows = stacked_windows(count);

        for strategy in [LayoutStrategy::Boxy, LayoutStrategy::Cosmos] {
            group.bench_with_input(BenchmarkId::new(strategy.as_str(), count), &count, |b, _| {
                b.iter(|| {
                    let mut windows = windows.clone();
                    layout::run(
                        black_box(&mut windows),
                        black_box(&params),
                        LayoutMode::Expose,
                        strategy,
                        &SingleDesktop,
                    )
                });
            });
        }
    }

    group.finish();
}

fn bench_scene(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene");
    let scene = Scene::new(Rect::from_origin_size(Point::new(0, 0), SCREEN), spread_windows(8));
    let config = ExposeConfig::default();

    for mode in [LayoutMode::Expose, LayoutMode::Switch, LayoutMode::Paging] {
        group.bench_function(mode.to_string(), |b| {
            b.iter(|| black_box(&scene).arrange(black_box(&config), mode));
        });
    }

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(benches, bench_layouts, bench_layouts_stacked, bench_scene);

criterion_main!(benches);
