//! Physics layout ("cosmos").
//!
//! Windows are treated as point masses at their centers, with a mass equal
//! to their share of the bounding box area. The solver runs three phases:
//!
//! 1. **Scatter**: windows whose centers nearly coincide are nudged apart by
//!    a random offset, using a generator seeded with a constant so every run
//!    scatters the same way.
//! 2. **Expansion**: overlapping windows repel each other with an
//!    inverse-square law until nothing overlaps.
//! 3. **Collapse**: every window is attracted toward every other and moves in
//!    short sub-steps; whenever a sub-step lands on another window it is
//!    snapped flush against it, `distance` pixels away.
//!
//! Pairwise forces are accumulated in processing order, so the result is
//! reproducible bit for bit for a given input order.

mod forces;

pub use forces::{inverse_linear, inverse_square};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{LayoutParams, LayoutReport, normalize, participants};
use crate::geometry::{Point, Size};
use crate::window::Window;

/// Upper bound on passes for each phase.
pub const MAX_ITERATIONS: usize = 1000;

/// Seed for the scatter phase.
const SEED: u64 = 0;

/// Centers closer than this share of the container, in both axes, collide.
const SCATTER_THRESHOLD: f64 = 0.1;

/// Integration time step.
const TIME_STEP: f64 = 0.1;

/// Gain of the repulsive force in the expansion phase.
const REPULSION: f64 = 100.0;

/// Gain of the attractive force in the collapse phase.
const ATTRACTION: f64 = 10.0;

/// Longest collapse sub-step, in normalized speed units.
const SPEED_SEGMENT: f64 = 0.05;

/// Velocity and acceleration of one window.
#[derive(Debug, Clone, Copy, Default)]
struct Motion {
    vx: f64,
    vy: f64,
    ax: f64,
    ay: f64,
}

/// Physics layout.
///
/// # Arguments
///
/// * `windows` - Windows in processing order, with working positions seeded
///   (placeholders are skipped)
/// * `params` - Spacing and container size
///
/// # Returns
///
/// The bounding size of the arrangement and the total number of passes over
/// all three phases.
pub fn layout(windows: &mut [&mut Window], params: &LayoutParams) -> LayoutReport {
    let mut windows = participants(windows);
    if windows.is_empty() {
        return LayoutReport::default();
    }

    let mut rng = StdRng::seed_from_u64(SEED);
    let scatter_passes = scatter(&mut windows, params.container, &mut rng);
    let (size, expansion_steps) = expand(&mut windows, params);
    let (size, collapse_passes) = collapse(&mut windows, params, size);

    tracing::debug!(
        "cosmos: {} windows, scatter={scatter_passes} expansion={expansion_steps} collapse={collapse_passes}",
        windows.len()
    );

    LayoutReport {
        size,
        iterations: scatter_passes + expansion_steps + collapse_passes,
    }
}

// ============================================================================
// Phases
// ============================================================================

/// Nudges windows whose centers nearly coincide. Returns the passes taken.
#[allow(clippy::cast_possible_truncation)]
fn scatter(windows: &mut [&mut Window], container: Size, rng: &mut StdRng) -> usize {
    let width = f64::from(container.width.max(1));
    let height = f64::from(container.height.max(1));
    let spread_x = ((2.0 * SCATTER_THRESHOLD * width) as i32).max(1);
    let spread_y = ((2.0 * SCATTER_THRESHOLD * height) as i32).max(1);

    let mut passes = 0;
    let mut colliding = true;
    while colliding && passes < MAX_ITERATIONS {
        colliding = false;

        for a in 0..windows.len() {
            for b in a + 1..windows.len() {
                let (ca, cb) = (windows[a].frame().center(), windows[b].frame().center());
                let dx = f64::from(cb.x - ca.x) / width;
                let dy = f64::from(cb.y - ca.y) / height;

                if dx.abs() <= SCATTER_THRESHOLD && dy.abs() <= SCATTER_THRESHOLD {
                    colliding = true;
                    windows[a].position.x += rng.random_range(0..spread_x) - spread_x / 2;
                    windows[a].position.y += rng.random_range(0..spread_y) - spread_y / 2;
                }
            }
        }

        passes += 1;
    }

    passes
}

/// Pushes overlapping windows apart. Returns the final bounding size and the
/// number of force steps.
///
/// Acceleration is never reset during the phase, so windows that keep
/// overlapping speed up.
#[allow(clippy::cast_precision_loss)]
fn expand(windows: &mut [&mut Window], params: &LayoutParams) -> (Size, usize) {
    let aspect = params.container.aspect();
    let mut motion = vec![Motion::default(); windows.len()];
    let mut steps = 0;

    loop {
        let size = normalize(windows);
        if steps >= MAX_ITERATIONS {
            return (size, steps);
        }
        let mut colliding = false;

        let (total_w, total_h) = extent(size);
        for a in 0..windows.len() {
            for b in 0..windows.len() {
                if a == b || !windows[a].frame().overlaps_with_spacing(&windows[b].frame(), params.distance) {
                    continue;
                }
                colliding = true;

                let mass = windows[b].frame().area() as f64 / total_w / total_h;
                let (dx, dy) = separation(&windows[a], &windows[b], total_w, total_h);
                let (fx, fy) = inverse_square(dx, dy);
                motion[a].ax -= REPULSION * fx * mass;
                motion[a].ay -= REPULSION * fy * mass / aspect * 2.0;
            }
        }

        // Accumulated acceleration would keep moving a settled layout.
        if !colliding {
            return (size, steps);
        }

        for (window, motion) in windows.iter_mut().zip(motion.iter_mut()) {
            motion.vx += motion.ax * TIME_STEP;
            motion.vy += motion.ay * TIME_STEP;
            window.position.x = advance(window.position.x, motion.vx * total_w * TIME_STEP);
            window.position.y = advance(window.position.y, motion.vy * total_h * TIME_STEP);
            motion.vx = 0.0;
            motion.vy = 0.0;
        }

        steps += 1;
    }
}

/// Pulls windows together without letting them overlap. Returns the final
/// bounding size and the number of passes.
#[allow(clippy::cast_precision_loss)]
fn collapse(windows: &mut [&mut Window], params: &LayoutParams, mut size: Size) -> (Size, usize) {
    let distance = params.distance;
    let mut motion = vec![Motion::default(); windows.len()];
    let mut passes = 0;
    let mut stable = false;

    while !stable && passes < MAX_ITERATIONS {
        let (total_w, total_h) = extent(size);

        for a in 0..windows.len() {
            for b in 0..windows.len() {
                if a == b {
                    continue;
                }
                let mass = windows[b].frame().area() as f64 / total_w / total_h;
                let (dx, dy) = separation(&windows[a], &windows[b], total_w, total_h);
                let (fx, fy) = inverse_linear(dx, dy);
                motion[a].ax += ATTRACTION * fx * mass;
                motion[a].ay += ATTRACTION * fy * mass;
            }
        }

        let previous: Vec<Point> = windows.iter().map(|w| w.position).collect();

        for a in 0..windows.len() {
            motion[a].vx += motion[a].ax * TIME_STEP;
            motion[a].vy += motion[a].ay * TIME_STEP;

            let mut speed = motion[a].vx.hypot(motion[a].vy);
            while speed > 0.0 {
                let (mut vx, mut vy) = (motion[a].vx, motion[a].vy);
                if speed > SPEED_SEGMENT {
                    vx = vx * SPEED_SEGMENT / speed;
                    vy = vy * SPEED_SEGMENT / speed;
                }

                windows[a].position.x = advance(windows[a].position.x, vx * total_w * TIME_STEP);
                windows[a].position.y = advance(windows[a].position.y, vy * total_h * TIME_STEP);

                for b in 0..windows.len() {
                    if a != b {
                        snap(windows, a, b, (vx, vy), distance);
                    }
                }

                speed = (speed - SPEED_SEGMENT).max(0.0);
            }
        }

        size = normalize(windows);
        motion.fill(Motion::default());

        stable = windows.iter().zip(&previous).all(|(w, old)| w.position == *old);
        passes += 1;
    }

    (size, passes)
}

// ============================================================================
// Helpers
// ============================================================================

/// Bounding box dimensions as divisors, never zero.
fn extent(size: Size) -> (f64, f64) { (f64::from(size.width.max(1)), f64::from(size.height.max(1))) }

/// Center-to-center vector from `a` to `b`, normalized by the bounding box.
fn separation(a: &Window, b: &Window, total_w: f64, total_h: f64) -> (f64, f64) {
    let (ca, cb) = (a.frame().center(), b.frame().center());
    (f64::from(cb.x - ca.x) / total_w, f64::from(cb.y - ca.y) / total_h)
}

/// Moves a coordinate by a fractional delta, truncating toward zero.
#[allow(clippy::cast_possible_truncation)]
fn advance(position: i32, delta: f64) -> i32 { (f64::from(position) + delta) as i32 }

/// If window `a` overlaps window `b`, places it flush against `b` along the
/// axis with the smaller overlap, on the side it came from.
fn snap(windows: &mut [&mut Window], a: usize, b: usize, (vx, vy): (f64, f64), distance: i32) {
    let (fa, fb) = (windows[a].frame(), windows[b].frame());
    if !fa.overlaps_with_spacing(&fb, distance) {
        return;
    }

    let overlap_x = (fa.right() - fb.x).min(fb.right() - fa.x);
    let overlap_y = (fa.bottom() - fb.y).min(fb.bottom() - fa.y);

    let position = &mut windows[a].position;
    if overlap_y < overlap_x {
        position.y = if vy > 0.0 { fb.y - fa.height - distance } else { fb.bottom() + distance };
    } else {
        position.x = if vx > 0.0 { fb.x - fa.width - distance } else { fb.right() + distance };
    }
}
