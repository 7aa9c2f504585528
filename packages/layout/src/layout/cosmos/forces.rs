//! Pseudo-force laws for the physics layout.
//!
//! Both laws take a separation already normalized by the bounding box and
//! scale it by 100 before measuring it. Separations shorter than 0.1 after
//! scaling produce no force, so coincident centers never blow up.

/// Factor applied to normalized separations before measuring them.
const SCALE: f64 = 100.0;

/// Separations shorter than this (after scaling) produce no force.
const MIN_DISTANCE: f64 = 0.1;

fn scaled(dx: f64, dy: f64) -> Option<(f64, f64, f64)> {
    let (dx, dy) = (dx * SCALE, dy * SCALE);
    let distance = dx.hypot(dy);
    (distance >= MIN_DISTANCE).then_some((dx, dy, distance))
}

/// Inverse-square law: the separation vector divided by its squared length.
#[must_use]
pub fn inverse_square(dx: f64, dy: f64) -> (f64, f64) {
    scaled(dx, dy).map_or((0.0, 0.0), |(dx, dy, distance)| {
        let magnitude = 1.0 / distance / distance;
        (magnitude * dx, magnitude * dy)
    })
}

/// Unit vector along the separation.
#[must_use]
pub fn inverse_linear(dx: f64, dy: f64) -> (f64, f64) {
    scaled(dx, dy).map_or((0.0, 0.0), |(dx, dy, distance)| (dx / distance, dy / distance))
}
