//! L4 Atomic Layer: Rubber-band displacement curve
//!
//! Dragging past an edge shifts the children by a logarithmic fraction of the
//! pointer travel, so resistance grows as the pull gets longer and the shift
//! saturates instead of tracking the pointer.

use super::geometry::ContainerGeometry;

/// Fraction of the viewport size the curve is scaled to
const RESISTANCE: f64 = 0.3;
/// Input stretch applied before the logarithm
const STRETCH: f64 = 0.5;

/// Transform that leaves children at rest
pub const NEUTRAL_TRANSFORM: &str = "translate3d(0px, 0px, 0px)";

/// Transition used while following the pointer
pub const IMMEDIATE_TRANSITION: &str = "transform 0s";

/// Displacement for pointer travel `delta` against a viewport of `size` px
///
/// `0.3 * size * sign(delta) * log10(1 + 0.5 * |delta| / size)`
#[inline]
pub fn displacement(delta: f64, size: f64) -> f64 {
    if size <= 0.0 || delta == 0.0 {
        return 0.0;
    }
    RESISTANCE * size * delta.signum() * (1.0 + STRETCH * delta.abs() / size).log10()
}

/// Per-axis displacement; an axis that cannot scroll contributes nothing
pub fn compute_rubber_band_displacement(
    dx: f64,
    dy: f64,
    container_width: f64,
    container_height: f64,
    geometry: &ContainerGeometry,
) -> (f64, f64) {
    let x = if geometry.is_scrollable_x {
        displacement(dx, container_width)
    } else {
        0.0
    };
    let y = if geometry.is_scrollable_y {
        displacement(dy, container_height)
    } else {
        0.0
    };
    (x, y)
}

/// CSS transform for a displacement
pub fn translate3d(dx: f64, dy: f64) -> String {
    format!("translate3d({dx}px, {dy}px, 0px)")
}
