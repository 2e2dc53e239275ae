//! L4 Atomic Layer: Per-tick velocity arithmetic
//!
//! Velocities are signed pixels per tick period: a pointer delta `d` sampled
//! once per tick gives `d / tick_period`, and applying that speed for one tick
//! moves the content by `speed * tick_period`, i.e. by `d` again.

/// Velocity for a pointer delta observed over one tick
#[inline]
pub fn speed_from_delta(delta: f64, tick_period: f64) -> f64 {
    delta / tick_period
}

/// Scroll distance covered in one tick at `speed`
#[inline]
pub fn distance_per_tick(speed: f64, tick_period: f64) -> f64 {
    speed * tick_period
}

/// One exponential decay step
#[inline]
pub fn decay(speed: f64, rate: f64) -> f64 {
    speed * rate
}

/// Number of decay steps until `|speed|` drops below `min_speed`
///
/// Finite for any finite `speed`, `0 < rate < 1` and `min_speed > 0`.
pub fn ticks_until_rest(speed: f64, rate: f64, min_speed: f64) -> u64 {
    let speed = speed.abs();
    if speed < min_speed {
        return 0;
    }
    // smallest n with speed * rate^n < min_speed
    let n = ((min_speed / speed).ln() / rate.ln()).floor() + 1.0;
    n.max(1.0) as u64
}
