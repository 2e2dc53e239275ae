//! L4 Atomic Layer: Timing functions for the snap-back transition
//!
//! Maps each easing curve to the CSS timing function that reproduces it, so the
//! host's own transition engine animates children back to rest.

// Re-export EasingType from core
pub use dragscroll_core::EasingType;

/// Extension trait for EasingType with CSS conversion
pub trait EasingTypeExt {
    /// CSS `<easing-function>` equivalent of this curve
    fn css_timing_function(&self) -> &'static str;

    /// Fraction of the snap-back completed at progress `t` in [0, 1]
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::None => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            EasingType::Linear => t,
            EasingType::Cubic => 1.0 - (1.0 - t).powi(3),
            EasingType::Quintic => 1.0 - (1.0 - t).powi(5),
            EasingType::EaseOut if t >= 1.0 => 1.0,
            EasingType::EaseOut => 1.0 - 2.0_f64.powf(-10.0 * t),
        }
    }

    #[inline]
    fn css_timing_function(&self) -> &'static str {
        match self {
            EasingType::None => "step-end",
            EasingType::Linear => "linear",
            // 1 - (1-t)^3
            EasingType::Cubic => "cubic-bezier(0.33, 1, 0.68, 1)",
            // 1 - (1-t)^5
            EasingType::Quintic => "cubic-bezier(0.22, 1, 0.36, 1)",
            // 1 - 2^(-10t)
            EasingType::EaseOut => "cubic-bezier(0.16, 1, 0.3, 1)",
        }
    }
}
