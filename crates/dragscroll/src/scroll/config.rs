//! L4 Atomic Layer: Configuration types for drag scrolling
//!
//! Re-exports configuration from dragscroll-core and provides timing helpers.

use std::time::Duration;

// Re-export config types from core
pub use dragscroll_core::{DragScrollConfig, EasingType, MouseButton};

use super::easing::EasingTypeExt;

/// Extension trait for DragScrollConfig with utility methods
pub trait DragScrollConfigExt {
    /// Tick period in seconds; velocities are expressed per this unit
    fn tick_period(&self) -> f64;

    /// Tick period as a timer interval
    fn tick_duration(&self) -> Duration;

    /// How long children take to settle back after a rubber-band stretch
    fn snap_back_duration(&self) -> Duration;

    /// CSS `transition` value written to children during snap-back
    fn snap_back_transition(&self) -> String;
}

impl DragScrollConfigExt for DragScrollConfig {
    #[inline]
    fn tick_period(&self) -> f64 {
        let fps = if self.tick_fps == 0 { 60 } else { self.tick_fps };
        1.0 / fps as f64
    }

    #[inline]
    fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(self.tick_period())
    }

    #[inline]
    fn snap_back_duration(&self) -> Duration {
        Duration::from_millis(self.snap_back_duration_ms)
    }

    fn snap_back_transition(&self) -> String {
        format!(
            "transform {}ms {}",
            self.snap_back_duration_ms,
            self.snap_back_easing.css_timing_function()
        )
    }
}
