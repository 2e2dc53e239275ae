//! L3 Molecular Layer: Per-axis momentum decay
//!
//! Each axis runs its own decay loop after a confirmed release. This module
//! holds the per-tick rules; the controller owns the timers that drive them.

use super::timing::decay;

/// Why an axis stopped decaying
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Speed fell below the minimum momentum speed
    AtRest,
    /// The user pressed the trigger button again
    Reengaged,
    /// The axis reached an edge of its scroll range
    ReachedEdge,
    /// The container went away
    Detached,
}

/// Result of one momentum tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    Continue { speed: f64 },
    Stop(StopReason),
}

/// Decay parameters shared by both axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Momentum {
    pub decay_rate: f64,
    pub min_speed: f64,
}

impl Momentum {
    pub fn new(decay_rate: f64, min_speed: f64) -> Self {
        Self {
            decay_rate,
            min_speed,
        }
    }

    /// Speed after one tick
    #[inline]
    pub fn next_speed(&self, speed: f64) -> f64 {
        decay(speed, self.decay_rate)
    }

    /// Stop decision, evaluated after the tick's scroll write
    ///
    /// Threshold first, then re-engagement, then edge.
    pub fn evaluate(&self, new_speed: f64, pointer_down: bool, at_edge: bool) -> TickOutcome {
        if new_speed.abs() < self.min_speed {
            TickOutcome::Stop(StopReason::AtRest)
        } else if pointer_down {
            TickOutcome::Stop(StopReason::Reengaged)
        } else if at_edge {
            TickOutcome::Stop(StopReason::ReachedEdge)
        } else {
            TickOutcome::Continue { speed: new_speed }
        }
    }
}
