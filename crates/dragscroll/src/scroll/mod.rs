//! Drag-scroll physics for dragscroll
//!
//! Pure math shared by the controller: velocity sampling, momentum decay,
//! edge detection and the rubber-band curve. Nothing here touches a host.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `timing` - Per-tick velocity arithmetic (sampling, decay, rest bound)
//! - `geometry` - Axes, extents, scrollability and edge checks
//! - `rubber_band` - Logarithmic displacement past an edge
//! - `easing` - CSS timing functions for the snap-back transition
//! - `config` - Configuration types (re-exported from dragscroll-core)
//!
//! ## L3 Molecular Layer
//! - `momentum` - Per-axis decay step and stop rules
//!
//! # Usage
//!
//! ```ignore
//! use dragscroll::scroll::{rubber_band, Momentum, TickOutcome};
//!
//! let momentum = Momentum::new(0.95, 0.05);
//! let speed = momentum.next_speed(600.0);
//! match momentum.evaluate(speed, false, false) {
//!     TickOutcome::Continue { .. } => { /* schedule next tick */ }
//!     TickOutcome::Stop(reason) => { /* zero the axis speed */ }
//! }
//!
//! let shift = rubber_band::displacement(120.0, 800.0);
//! ```

// L4 Atomic Layer
pub mod config;
pub mod easing;
pub mod geometry;
pub mod rubber_band;
pub mod timing;

// L3 Molecular Layer
pub mod momentum;

// Re-exports for convenient access
pub use config::{DragScrollConfig, DragScrollConfigExt, MouseButton};
pub use easing::{EasingType, EasingTypeExt};
pub use geometry::{Axis, ContainerGeometry, Extents};
pub use momentum::{Momentum, StopReason, TickOutcome};
