pub mod config;
pub mod error;

pub use config::{AppConfig, DragScrollConfig, EasingType, MouseButton, SimulationConfig};
pub use error::{Error, Result};
