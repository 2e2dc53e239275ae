use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub drag_scroll: DragScrollConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Pointer button that starts a drag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    #[default]
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// Platform `buttons` bitmask value for this button
    pub fn mask(self) -> u16 {
        match self {
            MouseButton::Left => 1,
            MouseButton::Right => 2,
            MouseButton::Middle => 4,
        }
    }
}

impl std::str::FromStr for MouseButton {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(MouseButton::Left),
            "middle" => Ok(MouseButton::Middle),
            "right" => Ok(MouseButton::Right),
            other => Err(crate::Error::Config(format!("unknown mouse button: {other}"))),
        }
    }
}

/// Easing curve used for the rubber-band snap-back transition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump at the end of the transition
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

impl std::str::FromStr for EasingType {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "none" => Ok(EasingType::None),
            "linear" => Ok(EasingType::Linear),
            "cubic" => Ok(EasingType::Cubic),
            "quintic" => Ok(EasingType::Quintic),
            "ease_out" => Ok(EasingType::EaseOut),
            other => Err(crate::Error::Config(format!("unknown easing: {other}"))),
        }
    }
}

/// Drag-to-scroll behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragScrollConfig {
    /// Momentum multiplier applied every tick, in (0, 1). Closer to 1 glides longer.
    #[serde(default = "default_decay_rate")]
    pub decay_rate: f64,
    /// Pointer travel (px) a release must exceed to count as a drag rather than a click
    #[serde(default = "default_safe_displacement")]
    pub safe_displacement: f64,
    /// Show elastic resistance on children when dragging past an edge
    #[serde(default)]
    pub apply_rubber_band_effect: bool,
    /// Button that starts a drag
    #[serde(default)]
    pub active_mouse_button: MouseButton,
    /// Whether window event subscriptions are active at all
    #[serde(default = "default_true")]
    pub is_mounted: bool,
    /// Momentum stops once |speed| drops below this (px per tick)
    #[serde(default = "default_min_momentum_speed")]
    pub min_momentum_speed: f64,
    /// Tick rate for scroll application and momentum decay
    #[serde(default = "default_tick_fps")]
    pub tick_fps: u32,
    /// Duration of the rubber-band snap-back transition
    #[serde(default = "default_snap_back_duration_ms")]
    pub snap_back_duration_ms: u64,
    /// Timing function of the snap-back transition
    #[serde(default)]
    pub snap_back_easing: EasingType,
    /// Cursor shown on the container and its children while dragging
    #[serde(default = "default_grab_cursor")]
    pub grab_cursor: String,
}

impl Default for DragScrollConfig {
    fn default() -> Self {
        Self {
            decay_rate: default_decay_rate(),
            safe_displacement: default_safe_displacement(),
            apply_rubber_band_effect: false,
            active_mouse_button: MouseButton::default(),
            is_mounted: default_true(),
            min_momentum_speed: default_min_momentum_speed(),
            tick_fps: default_tick_fps(),
            snap_back_duration_ms: default_snap_back_duration_ms(),
            snap_back_easing: EasingType::default(),
            grab_cursor: default_grab_cursor(),
        }
    }
}

impl DragScrollConfig {
    /// Reject values the momentum loop cannot terminate with
    pub fn validate(&self) -> crate::Result<()> {
        if !(self.decay_rate > 0.0 && self.decay_rate < 1.0) {
            return Err(crate::Error::Config(format!(
                "decay_rate must be in (0, 1), got {}",
                self.decay_rate
            )));
        }
        if !self.safe_displacement.is_finite() || self.safe_displacement < 0.0 {
            return Err(crate::Error::Config(format!(
                "safe_displacement must be a non-negative number, got {}",
                self.safe_displacement
            )));
        }
        if !(self.min_momentum_speed.is_finite() && self.min_momentum_speed > 0.0) {
            return Err(crate::Error::Config(format!(
                "min_momentum_speed must be positive, got {}",
                self.min_momentum_speed
            )));
        }
        Ok(())
    }
}

/// Virtual container used by `dragscroll simulate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f64,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
    #[serde(default = "default_content_width")]
    pub content_width: f64,
    #[serde(default = "default_content_height")]
    pub content_height: f64,
    /// Number of child elements inside the container
    #[serde(default = "default_children")]
    pub children: usize,
    /// How long to keep running after the last trace event (lets momentum settle)
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            content_width: default_content_width(),
            content_height: default_content_height(),
            children: default_children(),
            settle_ms: default_settle_ms(),
        }
    }
}

fn default_decay_rate() -> f64 {
    0.95
}

fn default_safe_displacement() -> f64 {
    10.0
}

fn default_true() -> bool {
    true
}

fn default_min_momentum_speed() -> f64 {
    0.05
}

fn default_tick_fps() -> u32 {
    60
}

fn default_snap_back_duration_ms() -> u64 {
    250
}

fn default_grab_cursor() -> String {
    "grabbing".to_string()
}

fn default_viewport_width() -> f64 {
    800.0
}

fn default_viewport_height() -> f64 {
    600.0
}

fn default_content_width() -> f64 {
    2400.0
}

fn default_content_height() -> f64 {
    600.0
}

fn default_children() -> usize {
    12
}

fn default_settle_ms() -> u64 {
    4000
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from a specific file
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        tracing::debug!(path = %path.display(), "Loading configuration");
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.drag_scroll.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Render as pretty TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the configuration file path
    /// Always uses ~/.config/dragscroll/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("dragscroll")
            .join("config.toml")
    }
}
