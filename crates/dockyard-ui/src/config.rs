//! Dock configuration.
//!
//! All values have working defaults; a host can override any subset from YAML:
//!
//! ```
//! use dockyard_ui::DockConfig;
//!
//! let config = DockConfig::from_yaml_str("slot_height: 72\nshake:\n  enabled: false\n").unwrap();
//! assert_eq!(config.slot_height, 72.0);
//! assert!(!config.shake.enabled);
//! ```

use serde::{Deserialize, Serialize};

use crate::easing::EasingFunction;
use crate::error::{DockError, DockResult};

/// Default space above the first slot in pixels.
pub const DEFAULT_TOP_PADDING: f32 = 8.0;

/// Default height of one slot (icon plus spacing) in pixels.
pub const DEFAULT_SLOT_HEIGHT: f32 = 60.0;

/// Pointer travel in pixels before a press turns into a drag.
pub const DEFAULT_DRAG_THRESHOLD: f32 = 5.0;

/// Ghost opacity while an item is being dragged.
pub const DEFAULT_GHOST_OPACITY: f32 = 0.7;

/// Ghost opacity fade speed (per second).
pub const DEFAULT_GHOST_FADE_SPEED: f32 = 8.0;

/// Relative slack allowed below critical damping.
const DAMPING_TOLERANCE: f32 = 1e-3;

/// Spring constants for slot settling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Spring stiffness (mass is 1).
    pub stiffness: f32,
    /// Velocity damping. `2 * sqrt(stiffness)` is critical damping.
    pub damping: f32,
    /// Distance and speed below which a state counts as settled.
    pub epsilon: f32,
}

impl SpringConfig {
    /// A critically damped spring with the given stiffness.
    pub fn critical(stiffness: f32) -> Self {
        Self {
            stiffness,
            damping: 2.0 * stiffness.max(0.0).sqrt(),
            ..Self::default()
        }
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 400.0,
            damping: 40.0,
            epsilon: 0.01,
        }
    }
}

/// Horizontal shake used to reject an action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShakeConfig {
    /// When false, rejected actions are silent. Shake never gates input.
    pub enabled: bool,
    /// Initial horizontal offset in pixels.
    pub amplitude: f32,
    /// Total shake time in seconds.
    pub duration: f32,
    /// Number of sign flips over the duration.
    pub half_cycles: u32,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            amplitude: 10.0,
            duration: 0.4,
            half_cycles: 6,
        }
    }
}

/// Telemetry ring smoothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Transition length for each new sample, in milliseconds.
    pub duration_ms: f64,
    /// Curve applied over the transition.
    pub easing: EasingFunction,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            duration_ms: 500.0,
            easing: EasingFunction::default(),
        }
    }
}

/// Geometry, feel and smoothing parameters for a dock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockConfig {
    /// Space above the first slot.
    pub top_padding: f32,
    /// Height of one slot including spacing.
    pub slot_height: f32,
    /// Pointer travel before a press becomes a drag.
    pub drag_threshold: f32,
    /// Opacity of the dragged ghost.
    pub ghost_opacity: f32,
    /// How fast the ghost fades in and out.
    pub ghost_fade_speed: f32,
    /// Slot settling spring.
    pub spring: SpringConfig,
    /// Rejection shake.
    pub shake: ShakeConfig,
    /// Telemetry smoothing.
    pub smoothing: SmoothingConfig,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            top_padding: DEFAULT_TOP_PADDING,
            slot_height: DEFAULT_SLOT_HEIGHT,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            ghost_opacity: DEFAULT_GHOST_OPACITY,
            ghost_fade_speed: DEFAULT_GHOST_FADE_SPEED,
            spring: SpringConfig::default(),
            shake: ShakeConfig::default(),
            smoothing: SmoothingConfig::default(),
        }
    }
}

impl DockConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) YAML document and validate it.
    pub fn from_yaml_str(yaml: &str) -> DockResult<Self> {
        let config: DockConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the top padding.
    pub fn top_padding(mut self, padding: f32) -> Self {
        self.top_padding = padding;
        self
    }

    /// Set the slot height.
    pub fn slot_height(mut self, height: f32) -> Self {
        self.slot_height = height;
        self
    }

    /// Set the drag threshold.
    pub fn drag_threshold(mut self, threshold: f32) -> Self {
        self.drag_threshold = threshold;
        self
    }

    /// Set the spring constants.
    pub fn spring(mut self, spring: SpringConfig) -> Self {
        self.spring = spring;
        self
    }

    /// Enable or disable shake feedback.
    pub fn shake_enabled(mut self, enabled: bool) -> Self {
        self.shake.enabled = enabled;
        self
    }

    /// Set the telemetry smoothing.
    pub fn smoothing(mut self, smoothing: SmoothingConfig) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> DockResult<()> {
        fn non_negative(name: &str, value: f32) -> DockResult<()> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(DockError::InvalidConfig(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )))
            }
        }

        non_negative("top_padding", self.top_padding)?;
        non_negative("slot_height", self.slot_height)?;
        non_negative("drag_threshold", self.drag_threshold)?;
        non_negative("ghost_fade_speed", self.ghost_fade_speed)?;
        non_negative("spring.damping", self.spring.damping)?;
        non_negative("shake.amplitude", self.shake.amplitude)?;
        non_negative("shake.duration", self.shake.duration)?;

        if !(0.0..=1.0).contains(&self.ghost_opacity) {
            return Err(DockError::InvalidConfig(format!(
                "ghost_opacity must be within 0..=1, got {}",
                self.ghost_opacity
            )));
        }
        if !(self.spring.stiffness.is_finite() && self.spring.stiffness > 0.0) {
            return Err(DockError::InvalidConfig(format!(
                "spring.stiffness must be positive, got {}",
                self.spring.stiffness
            )));
        }
        // Under-damped springs overshoot their slot.
        let critical = 2.0 * self.spring.stiffness.sqrt();
        if self.spring.damping < critical * (1.0 - DAMPING_TOLERANCE) {
            return Err(DockError::InvalidConfig(format!(
                "spring.damping must be at least {} (critical for stiffness {}), got {}",
                critical, self.spring.stiffness, self.spring.damping
            )));
        }
        if !(self.spring.epsilon.is_finite() && self.spring.epsilon > 0.0) {
            return Err(DockError::InvalidConfig(
                "spring.epsilon must be positive".to_string(),
            ));
        }
        if !(self.smoothing.duration_ms.is_finite() && self.smoothing.duration_ms > 0.0) {
            return Err(DockError::InvalidConfig(
                "smoothing.duration_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spring_is_critically_damped() {
        let spring = SpringConfig::default();
        assert!((spring.damping - 2.0 * spring.stiffness.sqrt()).abs() < 1e-4);
        assert_eq!(SpringConfig::critical(400.0), spring);
    }

    #[test]
    fn test_defaults_validate() {
        assert_eq!(DockConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = DockConfig::from_yaml_str(
            "top_padding: 0\nsmoothing:\n  duration_ms: 250\n  easing: linear\n",
        )
        .unwrap();
        assert_eq!(config.top_padding, 0.0);
        assert_eq!(config.slot_height, DEFAULT_SLOT_HEIGHT);
        assert_eq!(config.smoothing.duration_ms, 250.0);
        assert_eq!(config.smoothing.easing, EasingFunction::Linear);
        assert!(config.shake.enabled);
    }

    #[test]
    fn test_negative_slot_height_is_rejected() {
        let err = DockConfig::from_yaml_str("slot_height: -4").unwrap_err();
        assert!(matches!(err, DockError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_yaml_is_an_invalid_config() {
        let err = DockConfig::from_yaml_str("slot_height: [1, 2").unwrap_err();
        assert!(matches!(err, DockError::InvalidConfig(_)));
    }

    #[test]
    fn test_undamped_spring_is_rejected() {
        let config = DockConfig::new().spring(SpringConfig {
            damping: 0.0,
            ..SpringConfig::default()
        });
        assert!(matches!(config.validate(), Err(DockError::InvalidConfig(_))));

        let err = DockConfig::from_yaml_str("spring:\n  damping: 10\n").unwrap_err();
        assert!(matches!(err, DockError::InvalidConfig(_)));
    }

    #[test]
    fn test_zero_stiffness_is_rejected() {
        let config = DockConfig::new().spring(SpringConfig::critical(0.0));
        assert!(matches!(config.validate(), Err(DockError::InvalidConfig(_))));
    }

    #[test]
    fn test_critical_and_overdamped_springs_validate() {
        assert_eq!(DockConfig::new().spring(SpringConfig::critical(900.0)).validate(), Ok(()));
        let overdamped = SpringConfig {
            damping: 80.0,
            ..SpringConfig::default()
        };
        assert_eq!(DockConfig::new().spring(overdamped).validate(), Ok(()));
    }

    #[test]
    fn test_zero_smoothing_duration_is_rejected() {
        let config = DockConfig::new().smoothing(SmoothingConfig {
            duration_ms: 0.0,
            easing: EasingFunction::Linear,
        });
        assert!(config.validate().is_err());
    }
}
