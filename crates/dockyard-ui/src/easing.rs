//! Easing curves for time-based transitions.

use serde::{Deserialize, Serialize};

/// Easing functions mapping normalized progress to normalized output.
///
/// Every curve maps `0.0 -> 0.0` and `1.0 -> 1.0`, so a transition always
/// starts at its start value and ends exactly on its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation
    Linear,
    /// Hermite smoothstep (`3t² - 2t³`)
    #[default]
    SmoothStep,
    /// Ease in (slow start)
    EaseIn,
    /// Ease out (slow end)
    EaseOut,
    /// Ease in and out (slow start and end)
    EaseInOut,
    /// Cubic ease out
    CubicOut,
}

impl EasingFunction {
    /// Apply the easing function to a normalized time value (0.0 to 1.0).
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        match self {
            EasingFunction::Linear => t,
            EasingFunction::SmoothStep => t * t * (3.0 - 2.0 * t),
            EasingFunction::EaseIn => t * t,
            EasingFunction::EaseOut => t * (2.0 - t),
            EasingFunction::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            EasingFunction::CubicOut => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingFunction; 6] = [
        EasingFunction::Linear,
        EasingFunction::SmoothStep,
        EasingFunction::EaseIn,
        EasingFunction::EaseOut,
        EasingFunction::EaseInOut,
        EasingFunction::CubicOut,
    ];

    #[test]
    fn test_endpoints_are_fixed() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{:?}", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{:?}", easing);
        }
    }

    #[test]
    fn test_curves_are_monotonic() {
        for easing in ALL {
            let mut last = 0.0;
            for step in 0..=100 {
                let value = easing.apply(step as f32 / 100.0);
                assert!(value + 1e-6 >= last, "{:?} at step {}", easing, step);
                last = value;
            }
        }
    }

    #[test]
    fn test_out_of_range_input_is_clamped() {
        assert_eq!(EasingFunction::SmoothStep.apply(-3.0), 0.0);
        assert_eq!(EasingFunction::Linear.apply(7.0), 1.0);
        assert_eq!(EasingFunction::Linear.apply(f32::NAN), 0.0);
    }

    #[test]
    fn test_smoothstep_midpoint() {
        assert!((EasingFunction::SmoothStep.apply(0.5) - 0.5).abs() < 1e-6);
    }
}
