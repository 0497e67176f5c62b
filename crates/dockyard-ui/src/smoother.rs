//! Time-based smoothing for sparse telemetry samples.
//!
//! Samples arrive whenever the backend polls (irregularly, sometimes in
//! bursts) while frames are drawn at display rate. A [`ResourceSmoother`]
//! turns the former into a continuous value for the latter. Progress is a
//! function of wall time only, never of how often `sample` is called.

use serde::{Deserialize, Serialize};

use crate::config::SmoothingConfig;
use crate::easing::EasingFunction;

/// Valid range of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricDomain {
    pub min: f32,
    pub max: f32,
}

impl MetricDomain {
    /// Percentages: `0..=100`.
    pub const PERCENT: MetricDomain = MetricDomain {
        min: 0.0,
        max: 100.0,
    };

    /// The domain with inverted bounds swapped, or `None` if a bound is not
    /// finite.
    pub fn normalized(self) -> Option<MetricDomain> {
        if !(self.min.is_finite() && self.max.is_finite()) {
            return None;
        }
        Some(MetricDomain {
            min: self.min.min(self.max),
            max: self.min.max(self.max),
        })
    }

    /// Clamp `value` into the domain. Never panics, even on a malformed domain.
    pub fn clamp(&self, value: f32) -> f32 {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        value.max(lo).min(hi)
    }
}

impl Default for MetricDomain {
    fn default() -> Self {
        Self::PERCENT
    }
}

/// Interpolates one metric stream toward its latest sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSmoother {
    /// Value returned by the last [`sample`](Self::sample).
    pub display_value: f32,
    /// Latest observed value.
    pub target_value: f32,
    /// Value the current transition started from.
    pub start_value: f32,
    /// When the current transition started, in milliseconds.
    pub transition_start_ms: f64,
    /// Length of each transition, in milliseconds.
    pub duration_ms: f64,
    easing: EasingFunction,
    domain: MetricDomain,
    last_sample_ms: f64,
}

impl ResourceSmoother {
    /// A percentage smoother resting at zero.
    pub fn new(duration_ms: f64, easing: EasingFunction) -> Self {
        Self {
            display_value: 0.0,
            target_value: 0.0,
            start_value: 0.0,
            transition_start_ms: 0.0,
            duration_ms: if duration_ms.is_finite() { duration_ms.max(0.0) } else { 0.0 },
            easing,
            domain: MetricDomain::PERCENT,
            last_sample_ms: f64::NEG_INFINITY,
        }
    }

    /// A smoother using the configured duration and easing.
    pub fn from_config(config: &SmoothingConfig) -> Self {
        Self::new(config.duration_ms, config.easing)
    }

    /// Start at rest on `value` instead of zero.
    pub fn with_initial(mut self, value: f32) -> Self {
        let value = self.domain.clamp(if value.is_finite() { value } else { 0.0 });
        self.display_value = value;
        self.target_value = value;
        self.start_value = value;
        self
    }

    /// Use a domain other than percentages.
    ///
    /// Inverted bounds are swapped; a domain with a non-finite bound is
    /// ignored.
    pub fn with_domain(mut self, domain: MetricDomain) -> Self {
        let Some(domain) = domain.normalized() else {
            tracing::debug!("Ignoring metric domain with non-finite bounds: {:?}", domain);
            return self;
        };
        self.domain = domain;
        self.display_value = domain.clamp(self.display_value);
        self.target_value = domain.clamp(self.target_value);
        self.start_value = domain.clamp(self.start_value);
        self
    }

    pub fn domain(&self) -> MetricDomain {
        self.domain
    }

    pub fn easing(&self) -> EasingFunction {
        self.easing
    }

    /// Record a new target at `now_ms`.
    ///
    /// The value on screen at `now_ms` becomes the new start, so a sample
    /// arriving mid-transition never makes the display jump. A timestamp
    /// older than the running transition or the last frame sampled is moved
    /// up to the later of the two. Non-finite samples are dropped.
    pub fn observe(&mut self, target: f32, now_ms: f64) {
        if !target.is_finite() || !now_ms.is_finite() {
            tracing::trace!("Dropping non-finite sample {} at {}", target, now_ms);
            return;
        }
        let now_ms = now_ms.max(self.transition_start_ms).max(self.last_sample_ms);
        let current = self.value_at(now_ms);
        self.start_value = current;
        self.display_value = current;
        self.target_value = self.domain.clamp(target);
        self.transition_start_ms = now_ms;
    }

    /// Transition progress at `now_ms`, in `0..=1`.
    pub fn progress(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.transition_start_ms) / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    /// Interpolated value at `now_ms` without updating `display_value`.
    pub fn value_at(&self, now_ms: f64) -> f32 {
        let p = self.progress(now_ms);
        let value = if p >= 1.0 {
            self.target_value
        } else {
            self.start_value + (self.target_value - self.start_value) * self.easing.apply(p)
        };
        self.domain.clamp(value)
    }

    /// Interpolated value at `now_ms`; also stored in `display_value`.
    pub fn sample(&mut self, now_ms: f64) -> f32 {
        if now_ms.is_finite() {
            self.last_sample_ms = self.last_sample_ms.max(now_ms);
        }
        self.display_value = self.value_at(now_ms);
        self.display_value
    }

    /// Whether the current transition has finished at `now_ms`.
    pub fn is_settled(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }
}

impl Default for ResourceSmoother {
    fn default() -> Self {
        Self::from_config(&SmoothingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear() -> ResourceSmoother {
        ResourceSmoother::new(500.0, EasingFunction::Linear)
    }

    #[test]
    fn test_starts_at_start_and_ends_at_target() {
        let mut smoother = linear().with_initial(20.0);
        smoother.observe(70.0, 1_000.0);
        assert_eq!(smoother.sample(1_000.0), 20.0);
        assert!((smoother.sample(1_250.0) - 45.0).abs() < 1e-4);
        assert_eq!(smoother.sample(1_500.0), 70.0);
        assert_eq!(smoother.sample(9_000.0), 70.0);
        assert!(smoother.is_settled(1_500.0));
    }

    #[test]
    fn test_interrupted_transition_does_not_jump() {
        let mut smoother = linear();
        smoother.observe(60.0, 0.0);
        let in_flight = smoother.value_at(100.0);
        smoother.observe(80.0, 100.0);

        // Continuity: the new transition starts from the value on screen,
        // so the display neither snaps to 60 nor jumps toward 80.
        let after = smoother.sample(100.0);
        assert_eq!(after, in_flight);
        assert!(after != 60.0 && after != 80.0);
        assert!(after > 0.0 && after < 80.0);
        assert_eq!(smoother.sample(600.0), 80.0);
    }

    #[test]
    fn test_rapid_samples_stay_continuous() {
        let mut smoother = ResourceSmoother::new(400.0, EasingFunction::SmoothStep);
        let mut last = smoother.sample(0.0);
        let mut t = 0.0;
        for i in 0..200 {
            if i % 3 == 0 {
                smoother.observe(if i % 2 == 0 { 90.0 } else { 10.0 }, t);
            }
            let value = smoother.sample(t);
            assert!((value - last).abs() < 5.0, "jump from {} to {} at {}", last, value, t);
            last = value;
            t += 4.0;
        }
    }

    #[test]
    fn test_out_of_domain_samples_are_clamped() {
        let mut smoother = linear();
        smoother.observe(-30.0, 0.0);
        assert_eq!(smoother.target_value, 0.0);
        smoother.observe(250.0, 0.0);
        assert_eq!(smoother.sample(10_000.0), 100.0);
    }

    #[test]
    fn test_non_finite_samples_are_ignored() {
        let mut smoother = linear().with_initial(40.0);
        smoother.observe(f32::NAN, 0.0);
        smoother.observe(f32::INFINITY, 0.0);
        assert_eq!(smoother.target_value, 40.0);
        assert_eq!(smoother.sample(1_000.0), 40.0);
    }

    #[test]
    fn test_zero_duration_snaps() {
        let mut smoother = ResourceSmoother::new(0.0, EasingFunction::Linear);
        smoother.observe(33.0, 5.0);
        assert_eq!(smoother.sample(5.0), 33.0);
    }

    #[test]
    fn test_inverted_domain_is_swapped() {
        let mut smoother = linear().with_domain(MetricDomain {
            min: 100.0,
            max: 0.0,
        });
        assert_eq!(smoother.domain(), MetricDomain::PERCENT);
        smoother.observe(150.0, 0.0);
        assert_eq!(smoother.sample(500.0), 100.0);
    }

    #[test]
    fn test_non_finite_domain_is_ignored() {
        let mut smoother = linear().with_domain(MetricDomain {
            min: f32::NAN,
            max: 10.0,
        });
        assert_eq!(smoother.domain(), MetricDomain::PERCENT);
        smoother.observe(50.0, 0.0);
        assert_eq!(smoother.sample(500.0), 50.0);
    }

    #[test]
    fn test_malformed_domain_clamp_does_not_panic() {
        let inverted = MetricDomain {
            min: 1.0,
            max: -1.0,
        };
        assert_eq!(inverted.clamp(5.0), 1.0);
        assert_eq!(inverted.clamp(-5.0), -1.0);

        let nan = MetricDomain {
            min: f32::NAN,
            max: f32::NAN,
        };
        assert_eq!(nan.clamp(3.0), 3.0);
    }

    #[test]
    fn test_out_of_order_sample_does_not_jump() {
        let mut smoother = linear();
        smoother.observe(60.0, 1_000.0);
        let shown = smoother.sample(1_250.0);
        assert_eq!(shown, 30.0);

        smoother.observe(80.0, 900.0);
        assert_eq!(smoother.sample(1_250.0), shown);
        assert!(smoother.sample(1_500.0) > shown);
        assert_eq!(smoother.sample(1_750.0), 80.0);
    }

    #[test]
    fn test_custom_domain_clamps() {
        let mut smoother = linear().with_domain(MetricDomain { min: 0.0, max: 1.0 });
        smoother.observe(4.0, 0.0);
        assert_eq!(smoother.sample(500.0), 1.0);
    }
}
