//! Math types and small numeric helpers shared by the dock engine.
//!
//! Vector types come from [`glam`]. Pointer coordinates arrive from a window
//! host that may be detached or mid-resize, so the helpers here are about
//! turning arbitrary floats into something the layout code can trust.
//!
//! [`glam`]: https://docs.rs/glam

pub use glam::{Vec2, vec2};

/// Replace NaN with `fallback`; infinities are kept so callers can clamp them.
#[inline]
pub fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_nan() { fallback } else { value }
}

/// Frame-rate independent exponential approach factor.
///
/// Returns the fraction of the remaining distance to cover this frame when
/// chasing a target at `speed` (per second) for `dt` seconds.
#[inline]
pub fn exp_lerp_factor(speed: f32, dt: f32) -> f32 {
    1.0 - (-speed * dt.max(0.0)).exp()
}

/// Move `current` toward `target` with [`exp_lerp_factor`].
#[inline]
pub fn exp_approach(current: f32, target: f32, speed: f32, dt: f32) -> f32 {
    current + (target - current) * exp_lerp_factor(speed, dt)
}
