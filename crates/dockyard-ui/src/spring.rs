//! Spring settling for dock items.
//!
//! Every mounted item owns a [`SettlingState`] that chases its resting slot
//! with a damped spring. The vertical axis carries slot settling; the
//! horizontal axis is only used for [`Shake`] feedback and rests at zero.

use dockyard_core::alloc::HashMap;
use dockyard_core::math::{Vec2, finite_or};
use dockyard_core::profiling::profile_function;

use crate::config::{ShakeConfig, SpringConfig};
use crate::item::ItemId;

/// Largest integration step in seconds.
const MAX_SUBSTEP: f32 = 1.0 / 120.0;

/// Longest frame the settler will simulate; longer hitches are truncated.
const MAX_FRAME_DT: f32 = 0.25;

/// Decaying horizontal wiggle used to reject an action.
#[derive(Debug, Clone, PartialEq)]
pub struct Shake {
    elapsed: f32,
    duration: f32,
    amplitude: f32,
    half_cycles: u32,
}

impl Shake {
    /// Create a shake from configuration.
    pub fn new(config: &ShakeConfig) -> Self {
        Self {
            elapsed: 0.0,
            duration: config.duration.max(0.0),
            amplitude: config.amplitude.max(0.0),
            half_cycles: config.half_cycles.max(1),
        }
    }

    /// Advance the shake clock.
    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Current horizontal target: alternating sign, amplitude decaying
    /// linearly to zero over the duration.
    pub fn offset(&self) -> f32 {
        if self.is_done() {
            return 0.0;
        }
        let progress = self.elapsed / self.duration;
        let half_cycle = (progress * self.half_cycles as f32).floor() as u32;
        let sign = if half_cycle % 2 == 0 { 1.0 } else { -1.0 };
        sign * self.amplitude * (1.0 - progress)
    }
}

/// Position, velocity and resting target of one item.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlingState {
    /// Rendered position (`x` is the shake offset, `y` the top edge).
    pub current: Vec2,
    /// Velocity in pixels per second.
    pub velocity: Vec2,
    /// Resting position.
    pub target: Vec2,
    /// Detached states follow a position set directly (the drag ghost).
    detached: bool,
    settled: bool,
    shake: Option<Shake>,
}

impl SettlingState {
    /// A state resting at `y`.
    pub fn at_rest(y: f32) -> Self {
        let position = Vec2::new(0.0, y);
        Self {
            current: position,
            velocity: Vec2::ZERO,
            target: position,
            detached: false,
            settled: true,
            shake: None,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_some()
    }

    /// Set a new vertical resting position.
    pub fn set_target_y(&mut self, y: f32) {
        let y = finite_or(y, self.target.y);
        if y != self.target.y {
            self.target.y = y;
            self.settled = false;
        }
    }

    fn start_shake(&mut self, shake: Shake) {
        self.shake = Some(shake);
        self.settled = false;
    }

    /// Advance one frame of `dt` seconds.
    pub fn step(&mut self, spring: &SpringConfig, dt: f32) {
        if self.detached || self.settled {
            return;
        }

        if let Some(shake) = &mut self.shake {
            shake.update(dt);
            if shake.is_done() {
                self.shake = None;
                self.target.x = 0.0;
            } else {
                self.target.x = shake.offset();
            }
        }

        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(MAX_SUBSTEP);
            self.integrate(spring, h);
            remaining -= h;
        }

        let eps = spring.epsilon;
        if self.shake.is_none()
            && (self.target - self.current).abs().max_element() < eps
            && self.velocity.abs().max_element() < eps
        {
            self.current = self.target;
            self.velocity = Vec2::ZERO;
            self.settled = true;
        }
    }

    /// One semi-implicit Euler step.
    fn integrate(&mut self, spring: &SpringConfig, h: f32) {
        let acceleration =
            spring.stiffness * (self.target - self.current) - spring.damping * self.velocity;
        self.velocity += acceleration * h;
        self.current += self.velocity * h;
    }
}

/// Owns the settling state of every mounted item.
#[derive(Debug, Clone, Default)]
pub struct SpringSettler {
    spring: SpringConfig,
    shake: ShakeConfig,
    states: HashMap<ItemId, SettlingState>,
}

impl SpringSettler {
    /// Create an empty settler.
    pub fn new(spring: SpringConfig, shake: ShakeConfig) -> Self {
        Self {
            spring,
            shake,
            states: HashMap::new(),
        }
    }

    /// Mount an item resting at `y`. Replaces any previous state for `id`.
    pub fn mount(&mut self, id: ItemId, y: f32) {
        self.states.insert(id, SettlingState::at_rest(finite_or(y, 0.0)));
    }

    /// Forget an item.
    pub fn unmount(&mut self, id: &ItemId) -> Option<SettlingState> {
        self.states.remove(id)
    }

    /// Keep only the items for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&ItemId) -> bool) {
        self.states.retain(|id, _| keep(id));
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    pub fn get(&self, id: &ItemId) -> Option<&SettlingState> {
        self.states.get(id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Retarget an item. Returns false for unknown ids.
    pub fn set_target_y(&mut self, id: &ItemId, y: f32) -> bool {
        match self.states.get_mut(id) {
            Some(state) => {
                state.set_target_y(y);
                true
            }
            None => false,
        }
    }

    /// Detach an item from spring control and pin it to `y` (ghost mode).
    pub fn detach(&mut self, id: &ItemId, y: f32) {
        if let Some(state) = self.states.get_mut(id) {
            state.detached = true;
            state.shake = None;
            state.current = Vec2::new(0.0, finite_or(y, state.current.y));
            state.velocity = Vec2::ZERO;
        }
    }

    /// Move a detached item.
    pub fn move_detached(&mut self, id: &ItemId, y: f32) {
        if let Some(state) = self.states.get_mut(id)
            && state.detached
        {
            state.current.y = finite_or(y, state.current.y);
        }
    }

    /// Hand a detached item back to the spring, resting at `target_y`.
    pub fn attach(&mut self, id: &ItemId, target_y: f32) {
        if let Some(state) = self.states.get_mut(id) {
            state.detached = false;
            state.settled = false;
            state.set_target_y(target_y);
        }
    }

    /// Shake an item. No-op when shaking is disabled.
    pub fn shake(&mut self, id: &ItemId) {
        if !self.shake.enabled {
            return;
        }
        if let Some(state) = self.states.get_mut(id) {
            tracing::trace!("Shaking {}", id);
            state.start_shake(Shake::new(&self.shake));
        }
    }

    /// Advance every state by `dt` seconds.
    ///
    /// Returns `true` while any attached item is still moving.
    pub fn tick(&mut self, dt: f32) -> bool {
        profile_function!();
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        let mut any_active = false;
        for state in self.states.values_mut() {
            state.step(&self.spring, dt);
            any_active |= !state.detached && !state.settled;
        }
        any_active
    }

    /// Whether every attached state is at rest.
    pub fn is_settled(&self) -> bool {
        self.states.values().all(|s| s.detached || s.settled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn settler() -> SpringSettler {
        SpringSettler::new(SpringConfig::default(), ShakeConfig::default())
    }

    #[test]
    fn test_converges_without_overshoot() {
        for (from, to) in [(0.0f32, 120.0f32), (240.0, 0.0), (-50.0, 4000.0)] {
            let mut state = SettlingState::at_rest(from);
            state.set_target_y(to);
            let spring = SpringConfig::default();
            let tolerance = (to - from).abs() * 0.01 + 0.01;
            let mut steps = 0;
            while !state.is_settled() {
                state.step(&spring, DT);
                let past = if to > from {
                    state.current.y - to
                } else {
                    to - state.current.y
                };
                assert!(past <= tolerance, "overshoot {} from {} to {}", past, from, to);
                steps += 1;
                assert!(steps < 600, "did not settle from {} to {}", from, to);
            }
            assert_eq!(state.current.y, to);
        }
    }

    #[test]
    fn test_huge_dt_stays_stable() {
        let mut settler = settler();
        settler.mount("a".into(), 0.0);
        settler.set_target_y(&"a".into(), 300.0);
        settler.tick(5.0);
        let y = settler.get(&"a".into()).unwrap().current.y;
        assert!(y.is_finite());
        assert!((0.0..=303.0).contains(&y));
    }

    #[test]
    fn test_settled_state_is_frozen() {
        let mut settler = settler();
        settler.mount("a".into(), 60.0);
        assert!(!settler.tick(DT));
        assert!(settler.is_settled());
    }

    #[test]
    fn test_retarget_wakes_state() {
        let mut settler = settler();
        settler.mount("a".into(), 0.0);
        assert!(settler.set_target_y(&"a".into(), 60.0));
        assert!(settler.tick(DT));
        assert!(!settler.set_target_y(&"missing".into(), 60.0));
    }

    #[test]
    fn test_detached_state_ignores_spring() {
        let mut settler = settler();
        let id = ItemId::new("a");
        settler.mount(id.clone(), 0.0);
        settler.detach(&id, 50.0);
        settler.set_target_y(&id, 0.0);
        settler.move_detached(&id, 75.0);
        assert!(!settler.tick(DT));
        assert_eq!(settler.get(&id).unwrap().current.y, 75.0);

        settler.attach(&id, 120.0);
        for _ in 0..600 {
            settler.tick(DT);
        }
        assert_eq!(settler.get(&id).unwrap().current.y, 120.0);
    }

    #[test]
    fn test_shake_oscillates_then_returns_to_rest() {
        let mut settler = settler();
        let id = ItemId::new("a");
        settler.mount(id.clone(), 0.0);
        settler.shake(&id);
        assert!(settler.get(&id).unwrap().is_shaking());

        let mut saw_left = false;
        let mut saw_right = false;
        for _ in 0..120 {
            settler.tick(DT);
            let x = settler.get(&id).unwrap().current.x;
            saw_left |= x < -0.5;
            saw_right |= x > 0.5;
        }
        assert!(saw_left && saw_right);
        let state = settler.get(&id).unwrap();
        assert!(!state.is_shaking());
        assert!(state.is_settled());
        assert_eq!(state.current, Vec2::ZERO);
    }

    #[test]
    fn test_disabled_shake_is_silent() {
        let mut settler = SpringSettler::new(
            SpringConfig::default(),
            ShakeConfig {
                enabled: false,
                ..ShakeConfig::default()
            },
        );
        settler.mount("a".into(), 0.0);
        settler.shake(&"a".into());
        assert!(!settler.get(&"a".into()).unwrap().is_shaking());
        assert!(!settler.tick(DT));
    }

    #[test]
    fn test_shake_offset_decays() {
        let mut shake = Shake::new(&ShakeConfig::default());
        let first = shake.offset().abs();
        shake.update(0.3);
        assert!(shake.offset().abs() < first);
        shake.update(0.2);
        assert!(shake.is_done());
        assert_eq!(shake.offset(), 0.0);
    }
}
