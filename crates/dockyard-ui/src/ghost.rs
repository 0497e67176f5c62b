//! Visual state of the item being dragged.

use dockyard_core::math::exp_approach;

use crate::item::ItemId;

/// Opacity fade for the dragged ghost.
///
/// The ghost fades from fully opaque to `ghost_opacity` while the drag is
/// live, and back to opaque once the item is released.
#[derive(Debug, Clone, PartialEq)]
pub struct GhostVisual {
    /// Item the ghost stands for.
    pub item_id: ItemId,
    /// Current opacity.
    pub opacity: f32,
    ghost_opacity: f32,
    fade_speed: f32,
    released: bool,
}

impl GhostVisual {
    /// Create a ghost for `item_id` at full opacity.
    pub fn new(item_id: ItemId, ghost_opacity: f32, fade_speed: f32) -> Self {
        Self {
            item_id,
            opacity: 1.0,
            ghost_opacity: ghost_opacity.clamp(0.0, 1.0),
            fade_speed: fade_speed.max(0.0),
            released: false,
        }
    }

    /// Start fading back to opaque.
    pub fn release(&mut self) {
        self.released = true;
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    fn target_opacity(&self) -> f32 {
        if self.released { 1.0 } else { self.ghost_opacity }
    }

    /// Update the fade.
    pub fn update(&mut self, dt: f32) {
        self.opacity = exp_approach(self.opacity, self.target_opacity(), self.fade_speed, dt);
    }

    /// Released and back to (nearly) full opacity.
    pub fn is_done(&self) -> bool {
        self.released && (1.0 - self.opacity) < 0.01
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ghost_fades_to_ghost_opacity() {
        let mut ghost = GhostVisual::new("a".into(), 0.7, 8.0);
        for _ in 0..60 {
            ghost.update(1.0 / 60.0);
        }
        assert!((ghost.opacity - 0.7).abs() < 0.01);
        assert!(!ghost.is_done());
    }

    #[test]
    fn test_released_ghost_returns_to_opaque() {
        let mut ghost = GhostVisual::new("a".into(), 0.5, 8.0);
        ghost.opacity = 0.5;
        ghost.release();
        for _ in 0..60 {
            ghost.update(1.0 / 60.0);
        }
        assert!(ghost.is_done());
    }
}
