//! Single pointer-drag tracking.

use dockyard_core::math::Vec2;

use crate::config::DEFAULT_DRAG_THRESHOLD;
use crate::error::{DockError, DockResult};
use crate::item::ItemId;

/// State of one in-flight drag.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDrag {
    /// Item being dragged.
    pub item_id: ItemId,
    /// Pointer position at press.
    pub pointer_start: Vec2,
    /// Item's rendered top edge at press.
    pub item_start_y: f32,
    /// Latest pointer position.
    pub current_pointer: Vec2,
    /// Whether the pointer has travelled past the drag threshold.
    pub past_threshold: bool,
}

impl ActiveDrag {
    /// Pointer travel since the press.
    pub fn delta(&self) -> Vec2 {
        self.current_pointer - self.pointer_start
    }

    /// Top edge of the ghost: the item's start position moved by the pointer's
    /// vertical travel.
    pub fn ghost_y(&self) -> f32 {
        self.item_start_y + (self.current_pointer.y - self.pointer_start.y)
    }
}

/// Tracks at most one drag at a time.
#[derive(Debug, Clone)]
pub struct DragSession {
    active: Option<ActiveDrag>,
    threshold: f32,
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD)
    }
}

impl DragSession {
    /// Create an idle session tracker with the given drag threshold.
    pub fn new(threshold: f32) -> Self {
        Self {
            active: None,
            threshold: threshold.max(0.0),
        }
    }

    /// Start dragging `item_id`.
    ///
    /// Fails without touching the current drag if one is already active.
    pub fn begin(&mut self, item_id: ItemId, pointer: Vec2, item_y: f32) -> DockResult<()> {
        if let Some(active) = &self.active {
            return Err(DockError::DragAlreadyActive {
                active: active.item_id.clone(),
            });
        }
        self.active = Some(ActiveDrag {
            item_id,
            pointer_start: pointer,
            item_start_y: item_y,
            current_pointer: pointer,
            past_threshold: self.threshold <= 0.0,
        });
        Ok(())
    }

    /// Move the pointer. Returns the new ghost top edge.
    ///
    /// A non-finite position leaves the last finite one in place.
    pub fn update(&mut self, pointer: Vec2) -> DockResult<f32> {
        let threshold = self.threshold;
        let active = self.active.as_mut().ok_or(DockError::NoActiveDrag)?;
        if pointer.is_finite() {
            active.current_pointer = pointer;
        } else {
            tracing::trace!("Ignoring non-finite pointer position {:?}", pointer);
        }
        if !active.past_threshold && active.delta().length() >= threshold {
            active.past_threshold = true;
        }
        Ok(active.ghost_y())
    }

    /// Finish the drag, returning its final state.
    pub fn end(&mut self) -> DockResult<ActiveDrag> {
        self.active.take().ok_or(DockError::NoActiveDrag)
    }

    /// Drop the drag without a result.
    pub fn cancel(&mut self) -> Option<ActiveDrag> {
        self.active.take()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The current drag, if any.
    pub fn active(&self) -> Option<&ActiveDrag> {
        self.active.as_ref()
    }

    /// Id of the item being dragged.
    pub fn dragged_item(&self) -> Option<&ItemId> {
        self.active.as_ref().map(|a| &a.item_id)
    }

    /// Ghost top edge, if dragging.
    pub fn ghost_y(&self) -> Option<f32> {
        self.active.as_ref().map(ActiveDrag::ghost_y)
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockyard_core::math::vec2;

    #[test]
    fn test_ghost_follows_pointer_travel() {
        let mut session = DragSession::new(5.0);
        session.begin("a".into(), vec2(10.0, 30.0), 0.0).unwrap();
        assert_eq!(session.update(vec2(10.0, 130.0)).unwrap(), 100.0);
        assert_eq!(session.update(vec2(10.0, 10.0)).unwrap(), -20.0);
    }

    #[test]
    fn test_non_finite_pointer_keeps_last_position() {
        let mut session = DragSession::new(5.0);
        session.begin("a".into(), vec2(10.0, 30.0), 0.0).unwrap();
        assert_eq!(session.update(vec2(10.0, 90.0)).unwrap(), 60.0);
        assert_eq!(session.update(vec2(f32::NAN, f32::NAN)).unwrap(), 60.0);
        assert_eq!(session.update(vec2(10.0, f32::INFINITY)).unwrap(), 60.0);
        assert_eq!(session.active().unwrap().current_pointer, vec2(10.0, 90.0));
    }

    #[test]
    fn test_second_begin_is_rejected() {
        let mut session = DragSession::default();
        session.begin("a".into(), Vec2::ZERO, 0.0).unwrap();
        let err = session.begin("b".into(), Vec2::ZERO, 60.0).unwrap_err();
        assert_eq!(err, DockError::DragAlreadyActive { active: "a".into() });
        assert_eq!(session.dragged_item(), Some(&ItemId::new("a")));
    }

    #[test]
    fn test_threshold_is_sticky() {
        let mut session = DragSession::new(5.0);
        session.begin("a".into(), Vec2::ZERO, 0.0).unwrap();
        session.update(vec2(0.0, 3.0)).unwrap();
        assert!(!session.active().unwrap().past_threshold);
        session.update(vec2(0.0, 6.0)).unwrap();
        assert!(session.active().unwrap().past_threshold);
        session.update(Vec2::ZERO).unwrap();
        assert!(session.active().unwrap().past_threshold);
    }

    #[test]
    fn test_end_destroys_session() {
        let mut session = DragSession::default();
        session.begin("a".into(), vec2(0.0, 30.0), 0.0).unwrap();
        session.update(vec2(0.0, 90.0)).unwrap();
        let finished = session.end().unwrap();
        assert_eq!(finished.current_pointer, vec2(0.0, 90.0));
        assert!(!session.is_active());
        assert_eq!(session.end(), Err(DockError::NoActiveDrag));
        assert_eq!(session.update(Vec2::ZERO), Err(DockError::NoActiveDrag));
    }

    #[test]
    fn test_zero_threshold_starts_past_it() {
        let mut session = DragSession::new(0.0);
        session.begin("a".into(), Vec2::ZERO, 0.0).unwrap();
        assert!(session.active().unwrap().past_threshold);
    }
}
