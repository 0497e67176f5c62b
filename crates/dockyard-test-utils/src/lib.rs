//! Test utilities for Dockyard.
//!
//! - [`RecordingSink`] - an [`IntentSink`] that records every intent behind a
//!   shared lock, so a test can hand one clone to the dock and inspect another
//! - [`PointerScript`] - builds pointer event sequences for common gestures
//! - [`run_frames`] / [`settle`] - drive a dock's animation with a fixed step
//!
//! # Example
//!
//! ```rust
//! use dockyard_test_utils::{PointerScript, RecordingSink};
//! use dockyard_ui::{DockConfig, DockController, Item};
//!
//! let config = DockConfig::new().top_padding(0.0).slot_height(60.0);
//! let mut dock = DockController::with_items(config, ["a", "b"].map(Item::new)).unwrap();
//!
//! PointerScript::drag(20.0, 30.0, 90.0).play(&mut dock);
//!
//! let mut sink = RecordingSink::new();
//! dock.flush_into(&mut sink);
//! assert_eq!(sink.count_reorders(), 1);
//! ```

use std::sync::Arc;

use dockyard_ui::{DockController, DockIntent, DockState, IntentSink, ItemId, PointerEvent};
use parking_lot::Mutex;

/// Frame step used by [`settle`].
pub const FRAME_DT: f32 = 1.0 / 60.0;

/// Records dispatched intents for verification in tests.
///
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    intents: Arc<Mutex<Vec<DockIntent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn intents(&self) -> Vec<DockIntent> {
        self.intents.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.intents.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.lock().is_empty()
    }

    pub fn clear(&self) {
        self.intents.lock().clear();
    }

    pub fn count_reorders(&self) -> usize {
        self.intents
            .lock()
            .iter()
            .filter(|intent| matches!(intent, DockIntent::Reorder { .. }))
            .count()
    }

    /// `(item, from, to)` of every recorded reorder.
    pub fn reorders(&self) -> Vec<(ItemId, usize, usize)> {
        self.intents
            .lock()
            .iter()
            .filter_map(|intent| match intent {
                DockIntent::Reorder {
                    item_id,
                    from_index,
                    to_index,
                } => Some((item_id.clone(), *from_index, *to_index)),
                _ => None,
            })
            .collect()
    }

    pub fn last(&self) -> Option<DockIntent> {
        self.intents.lock().last().cloned()
    }
}

impl IntentSink for RecordingSink {
    fn dispatch(&mut self, intent: &DockIntent) {
        self.intents.lock().push(intent.clone());
    }
}

/// A scripted pointer gesture.
#[derive(Debug, Clone, Default)]
pub struct PointerScript {
    events: Vec<PointerEvent>,
}

impl PointerScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press at `from_y`, move to `to_y` in one step, release there.
    pub fn drag(x: f32, from_y: f32, to_y: f32) -> Self {
        Self::new().down(x, from_y).move_to(x, to_y).up(x, to_y)
    }

    /// Press at `from_y` and move to `to_y` in `steps` equal steps, no release.
    pub fn hold_and_move(x: f32, from_y: f32, to_y: f32, steps: usize) -> Self {
        let mut script = Self::new().down(x, from_y);
        let steps = steps.max(1);
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            script = script.move_to(x, from_y + (to_y - from_y) * t);
        }
        script
    }

    /// Press and release at the same point.
    pub fn click(x: f32, y: f32) -> Self {
        Self::new().down(x, y).up(x, y)
    }

    pub fn down(mut self, x: f32, y: f32) -> Self {
        self.events.push(PointerEvent::down(x, y));
        self
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.events.push(PointerEvent::moved(x, y));
        self
    }

    pub fn up(mut self, x: f32, y: f32) -> Self {
        self.events.push(PointerEvent::up(x, y));
        self
    }

    pub fn cancel(mut self) -> Self {
        self.events.push(PointerEvent::cancel());
        self
    }

    pub fn capture_lost(mut self) -> Self {
        self.events.push(PointerEvent::capture_lost());
        self
    }

    pub fn events(&self) -> &[PointerEvent] {
        &self.events
    }

    /// Feed every event to `dock`. Returns the final state.
    pub fn play(&self, dock: &mut DockController) -> DockState {
        let mut state = dock.state();
        for event in &self.events {
            state = dock.handle_pointer(*event);
        }
        state
    }
}

/// Tick `dock` for `frames` frames of `dt` seconds.
pub fn run_frames(dock: &mut DockController, frames: usize, dt: f32) {
    for _ in 0..frames {
        dock.tick(dt);
    }
}

/// Tick until nothing animates. Returns the frame count.
///
/// Panics if the dock is still animating after ten simulated seconds.
pub fn settle(dock: &mut DockController) -> usize {
    for frame in 1..=600 {
        if !dock.tick(FRAME_DT) {
            return frame;
        }
    }
    panic!("dock did not settle within 600 frames");
}
