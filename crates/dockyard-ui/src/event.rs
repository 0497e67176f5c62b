//! Pointer input and the dock's transition table.
//!
//! Hosts translate their windowing events into [`PointerEvent`]s. Which
//! state change an event causes is decided by [`transition`], independent of
//! any rendering surface.

use dockyard_core::math::Vec2;

/// Phase of a pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// Primary button pressed.
    Down,
    /// Pointer moved (pressed or not).
    Move,
    /// Primary button released.
    Up,
    /// Host cancelled the interaction (e.g. Escape).
    Cancel,
    /// The dock lost pointer capture.
    CaptureLost,
}

/// A pointer event in dock-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Vec2,
    pub phase: PointerPhase,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, position: Vec2) -> Self {
        Self { position, phase }
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Down, Vec2::new(x, y))
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Move, Vec2::new(x, y))
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Up, Vec2::new(x, y))
    }

    pub fn cancel() -> Self {
        Self::new(PointerPhase::Cancel, Vec2::ZERO)
    }

    pub fn capture_lost() -> Self {
        Self::new(PointerPhase::CaptureLost, Vec2::ZERO)
    }
}

/// Interaction state of a dock.
///
/// `Committing` and `Cancelling` are passed through synchronously while an
/// event is handled; between events a dock is always `Idle` or `Dragging`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DockState {
    #[default]
    Idle,
    Dragging,
    Committing,
    Cancelling,
}

/// What an event does in a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Press while idle: start a drag on the item under the pointer, or clear
    /// the selection if there is none.
    Press,
    /// Pointer moved while idle.
    Hover,
    /// Pointer moved while dragging.
    UpdateDrag,
    /// Release while dragging.
    Commit,
    /// Cancel or capture loss while dragging.
    Cancel,
    /// Event has no meaning in this state.
    Ignore,
}

/// The event-to-transition table.
pub fn transition(state: DockState, phase: PointerPhase) -> Transition {
    use PointerPhase as P;

    match (state, phase) {
        (DockState::Idle, P::Down) => Transition::Press,
        (DockState::Idle, P::Move) => Transition::Hover,
        (DockState::Idle, P::Up | P::Cancel | P::CaptureLost) => Transition::Ignore,
        // A second press during a drag never starts another one.
        (DockState::Dragging, P::Down) => Transition::Ignore,
        (DockState::Dragging, P::Move) => Transition::UpdateDrag,
        (DockState::Dragging, P::Up) => Transition::Commit,
        (DockState::Dragging, P::Cancel | P::CaptureLost) => Transition::Cancel,
        (DockState::Committing | DockState::Cancelling, _) => Transition::Ignore,
    }
}
