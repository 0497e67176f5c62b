//! Error types for the dock engine.
//!
//! Most invalid actions (a second drag, a pointer-up with nothing pressed)
//! are ignored by the controller. These errors surface from the lower-level
//! building blocks and from the few calls where the caller hands in data.

use crate::item::ItemId;

/// Errors reported by dock operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockError {
    /// A drag session is already in progress.
    DragAlreadyActive {
        /// Item currently being dragged.
        active: ItemId,
    },
    /// The operation needs an active drag session.
    NoActiveDrag,
    /// Item id is not part of the dock.
    UnknownItem(ItemId),
    /// The same item id appears more than once in an item list.
    DuplicateItem(ItemId),
    /// Metric name is not one the dock displays.
    UnknownMetric(String),
    /// Configuration value out of range.
    InvalidConfig(String),
}

impl std::fmt::Display for DockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DockError::DragAlreadyActive { active } => {
                write!(f, "A drag of item '{}' is already in progress", active)
            }
            DockError::NoActiveDrag => write!(f, "No drag session is active"),
            DockError::UnknownItem(id) => write!(f, "Item '{}' is not in the dock", id),
            DockError::DuplicateItem(id) => write!(f, "Item '{}' appears more than once", id),
            DockError::UnknownMetric(name) => write!(f, "Unknown metric '{}'", name),
            DockError::InvalidConfig(msg) => write!(f, "Invalid dock configuration: {}", msg),
        }
    }
}

impl std::error::Error for DockError {}

impl From<serde_yaml::Error> for DockError {
    fn from(err: serde_yaml::Error) -> Self {
        DockError::InvalidConfig(err.to_string())
    }
}

/// Result type for dock operations.
pub type DockResult<T> = Result<T, DockError>;
