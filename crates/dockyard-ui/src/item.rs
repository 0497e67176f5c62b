//! Dock items and their stable identifiers.

use std::fmt;
use std::sync::Arc;

/// Stable identifier of a dock item.
///
/// The id survives reorders; the position in the dock is derived from the
/// order of the item list, never stored on the item. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(Arc<str>);

impl ItemId {
    /// Create an id from any string-like key.
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(Arc::from(key.as_ref()))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An entry in the dock as supplied by the host application.
///
/// Display metadata (icon, label, status) stays with the host; the engine only
/// needs identity and whether the entry may be dragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Stable id.
    pub id: ItemId,
    /// Pinned items cannot be picked up and moved.
    pub pinned: bool,
}

impl Item {
    /// Create an unpinned item.
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            pinned: false,
        }
    }

    /// Set whether the item is pinned.
    pub fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }
}

impl From<&str> for Item {
    fn from(id: &str) -> Self {
        Item::new(id)
    }
}
