//! Intents the dock hands to the host application.

use std::collections::VecDeque;

use crate::item::ItemId;

/// A committed user action, expressed in dock indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockIntent {
    /// An item was dropped at a new position.
    Reorder {
        item_id: ItemId,
        from_index: usize,
        to_index: usize,
    },
    /// The user asked to add a new entry at this gap.
    InsertRequested { at_index: usize },
    /// Selection changed; `None` clears it.
    Select(Option<ItemId>),
}

/// Receiver for dock intents.
///
/// Implement the `on_*` hooks you care about; `dispatch` routes to them.
pub trait IntentSink {
    fn on_reorder(&mut self, _item_id: &ItemId, _from_index: usize, _to_index: usize) {}

    fn on_insert_requested(&mut self, _at_index: usize) {}

    fn on_select(&mut self, _item_id: Option<&ItemId>) {}

    fn dispatch(&mut self, intent: &DockIntent) {
        match intent {
            DockIntent::Reorder {
                item_id,
                from_index,
                to_index,
            } => self.on_reorder(item_id, *from_index, *to_index),
            DockIntent::InsertRequested { at_index } => self.on_insert_requested(*at_index),
            DockIntent::Select(item_id) => self.on_select(item_id.as_ref()),
        }
    }
}

impl IntentSink for Vec<DockIntent> {
    fn dispatch(&mut self, intent: &DockIntent) {
        self.push(intent.clone());
    }
}

impl IntentSink for VecDeque<DockIntent> {
    fn dispatch(&mut self, intent: &DockIntent) {
        self.push_back(intent.clone());
    }
}
