//! The dock state machine.
//!
//! [`DockController`] owns the authoritative item order, the single drag
//! session and every item's settling state. Pointer events drive it through
//! the table in [`crate::event::transition`]; committed actions come out as
//! [`DockIntent`]s for the host to drain.
//!
//! ```
//! use dockyard_ui::{DockConfig, DockController, DockIntent, Item, PointerEvent};
//!
//! let config = DockConfig::new().top_padding(0.0).slot_height(60.0);
//! let mut dock = DockController::with_items(config, ["a", "b", "c"].map(Item::new)).unwrap();
//!
//! dock.handle_pointer(PointerEvent::down(20.0, 30.0));
//! dock.handle_pointer(PointerEvent::moved(20.0, 130.0));
//! dock.handle_pointer(PointerEvent::up(20.0, 130.0));
//!
//! let intents: Vec<DockIntent> = dock.drain_intents().collect();
//! assert_eq!(
//!     intents,
//!     vec![DockIntent::Reorder { item_id: "a".into(), from_index: 0, to_index: 2 }]
//! );
//! ```

use std::collections::VecDeque;

use dockyard_core::alloc::HashSet;
use dockyard_core::math::Vec2;
use dockyard_core::profiling::profile_function;

use crate::config::DockConfig;
use crate::drag::{ActiveDrag, DragSession};
use crate::error::{DockError, DockResult};
use crate::event::{DockState, PointerEvent, Transition, transition};
use crate::ghost::GhostVisual;
use crate::intent::{DockIntent, IntentSink};
use crate::item::{Item, ItemId};
use crate::layout::SlotLayout;
use crate::spring::SpringSettler;

/// Where the dragged item came from and where it would land right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DragOrigin {
    from_index: usize,
    preview_index: usize,
    pinned: bool,
}

/// Render data for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemVisual {
    pub id: ItemId,
    /// Position in the dock order.
    pub index: usize,
    /// Rendered position: `x` is the shake offset, `y` the top edge.
    pub position: Vec2,
    pub opacity: f32,
    /// Detached from layout and following the pointer.
    pub is_ghost: bool,
    pub selected: bool,
}

/// Pointer-driven controller for one dock.
#[derive(Debug)]
pub struct DockController {
    config: DockConfig,
    layout: SlotLayout,
    order: Vec<Item>,
    state: DockState,
    session: DragSession,
    origin: Option<DragOrigin>,
    settler: SpringSettler,
    ghost: Option<GhostVisual>,
    selected: Option<ItemId>,
    intents: VecDeque<DockIntent>,
}

impl DockController {
    /// Create an empty dock.
    pub fn new(config: DockConfig) -> DockResult<Self> {
        config.validate()?;
        Ok(Self {
            layout: SlotLayout::new(0, config.top_padding, config.slot_height),
            order: Vec::new(),
            state: DockState::Idle,
            session: DragSession::new(config.drag_threshold),
            origin: None,
            settler: SpringSettler::new(config.spring, config.shake),
            ghost: None,
            selected: None,
            intents: VecDeque::new(),
            config,
        })
    }

    /// Create a dock holding `items`, each resting in its slot.
    pub fn with_items(
        config: DockConfig,
        items: impl IntoIterator<Item = Item>,
    ) -> DockResult<Self> {
        let mut dock = Self::new(config)?;
        dock.set_items(items)?;
        Ok(dock)
    }

    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    pub fn layout(&self) -> &SlotLayout {
        &self.layout
    }

    pub fn state(&self) -> DockState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == DockState::Dragging
    }

    pub fn items(&self) -> &[Item] {
        &self.order
    }

    /// Ids in dock order.
    pub fn order(&self) -> Vec<ItemId> {
        self.order.iter().map(|item| item.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Display index of `id`.
    pub fn index_of(&self, id: &ItemId) -> Option<usize> {
        self.order.iter().position(|item| &item.id == id)
    }

    pub fn selected(&self) -> Option<&ItemId> {
        self.selected.as_ref()
    }

    /// Set the selection from the host side. Emits nothing.
    pub fn set_selected(&mut self, id: Option<ItemId>) -> DockResult<()> {
        if let Some(id) = &id
            && self.index_of(id).is_none()
        {
            return Err(DockError::UnknownItem(id.clone()));
        }
        self.selected = id;
        Ok(())
    }

    /// Id of the item being dragged.
    pub fn dragged_item(&self) -> Option<&ItemId> {
        self.session.dragged_item()
    }

    /// Where the dragged item would land if released now.
    pub fn preview_index(&self) -> Option<usize> {
        self.origin.map(|origin| origin.preview_index)
    }

    /// Replace the item list.
    ///
    /// Any drag in progress is dropped without an intent. Items that stay keep
    /// their rendered position and spring to their new slot; new items appear
    /// directly in theirs. A list with duplicate ids is rejected and the
    /// current list is kept.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = Item>) -> DockResult<()> {
        let items: Vec<Item> = items.into_iter().collect();
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(&item.id) {
                tracing::warn!("Rejecting dock rebuild: duplicate item '{}'", item.id);
                return Err(DockError::DuplicateItem(item.id.clone()));
            }
        }

        if self.session.is_active() {
            tracing::debug!("Dock rebuilt mid-drag; dropping the drag");
            self.abort_drag();
        }

        self.settler.retain(|id| seen.contains(id));
        self.layout = self.layout.with_count(items.len());
        for (index, item) in items.iter().enumerate() {
            let top = self.layout.slot_top(index);
            if !self.settler.set_target_y(&item.id, top) {
                self.settler.mount(item.id.clone(), top);
            }
        }

        if let Some(selected) = &self.selected
            && !seen.contains(selected)
        {
            self.selected = None;
        }

        drop(seen);
        self.order = items;
        Ok(())
    }

    /// Remove the dock. Any drag is dropped, all state released and queued
    /// intents discarded; nothing is emitted afterwards until new items are set.
    pub fn teardown(&mut self) {
        if self.session.is_active() {
            tracing::debug!("Dock torn down mid-drag; dropping the drag");
        }
        self.abort_drag();
        self.order.clear();
        self.layout = self.layout.with_count(0);
        self.settler.clear();
        self.ghost = None;
        self.selected = None;
        self.intents.clear();
    }

    /// Feed one pointer event. Returns the state after handling it.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> DockState {
        profile_function!();
        match transition(self.state, event.phase) {
            Transition::Press => self.press(event.position),
            Transition::Hover | Transition::Ignore => {}
            Transition::UpdateDrag => self.update_drag(event.position),
            Transition::Commit => self.commit(event.position),
            Transition::Cancel => self.cancel(),
        }
        self.state
    }

    /// Insertion gap under `y` for an "add" affordance, outside of a drag.
    pub fn insertion_index_at_pointer(&self, y: f32) -> Option<usize> {
        if self.session.is_active() {
            return None;
        }
        Some(self.layout.insertion_index_at(y))
    }

    /// Ask the host to insert a new item at the gap under `y`.
    ///
    /// The order is left alone; the host adds the item and calls
    /// [`set_items`](Self::set_items). Ignored while dragging.
    pub fn request_insert(&mut self, y: f32) -> Option<usize> {
        let Some(at_index) = self.insertion_index_at_pointer(y) else {
            tracing::debug!("Ignoring insert request during a drag");
            return None;
        };
        self.intents.push_back(DockIntent::InsertRequested { at_index });
        Some(at_index)
    }

    /// Advance springs and the ghost fade by `dt` seconds.
    ///
    /// Returns `true` while anything is still animating.
    pub fn tick(&mut self, dt: f32) -> bool {
        let moving = self.settler.tick(dt);

        let mut fading = false;
        if let Some(ghost) = &mut self.ghost {
            ghost.update(dt);
            if ghost.is_done() {
                self.ghost = None;
            } else {
                fading = true;
            }
        }

        moving || fading
    }

    /// Whether another [`tick`](Self::tick) would change anything.
    pub fn is_animating(&self) -> bool {
        !self.settler.is_settled() || self.ghost.is_some()
    }

    /// Per-item render data in dock order.
    pub fn visuals(&self) -> Vec<ItemVisual> {
        let dragging = self.session.dragged_item();
        self.order
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let state = self.settler.get(&item.id);
                let position = state
                    .map(|s| s.current)
                    .unwrap_or_else(|| Vec2::new(0.0, self.layout.slot_top(index)));
                let opacity = self
                    .ghost
                    .as_ref()
                    .filter(|ghost| ghost.item_id == item.id)
                    .map_or(1.0, |ghost| ghost.opacity);
                ItemVisual {
                    id: item.id.clone(),
                    index,
                    position,
                    opacity,
                    is_ghost: dragging == Some(&item.id) && state.is_some_and(|s| s.is_detached()),
                    selected: self.selected.as_ref() == Some(&item.id),
                }
            })
            .collect()
    }

    /// Take all queued intents.
    pub fn drain_intents(&mut self) -> impl Iterator<Item = DockIntent> + '_ {
        self.intents.drain(..)
    }

    /// Hand all queued intents to `sink`.
    pub fn flush_into(&mut self, sink: &mut impl IntentSink) {
        for intent in self.intents.drain(..) {
            sink.dispatch(&intent);
        }
    }

    pub fn pending_intents(&self) -> usize {
        self.intents.len()
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    fn press(&mut self, pointer: Vec2) {
        let hit = if self.layout.contains(pointer.y) {
            self.layout.slot_index_at(pointer.y)
        } else {
            None
        };

        let Some(index) = hit else {
            if self.selected.take().is_some() {
                tracing::debug!("Press outside items; clearing selection");
                self.intents.push_back(DockIntent::Select(None));
            }
            return;
        };

        let item = &self.order[index];
        let item_y = self
            .settler
            .get(&item.id)
            .map_or_else(|| self.layout.slot_top(index), |s| s.current.y);

        if let Err(e) = self.session.begin(item.id.clone(), pointer, item_y) {
            tracing::debug!("Ignoring press: {}", e);
            return;
        }

        tracing::debug!("Press on '{}' at index {}", item.id, index);
        self.origin = Some(DragOrigin {
            from_index: index,
            preview_index: index,
            pinned: item.pinned,
        });
        self.state = DockState::Dragging;
    }

    fn update_drag(&mut self, pointer: Vec2) {
        let ghost_y = match self.session.update(pointer) {
            Ok(y) => y,
            Err(e) => {
                tracing::debug!("Ignoring drag update: {}", e);
                return;
            }
        };
        let (Some(drag), Some(origin)) = (self.session.active(), self.origin) else {
            return;
        };
        if !drag.past_threshold {
            return;
        }

        let id = drag.item_id.clone();
        if origin.pinned {
            tracing::debug!("'{}' is pinned; rejecting drag", id);
            self.cancel();
            return;
        }

        if !self.settler.get(&id).is_some_and(|s| s.is_detached()) {
            tracing::debug!("Drag of '{}' started", id);
            self.settler.detach(&id, ghost_y);
            self.ghost = Some(GhostVisual::new(
                id.clone(),
                self.config.ghost_opacity,
                self.config.ghost_fade_speed,
            ));
        }
        self.settler.move_detached(&id, ghost_y);

        let others = self.layout.with_count(self.order.len().saturating_sub(1));
        let ghost_center = ghost_y + self.layout.slot_height() * 0.5;
        let preview = others.insertion_index_at(ghost_center);
        if preview != origin.preview_index {
            tracing::trace!("Preview for '{}' moved to {}", id, preview);
            self.preview(&id, preview);
        }
    }

    /// Retarget every item except the dragged one around a hole at `preview`.
    fn preview(&mut self, dragged: &ItemId, preview: usize) {
        if let Some(origin) = &mut self.origin {
            origin.preview_index = preview;
        }
        let others = self.order.iter().filter(|item| &item.id != dragged);
        for (i, item) in others.enumerate() {
            let slot = if i < preview { i } else { i + 1 };
            self.settler.set_target_y(&item.id, self.layout.slot_top(slot));
        }
    }

    fn commit(&mut self, pointer: Vec2) {
        self.update_drag(pointer);
        if self.state != DockState::Dragging {
            // Rejected on the final move.
            return;
        }

        self.state = DockState::Committing;
        let origin = self.origin.take();
        let drag = match self.session.end() {
            Ok(drag) => drag,
            Err(e) => {
                tracing::debug!("Commit without a drag: {}", e);
                self.state = DockState::Idle;
                return;
            }
        };

        match origin {
            Some(origin) if drag.past_threshold => self.drop_item(drag, origin),
            _ => self.click(drag.item_id),
        }
        self.state = DockState::Idle;
    }

    fn click(&mut self, id: ItemId) {
        if self.selected.as_ref() == Some(&id) {
            tracing::debug!("Deselecting '{}'", id);
            self.selected = None;
            self.intents.push_back(DockIntent::Select(None));
        } else {
            tracing::debug!("Selecting '{}'", id);
            self.selected = Some(id.clone());
            self.intents.push_back(DockIntent::Select(Some(id)));
        }
    }

    fn drop_item(&mut self, drag: ActiveDrag, origin: DragOrigin) {
        let from_index = origin.from_index;
        let to_index = origin.preview_index.min(self.order.len().saturating_sub(1));

        if from_index != to_index && from_index < self.order.len() {
            let item = self.order.remove(from_index);
            self.order.insert(to_index, item);
            tracing::debug!("Moved '{}' from {} to {}", drag.item_id, from_index, to_index);
            self.intents.push_back(DockIntent::Reorder {
                item_id: drag.item_id.clone(),
                from_index,
                to_index,
            });
        }

        self.settler.attach(&drag.item_id, self.layout.slot_top(to_index));
        self.retarget_all();
        if let Some(ghost) = &mut self.ghost {
            ghost.release();
        }
    }

    fn cancel(&mut self) {
        self.state = DockState::Cancelling;
        if let Some(drag) = self.reset_drag() {
            tracing::debug!("Drag of '{}' cancelled", drag.item_id);
            self.settler.shake(&drag.item_id);
        }
        self.state = DockState::Idle;
    }

    /// Implicit cancel: same reset as [`cancel`](Self::cancel), no feedback.
    fn abort_drag(&mut self) {
        self.reset_drag();
        self.ghost = None;
        self.state = DockState::Idle;
    }

    /// Discard the session and send every item back to its pre-drag slot.
    fn reset_drag(&mut self) -> Option<ActiveDrag> {
        self.origin = None;
        let drag = self.session.cancel()?;
        if let Some(index) = self.index_of(&drag.item_id) {
            self.settler.attach(&drag.item_id, self.layout.slot_top(index));
        }
        self.retarget_all();
        if let Some(ghost) = &mut self.ghost {
            ghost.release();
        }
        Some(drag)
    }

    fn retarget_all(&mut self) {
        for (index, item) in self.order.iter().enumerate() {
            self.settler.set_target_y(&item.id, self.layout.slot_top(index));
        }
    }
}
