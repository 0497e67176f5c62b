//! Slot geometry for a vertical dock.
//!
//! Slots are stacked top to bottom: slot `k` spans
//! `[top_padding + k * slot_height, top_padding + (k + 1) * slot_height)`.
//! Every query is direct arithmetic, so cost does not grow with the item count.

use dockyard_core::math::finite_or;

/// A resting place for one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    /// Position in the dock.
    pub index: usize,
    /// Top edge.
    pub top_y: f32,
    /// Height including spacing.
    pub height: f32,
}

impl Slot {
    /// Bottom edge (exclusive).
    pub fn bottom_y(&self) -> f32 {
        self.top_y + self.height
    }

    /// Vertical midpoint.
    pub fn center_y(&self) -> f32 {
        self.top_y + self.height * 0.5
    }

    /// Whether `y` falls inside this slot's span.
    pub fn contains(&self, y: f32) -> bool {
        y >= self.top_y && y < self.bottom_y()
    }
}

/// Pure mapping between item positions and vertical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotLayout {
    item_count: usize,
    top_padding: f32,
    slot_height: f32,
}

impl SlotLayout {
    /// Create a layout. Negative or NaN dimensions are clamped to zero.
    pub fn new(item_count: usize, top_padding: f32, slot_height: f32) -> Self {
        Self {
            item_count,
            top_padding: finite_or(top_padding, 0.0).max(0.0),
            slot_height: finite_or(slot_height, 0.0).max(0.0),
        }
    }

    /// The same geometry with a different item count.
    pub fn with_count(&self, item_count: usize) -> Self {
        Self {
            item_count,
            ..*self
        }
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn top_padding(&self) -> f32 {
        self.top_padding
    }

    pub fn slot_height(&self) -> f32 {
        self.slot_height
    }

    /// Top edge of slot `index`. Defined for any index, including past the end.
    pub fn slot_top(&self, index: usize) -> f32 {
        self.top_padding + index as f32 * self.slot_height
    }

    /// Vertical midpoint of slot `index`.
    pub fn slot_center(&self, index: usize) -> f32 {
        self.slot_top(index) + self.slot_height * 0.5
    }

    /// The slot at `index`, or `None` past the end.
    pub fn slot(&self, index: usize) -> Option<Slot> {
        (index < self.item_count).then(|| Slot {
            index,
            top_y: self.slot_top(index),
            height: self.slot_height,
        })
    }

    /// All slots in order.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        (0..self.item_count).filter_map(|index| self.slot(index))
    }

    /// Height from the top of the dock to the bottom of the last slot.
    pub fn total_height(&self) -> f32 {
        self.slot_top(self.item_count)
    }

    /// Whether `y` lies over any slot.
    pub fn contains(&self, y: f32) -> bool {
        self.item_count > 0 && y >= self.top_padding && y < self.total_height()
    }

    /// Index of the slot whose span contains `y`, clamped to the first and
    /// last slot. `None` only for an empty dock.
    pub fn slot_index_at(&self, y: f32) -> Option<usize> {
        let last = self.item_count.checked_sub(1)?;
        let offset = finite_or(y, self.top_padding) - self.top_padding;
        if self.slot_height <= 0.0 {
            return Some(if offset > 0.0 { last } else { 0 });
        }
        Some(clamp_index((offset / self.slot_height).floor(), last))
    }

    /// Nearest insertion gap for `y`, in `[0, item_count]`.
    ///
    /// Gap `k` sits directly above slot `k`. `y` past the midpoint of slot `k`
    /// selects gap `k + 1`; exactly on the midpoint stays at gap `k`.
    pub fn insertion_index_at(&self, y: f32) -> usize {
        let offset = finite_or(y, self.top_padding) - self.top_padding;
        if self.slot_height <= 0.0 {
            return if offset > 0.0 { self.item_count } else { 0 };
        }
        // Number of midpoints strictly above `y`.
        let gap = ((offset - self.slot_height * 0.5) / self.slot_height).ceil();
        clamp_index(gap, self.item_count)
    }
}

fn clamp_index(value: f32, max: usize) -> usize {
    if value <= 0.0 {
        0
    } else if value >= max as f32 {
        max
    } else {
        value as usize
    }
}
