//! Visible-element registry: column id → materialized cell or tombstone.

use std::collections::BTreeMap;
use std::fmt;

use crate::column::{same_column, ColumnId, ColumnRef};
use crate::segment::Segment;

use super::CellComp;

/// A materialized cell bound to one column instance in one segment.
pub struct CellSlot {
    pub column: ColumnRef,
    pub segment: Segment,
    pub comp: Box<dyn CellComp>,
}

impl CellSlot {
    /// Whether this slot can be reused for `column` in `segment` as is.
    pub fn is_bound_to(&self, column: &ColumnRef, segment: Segment) -> bool {
        self.segment == segment && same_column(&self.column, column)
    }
}

impl fmt::Debug for CellSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellSlot")
            .field("column", self.column.id())
            .field("segment", &self.segment)
            .field("editing", &self.comp.is_editing())
            .finish()
    }
}

/// Registry entry. `Cleared` marks a cell that was destroyed, so lookups see
/// an explicit cleared state rather than a missing key.
#[derive(Debug)]
pub enum SlotEntry {
    Live(CellSlot),
    Cleared,
}

/// Cells of one row, across all its segments.
///
/// Owned exclusively by the row controller. Ordered by column id so iteration
/// is deterministic.
#[derive(Debug, Default)]
pub struct CellRegistry {
    slots: BTreeMap<ColumnId, SlotEntry>,
}

impl CellRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &ColumnId) -> Option<&SlotEntry> {
        self.slots.get(id)
    }

    /// The live slot for a column id, if any.
    pub fn live(&self, id: &ColumnId) -> Option<&CellSlot> {
        match self.slots.get(id) {
            Some(SlotEntry::Live(slot)) => Some(slot),
            _ => None,
        }
    }

    pub fn live_mut(&mut self, id: &ColumnId) -> Option<&mut CellSlot> {
        match self.slots.get_mut(id) {
            Some(SlotEntry::Live(slot)) => Some(slot),
            _ => None,
        }
    }

    /// Store a slot under its column id. Returns the live slot it replaced;
    /// callers destroy that before inserting, so normally `None`.
    pub fn insert(&mut self, slot: CellSlot) -> Option<CellSlot> {
        let id = slot.column.id().clone();
        match self.slots.insert(id, SlotEntry::Live(slot)) {
            Some(SlotEntry::Live(previous)) => Some(previous),
            _ => None,
        }
    }

    /// Replace a live slot with a tombstone and hand it back for destruction.
    /// Clearing a tombstone or an unknown id is a no-op.
    pub fn clear(&mut self, id: &ColumnId) -> Option<CellSlot> {
        let entry = self.slots.get_mut(id)?;
        match std::mem::replace(entry, SlotEntry::Cleared) {
            SlotEntry::Live(slot) => Some(slot),
            SlotEntry::Cleared => None,
        }
    }

    pub fn is_cleared(&self, id: &ColumnId) -> bool {
        matches!(self.slots.get(id), Some(SlotEntry::Cleared))
    }

    /// Column ids of live slots in a segment.
    pub fn live_ids_in(&self, segment: Segment) -> Vec<ColumnId> {
        self.iter_live()
            .filter(|slot| slot.segment == segment)
            .map(|slot| slot.column.id().clone())
            .collect()
    }

    pub fn iter_live(&self) -> impl Iterator<Item = &CellSlot> {
        self.slots.values().filter_map(|entry| match entry {
            SlotEntry::Live(slot) => Some(slot),
            SlotEntry::Cleared => None,
        })
    }

    pub fn iter_live_mut(&mut self) -> impl Iterator<Item = &mut CellSlot> {
        self.slots.values_mut().filter_map(|entry| match entry {
            SlotEntry::Live(slot) => Some(slot),
            SlotEntry::Cleared => None,
        })
    }

    pub fn live_count(&self) -> usize {
        self.iter_live().count()
    }

    /// Remove every entry and return the live slots, for teardown.
    pub fn drain_live(&mut self) -> Vec<CellSlot> {
        std::mem::take(&mut self.slots)
            .into_values()
            .filter_map(|entry| match entry {
                SlotEntry::Live(slot) => Some(slot),
                SlotEntry::Cleared => None,
            })
            .collect()
    }
}
