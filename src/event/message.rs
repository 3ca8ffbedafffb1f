//! Typed events a row publishes on the grid event bus.
//!
//! Each event kind carries a fixed record; listeners match on [`GridEvent`]
//! instead of probing a loosely-typed payload.

use crate::column::Pinned;
use crate::row::RowNode;

use super::mouse::MouseEvent;

/// Identifies the row an event is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowEventRecord {
    pub row_id: String,
    pub row_index: Option<usize>,
    pub row_pinned: Option<Pinned>,
}

impl RowEventRecord {
    pub fn from_row(row: &RowNode) -> Self {
        Self {
            row_id: row.id.clone(),
            row_index: row.row_index,
            row_pinned: row.pinned,
        }
    }
}

/// A row event caused by a mouse event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMouseRecord {
    pub row: RowEventRecord,
    pub mouse: MouseEvent,
}

/// Events published by row controllers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    RowClicked(RowMouseRecord),
    RowDoubleClicked(RowMouseRecord),
    /// Row editing finished without being cancelled.
    RowValueChanged(RowEventRecord),
    RowEditingStarted(RowEventRecord),
    RowEditingStopped(RowEventRecord),
    /// A row controller was destroyed.
    VirtualRowRemoved(RowEventRecord),
}

impl GridEvent {
    /// Human-readable name for debug/logging purposes.
    pub fn name(&self) -> &'static str {
        match self {
            GridEvent::RowClicked(_) => "rowClicked",
            GridEvent::RowDoubleClicked(_) => "rowDoubleClicked",
            GridEvent::RowValueChanged(_) => "rowValueChanged",
            GridEvent::RowEditingStarted(_) => "rowEditingStarted",
            GridEvent::RowEditingStopped(_) => "rowEditingStopped",
            GridEvent::VirtualRowRemoved(_) => "virtualRowRemoved",
        }
    }

    /// The row this event is about.
    pub fn row(&self) -> &RowEventRecord {
        match self {
            GridEvent::RowClicked(record) | GridEvent::RowDoubleClicked(record) => &record.row,
            GridEvent::RowValueChanged(row)
            | GridEvent::RowEditingStarted(row)
            | GridEvent::RowEditingStopped(row)
            | GridEvent::VirtualRowRemoved(row) => row,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_copies_row_identity() {
        let row = RowNode::new("r7").at_index(7);
        let record = RowEventRecord::from_row(&row);
        assert_eq!(record.row_id, "r7");
        assert_eq!(record.row_index, Some(7));
        assert_eq!(record.row_pinned, None);
    }

    #[test]
    fn names_and_row_accessor() {
        let row = RowEventRecord::from_row(&RowNode::new("r1"));
        let click = GridEvent::RowClicked(RowMouseRecord {
            row: row.clone(),
            mouse: MouseEvent::new(),
        });
        assert_eq!(click.name(), "rowClicked");
        assert_eq!(click.row().row_id, "r1");
        let removed = GridEvent::VirtualRowRemoved(row);
        assert_eq!(removed.name(), "virtualRowRemoved");
        assert_eq!(removed.row().row_id, "r1");
    }
}
