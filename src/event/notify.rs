//! Inbound change notifications routed to a row controller by the host.

use crate::column::ColumnId;

/// A change to the row itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowChange {
    HeightChanged,
    SelectionChanged,
    RowIndexChanged,
    TopChanged,
    ExpandedChanged,
    HasChildrenChanged,
    /// The data payload changed. `update` is true for a partial update of the
    /// same record and false when the payload was replaced.
    DataChanged { update: bool },
    /// One cell's value changed.
    CellChanged { column: ColumnId },
    HighlightChanged,
    DraggingChanged,
    LevelChanged,
}

/// A grid-wide change every visible row may react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridChange {
    PaginationPixelOffsetChanged,
    HeightScaleChanged,
    DisplayedColumnsChanged,
    /// Horizontal scroll changed which center columns are in the viewport.
    VirtualColumnsChanged,
    ColumnResized,
    CellFocusChanged,
    PaginationChanged,
    /// The row model was fully refreshed.
    ModelUpdated,
    ColumnMoved,
}
