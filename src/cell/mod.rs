//! Cells: the per-column component contract, the registry of materialized
//! cells, and the reconciler that keeps a segment in step with its columns.

pub mod reconcile;
pub mod registry;

use std::rc::Rc;

use crate::column::{ColumnId, ColumnRef, Pinned};
use crate::dom::{Dom, NodeId};
use crate::row::RowRef;
use crate::segment::Segment;
use crate::services::RowScope;

pub use reconcile::{reconcile, ReconcileContext, ReconcileReport};
pub use registry::{CellRegistry, CellSlot, SlotEntry};

/// Grid coordinates of a cell, as the focus tracker knows them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellPosition {
    pub row_index: Option<usize>,
    pub row_pinned: Option<Pinned>,
    pub column: ColumnId,
}

/// How a cell should refresh after its row's data changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshFlags {
    /// Skip the value-change flash.
    pub suppress_flash: bool,
    /// The payload was replaced; re-render from scratch instead of
    /// transitioning from the old value.
    pub new_data: bool,
}

/// Everything a cell factory needs to build one cell.
#[derive(Clone)]
pub struct CellParams {
    pub column: ColumnRef,
    pub row: RowRef,
    pub segment: Segment,
    /// The row is being edited; the cell should start in edit mode.
    pub editing_row: bool,
    pub scope: Option<Rc<dyn RowScope>>,
}

/// A materialized per-column visual unit.
///
/// Created by a [`CellFactory`] as a detached element; the row controller
/// attaches it to a segment and owns it until it destroys it.
pub trait CellComp {
    /// Root element of the cell.
    fn element(&self) -> NodeId;

    /// The column instance this cell was created for.
    fn column(&self) -> &ColumnRef;

    /// Columns this cell covers when it spans. Defaults to its own column.
    fn col_span_list(&self) -> Vec<ColumnRef> {
        vec![Rc::clone(self.column())]
    }

    fn cell_position(&self) -> CellPosition;

    fn is_editing(&self) -> bool;

    /// Start editing if the column allows it. The cell that triggered row
    /// editing gets the key and character; the others get `None`.
    fn start_editing(&mut self, key: Option<&str>, char_press: Option<char>, is_source: bool);

    fn stop_editing(&mut self, cancel: bool);

    fn refresh(&mut self, flags: RefreshFlags);

    /// Take the element out of its segment without destroying it.
    fn detach(&mut self, dom: &mut Dom) {
        dom.detach(self.element());
    }

    /// Release everything the cell owns, including its element.
    fn destroy(&mut self, dom: &mut Dom);
}

/// Builds cells for a column and row.
pub trait CellFactory {
    fn create_cell(&self, dom: &mut Dom, params: CellParams) -> Box<dyn CellComp>;
}
