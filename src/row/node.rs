//! The logical row being rendered.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::column::Pinned;

/// Shared handle to a row. Owned by the row model; controllers only hold a
/// clone and react to its change notifications.
pub type RowRef = Rc<RefCell<RowNode>>;

/// Drop-target highlight shown while another row is dragged over this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowHighlight {
    Above,
    Below,
}

/// Index and pinned side of a row, enough to locate it in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowPosition {
    pub row_index: Option<usize>,
    pub pinned: Option<Pinned>,
}

/// A row and the flags the controller renders from.
#[derive(Default)]
pub struct RowNode {
    pub id: String,
    /// Opaque data payload. Cells read it, the controller never does.
    pub data: Option<Rc<dyn Any>>,
    /// `None` while a group ancestor is collapsed.
    pub row_index: Option<usize>,
    pub pinned: Option<Pinned>,
    /// Vertical pixel offset inside the full (unpaginated) row list.
    pub row_top: Option<f64>,
    /// Offset before the last layout pass, used to slide the row in.
    pub old_row_top: Option<f64>,
    pub row_height: Option<f64>,
    pub selected: bool,
    pub selectable: bool,
    pub expanded: bool,
    pub has_children: bool,
    pub group: bool,
    pub footer: bool,
    /// Detail row of a master row.
    pub detail: bool,
    /// Marked full-width by the data source.
    pub full_width: bool,
    /// Placeholder for a row still loading.
    pub stub: bool,
    pub level: usize,
    pub dragging: bool,
    pub highlighted: Option<RowHighlight>,
}

impl RowNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            selectable: true,
            ..Self::default()
        }
    }

    /// Set the row index (builder).
    pub fn at_index(mut self, row_index: usize) -> Self {
        self.row_index = Some(row_index);
        self
    }

    /// Set the vertical offset and height (builder).
    pub fn at_top(mut self, row_top: f64, row_height: f64) -> Self {
        self.row_top = Some(row_top);
        self.row_height = Some(row_height);
        self
    }

    /// Attach a data payload (builder).
    pub fn with_data(mut self, data: impl Any) -> Self {
        let data: Rc<dyn Any> = Rc::new(data);
        self.data = Some(data);
        self
    }

    /// Wrap in a shared handle.
    pub fn into_ref(self) -> RowRef {
        Rc::new(RefCell::new(self))
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned.is_some()
    }

    /// A group row that can be expanded or collapsed.
    pub fn is_expandable(&self) -> bool {
        (self.group && !self.footer) || self.has_children
    }

    pub fn position(&self) -> RowPosition {
        RowPosition {
            row_index: self.row_index,
            pinned: self.pinned,
        }
    }
}

impl fmt::Debug for RowNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowNode")
            .field("id", &self.id)
            .field("has_data", &self.data.is_some())
            .field("row_index", &self.row_index)
            .field("pinned", &self.pinned)
            .field("row_top", &self.row_top)
            .field("row_height", &self.row_height)
            .field("selected", &self.selected)
            .field("group", &self.group)
            .field("detail", &self.detail)
            .field("full_width", &self.full_width)
            .field("stub", &self.stub)
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_row_is_selectable_and_unplaced() {
        let row = RowNode::new("r1");
        assert!(row.selectable);
        assert_eq!(row.row_index, None);
        assert_eq!(row.row_top, None);
        assert!(!row.is_pinned());
    }

    #[test]
    fn builders_place_row() {
        let row = RowNode::new("r1").at_index(4).at_top(100.0, 25.0);
        assert_eq!(row.position(), RowPosition { row_index: Some(4), pinned: None });
        assert_eq!(row.row_top, Some(100.0));
        assert_eq!(row.row_height, Some(25.0));
    }

    #[test]
    fn data_payload_downcasts() {
        let row = RowNode::new("r1").with_data(42_u32);
        let value = row.data.as_ref().and_then(|d| d.downcast_ref::<u32>());
        assert_eq!(value, Some(&42));
    }

    #[test]
    fn footer_groups_are_not_expandable() {
        let mut row = RowNode::new("g");
        row.group = true;
        assert!(row.is_expandable());
        row.footer = true;
        assert!(!row.is_expandable());
    }
}
