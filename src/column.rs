//! Columns and the column-model contract.
//!
//! A [`ColumnRef`] is a shared handle. Two handles are the *same column* only
//! when they carry the same id **and** point at the same instance: pivot
//! refreshes rebuild columns under reused ids, and a cell bound to the old
//! instance must not be mistaken for a match.

use std::fmt;
use std::rc::Rc;

use crate::row::RowNode;

/// Which side a column or row is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pinned {
    Left,
    Right,
}

impl Pinned {
    pub fn as_str(self) -> &'static str {
        match self {
            Pinned::Left => "left",
            Pinned::Right => "right",
        }
    }
}

/// String identity of a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A displayed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    id: ColumnId,
    pinned: Option<Pinned>,
    width: f64,
}

impl Column {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: ColumnId::new(id),
            pinned: None,
            width: 200.0,
        }
    }

    /// Set the pinned side (builder).
    pub fn pinned(mut self, pinned: Pinned) -> Self {
        self.pinned = Some(pinned);
        self
    }

    /// Set the width in pixels (builder).
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Wrap in a shared handle.
    pub fn into_ref(self) -> ColumnRef {
        Rc::new(self)
    }

    pub fn id(&self) -> &ColumnId {
        &self.id
    }

    pub fn pinned_side(&self) -> Option<Pinned> {
        self.pinned
    }

    pub fn width(&self) -> f64 {
        self.width
    }
}

/// Shared handle to a column. Compare with [`same_column`], not `==`.
pub type ColumnRef = Rc<Column>;

/// Two-field identity check: same id and same instance.
pub fn same_column(a: &ColumnRef, b: &ColumnRef) -> bool {
    a.id() == b.id() && Rc::ptr_eq(a, b)
}

/// Whether `columns` contains this exact column instance.
pub fn contains_column(columns: &[ColumnRef], column: &ColumnRef) -> bool {
    columns.iter().any(|c| same_column(c, column))
}

/// The column model as seen by a row controller.
///
/// Every list is ordered left to right. The per-row variants exist because
/// column spanning can make the rendered set differ from row to row.
pub trait ColumnModel {
    /// Every displayed column, across all pinned sections.
    fn all_displayed_columns(&self) -> Vec<ColumnRef>;

    /// Center columns inside the horizontal viewport for this row.
    fn viewport_center_columns_for(&self, row: &RowNode) -> Vec<ColumnRef>;

    fn pinned_left_columns_for(&self, row: &RowNode) -> Vec<ColumnRef>;

    fn pinned_right_columns_for(&self, row: &RowNode) -> Vec<ColumnRef>;

    fn is_pivot_mode(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_column_requires_same_instance() {
        let a = Column::new("price").into_ref();
        let a_clone = Rc::clone(&a);
        let rebuilt = Column::new("price").into_ref();
        assert!(same_column(&a, &a_clone));
        assert!(!same_column(&a, &rebuilt));
        assert_eq!(a.id(), rebuilt.id());
    }

    #[test]
    fn contains_column_uses_identity() {
        let a = Column::new("a").into_ref();
        let b = Column::new("b").into_ref();
        let cols = vec![Rc::clone(&a)];
        assert!(contains_column(&cols, &a));
        assert!(!contains_column(&cols, &b));
        assert!(!contains_column(&cols, &Column::new("a").into_ref()));
    }

    #[test]
    fn builder_sets_pinned_and_width() {
        let col = Column::new("id").pinned(Pinned::Left).with_width(80.0);
        assert_eq!(col.pinned_side(), Some(Pinned::Left));
        assert_eq!(col.width(), 80.0);
        assert_eq!(col.id().as_str(), "id");
    }

    #[test]
    fn pinned_names() {
        assert_eq!(Pinned::Left.as_str(), "left");
        assert_eq!(Pinned::Right.as_str(), "right");
    }
}
