//! Row-type classification.

use super::node::RowNode;

/// How a row is represented. Chosen once when the controller is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowMode {
    /// One cell per displayed column.
    Normal,
    /// Custom full-width renderer requested by the data source.
    FullWidth,
    /// Placeholder while the row's data loads.
    FullWidthLoading,
    /// Group row spanning the whole width.
    FullWidthGroup,
    /// Detail panel under a master row.
    FullWidthDetail,
}

impl RowMode {
    pub fn is_full_width(self) -> bool {
        !matches!(self, RowMode::Normal)
    }
}

/// Grid-level inputs to [`classify`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyFlags {
    pub master_detail: bool,
    pub group_use_entire_row: bool,
    pub pivot_mode: bool,
}

/// Pick the representation for a row. First match wins.
///
/// Footers never take the full-width group path, and pivot mode disables it
/// so pivoted values stay visible in their cells.
pub fn classify(row: &RowNode, flags: ClassifyFlags) -> RowMode {
    if row.stub {
        return RowMode::FullWidthLoading;
    }
    if flags.master_detail && row.detail {
        return RowMode::FullWidthDetail;
    }
    if row.full_width {
        return RowMode::FullWidth;
    }
    let group_row = row.group && !row.footer;
    if group_row && flags.group_use_entire_row && !flags.pivot_mode {
        return RowMode::FullWidthGroup;
    }
    RowMode::Normal
}
