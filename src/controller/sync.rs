//! Keeping the row's elements in step with row and grid notifications.

use crate::cell::RefreshFlags;
use crate::column::ColumnId;
use crate::css::classes;
use crate::event::{GridChange, RowChange};
use crate::logging::targets;
use crate::row::RowHighlight;

use super::RowController;

impl RowController {
    /// Apply a change to the row. Ignored once the row is destroyed.
    pub fn on_row_change(&mut self, change: RowChange) {
        if !self.active {
            return;
        }
        tracing::trace!(target: targets::ROW, row = %self.row.borrow().id, ?change, "row change");
        match change {
            RowChange::HeightChanged => self.write_height(),
            RowChange::SelectionChanged => self.refresh_selection(),
            RowChange::RowIndexChanged => self.on_row_index_changed(),
            RowChange::TopChanged => self.on_top_changed(),
            RowChange::ExpandedChanged | RowChange::HasChildrenChanged => self.refresh_expanded(),
            RowChange::DataChanged { update } => self.on_data_changed(update),
            RowChange::CellChanged { column } => self.on_cell_changed(&column),
            RowChange::HighlightChanged => self.refresh_highlight(),
            RowChange::DraggingChanged => {
                let dragging = self.row.borrow().dragging;
                self.set_class_everywhere(classes::DRAGGING, dragging);
            }
            RowChange::LevelChanged => self.refresh_level(),
        }
    }

    /// Apply a grid-wide change. Ignored once the row is destroyed.
    pub fn on_grid_change(&mut self, change: GridChange) {
        if !self.active {
            return;
        }
        match change {
            GridChange::PaginationPixelOffsetChanged | GridChange::HeightScaleChanged => self.on_top_changed(),
            // Full-width rows have no cells; request_reconcile ignores them.
            GridChange::DisplayedColumnsChanged | GridChange::VirtualColumnsChanged | GridChange::ColumnResized => {
                self.request_reconcile()
            }
            GridChange::CellFocusChanged => self.refresh_focus(),
            GridChange::PaginationChanged => {
                let page = self.services.pagination.current_page();
                if page != self.pagination_page {
                    self.pagination_page = page;
                    self.on_top_changed();
                }
                self.refresh_page_edges();
            }
            GridChange::ModelUpdated => self.refresh_page_edges(),
            GridChange::ColumnMoved => self.dom_order_stale = true,
        }
    }

    pub(super) fn on_top_changed(&mut self) {
        let top = self.row.borrow().row_top;
        if let Some(top) = top {
            self.set_row_top(top);
        }
    }

    fn on_row_index_changed(&mut self) {
        let index = self.row.borrow().row_index;
        let parity = classes::parity_class(index);
        self.update_elements(|data| {
            data.set_class(classes::EVEN, parity == Some(classes::EVEN));
            data.set_class(classes::ODD, parity == Some(classes::ODD));
        });
        self.write_attributes();
        self.refresh_page_edges();
        self.refresh_focus();
    }

    fn on_data_changed(&mut self, update: bool) {
        // A partial update animates from the old value; a replaced payload
        // renders as new.
        let flags = RefreshFlags {
            suppress_flash: !update,
            new_data: !update,
        };
        for slot in self.cells.iter_live_mut() {
            slot.comp.refresh(flags);
        }
        // Selection may only have arrived with the data.
        self.refresh_selection();
        self.apply_style_hooks();
    }

    fn on_cell_changed(&mut self, column: &ColumnId) {
        if let Some(slot) = self.cells.live_mut(column) {
            slot.comp.refresh(RefreshFlags::default());
        }
    }

    fn refresh_selection(&mut self) {
        let selected = self.row.borrow().selected;
        self.set_class_everywhere(classes::SELECTED, selected);
        self.write_attributes();
    }

    fn refresh_expanded(&mut self) {
        let (expandable, expanded) = {
            let row = self.row.borrow();
            (row.is_expandable(), row.expanded)
        };
        self.update_elements(|data| {
            data.set_class(classes::EXPANDED, expandable && expanded);
            data.set_class(classes::CONTRACTED, expandable && !expanded);
        });
        self.write_attributes();
    }

    fn refresh_highlight(&mut self) {
        let highlighted = self.row.borrow().highlighted;
        self.update_elements(|data| {
            data.set_class(classes::HIGHLIGHT_ABOVE, highlighted == Some(RowHighlight::Above));
            data.set_class(classes::HIGHLIGHT_BELOW, highlighted == Some(RowHighlight::Below));
        });
    }

    fn refresh_level(&mut self) {
        let level = classes::level_class(self.row.borrow().level);
        self.update_elements(|data| {
            data.classes.retain(|class| !classes::is_level_class(class));
            data.add_class(&level);
        });
        self.write_attributes();
    }

    fn refresh_page_edges(&mut self) {
        let (first, last) = self.page_edges();
        if (first, last) == (self.first_on_page, self.last_on_page) {
            return;
        }
        self.first_on_page = first;
        self.last_on_page = last;
        self.update_elements(|data| {
            data.set_class(classes::FIRST_ON_PAGE, first);
            data.set_class(classes::LAST_ON_PAGE, last);
        });
    }

    /// Track row focus. Focus leaving an editing row stops the edit.
    fn refresh_focus(&mut self) {
        let focused = self.services.focus.is_row_focused(self.row_position());
        if focused != self.focused {
            self.focused = focused;
            self.update_elements(|data| {
                data.set_class(classes::FOCUS, focused);
                data.set_class(classes::NO_FOCUS, !focused);
            });
        }
        if !focused && self.editing {
            self.stop_editing(false);
        }
    }
}
