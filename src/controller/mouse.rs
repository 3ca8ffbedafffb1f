//! Mouse events on the row element.

use crate::cell::CellPosition;
use crate::config::RowSelection;
use crate::event::{GridEvent, MouseEvent, MouseEventKind, RowMouseRecord};
use crate::logging::targets;
use crate::services::SelectionRequest;

use super::RowController;

impl RowController {
    /// Handle a mouse event by DOM name (`click`, `dblclick`, `mousedown`).
    /// Other names are ignored.
    pub fn dispatch_mouse_event(&mut self, name: &str, event: MouseEvent) {
        if !self.active {
            return;
        }
        let kind = match name.parse::<MouseEventKind>() {
            Ok(kind) => kind,
            Err(err) => {
                tracing::debug!(target: targets::ROW, "{err}");
                return;
            }
        };
        match kind {
            MouseEventKind::Click => self.on_row_click(event),
            MouseEventKind::DoubleClick => self.on_row_double_click(event),
            MouseEventKind::MouseDown => self.on_row_mouse_down(),
        }
    }

    fn on_row_click(&mut self, event: MouseEvent) {
        if event.handled_by_grid {
            return;
        }
        let record = RowMouseRecord {
            row: self.row_record(),
            mouse: event,
        };
        self.services.events.publish(GridEvent::RowClicked(record));

        let Some(request) = self.click_selection(&event) else {
            return;
        };
        if let Some(selection) = self.services.selection.clone() {
            selection.set_selected(&self.row, request);
        }
    }

    fn on_row_double_click(&mut self, event: MouseEvent) {
        if event.handled_by_grid {
            return;
        }
        let record = RowMouseRecord {
            row: self.row_record(),
            mouse: event,
        };
        self.services.events.publish(GridEvent::RowDoubleClicked(record));
    }

    /// Full-width rows have no cells to take focus, so the row focuses its
    /// first column.
    fn on_row_mouse_down(&mut self) {
        if !self.mode.is_full_width() {
            return;
        }
        let Some(first) = self.services.columns.all_displayed_columns().into_iter().next() else {
            return;
        };
        let position = self.row_position();
        self.services.focus.set_focused_cell(CellPosition {
            row_index: position.row_index,
            row_pinned: position.pinned,
            column: first.id().clone(),
        });
    }

    /// What a click asks the selection service for, if anything.
    fn click_selection(&self, event: &MouseEvent) -> Option<SelectionRequest> {
        let options = &self.services.options;
        let row = self.row.borrow();
        // Clicking a group expands it; pinned rows are never selectable.
        if row.group
            || !row.selectable
            || row.is_pinned()
            || options.row_selection == RowSelection::None
            || options.suppress_row_click_selection
        {
            return None;
        }
        let multi = event.multi_select_key();
        let shift = event.shift;
        if row.selected {
            if multi {
                return options.row_deselection.then_some(SelectionRequest {
                    new_value: false,
                    clear_selection: false,
                    range_select: false,
                });
            }
            return Some(SelectionRequest {
                new_value: true,
                clear_selection: !shift,
                range_select: shift,
            });
        }
        Some(SelectionRequest {
            new_value: true,
            clear_selection: !multi,
            range_select: shift,
        })
    }
}
