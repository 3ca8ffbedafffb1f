//! Row editing: every cell edits together.

use crate::column::ColumnId;
use crate::css::classes;
use crate::event::GridEvent;
use crate::logging::targets;

use super::RowController;

impl RowController {
    /// Put every cell into edit mode. The cell for `source` gets the key and
    /// character that started the edit; the others start without one.
    ///
    /// Does nothing while the row is already editing.
    pub fn start_row_editing(&mut self, key: Option<&str>, char_press: Option<char>, source: Option<&ColumnId>) {
        if !self.active || self.editing {
            return;
        }
        for slot in self.cells.iter_live_mut() {
            let is_source = source == Some(slot.column.id());
            let (k, c) = if is_source { (key, char_press) } else { (None, None) };
            slot.comp.start_editing(k, c, is_source);
        }
        self.set_editing(true);
        self.publish_row_event(GridEvent::RowEditingStarted);
    }

    /// Stop editing every cell. Notifies listeners only if the row was
    /// editing; a value change is reported unless the edit was cancelled.
    pub fn stop_editing(&mut self, cancel: bool) {
        for slot in self.cells.iter_live_mut() {
            slot.comp.stop_editing(cancel);
        }
        if !self.editing {
            return;
        }
        if !cancel {
            self.publish_row_event(GridEvent::RowValueChanged);
        }
        self.set_editing(false);
        self.publish_row_event(GridEvent::RowEditingStopped);
    }

    fn set_editing(&mut self, editing: bool) {
        self.editing = editing;
        self.update_elements(|data| {
            data.set_class(classes::EDITING, editing);
            data.set_class(classes::NOT_EDITING, !editing);
        });
        tracing::debug!(target: targets::ROW, row = %self.row.borrow().id, editing, "row editing");
    }
}

#[cfg(test)]
mod tests {
    use crate::column::{Column, ColumnId};
    use crate::config::GridOptions;
    use crate::row::RowNode;
    use crate::testing::Harness;
    use pretty_assertions::assert_eq;

    fn editing_harness() -> Harness {
        let harness = Harness::new(GridOptions::default().with_suppress_animation_frame(true));
        harness
            .columns
            .set_center(vec![Column::new("a").into_ref(), Column::new("b").into_ref()]);
        harness
    }

    #[test]
    fn source_cell_receives_the_key() {
        let harness = editing_harness();
        let row = harness.create_row(RowNode::new("r").at_index(0));

        row.borrow_mut().start_row_editing(Some("Enter"), Some('x'), Some(&ColumnId::new("b")));
        assert_eq!(
            harness.cells.events_with_prefix("start:"),
            vec!["start:a:-:-:false", "start:b:Enter:x:true"]
        );
        assert_eq!(harness.events.pending_names(), vec!["rowEditingStarted"]);
    }

    #[test]
    fn second_start_is_ignored() {
        let harness = editing_harness();
        let row = harness.create_row(RowNode::new("r").at_index(0));
        row.borrow_mut().start_row_editing(None, None, None);
        row.borrow_mut().start_row_editing(None, None, None);
        assert_eq!(harness.cells.count("start:"), 2);
        assert_eq!(harness.events.pending_count(), 1);
    }

    #[test]
    fn stop_reports_value_change_unless_cancelled() {
        let harness = editing_harness();
        let row = harness.create_row(RowNode::new("r").at_index(0));

        row.borrow_mut().start_row_editing(None, None, None);
        row.borrow_mut().stop_editing(false);
        assert_eq!(
            harness.events.pending_names(),
            vec!["rowEditingStarted", "rowValueChanged", "rowEditingStopped"]
        );
        harness.events.drain();

        row.borrow_mut().start_row_editing(None, None, None);
        row.borrow_mut().stop_editing(true);
        assert_eq!(harness.events.pending_names(), vec!["rowEditingStarted", "rowEditingStopped"]);
    }

    #[test]
    fn stop_while_not_editing_is_silent() {
        let harness = editing_harness();
        let row = harness.create_row(RowNode::new("r").at_index(0));
        row.borrow_mut().stop_editing(false);
        assert!(harness.events.is_empty());
        assert!(!row.borrow().is_editing());
    }
}
