//! Reconciler: bring one segment's cells in line with a target column list.
//!
//! A pass runs in a fixed order: keep or create every target column, then
//! collect removal candidates, then destroy them, then reorder. Candidates are
//! evaluated only after the target set is fully materialized.

use std::collections::BTreeSet;
use std::rc::Rc;

use crate::column::{contains_column, ColumnId, ColumnRef};
use crate::dom::{Dom, NodeId};
use crate::logging::targets;
use crate::row::RowRef;
use crate::segment::Segment;
use crate::services::{FocusTracker, RowScope};

use super::registry::{CellRegistry, CellSlot};
use super::{CellFactory, CellParams};

/// Collaborators and flags for one reconcile pass.
pub struct ReconcileContext<'a> {
    pub dom: &'a mut Dom,
    pub factory: &'a dyn CellFactory,
    pub focus: &'a dyn FocusTracker,
    pub row: &'a RowRef,
    pub segment: Segment,
    pub segment_element: NodeId,
    /// Every displayed column in the grid, not just this segment's.
    pub all_displayed: &'a [ColumnRef],
    /// New cells start in edit mode.
    pub editing_row: bool,
    /// Reorder after creating cells.
    pub ensure_dom_order: bool,
    /// Reorder even if nothing was created (column moved).
    pub force_order: bool,
    pub scope: Option<Rc<dyn RowScope>>,
}

/// What one reconcile pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub created: usize,
    pub kept: usize,
    pub destroyed: usize,
    /// Candidates kept because they were editing or focused.
    pub retained: usize,
    /// Elements whose position changed during reordering.
    pub moved: usize,
}

impl ReconcileReport {
    /// Whether the pass changed the segment at all.
    pub fn any_work(&self) -> bool {
        self.created > 0 || self.destroyed > 0 || self.moved > 0
    }

    pub fn merge(&mut self, other: ReconcileReport) {
        self.created += other.created;
        self.kept += other.kept;
        self.destroyed += other.destroyed;
        self.retained += other.retained;
        self.moved += other.moved;
    }
}

/// Make the live cells of `ctx.segment` match `target`, in order.
pub fn reconcile(
    registry: &mut CellRegistry,
    ctx: &mut ReconcileContext<'_>,
    target: &[ColumnRef],
) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    for column in target {
        let bound = registry
            .live(column.id())
            .map(|slot| slot.is_bound_to(column, ctx.segment));
        match bound {
            Some(true) => {
                report.kept += 1;
                continue;
            }
            // Same id, different instance or segment: the old binding goes.
            Some(false) => {
                if destroy_slot(registry, ctx.dom, column.id()) {
                    report.destroyed += 1;
                }
            }
            None => {}
        }
        create_slot(registry, ctx, column);
        report.created += 1;
    }

    let target_ids: BTreeSet<&ColumnId> = target.iter().map(|c| c.id()).collect();
    let candidates: Vec<ColumnId> = registry
        .live_ids_in(ctx.segment)
        .into_iter()
        .filter(|id| !target_ids.contains(id))
        .collect();

    let mut doomed = Vec::with_capacity(candidates.len());
    for id in candidates {
        let Some(slot) = registry.live(&id) else {
            continue;
        };
        if is_exempt(slot, ctx) {
            report.retained += 1;
        } else {
            doomed.push(id);
        }
    }

    for id in &doomed {
        if destroy_slot(registry, ctx.dom, id) {
            report.destroyed += 1;
        }
    }

    if (report.created > 0 && ctx.ensure_dom_order) || ctx.force_order {
        let order: Vec<NodeId> = target
            .iter()
            .filter_map(|column| registry.live(column.id()))
            .filter(|slot| slot.segment == ctx.segment)
            .map(|slot| slot.comp.element())
            .collect();
        report.moved = ctx.dom.reorder_children(ctx.segment_element, &order);
    }

    tracing::trace!(
        target: targets::RECONCILE,
        row = %ctx.row.borrow().id,
        segment = ctx.segment.name(),
        created = report.created,
        kept = report.kept,
        destroyed = report.destroyed,
        retained = report.retained,
        moved = report.moved,
        "segment reconciled"
    );
    report
}

/// Editing or focused cells survive while their column is still displayed
/// somewhere in the grid.
fn is_exempt(slot: &CellSlot, ctx: &ReconcileContext<'_>) -> bool {
    let busy = slot.comp.is_editing() || ctx.focus.is_cell_focused(&slot.comp.cell_position());
    busy && contains_column(ctx.all_displayed, &slot.column)
}

fn create_slot(registry: &mut CellRegistry, ctx: &mut ReconcileContext<'_>, column: &ColumnRef) {
    let params = CellParams {
        column: Rc::clone(column),
        row: Rc::clone(ctx.row),
        segment: ctx.segment,
        editing_row: ctx.editing_row,
        scope: ctx.scope.clone(),
    };
    let comp = ctx.factory.create_cell(ctx.dom, params);
    ctx.dom.append_child(ctx.segment_element, comp.element());
    registry.insert(CellSlot {
        column: Rc::clone(column),
        segment: ctx.segment,
        comp,
    });
}

/// Detach, destroy and tombstone a slot. Returns false for a slot that was
/// already cleared.
pub(crate) fn destroy_slot(registry: &mut CellRegistry, dom: &mut Dom, id: &ColumnId) -> bool {
    match registry.clear(id) {
        Some(mut slot) => {
            slot.comp.detach(dom);
            slot.comp.destroy(dom);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellPosition;
    use crate::column::Column;
    use crate::dom::NodeData;
    use crate::row::RowNode;
    use crate::testing::fakes::{FakeFocus, RecordingCellFactory};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    struct Fixture {
        dom: Dom,
        factory: RecordingCellFactory,
        focus: FakeFocus,
        row: RowRef,
        center: NodeId,
        left: NodeId,
        registry: CellRegistry,
    }

    impl Fixture {
        fn new() -> Self {
            let mut dom = Dom::new();
            let center = dom.create(NodeData::new("div").with_class("center"));
            let left = dom.create(NodeData::new("div").with_class("left"));
            Self {
                dom,
                factory: RecordingCellFactory::new(),
                focus: FakeFocus::new(),
                row: RowNode::new("r0").at_index(0).into_ref(),
                center,
                left,
                registry: CellRegistry::new(),
            }
        }

        fn run(&mut self, segment: Segment, target: &[ColumnRef], all: &[ColumnRef], ensure_order: bool) -> ReconcileReport {
            let element = match segment {
                Segment::Left => self.left,
                _ => self.center,
            };
            let mut ctx = ReconcileContext {
                dom: &mut self.dom,
                factory: &self.factory,
                focus: &self.focus,
                row: &self.row,
                segment,
                segment_element: element,
                all_displayed: all,
                editing_row: false,
                ensure_dom_order: ensure_order,
                force_order: false,
                scope: None,
            };
            reconcile(&mut self.registry, &mut ctx, target)
        }

        fn child_ids(&self, parent: NodeId) -> Vec<String> {
            self.dom
                .children(parent)
                .iter()
                .filter_map(|&id| self.dom.get(id))
                .filter_map(|data| data.attribute("col-id").map(str::to_string))
                .collect()
        }
    }

    fn cols(ids: &[&str]) -> Vec<ColumnRef> {
        ids.iter().map(|id| Column::new(*id).into_ref()).collect()
    }

    #[test]
    fn creates_then_shifts_window() {
        let mut fx = Fixture::new();
        let all = cols(&["A", "B", "C", "D"]);
        let (a, b, c, d) = (&all[0], &all[1], &all[2], &all[3]);

        let first = fx.run(Segment::Center, &[a.clone(), b.clone(), c.clone()], &all, false);
        assert_eq!(first.created, 3);
        assert_eq!(first.destroyed, 0);

        let second = fx.run(Segment::Center, &[b.clone(), c.clone(), d.clone()], &all, false);
        assert_eq!(
            second,
            ReconcileReport { created: 1, kept: 2, destroyed: 1, retained: 0, moved: 0 }
        );
        assert!(fx.registry.is_cleared(a.id()));
        assert_eq!(fx.child_ids(fx.center), vec!["B", "C", "D"]);
        assert_eq!(fx.factory.count("destroy:A"), 1);
    }

    #[test]
    fn second_identical_pass_does_nothing() {
        let mut fx = Fixture::new();
        let all = cols(&["A", "B", "C"]);
        fx.run(Segment::Center, &all, &all, true);
        let again = fx.run(Segment::Center, &all, &all, true);
        assert!(!again.any_work());
        assert_eq!(again.kept, 3);
    }

    #[test]
    fn editing_cell_survives_viewport_clip() {
        let mut fx = Fixture::new();
        let all = cols(&["A", "B"]);
        fx.run(Segment::Center, &all, &all, false);
        fx.factory.set_editing("A", true);

        let report = fx.run(Segment::Center, &all[1..], &all, false);
        assert_eq!(report.retained, 1);
        assert_eq!(report.destroyed, 0);
        assert!(fx.registry.live(all[0].id()).is_some());
    }

    #[test]
    fn editing_cell_goes_when_column_leaves_grid() {
        let mut fx = Fixture::new();
        let all = cols(&["A", "B"]);
        fx.run(Segment::Center, &all, &all, false);
        fx.factory.set_editing("A", true);

        let report = fx.run(Segment::Center, &all[1..], &all[1..], false);
        assert_eq!(report.destroyed, 1);
        assert!(fx.registry.is_cleared(all[0].id()));
    }

    #[test]
    fn focused_cell_survives_only_while_displayed() {
        let mut fx = Fixture::new();
        let all = cols(&["A", "B"]);
        fx.run(Segment::Center, &all, &all, false);
        fx.focus.set_focused_cell(CellPosition {
            row_index: Some(0),
            row_pinned: None,
            column: ColumnId::new("A"),
        });

        let clipped = fx.run(Segment::Center, &all[1..], &all, false);
        assert_eq!(clipped.retained, 1);

        let removed = fx.run(Segment::Center, &all[1..], &all[1..], false);
        assert_eq!(removed.destroyed, 1);
        assert!(fx.registry.is_cleared(all[0].id()));
    }

    #[test]
    fn rebuilt_column_with_same_id_is_recreated() {
        let mut fx = Fixture::new();
        let all = cols(&["A"]);
        fx.run(Segment::Center, &all, &all, false);

        let rebuilt = cols(&["A"]);
        let report = fx.run(Segment::Center, &rebuilt, &rebuilt, false);
        assert_eq!(report.created, 1);
        assert_eq!(report.destroyed, 1);
        assert_eq!(report.kept, 0);
        let slot = fx.registry.live(rebuilt[0].id()).map(|s| Rc::ptr_eq(&s.column, &rebuilt[0]));
        assert_eq!(slot, Some(true));
        assert_eq!(fx.child_ids(fx.center), vec!["A"]);
    }

    #[test]
    fn column_moving_segment_is_rebuilt_there() {
        let mut fx = Fixture::new();
        let all = cols(&["A", "B"]);
        fx.run(Segment::Center, &all, &all, false);

        fx.run(Segment::Center, &all[1..], &all, false);
        let report = fx.run(Segment::Left, &all[..1], &all, false);
        assert_eq!(report.created, 1);
        assert_eq!(fx.child_ids(fx.left), vec!["A"]);
        assert_eq!(fx.child_ids(fx.center), vec!["B"]);
    }

    #[test]
    fn reorders_only_when_asked() {
        let mut fx = Fixture::new();
        let all = cols(&["A", "B", "C"]);
        fx.run(Segment::Center, &all[1..], &all, false);
        // A is appended after B and C.
        let unordered = fx.run(Segment::Center, &all, &all, false);
        assert_eq!(unordered.moved, 0);
        assert_eq!(fx.child_ids(fx.center), vec!["B", "C", "A"]);

        let mut fx = Fixture::new();
        fx.run(Segment::Center, &all[1..], &all, true);
        let ordered = fx.run(Segment::Center, &all, &all, true);
        assert!(ordered.moved > 0);
        assert_eq!(fx.child_ids(fx.center), vec!["A", "B", "C"]);
    }

    #[test]
    fn destroying_cleared_slot_is_noop() {
        let mut fx = Fixture::new();
        let all = cols(&["A"]);
        fx.run(Segment::Center, &all, &all, false);
        assert!(destroy_slot(&mut fx.registry, &mut fx.dom, all[0].id()));
        assert!(!destroy_slot(&mut fx.registry, &mut fx.dom, all[0].id()));
        assert_eq!(fx.factory.count("destroy:A"), 1);
    }

    const IDS: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

    /// One column-model change as seen by a single segment.
    #[derive(Debug, Clone)]
    struct Step {
        target: Vec<bool>,
        also_displayed: Vec<bool>,
        editing: Vec<bool>,
        focused: Option<usize>,
    }

    fn step() -> impl Strategy<Value = Step> {
        (
            prop::collection::vec(any::<bool>(), IDS.len()),
            prop::collection::vec(any::<bool>(), IDS.len()),
            prop::collection::vec(any::<bool>(), IDS.len()),
            prop::option::of(0..IDS.len()),
        )
            .prop_map(|(target, also_displayed, editing, focused)| Step {
                target,
                also_displayed,
                editing,
                focused,
            })
    }

    fn pick(columns: &[ColumnRef], mask: &[bool]) -> Vec<ColumnRef> {
        columns
            .iter()
            .zip(mask)
            .filter(|(_, on)| **on)
            .map(|(column, _)| Rc::clone(column))
            .collect()
    }

    proptest! {
        #[test]
        fn any_sequence_converges_to_target_plus_exemptions(
            steps in prop::collection::vec(step(), 1..12),
            ensure_order in any::<bool>(),
        ) {
            let mut fx = Fixture::new();
            let columns = cols(&IDS);
            for step in steps {
                let target = pick(&columns, &step.target);
                let shown: Vec<bool> = step
                    .target
                    .iter()
                    .zip(&step.also_displayed)
                    .map(|(t, extra)| *t || *extra)
                    .collect();
                let all = pick(&columns, &shown);
                for (i, id) in IDS.iter().enumerate() {
                    fx.factory.set_editing(id, step.editing[i]);
                }
                match step.focused {
                    Some(i) => fx.focus.set_focused_cell(CellPosition {
                        row_index: Some(0),
                        row_pinned: None,
                        column: ColumnId::new(IDS[i]),
                    }),
                    None => fx.focus.clear(),
                }

                let before: BTreeSet<ColumnId> = fx.registry.live_ids_in(Segment::Center).into_iter().collect();
                fx.run(Segment::Center, &target, &all, ensure_order);

                let expected: BTreeSet<ColumnId> = (0..IDS.len())
                    .filter(|&i| {
                        let busy = step.editing[i] || step.focused == Some(i);
                        let survives = before.contains(&ColumnId::new(IDS[i])) && busy && shown[i];
                        step.target[i] || survives
                    })
                    .map(|i| ColumnId::new(IDS[i]))
                    .collect();
                let live: BTreeSet<ColumnId> = fx.registry.live_ids_in(Segment::Center).into_iter().collect();
                prop_assert_eq!(&live, &expected);
                prop_assert_eq!(fx.child_ids(fx.center).len(), live.len());

                let again = fx.run(Segment::Center, &target, &all, ensure_order);
                prop_assert!(!again.any_work(), "second pass changed the segment: {:?}", again);
            }
        }
    }
}
