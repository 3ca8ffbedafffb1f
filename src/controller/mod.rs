//! Row controller: one visible row, its segment elements and its cells.
//!
//! A controller is built when its row scrolls into view and destroyed exactly
//! once when it leaves. It owns every element and cell it creates; the row
//! itself belongs to the row model.
//!
//! Controllers are shared as `Rc<RefCell<RowController>>`. Work the controller
//! schedules on the frame queue or second-pass queues holds only a weak
//! handle and does nothing once the row is destroyed. The host must not hold
//! a borrow of the controller while it runs those queues.

mod editing;
mod mouse;
mod sync;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::cell::reconcile::destroy_slot;
use crate::cell::{reconcile, CellComp, CellRegistry, CellSlot, ReconcileContext, ReconcileReport};
use crate::column::{contains_column, ColumnId, ColumnRef};
use crate::css::classes::{self, ClassContext};
use crate::css::{initial_classes, row_attributes, AppliedHooks};
use crate::dom::{NodeData, NodeId};
use crate::event::{GridEvent, RowEventRecord};
use crate::full_width::{CreateOutcome, FullWidthManager, FullWidthParams, RendererKind};
use crate::logging::targets;
use crate::render::{SecondPassQueues, Task};
use crate::row::position::{clamp_to_viewport, px, row_top_pixels, write_row_top};
use crate::row::{classify, ClassifyFlags, RowMode, RowPosition, RowRef};
use crate::segment::{RowContainers, Segment};
use crate::services::{GridServices, RowScope};

/// Shared handle to a row controller.
pub type SharedRowController = Rc<RefCell<RowController>>;

/// Exit-animation step, run synchronously by an animated destroy.
type FirstPass = Box<dyn FnOnce(&mut RowController)>;

/// Renders one row and keeps it in sync with the row, column and pagination
/// models.
pub struct RowController {
    row: RowRef,
    mode: RowMode,
    services: GridServices,
    containers: RowContainers,
    self_ref: Weak<RefCell<RowController>>,
    active: bool,
    /// Row element per segment the row renders into.
    elements: BTreeMap<Segment, NodeId>,
    cells: CellRegistry,
    full_width: Option<FullWidthManager>,
    editing: bool,
    focused: bool,
    first_on_page: bool,
    last_on_page: bool,
    pagination_page: usize,
    /// Cell segments whose first build has finished.
    segments_ready: usize,
    /// A reconcile was requested before every segment was built.
    reconcile_needed: bool,
    /// A reconcile is queued on the frame service.
    reconcile_pending: bool,
    /// A column moved; the next reconcile reorders even without creates.
    dom_order_stale: bool,
    poll_scheduled: bool,
    second_pass: SecondPassQueues,
    remove_first_pass: Vec<FirstPass>,
    hooks: AppliedHooks,
    scope: Option<Rc<dyn RowScope>>,
}

impl RowController {
    /// Build a controller for `row` and render it into `containers`.
    ///
    /// With `animate_in` the row slides in from its previous position, or
    /// fades in when it had none; the motion starts when the create second
    /// pass runs. With `use_frame_for_create` the initial cells are built
    /// from the frame queue, one segment per task.
    pub fn new(
        row: RowRef,
        services: GridServices,
        containers: RowContainers,
        animate_in: bool,
        use_frame_for_create: bool,
    ) -> SharedRowController {
        let flags = ClassifyFlags {
            master_detail: services.options.master_detail,
            group_use_entire_row: services.options.group_use_entire_row,
            pivot_mode: services.columns.is_pivot_mode(),
        };
        let mode = classify(&row.borrow(), flags);
        let full_width = RendererKind::for_mode(mode).map(FullWidthManager::new);

        let controller = Rc::new_cyclic(|weak| {
            RefCell::new(RowController {
                row,
                mode,
                services,
                containers,
                self_ref: weak.clone(),
                active: true,
                elements: BTreeMap::new(),
                cells: CellRegistry::new(),
                full_width,
                editing: false,
                focused: false,
                first_on_page: false,
                last_on_page: false,
                pagination_page: 0,
                segments_ready: 0,
                reconcile_needed: false,
                reconcile_pending: false,
                dom_order_stale: false,
                poll_scheduled: false,
                second_pass: SecondPassQueues::new(),
                remove_first_pass: Vec::new(),
                hooks: AppliedHooks::new(),
                scope: None,
            })
        });
        controller.borrow_mut().init(animate_in, use_frame_for_create);
        controller
    }

    fn init(&mut self, animate_in: bool, use_frame_for_create: bool) {
        let options = Rc::clone(&self.services.options);
        self.scope = match &self.services.scope_provider {
            Some(provider) => provider.create_row_scope(&self.row.borrow()),
            None => None,
        };
        self.focused = self.services.focus.is_row_focused(self.row_position());
        self.pagination_page = self.services.pagination.current_page();
        (self.first_on_page, self.last_on_page) = self.page_edges();

        let animate = animate_in && !options.print_layout;
        let old_top = self.row.borrow().old_row_top;
        let slide_in = animate && old_top.is_some();
        let fade_in = animate && !slide_in;

        let class_list = initial_classes(
            &self.row.borrow(),
            ClassContext {
                mode: self.mode,
                focused: self.focused,
                first_on_page: self.first_on_page,
                last_on_page: self.last_on_page,
                print_layout: options.print_layout,
                fade_in,
                editing: self.editing,
            },
        );
        {
            let mut dom = self.services.dom.borrow_mut();
            for segment in self.segments() {
                let data = NodeData::new("div").with_classes(class_list.iter().cloned());
                let element = dom.create_child(self.containers.get(segment), data);
                self.elements.insert(segment, element);
            }
        }
        self.write_attributes();
        self.write_height();

        let start_top = match (slide_in, old_top) {
            (true, Some(old)) => Some(clamp_to_viewport(&self.row.borrow(), self.services.pagination.as_ref(), old)),
            _ => self.row.borrow().row_top,
        };
        if let Some(top) = start_top {
            self.set_row_top(top);
        }
        if slide_in {
            let task = self.weak_task(|c| c.on_top_changed());
            self.second_pass.push_create(task);
        }
        if fade_in {
            let task = self.weak_task(|c| c.set_class_everywhere(classes::OPACITY_ZERO, false));
            self.second_pass.push_create(task);
        }
        if !options.print_layout {
            self.remove_first_pass.push(Box::new(|c: &mut RowController| {
                let top = c.row.borrow().row_top;
                match top {
                    Some(top) => {
                        let bounded = clamp_to_viewport(&c.row.borrow(), c.services.pagination.as_ref(), top);
                        c.set_row_top(bounded);
                    }
                    None => c.set_class_everywhere(classes::OPACITY_ZERO, true),
                }
            }));
        }

        match self.mode {
            RowMode::Normal => self.build_cells(use_frame_for_create && options.defers_row_work()),
            _ => self.build_full_width(),
        }
        self.apply_style_hooks();

        tracing::debug!(
            target: targets::ROW,
            row = %self.row.borrow().id,
            mode = ?self.mode,
            segments = self.elements.len(),
            slide_in,
            fade_in,
            "row controller created"
        );
    }

    // ----- public API -----

    pub fn row(&self) -> &RowRef {
        &self.row
    }

    pub fn mode(&self) -> RowMode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn row_position(&self) -> RowPosition {
        self.row.borrow().position()
    }

    /// The row element in `segment`, if the row renders there.
    pub fn segment_element(&self, segment: Segment) -> Option<NodeId> {
        self.elements.get(&segment).copied()
    }

    /// The cell showing `column`: its own cell, or a spanning cell that
    /// covers it.
    pub fn rendered_cell_for_column(&self, column: &ColumnRef) -> Option<&dyn CellComp> {
        if let Some(slot) = self.cells.live(column.id()) {
            return Some(slot.comp.as_ref());
        }
        self.cells
            .iter_live()
            .find(|slot| contains_column(&slot.comp.col_span_list(), column))
            .map(|slot| slot.comp.as_ref())
    }

    /// Column ids with a live cell in `segment`.
    pub fn cell_ids(&self, segment: Segment) -> Vec<ColumnId> {
        self.cells.live_ids_in(segment)
    }

    /// Throw away the cell for `column` and build a fresh one.
    pub fn force_refresh_cell(&mut self, column: &ColumnId) {
        if !self.active {
            return;
        }
        let destroyed = destroy_slot(&mut self.cells, &mut self.services.dom.borrow_mut(), column);
        if destroyed {
            self.request_reconcile();
        }
    }

    /// Refresh full-width renderers in place. `false` tells the caller to
    /// rebuild the row instead; always `false` for normal rows.
    pub fn refresh_full_width(&mut self) -> bool {
        match self.full_width.as_mut() {
            Some(manager) if self.active => manager.refresh(),
            _ => false,
        }
    }

    /// Take the queued create-second-pass actions. Empty afterwards.
    pub fn take_create_second_pass(&mut self) -> Vec<Task> {
        self.second_pass.take_create()
    }

    /// Take the queued remove-second-pass actions. Empty afterwards.
    pub fn take_remove_second_pass(&mut self) -> Vec<Task> {
        self.second_pass.take_remove()
    }

    /// Position the row at a logical pixel offset. Does nothing in print
    /// layout, where rows follow normal flow.
    pub fn set_row_top(&self, pixels: f64) {
        let options = &self.services.options;
        if options.print_layout {
            return;
        }
        let top = row_top_pixels(&self.row.borrow(), self.services.pagination.as_ref(), pixels);
        let elements = self.element_ids();
        write_row_top(&mut self.services.dom.borrow_mut(), &elements, top, options.suppress_row_transform);
    }

    /// Tear the row down. A second call does nothing.
    ///
    /// With `animate`, the exit animation starts now and the elements and
    /// cells are released by the remove second pass.
    pub fn destroy(&mut self, animate: bool) {
        if !self.active {
            return;
        }
        self.active = false;
        self.publish_row_event(GridEvent::VirtualRowRemoved);

        let remains = Remains {
            cells: self.cells.drain_live(),
            full_width: self.full_width.take(),
            elements: self.element_ids(),
            scope: self.scope.take(),
        };
        if animate {
            for first_pass in std::mem::take(&mut self.remove_first_pass) {
                first_pass(self);
            }
            let services = self.services.clone();
            self.second_pass.push_remove(Box::new(move || remains.release(&services)));
        } else {
            remains.release(&self.services);
        }
        self.elements.clear();

        tracing::debug!(target: targets::ROW, row = %self.row.borrow().id, animate, "row controller destroyed");
    }

    // ----- cells -----

    fn build_cells(&mut self, deferred: bool) {
        for segment in Segment::CELL_SEGMENTS {
            if !self.elements.contains_key(&segment) {
                self.segment_ready();
                continue;
            }
            if deferred {
                let task = self.weak_task(move |c| c.build_segment(segment));
                self.services.frames.schedule(self.frame_key(), task);
            } else {
                self.build_segment(segment);
            }
        }
    }

    fn build_segment(&mut self, segment: Segment) {
        self.reconcile_segment(segment, false);
        self.segment_ready();
    }

    fn segment_ready(&mut self) {
        self.segments_ready += 1;
        if self.segments_ready == Segment::CELL_SEGMENTS.len() && std::mem::take(&mut self.reconcile_needed) {
            self.request_reconcile();
        }
    }

    /// Ask for the cells to be brought in line with the column model.
    ///
    /// Requests made before the first build finishes are replayed after it.
    /// Otherwise they coalesce into one frame task unless work is not
    /// deferred at all.
    pub(crate) fn request_reconcile(&mut self) {
        if !self.active || self.mode != RowMode::Normal {
            return;
        }
        if self.segments_ready < Segment::CELL_SEGMENTS.len() {
            self.reconcile_needed = true;
            return;
        }
        if !self.services.options.defers_row_work() {
            self.reconcile_all();
            return;
        }
        if self.reconcile_pending {
            return;
        }
        self.reconcile_pending = true;
        let task = self.weak_task(|c| {
            c.reconcile_pending = false;
            c.reconcile_all();
        });
        self.services.frames.schedule(self.frame_key(), task);
    }

    fn reconcile_all(&mut self) -> ReconcileReport {
        let force_order = std::mem::take(&mut self.dom_order_stale);
        let mut report = ReconcileReport::default();
        for segment in Segment::CELL_SEGMENTS {
            report.merge(self.reconcile_segment(segment, force_order));
        }
        report
    }

    fn reconcile_segment(&mut self, segment: Segment, force_order: bool) -> ReconcileReport {
        let Some(&element) = self.elements.get(&segment) else {
            return ReconcileReport::default();
        };
        let target = self.columns_for(segment);
        let all = self.services.columns.all_displayed_columns();
        let mut dom = self.services.dom.borrow_mut();
        let mut ctx = ReconcileContext {
            dom: &mut *dom,
            factory: self.services.cell_factory.as_ref(),
            focus: self.services.focus.as_ref(),
            row: &self.row,
            segment,
            segment_element: element,
            all_displayed: &all,
            editing_row: self.editing,
            ensure_dom_order: self.services.options.ensure_dom_order,
            force_order,
            scope: self.scope.clone(),
        };
        reconcile(&mut self.cells, &mut ctx, &target)
    }

    /// Target columns for a segment. Print layout puts every column in the
    /// center.
    fn columns_for(&self, segment: Segment) -> Vec<ColumnRef> {
        let columns = &self.services.columns;
        if self.services.options.print_layout {
            return match segment {
                Segment::Center => columns.all_displayed_columns(),
                _ => Vec::new(),
            };
        }
        let row = self.row.borrow();
        match segment {
            Segment::Center => columns.viewport_center_columns_for(&row),
            Segment::Left => columns.pinned_left_columns_for(&row),
            Segment::Right => columns.pinned_right_columns_for(&row),
            Segment::FullWidth => Vec::new(),
        }
    }

    // ----- full width -----

    fn build_full_width(&mut self) {
        let Some(mut manager) = self.full_width.take() else {
            return;
        };
        let targets: Vec<(Segment, NodeId)> = self.elements.iter().map(|(s, e)| (*s, *e)).collect();
        let mut pending = false;
        for (segment, element) in targets {
            let params = self.full_width_params(segment, element);
            let mut dom = self.services.dom.borrow_mut();
            pending |= manager.create(&self.services, &mut dom, params) == CreateOutcome::Pending;
        }
        self.full_width = Some(manager);
        if pending {
            self.schedule_poll(false);
        }
    }

    fn full_width_params(&self, segment: Segment, element: NodeId) -> FullWidthParams {
        FullWidthParams {
            row: Rc::clone(&self.row),
            row_index: self.row.borrow().row_index,
            pinned: segment.pinned(),
            segment,
            element,
            scope: self.scope.clone(),
        }
    }

    /// Poll deferred renderers from the frame queue until they resolve. This
    /// goes through the queue even when row work is synchronous; there is
    /// nothing to wait for synchronously.
    fn schedule_poll(&mut self, next_frame: bool) {
        if self.poll_scheduled {
            return;
        }
        self.poll_scheduled = true;
        let task = self.weak_task(|c| {
            c.poll_scheduled = false;
            c.poll_full_width();
        });
        if next_frame {
            self.services.frames.schedule_next_frame(self.frame_key(), task);
        } else {
            self.services.frames.schedule(self.frame_key(), task);
        }
    }

    fn poll_full_width(&mut self) {
        let Some(manager) = self.full_width.as_mut() else {
            return;
        };
        let outstanding = {
            let mut dom = self.services.dom.borrow_mut();
            manager.poll_deferred(&self.services, &mut dom)
        };
        if outstanding {
            self.schedule_poll(true);
        }
    }

    // ----- elements -----

    /// Segments this row renders into.
    fn segments(&self) -> Vec<Segment> {
        let options = &self.services.options;
        if options.print_layout {
            vec![Segment::Center]
        } else if self.mode.is_full_width() && !options.embed_full_width_rows {
            vec![Segment::FullWidth]
        } else {
            Segment::CELL_SEGMENTS.to_vec()
        }
    }

    fn element_ids(&self) -> Vec<NodeId> {
        self.elements.values().copied().collect()
    }

    fn update_elements(&self, mut update: impl FnMut(&mut NodeData)) {
        let mut dom = self.services.dom.borrow_mut();
        for &element in self.elements.values() {
            if let Some(data) = dom.get_mut(element) {
                update(data);
            }
        }
    }

    fn set_class_everywhere(&self, class: &str, on: bool) {
        self.update_elements(|data| data.set_class(class, on));
    }

    fn write_attributes(&self) {
        let attributes = row_attributes(&self.row.borrow(), self.services.options.header_row_count);
        self.update_elements(|data| {
            for (name, value) in &attributes {
                match value {
                    Some(value) => data.set_attribute(name, value.clone()),
                    None => data.remove_attribute(name),
                }
            }
        });
    }

    fn write_height(&self) {
        let height = self.row.borrow().row_height;
        if let Some(height) = height {
            self.update_elements(|data| data.set_style("height", px(height)));
        }
    }

    fn apply_style_hooks(&mut self) {
        let Some(hooks) = self.services.style_hooks.clone() else {
            return;
        };
        let elements = self.element_ids();
        let mut dom = self.services.dom.borrow_mut();
        self.hooks.apply(&mut dom, &elements, hooks.as_ref(), &self.row.borrow());
    }

    /// Whether the row is first and last on the current page.
    fn page_edges(&self) -> (bool, bool) {
        let index = self.row.borrow().row_index;
        let pagination = &self.services.pagination;
        (
            index == Some(pagination.page_first_row()),
            index == Some(pagination.page_last_row()),
        )
    }

    // ----- scheduling -----

    /// Frame queue key: rows nearer the top run first, unplaced rows last.
    fn frame_key(&self) -> usize {
        self.row.borrow().row_index.unwrap_or(usize::MAX)
    }

    /// Wrap work for a queue. It runs only while the controller is alive and
    /// active.
    fn weak_task(&self, work: impl FnOnce(&mut RowController) + 'static) -> Task {
        let weak = self.self_ref.clone();
        Box::new(move || {
            let Some(controller) = weak.upgrade() else {
                return;
            };
            let mut controller = controller.borrow_mut();
            if controller.active {
                work(&mut *controller);
            }
        })
    }

    fn row_record(&self) -> RowEventRecord {
        RowEventRecord::from_row(&self.row.borrow())
    }

    fn publish_row_event(&self, event: fn(RowEventRecord) -> GridEvent) {
        self.services.events.publish(event(self.row_record()));
    }
}

impl std::fmt::Debug for RowController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowController")
            .field("row", &self.row.borrow().id)
            .field("mode", &self.mode)
            .field("active", &self.active)
            .field("editing", &self.editing)
            .field("segments", &self.elements.keys().collect::<Vec<_>>())
            .field("cells", &self.cells.live_count())
            .finish_non_exhaustive()
    }
}

/// Everything a destroyed row still owns until it is released.
struct Remains {
    cells: Vec<CellSlot>,
    full_width: Option<FullWidthManager>,
    elements: Vec<NodeId>,
    scope: Option<Rc<dyn RowScope>>,
}

impl Remains {
    fn release(mut self, services: &GridServices) {
        {
            let mut dom = services.dom.borrow_mut();
            for mut slot in self.cells {
                slot.comp.detach(&mut dom);
                slot.comp.destroy(&mut dom);
            }
            if let Some(manager) = self.full_width.as_mut() {
                manager.teardown(services, &mut dom);
            }
            for element in self.elements {
                dom.remove(element);
            }
        }
        if let Some(scope) = self.scope {
            scope.destroy();
        }
    }
}
