//! Harness: a grid body with fake collaborators for driving row controllers.

use std::rc::Rc;

use crate::config::GridOptions;
use crate::controller::{RowController, SharedRowController};
use crate::css::RowStyleHooks;
use crate::dom::{Dom, NodeData, NodeId, SharedDom};
use crate::event::EventQueue;
use crate::render::SecondPassDriver;
use crate::row::RowNode;
use crate::segment::RowContainers;
use crate::services::{Collaborators, GridServices};

use super::fakes::{
    FakeFocus, FakeResizeObserver, FakeResolver, FakeRowModel, FakeScopeProvider, FakeSelection,
    FixedPagination, RecordingCellFactory, StaticColumnModel,
};

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// A headless grid body for testing row controllers.
///
/// Owns the DOM with one container per segment, every fake collaborator and
/// the [`GridServices`] wired to them. Tests keep the fakes to steer the
/// models and inspect what rows did.
///
/// # Examples
///
/// ```
/// use gilt_grid::column::Column;
/// use gilt_grid::config::GridOptions;
/// use gilt_grid::row::RowNode;
/// use gilt_grid::segment::Segment;
/// use gilt_grid::testing::Harness;
///
/// let harness = Harness::new(GridOptions::default());
/// harness.columns.set_center(vec![Column::new("a").into_ref()]);
/// let row = harness.create_row(RowNode::new("r0").at_index(0));
/// assert_eq!(row.borrow().cell_ids(Segment::Center).len(), 1);
/// ```
pub struct Harness {
    pub dom: SharedDom,
    pub body: NodeId,
    pub containers: RowContainers,
    pub columns: Rc<StaticColumnModel>,
    pub pagination: Rc<FixedPagination>,
    pub cells: Rc<RecordingCellFactory>,
    pub resolver: Rc<FakeResolver>,
    pub events: Rc<EventQueue>,
    pub focus: Rc<FakeFocus>,
    pub selection: Rc<FakeSelection>,
    pub resize: Rc<FakeResizeObserver>,
    pub row_model: Rc<FakeRowModel>,
    pub scopes: Rc<FakeScopeProvider>,
    pub services: GridServices,
}

impl Harness {
    /// Build a grid body with `options` and no columns.
    pub fn new(options: GridOptions) -> Self {
        let dom = Dom::shared();
        let (body, containers) = {
            let mut dom = dom.borrow_mut();
            let body = dom.create(NodeData::new("div").with_class("grid-body"));
            let mut container = |class: &str| dom.create_child(body, NodeData::new("div").with_class(class));
            let containers = RowContainers {
                left: container("grid-pinned-left-cols-container"),
                center: container("grid-center-cols-container"),
                right: container("grid-pinned-right-cols-container"),
                full_width: container("grid-full-width-container"),
            };
            (body, containers)
        };

        let columns = Rc::new(StaticColumnModel::new());
        let pagination = Rc::new(FixedPagination::new());
        let cells = Rc::new(RecordingCellFactory::new());
        let resolver = Rc::new(FakeResolver::new());
        let events = Rc::new(EventQueue::new());
        let focus = Rc::new(FakeFocus::new());
        let selection = Rc::new(FakeSelection::new());
        let resize = Rc::new(FakeResizeObserver::new());
        let row_model = Rc::new(FakeRowModel::new());
        let scopes = Rc::new(FakeScopeProvider::new());

        let services = GridServices::new(
            options,
            Collaborators {
                dom: Rc::clone(&dom),
                columns: columns.clone(),
                pagination: pagination.clone(),
                cell_factory: cells.clone(),
                full_width: resolver.clone(),
                events: events.clone(),
                focus: focus.clone(),
            },
        )
        .with_selection(selection.clone())
        .with_scope_provider(scopes.clone())
        .with_resize_observer(resize.clone())
        .with_row_model(row_model.clone());

        Self {
            dom,
            body,
            containers,
            columns,
            pagination,
            cells,
            resolver,
            events,
            focus,
            selection,
            resize,
            row_model,
            scopes,
            services,
        }
    }

    /// Install row style and class hooks for rows created from now on.
    pub fn with_style_hooks(mut self, hooks: Rc<dyn RowStyleHooks>) -> Self {
        self.services = self.services.with_style_hooks(hooks);
        self
    }

    // ── Rows ─────────────────────────────────────────────────────────

    /// Create a row controller without animation, building cells now.
    pub fn create_row(&self, row: RowNode) -> SharedRowController {
        self.create_row_with(row, false, false)
    }

    pub fn create_row_with(&self, row: RowNode, animate_in: bool, use_frame_for_create: bool) -> SharedRowController {
        RowController::new(
            row.into_ref(),
            self.services.clone(),
            self.containers,
            animate_in,
            use_frame_for_create,
        )
    }

    // ── Processing ───────────────────────────────────────────────────

    /// Simulate one frame: run every queued frame task, then deferred work.
    /// Tasks scheduled for the next frame stay queued.
    pub fn flush(&self) {
        self.services.frames.flush_all_frames();
        self.services.frames.run_deferred();
    }

    /// Run the create second pass of `row`, as after the first paint.
    pub fn run_create_pass(&self, row: &SharedRowController) -> usize {
        let mut driver = SecondPassDriver::new();
        driver.collect_from(&mut row.borrow_mut());
        driver.run_create_pass()
    }

    /// Run the remove second pass of `row`, as after the exit animation.
    pub fn run_remove_pass(&self, row: &SharedRowController) -> usize {
        let mut driver = SecondPassDriver::new();
        driver.collect_from(&mut row.borrow_mut());
        driver.run_remove_pass()
    }

    // ── Inspection ───────────────────────────────────────────────────

    /// Snapshot of the whole grid body.
    pub fn render(&self) -> String {
        super::dom_to_string(&self.dom.borrow(), self.body)
    }

    /// Snapshot of one container's rows.
    pub fn render_container(&self, container: NodeId) -> String {
        super::snapshot::children_to_string(&self.dom.borrow(), container)
    }

    /// Whether `element` still exists.
    pub fn exists(&self, element: NodeId) -> bool {
        self.dom.borrow().contains(element)
    }
}
