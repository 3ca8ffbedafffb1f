//! Grid-wide collaborators a row controller talks to.
//!
//! Everything here is owned by the grid and shared by every row. Rows hold
//! clones of the [`GridServices`] bundle; no collaborator holds a row.

use std::cell::RefCell;
use std::rc::Rc;

use crate::cell::{CellFactory, CellPosition};
use crate::column::ColumnModel;
use crate::config::GridOptions;
use crate::css::RowStyleHooks;
use crate::dom::{NodeId, SharedDom};
use crate::event::EventBus;
use crate::full_width::{DetailRowCache, FullWidthResolver};
use crate::render::AnimationFrameService;
use crate::row::{PaginationModel, RowNode, RowPosition, RowRef};

/// Tracks the focused cell.
pub trait FocusTracker {
    fn is_cell_focused(&self, position: &CellPosition) -> bool;

    fn is_row_focused(&self, position: RowPosition) -> bool;

    fn set_focused_cell(&self, position: CellPosition);
}

/// A selection change requested by a row click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRequest {
    pub new_value: bool,
    /// Deselect every other row first.
    pub clear_selection: bool,
    /// Extend from the last selected row to this one.
    pub range_select: bool,
}

/// Applies selection changes. The row controller only decides what a click
/// asks for.
pub trait SelectionService {
    fn set_selected(&self, row: &RowRef, request: SelectionRequest);
}

/// Host template scope bound to one row.
pub trait RowScope {
    fn destroy(&self);
}

/// Optional host template integration. Rows work without one.
pub trait ScopeProvider {
    fn create_row_scope(&self, row: &RowNode) -> Option<Rc<dyn RowScope>>;
}

/// Called with the observed content height in pixels.
pub type ResizeCallback = Box<dyn Fn(f64)>;

/// Removes a resize subscription.
pub type Unsubscribe = Box<dyn FnOnce()>;

/// Observes element content size.
pub trait ResizeObserver {
    fn observe(&self, element: NodeId, on_resize: ResizeCallback) -> Unsubscribe;

    /// Current content height, if the element has been laid out.
    fn content_height(&self, element: NodeId) -> Option<f64>;
}

/// Row-model reactions to row-level changes made by a controller.
pub trait RowModelHooks {
    /// A row's height was changed outside of the row model.
    fn on_row_height_changed(&self);
}

/// The required collaborators, passed to [`GridServices::new`].
pub struct Collaborators {
    pub dom: SharedDom,
    pub columns: Rc<dyn ColumnModel>,
    pub pagination: Rc<dyn PaginationModel>,
    pub cell_factory: Rc<dyn CellFactory>,
    pub full_width: Rc<dyn FullWidthResolver>,
    pub events: Rc<dyn EventBus>,
    pub focus: Rc<dyn FocusTracker>,
}

/// Services shared by every row controller of one grid.
#[derive(Clone)]
pub struct GridServices {
    pub options: Rc<GridOptions>,
    pub dom: SharedDom,
    pub columns: Rc<dyn ColumnModel>,
    pub pagination: Rc<dyn PaginationModel>,
    pub cell_factory: Rc<dyn CellFactory>,
    pub full_width: Rc<dyn FullWidthResolver>,
    pub events: Rc<dyn EventBus>,
    pub focus: Rc<dyn FocusTracker>,
    pub frames: Rc<AnimationFrameService>,
    pub detail_cache: Rc<RefCell<DetailRowCache>>,
    pub selection: Option<Rc<dyn SelectionService>>,
    pub scope_provider: Option<Rc<dyn ScopeProvider>>,
    pub resize_observer: Option<Rc<dyn ResizeObserver>>,
    pub row_model: Option<Rc<dyn RowModelHooks>>,
    pub style_hooks: Option<Rc<dyn RowStyleHooks>>,
}

impl GridServices {
    pub fn new(options: GridOptions, collaborators: Collaborators) -> Self {
        let frames = AnimationFrameService::new();
        let detail_cache = DetailRowCache::new(options.keep_detail_rows_count);
        Self {
            options: Rc::new(options),
            dom: collaborators.dom,
            columns: collaborators.columns,
            pagination: collaborators.pagination,
            cell_factory: collaborators.cell_factory,
            full_width: collaborators.full_width,
            events: collaborators.events,
            focus: collaborators.focus,
            frames: Rc::new(frames),
            detail_cache: Rc::new(RefCell::new(detail_cache)),
            selection: None,
            scope_provider: None,
            resize_observer: None,
            row_model: None,
            style_hooks: None,
        }
    }

    pub fn with_selection(mut self, selection: Rc<dyn SelectionService>) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn with_scope_provider(mut self, provider: Rc<dyn ScopeProvider>) -> Self {
        self.scope_provider = Some(provider);
        self
    }

    pub fn with_resize_observer(mut self, observer: Rc<dyn ResizeObserver>) -> Self {
        self.resize_observer = Some(observer);
        self
    }

    pub fn with_row_model(mut self, hooks: Rc<dyn RowModelHooks>) -> Self {
        self.row_model = Some(hooks);
        self
    }

    pub fn with_style_hooks(mut self, hooks: Rc<dyn RowStyleHooks>) -> Self {
        self.style_hooks = Some(hooks);
        self
    }
}
