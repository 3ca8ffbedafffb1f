//! In-memory collaborators that record what a row controller asks of them.
//!
//! Every fake uses interior mutability so a test can keep an `Rc` to it,
//! hand a clone to [`GridServices`](crate::services::GridServices) and
//! steer or inspect it while rows are alive.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::rc::Rc;

use tokio::sync::oneshot;

use crate::cell::{CellComp, CellFactory, CellParams, CellPosition, RefreshFlags};
use crate::column::{ColumnModel, ColumnRef};
use crate::dom::{Dom, NodeData, NodeId};
use crate::error::FullWidthError;
use crate::full_width::{FullWidthParams, FullWidthRenderer, FullWidthResolver, RendererKind, Resolved};
use crate::row::{PaginationModel, RowNode, RowPosition, RowRef};
use crate::services::{
    FocusTracker, ResizeCallback, ResizeObserver, RowModelHooks, RowScope, ScopeProvider, SelectionRequest,
    SelectionService, Unsubscribe,
};

// ---------------------------------------------------------------------------
// Column model
// ---------------------------------------------------------------------------

/// Column model with fixed left, center and right lists.
#[derive(Default)]
pub struct StaticColumnModel {
    left: RefCell<Vec<ColumnRef>>,
    center: RefCell<Vec<ColumnRef>>,
    right: RefCell<Vec<ColumnRef>>,
    /// Horizontal viewport over the center list; all of it when unset.
    viewport: RefCell<Option<Vec<ColumnRef>>>,
    pivot: Cell<bool>,
}

impl StaticColumnModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_left(&self, columns: Vec<ColumnRef>) {
        *self.left.borrow_mut() = columns;
    }

    pub fn set_center(&self, columns: Vec<ColumnRef>) {
        *self.center.borrow_mut() = columns;
    }

    pub fn set_right(&self, columns: Vec<ColumnRef>) {
        *self.right.borrow_mut() = columns;
    }

    /// Restrict the rendered center columns, as horizontal scrolling does.
    pub fn set_viewport(&self, columns: Option<Vec<ColumnRef>>) {
        *self.viewport.borrow_mut() = columns;
    }

    pub fn set_pivot(&self, on: bool) {
        self.pivot.set(on);
    }
}

impl ColumnModel for StaticColumnModel {
    fn all_displayed_columns(&self) -> Vec<ColumnRef> {
        let mut all = self.left.borrow().clone();
        all.extend(self.center.borrow().iter().cloned());
        all.extend(self.right.borrow().iter().cloned());
        all
    }

    fn viewport_center_columns_for(&self, _row: &RowNode) -> Vec<ColumnRef> {
        match self.viewport.borrow().as_ref() {
            Some(viewport) => viewport.clone(),
            None => self.center.borrow().clone(),
        }
    }

    fn pinned_left_columns_for(&self, _row: &RowNode) -> Vec<ColumnRef> {
        self.left.borrow().clone()
    }

    fn pinned_right_columns_for(&self, _row: &RowNode) -> Vec<ColumnRef> {
        self.right.borrow().clone()
    }

    fn is_pivot_mode(&self) -> bool {
        self.pivot.get()
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Pagination proxy with settable offset, scale and page bounds.
pub struct FixedPagination {
    page: Cell<usize>,
    first_row: Cell<usize>,
    last_row: Cell<usize>,
    pixel_offset: Cell<f64>,
    scale: Cell<f64>,
    scroll_range: Cell<(f64, f64)>,
}

impl Default for FixedPagination {
    fn default() -> Self {
        Self {
            page: Cell::new(0),
            first_row: Cell::new(0),
            last_row: Cell::new(9),
            pixel_offset: Cell::new(0.0),
            scale: Cell::new(1.0),
            scroll_range: Cell::new((0.0, 500.0)),
        }
    }
}

impl FixedPagination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_page(&self, page: usize) {
        self.page.set(page);
    }

    /// First and last row index of the current page.
    pub fn set_page_rows(&self, first: usize, last: usize) {
        self.first_row.set(first);
        self.last_row.set(last);
    }

    pub fn set_pixel_offset(&self, offset: f64) {
        self.pixel_offset.set(offset);
    }

    pub fn set_scale(&self, scale: f64) {
        self.scale.set(scale);
    }

    pub fn set_scroll_range(&self, top: f64, bottom: f64) {
        self.scroll_range.set((top, bottom));
    }
}

impl PaginationModel for FixedPagination {
    fn current_page(&self) -> usize {
        self.page.get()
    }

    fn page_first_row(&self) -> usize {
        self.first_row.get()
    }

    fn page_last_row(&self) -> usize {
        self.last_row.get()
    }

    fn pixel_offset(&self) -> f64 {
        self.pixel_offset.get()
    }

    fn real_pixel_position(&self, pixels: f64) -> f64 {
        pixels * self.scale.get()
    }

    fn vertical_scroll_range(&self) -> (f64, f64) {
        self.scroll_range.get()
    }
}

// ---------------------------------------------------------------------------
// Cells
// ---------------------------------------------------------------------------

#[derive(Default)]
struct CellLog {
    events: Vec<String>,
    /// Column ids whose cells report that they are editing.
    editing: BTreeSet<String>,
    spans: BTreeMap<String, Vec<ColumnRef>>,
}

/// Cell factory whose cells log `create:`, `refresh:`, `start:`, `stop:`
/// and `destroy:` events tagged with the column id.
#[derive(Default, Clone)]
pub struct RecordingCellFactory {
    log: Rc<RefCell<CellLog>>,
}

impl RecordingCellFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of logged events starting with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.log.borrow().events.iter().filter(|e| e.starts_with(prefix)).count()
    }

    pub fn events(&self) -> Vec<String> {
        self.log.borrow().events.clone()
    }

    pub fn events_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.log
            .borrow()
            .events
            .iter()
            .filter(|e| e.starts_with(prefix))
            .cloned()
            .collect()
    }

    pub fn clear_events(&self) {
        self.log.borrow_mut().events.clear();
    }

    /// Make cells of `column` report that they are (not) editing.
    pub fn set_editing(&self, column: &str, editing: bool) {
        let mut log = self.log.borrow_mut();
        if editing {
            log.editing.insert(column.to_string());
        } else {
            log.editing.remove(column);
        }
    }

    /// Cells of `column` span `covers`.
    pub fn set_span(&self, column: &str, covers: Vec<ColumnRef>) {
        self.log.borrow_mut().spans.insert(column.to_string(), covers);
    }
}

impl CellFactory for RecordingCellFactory {
    fn create_cell(&self, dom: &mut Dom, params: CellParams) -> Box<dyn CellComp> {
        let id = params.column.id().to_string();
        let element = dom.create(
            NodeData::new("div")
                .with_class("grid-cell")
                .with_attribute("col-id", id.clone()),
        );
        {
            let mut log = self.log.borrow_mut();
            log.events.push(format!("create:{id}"));
            if params.editing_row {
                log.editing.insert(id.clone());
            }
        }
        let position = params.row.borrow().position();
        Box::new(FakeCell {
            id,
            element,
            column: params.column,
            position,
            log: Rc::clone(&self.log),
        })
    }
}

struct FakeCell {
    id: String,
    element: NodeId,
    column: ColumnRef,
    position: RowPosition,
    log: Rc<RefCell<CellLog>>,
}

impl FakeCell {
    fn record(&self, event: String) {
        self.log.borrow_mut().events.push(event);
    }
}

impl CellComp for FakeCell {
    fn element(&self) -> NodeId {
        self.element
    }

    fn column(&self) -> &ColumnRef {
        &self.column
    }

    fn col_span_list(&self) -> Vec<ColumnRef> {
        match self.log.borrow().spans.get(&self.id) {
            Some(covers) => covers.clone(),
            None => vec![Rc::clone(&self.column)],
        }
    }

    fn cell_position(&self) -> CellPosition {
        CellPosition {
            row_index: self.position.row_index,
            row_pinned: self.position.pinned,
            column: self.column.id().clone(),
        }
    }

    fn is_editing(&self) -> bool {
        self.log.borrow().editing.contains(&self.id)
    }

    fn start_editing(&mut self, key: Option<&str>, char_press: Option<char>, is_source: bool) {
        let key = key.unwrap_or("-");
        let char_press = char_press.map_or_else(|| "-".to_string(), |c| c.to_string());
        self.record(format!("start:{}:{key}:{char_press}:{is_source}", self.id));
        self.log.borrow_mut().editing.insert(self.id.clone());
    }

    fn stop_editing(&mut self, _cancel: bool) {
        self.record(format!("stop:{}", self.id));
        self.log.borrow_mut().editing.remove(&self.id);
    }

    fn refresh(&mut self, _flags: RefreshFlags) {
        self.record(format!("refresh:{}", self.id));
    }

    fn destroy(&mut self, dom: &mut Dom) {
        self.record(format!("destroy:{}", self.id));
        dom.remove(self.element);
    }
}

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

/// Holds at most one focused cell.
#[derive(Default)]
pub struct FakeFocus {
    focused: RefCell<Option<CellPosition>>,
}

impl FakeFocus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_focused_cell(&self, position: CellPosition) {
        *self.focused.borrow_mut() = Some(position);
    }

    pub fn focused_cell(&self) -> Option<CellPosition> {
        self.focused.borrow().clone()
    }

    pub fn clear(&self) {
        *self.focused.borrow_mut() = None;
    }
}

impl FocusTracker for FakeFocus {
    fn is_cell_focused(&self, position: &CellPosition) -> bool {
        self.focused.borrow().as_ref() == Some(position)
    }

    fn is_row_focused(&self, position: RowPosition) -> bool {
        self.focused
            .borrow()
            .as_ref()
            .is_some_and(|cell| cell.row_index == position.row_index && cell.row_pinned == position.pinned)
    }

    fn set_focused_cell(&self, position: CellPosition) {
        FakeFocus::set_focused_cell(self, position);
    }
}

// ---------------------------------------------------------------------------
// Full-width renderers
// ---------------------------------------------------------------------------

/// How [`FakeResolver`] answers for one renderer kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveBehavior {
    #[default]
    Ready,
    /// Hand out a receiver; finish with [`FakeResolver::complete_next`].
    Deferred,
    /// Fail as if the renderer's module were not loaded.
    NotLoaded,
    /// Fail as if nothing were registered under the name.
    Unknown,
}

struct ResolverState {
    behaviors: HashMap<RendererKind, ResolveBehavior>,
    refreshable: bool,
    events: Rc<RefCell<Vec<String>>>,
    pending: VecDeque<(RendererKind, oneshot::Sender<Box<dyn FullWidthRenderer>>)>,
}

/// Resolver that builds [`FakeRenderer`]s and logs `resolve:`, `refresh:`,
/// `destroy:` and `release:` events tagged with the renderer key.
pub struct FakeResolver {
    state: RefCell<ResolverState>,
}

impl Default for FakeResolver {
    fn default() -> Self {
        Self {
            state: RefCell::new(ResolverState {
                behaviors: HashMap::new(),
                refreshable: true,
                events: Rc::new(RefCell::new(Vec::new())),
                pending: VecDeque::new(),
            }),
        }
    }
}

impl FakeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_behavior(&self, kind: RendererKind, behavior: ResolveBehavior) {
        self.state.borrow_mut().behaviors.insert(kind, behavior);
    }

    /// Whether renderers built from now on can refresh in place.
    pub fn set_refreshable(&self, refreshable: bool) {
        self.state.borrow_mut().refreshable = refreshable;
    }

    pub fn count(&self, prefix: &str) -> usize {
        let events = Rc::clone(&self.state.borrow().events);
        let count = events.borrow().iter().filter(|e| e.starts_with(prefix)).count();
        count
    }

    pub fn events(&self) -> Vec<String> {
        self.state.borrow().events.borrow().clone()
    }

    /// Deferred resolutions not yet completed.
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Resolve the oldest deferred renderer. `None` when nothing is waiting;
    /// `Some(Err(renderer))` when the receiver was dropped.
    pub fn complete_next(&self, dom: &mut Dom) -> Option<Result<(), Box<dyn FullWidthRenderer>>> {
        let (kind, sender) = self.state.borrow_mut().pending.pop_front()?;
        let renderer = self.build(dom, kind);
        Some(sender.send(renderer))
    }

    fn build(&self, dom: &mut Dom, kind: RendererKind) -> Box<dyn FullWidthRenderer> {
        let state = self.state.borrow();
        let element = dom.create(
            NodeData::new("div")
                .with_class("grid-full-width-renderer")
                .with_attribute("renderer", kind.key()),
        );
        Box::new(FakeRenderer {
            key: kind.key(),
            element,
            refreshable: state.refreshable,
            events: Rc::clone(&state.events),
        })
    }

    fn record(&self, event: String) {
        self.state.borrow().events.borrow_mut().push(event);
    }
}

impl FullWidthResolver for FakeResolver {
    fn resolve(
        &self,
        dom: &mut Dom,
        _params: &FullWidthParams,
        kind: RendererKind,
        name: Option<&str>,
    ) -> Result<Resolved, FullWidthError> {
        self.record(format!("resolve:{}", kind.key()));
        let behavior = self.state.borrow().behaviors.get(&kind).copied().unwrap_or_default();
        let name = name.unwrap_or(kind.key()).to_string();
        match behavior {
            ResolveBehavior::Ready => Ok(Resolved::Ready(self.build(dom, kind))),
            ResolveBehavior::Deferred => {
                let (sender, receiver) = oneshot::channel();
                self.state.borrow_mut().pending.push_back((kind, sender));
                Ok(Resolved::Deferred(receiver))
            }
            ResolveBehavior::NotLoaded => Err(FullWidthError::ModuleNotLoaded {
                name,
                module: "master-detail".to_string(),
            }),
            ResolveBehavior::Unknown => Err(FullWidthError::UnknownRenderer { name }),
        }
    }

    fn release(&self, dom: &mut Dom, mut renderer: Box<dyn FullWidthRenderer>) {
        let key = dom
            .get(renderer.element())
            .and_then(|data| data.attribute("renderer").map(str::to_string))
            .unwrap_or_default();
        self.record(format!("release:{key}"));
        renderer.destroy(dom);
    }
}

/// Renderer built by [`FakeResolver`].
pub struct FakeRenderer {
    key: &'static str,
    element: NodeId,
    refreshable: bool,
    events: Rc<RefCell<Vec<String>>>,
}

impl FullWidthRenderer for FakeRenderer {
    fn element(&self) -> NodeId {
        self.element
    }

    fn refresh(&mut self, _params: &FullWidthParams) -> bool {
        self.events.borrow_mut().push(format!("refresh:{}", self.key));
        self.refreshable
    }

    fn destroy(&mut self, dom: &mut Dom) {
        self.events.borrow_mut().push(format!("destroy:{}", self.key));
        dom.remove(self.element);
    }
}

// ---------------------------------------------------------------------------
// Resize observer
// ---------------------------------------------------------------------------

type Subscriptions = Rc<RefCell<Vec<(u64, NodeId, Rc<dyn Fn(f64)>)>>>;

/// Resize observer driven by hand with [`FakeResizeObserver::trigger`].
#[derive(Default)]
pub struct FakeResizeObserver {
    heights: RefCell<Vec<(NodeId, f64)>>,
    subscriptions: Subscriptions,
    next_id: Cell<u64>,
    unsubscribed: Rc<Cell<usize>>,
}

impl FakeResizeObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Height `content_height` reports for `element`.
    pub fn set_height(&self, element: NodeId, height: f64) {
        let mut heights = self.heights.borrow_mut();
        heights.retain(|(e, _)| *e != element);
        heights.push((element, height));
    }

    /// Report a new content height for `element` to its subscribers.
    pub fn trigger(&self, element: NodeId, height: f64) {
        let callbacks: Vec<Rc<dyn Fn(f64)>> = self
            .subscriptions
            .borrow()
            .iter()
            .filter(|(_, e, _)| *e == element)
            .map(|(_, _, callback)| Rc::clone(callback))
            .collect();
        for callback in callbacks {
            callback(height);
        }
    }

    /// Elements currently observed.
    pub fn observed(&self) -> Vec<NodeId> {
        self.subscriptions.borrow().iter().map(|(_, e, _)| *e).collect()
    }

    pub fn unsubscribed(&self) -> usize {
        self.unsubscribed.get()
    }
}

impl ResizeObserver for FakeResizeObserver {
    fn observe(&self, element: NodeId, on_resize: ResizeCallback) -> Unsubscribe {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.subscriptions.borrow_mut().push((id, element, Rc::from(on_resize)));

        let subscriptions = Rc::clone(&self.subscriptions);
        let unsubscribed = Rc::clone(&self.unsubscribed);
        Box::new(move || {
            subscriptions.borrow_mut().retain(|(sub, _, _)| *sub != id);
            unsubscribed.set(unsubscribed.get() + 1);
        })
    }

    fn content_height(&self, element: NodeId) -> Option<f64> {
        self.heights
            .borrow()
            .iter()
            .find(|(e, _)| *e == element)
            .map(|(_, height)| *height)
    }
}

// ---------------------------------------------------------------------------
// Selection, row model, scopes
// ---------------------------------------------------------------------------

/// Records selection requests and applies them to the row.
#[derive(Default)]
pub struct FakeSelection {
    requests: RefCell<Vec<(String, SelectionRequest)>>,
}

impl FakeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(row id, request)` in the order they arrived.
    pub fn requests(&self) -> Vec<(String, SelectionRequest)> {
        self.requests.borrow().clone()
    }
}

impl SelectionService for FakeSelection {
    fn set_selected(&self, row: &RowRef, request: SelectionRequest) {
        let mut node = row.borrow_mut();
        node.selected = request.new_value;
        self.requests.borrow_mut().push((node.id.clone(), request));
    }
}

/// Counts row height change notifications.
#[derive(Default)]
pub struct FakeRowModel {
    height_changes: Cell<usize>,
}

impl FakeRowModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn height_changes(&self) -> usize {
        self.height_changes.get()
    }
}

impl RowModelHooks for FakeRowModel {
    fn on_row_height_changed(&self) {
        self.height_changes.set(self.height_changes.get() + 1);
    }
}

/// Hands out row scopes and counts their destruction.
#[derive(Default)]
pub struct FakeScopeProvider {
    created: Cell<usize>,
    destroyed: Rc<Cell<usize>>,
}

impl FakeScopeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created(&self) -> usize {
        self.created.get()
    }

    pub fn destroyed(&self) -> usize {
        self.destroyed.get()
    }
}

impl ScopeProvider for FakeScopeProvider {
    fn create_row_scope(&self, _row: &RowNode) -> Option<Rc<dyn RowScope>> {
        self.created.set(self.created.get() + 1);
        Some(Rc::new(FakeScope {
            destroyed: Rc::clone(&self.destroyed),
        }))
    }
}

struct FakeScope {
    destroyed: Rc<Cell<usize>>,
}

impl RowScope for FakeScope {
    fn destroy(&self) {
        self.destroyed.set(self.destroyed.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;

    #[test]
    fn column_model_concatenates_sections() {
        let model = StaticColumnModel::new();
        model.set_left(vec![Column::new("l").into_ref()]);
        model.set_center(vec![Column::new("c1").into_ref(), Column::new("c2").into_ref()]);
        model.set_right(vec![Column::new("r").into_ref()]);
        let ids: Vec<String> = model
            .all_displayed_columns()
            .iter()
            .map(|c| c.id().to_string())
            .collect();
        assert_eq!(ids, ["l", "c1", "c2", "r"]);

        let only = vec![Column::new("c2").into_ref()];
        model.set_viewport(Some(only));
        assert_eq!(model.viewport_center_columns_for(&RowNode::new("r")).len(), 1);
    }

    #[test]
    fn resize_unsubscribe_stops_callbacks() {
        let mut dom = Dom::new();
        let element = dom.create(NodeData::new("div"));
        let observer = FakeResizeObserver::new();
        let seen = Rc::new(Cell::new(0.0));
        let sink = Rc::clone(&seen);
        let unsubscribe = observer.observe(element, Box::new(move |h| sink.set(h)));

        observer.trigger(element, 40.0);
        assert_eq!(seen.get(), 40.0);
        unsubscribe();
        observer.trigger(element, 80.0);
        assert_eq!(seen.get(), 40.0);
        assert_eq!(observer.unsubscribed(), 1);
    }
}
