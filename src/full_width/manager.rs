//! Full-width lifecycle: one renderer per active segment, created, refreshed
//! and torn down together.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::dom::{Dom, NodeId};
use crate::error::FullWidthError;
use crate::logging::targets;
use crate::row::RowNode;
use crate::segment::Segment;
use crate::services::GridServices;

use super::cache::DetailKey;
use super::renderer::{FullWidthParams, FullWidthRenderer, RendererKind, Resolved};

type Pending = oneshot::Receiver<Box<dyn FullWidthRenderer>>;

/// Result of building one segment's renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Attached,
    /// Deferred; poll with [`FullWidthManager::poll_deferred`].
    Pending,
    /// Nothing to render; the segment stays empty.
    Failed,
}

struct FullWidthSlot {
    params: FullWidthParams,
    renderer: Option<Box<dyn FullWidthRenderer>>,
    pending: Option<Pending>,
}

/// Owns the full-width renderers of one row.
pub struct FullWidthManager {
    kind: RendererKind,
    slots: Vec<FullWidthSlot>,
    destroy_funcs: Vec<Box<dyn FnOnce()>>,
    alive: Rc<Cell<bool>>,
}

impl FullWidthManager {
    pub fn new(kind: RendererKind) -> Self {
        Self {
            kind,
            slots: Vec::new(),
            destroy_funcs: Vec::new(),
            alive: Rc::new(Cell::new(true)),
        }
    }

    pub fn kind(&self) -> RendererKind {
        self.kind
    }

    /// Build the renderer for one segment.
    ///
    /// Detail rows first look for a parked renderer. Resolution failures are
    /// logged and leave the segment empty.
    pub fn create(&mut self, services: &GridServices, dom: &mut Dom, params: FullWidthParams) -> CreateOutcome {
        let parked = if self.kind == RendererKind::Detail && services.options.keep_detail_rows {
            let key = DetailKey::new(params.row.borrow().id.clone(), params.segment.pinned());
            services.detail_cache.borrow_mut().take(&key)
        } else {
            None
        };

        let resolved = match parked {
            Some(renderer) => {
                tracing::debug!(target: targets::FULL_WIDTH, row = %params.row.borrow().id, "detail renderer restored from cache");
                Ok(Resolved::Ready(renderer))
            }
            None => services.full_width.resolve(dom, &params, self.kind, self.kind.default_name()),
        };

        let index = self.slots.len();
        self.slots.push(FullWidthSlot {
            params,
            renderer: None,
            pending: None,
        });
        match resolved {
            Ok(Resolved::Ready(renderer)) => {
                self.attach(services, dom, index, renderer);
                CreateOutcome::Attached
            }
            Ok(Resolved::Deferred(receiver)) => {
                tracing::debug!(target: targets::FULL_WIDTH, key = self.kind.key(), "full-width renderer deferred");
                self.slots[index].pending = Some(receiver);
                CreateOutcome::Pending
            }
            Err(err @ FullWidthError::ModuleNotLoaded { .. }) => {
                tracing::warn!(target: targets::FULL_WIDTH, key = self.kind.key(), "{err}");
                CreateOutcome::Failed
            }
            Err(err) => {
                tracing::error!(target: targets::FULL_WIDTH, key = self.kind.key(), "{err}");
                CreateOutcome::Failed
            }
        }
    }

    /// Attach deferred renderers that have resolved. Returns whether any are
    /// still outstanding.
    pub fn poll_deferred(&mut self, services: &GridServices, dom: &mut Dom) -> bool {
        let mut outstanding = false;
        for index in 0..self.slots.len() {
            let Some(receiver) = self.slots[index].pending.as_mut() else {
                continue;
            };
            match receiver.try_recv() {
                Ok(renderer) => {
                    self.slots[index].pending = None;
                    self.attach(services, dom, index, renderer);
                }
                Err(TryRecvError::Empty) => outstanding = true,
                Err(TryRecvError::Closed) => {
                    self.slots[index].pending = None;
                    let err = FullWidthError::Abandoned {
                        name: self.kind.default_name().unwrap_or(self.kind.key()).to_string(),
                    };
                    tracing::warn!(target: targets::FULL_WIDTH, "{err}");
                }
            }
        }
        outstanding
    }

    pub fn has_pending(&self) -> bool {
        self.slots.iter().any(|slot| slot.pending.is_some())
    }

    /// Refresh every representation in place. `false` when a renderer
    /// cannot refresh. A segment still waiting for its renderer, or left
    /// empty by a failed resolution, has nothing to refresh and passes.
    pub fn refresh(&mut self) -> bool {
        let mut ok = true;
        for slot in &mut self.slots {
            slot.params.row_index = slot.params.row.borrow().row_index;
            let refreshed = match slot.renderer.as_mut() {
                Some(renderer) => renderer.refresh(&slot.params),
                None => true,
            };
            ok &= refreshed;
        }
        tracing::debug!(target: targets::FULL_WIDTH, ok, segments = self.slots.len(), "full-width refresh");
        ok
    }

    /// Renderer attached in `segment`, if any.
    pub fn renderer(&self, segment: Segment) -> Option<&dyn FullWidthRenderer> {
        self.slots
            .iter()
            .find(|slot| slot.params.segment == segment)
            .and_then(|slot| slot.renderer.as_deref())
    }

    /// Release everything. Runs once; later calls do nothing.
    pub fn teardown(&mut self, services: &GridServices, dom: &mut Dom) {
        if !self.alive.replace(false) {
            return;
        }
        for destroy in self.destroy_funcs.drain(..) {
            destroy();
        }
        let keep = self.kind == RendererKind::Detail && services.options.keep_detail_rows;
        for slot in self.slots.drain(..) {
            if let Some(mut receiver) = slot.pending {
                match receiver.try_recv() {
                    Ok(renderer) => services.full_width.release(dom, renderer),
                    Err(TryRecvError::Empty) => release_when_resolved(services.clone(), receiver),
                    Err(TryRecvError::Closed) => {}
                }
            }
            let Some(mut renderer) = slot.renderer else {
                continue;
            };
            dom.detach(renderer.element());
            if keep {
                let key = DetailKey::new(slot.params.row.borrow().id.clone(), slot.params.segment.pinned());
                let evicted = services.detail_cache.borrow_mut().insert(key, renderer);
                for mut old in evicted {
                    old.destroy(dom);
                }
            } else {
                renderer.destroy(dom);
            }
        }
        tracing::debug!(target: targets::FULL_WIDTH, kept = keep, "full-width torn down");
    }

    fn attach(&mut self, services: &GridServices, dom: &mut Dom, index: usize, renderer: Box<dyn FullWidthRenderer>) {
        let slot = &mut self.slots[index];
        dom.append_child(slot.params.element, renderer.element());
        let element = renderer.element();
        let row = Rc::downgrade(&slot.params.row);
        slot.renderer = Some(renderer);

        if self.kind == RendererKind::Detail && services.options.detail_row_auto_height {
            self.observe_height(services, element, row);
        }
    }

    fn observe_height(&mut self, services: &GridServices, element: NodeId, row: Weak<RefCell<RowNode>>) {
        let Some(observer) = services.resize_observer.clone() else {
            return;
        };
        let frames = Rc::clone(&services.frames);
        let hooks = services.row_model.clone();
        let alive = Rc::clone(&self.alive);

        let check: Rc<dyn Fn(f64)> = Rc::new(move |height: f64| {
            // Zero while the detail grid is still laying out.
            if height <= 0.0 || !alive.get() {
                return;
            }
            let row = row.clone();
            let hooks = hooks.clone();
            let alive = Rc::clone(&alive);
            frames.defer(Box::new(move || {
                if !alive.get() {
                    return;
                }
                let Some(row) = row.upgrade() else {
                    return;
                };
                row.borrow_mut().row_height = Some(height);
                if let Some(hooks) = hooks {
                    hooks.on_row_height_changed();
                }
            }));
        });

        let on_resize = Rc::clone(&check);
        let unsubscribe = observer.observe(element, Box::new(move |height| on_resize(height)));
        self.destroy_funcs.push(unsubscribe);
        if let Some(height) = observer.content_height(element) {
            check(height);
        }
    }
}

/// Poll a renderer whose row is gone, once per frame, and hand it back to
/// the resolver when it arrives. A dropped sender ends the polling.
fn release_when_resolved(services: GridServices, mut receiver: Pending) {
    let frames = Rc::clone(&services.frames);
    frames.schedule_next_frame(
        usize::MAX,
        Box::new(move || match receiver.try_recv() {
            Ok(renderer) => {
                tracing::debug!(target: targets::FULL_WIDTH, "late full-width renderer released");
                services.full_width.release(&mut services.dom.borrow_mut(), renderer);
            }
            Err(TryRecvError::Empty) => release_when_resolved(services, receiver),
            Err(TryRecvError::Closed) => {}
        }),
    );
}

impl std::fmt::Debug for FullWidthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FullWidthManager")
            .field("kind", &self.kind)
            .field("segments", &self.slots.iter().map(|s| s.params.segment).collect::<Vec<_>>())
            .field("pending", &self.has_pending())
            .field("alive", &self.alive.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridOptions;
    use crate::dom::NodeData;
    use crate::testing::fakes::ResolveBehavior;
    use crate::testing::Harness;

    fn params(harness: &Harness, row: RowNode, segment: Segment) -> FullWidthParams {
        let element = harness
            .dom
            .borrow_mut()
            .create_child(harness.containers.get(segment), NodeData::new("div").with_class("grid-row"));
        let row = row.into_ref();
        let row_index = row.borrow().row_index;
        FullWidthParams {
            row,
            row_index,
            pinned: segment.pinned(),
            segment,
            element,
            scope: None,
        }
    }

    #[test]
    fn ready_renderer_is_attached_and_destroyed_once() {
        let harness = Harness::new(GridOptions::default());
        let mut manager = FullWidthManager::new(RendererKind::FullWidth);
        let p = params(&harness, RowNode::new("r"), Segment::FullWidth);
        let row_element = p.element;
        let mut dom = harness.dom.borrow_mut();

        assert_eq!(manager.create(&harness.services, &mut dom, p), CreateOutcome::Attached);
        assert_eq!(dom.children(row_element).len(), 1);
        assert!(manager.renderer(Segment::FullWidth).is_some());

        manager.teardown(&harness.services, &mut dom);
        manager.teardown(&harness.services, &mut dom);
        assert_eq!(harness.resolver.count("destroy:fullWidthCellRenderer"), 1);
    }

    #[test]
    fn unknown_renderer_leaves_segment_empty() {
        let harness = Harness::new(GridOptions::default());
        harness.resolver.set_behavior(RendererKind::Group, ResolveBehavior::Unknown);
        let mut manager = FullWidthManager::new(RendererKind::Group);
        let p = params(&harness, RowNode::new("g"), Segment::FullWidth);
        let row_element = p.element;
        let mut dom = harness.dom.borrow_mut();

        assert_eq!(manager.create(&harness.services, &mut dom, p), CreateOutcome::Failed);
        assert!(dom.children(row_element).is_empty());
        assert!(manager.refresh());
    }

    #[test]
    fn refresh_is_and_over_segments() {
        let harness = Harness::new(GridOptions::default().with_embed_full_width_rows(true));
        let mut manager = FullWidthManager::new(RendererKind::FullWidth);
        for segment in Segment::CELL_SEGMENTS {
            let p = params(&harness, RowNode::new("r"), segment);
            let mut dom = harness.dom.borrow_mut();
            manager.create(&harness.services, &mut dom, p);
        }
        assert!(manager.refresh());

        harness.resolver.set_refreshable(false);
        let p = params(&harness, RowNode::new("r"), Segment::FullWidth);
        let mut dom = harness.dom.borrow_mut();
        manager.create(&harness.services, &mut dom, p);
        assert!(!manager.refresh());
    }

    #[test]
    fn no_segments_refreshes_trivially() {
        let mut manager = FullWidthManager::new(RendererKind::Loading);
        assert!(manager.refresh());
    }

    #[test]
    fn refresh_passes_while_renderer_is_pending() {
        let harness = Harness::new(GridOptions::default());
        harness.resolver.set_behavior(RendererKind::FullWidth, ResolveBehavior::Deferred);
        let mut manager = FullWidthManager::new(RendererKind::FullWidth);
        let p = params(&harness, RowNode::new("r"), Segment::FullWidth);
        let mut dom = harness.dom.borrow_mut();

        assert_eq!(manager.create(&harness.services, &mut dom, p), CreateOutcome::Pending);
        assert!(manager.refresh());
        assert!(manager.has_pending());
        assert_eq!(harness.resolver.pending(), 1);
    }

    #[test]
    fn late_renderer_is_released_after_teardown() {
        let harness = Harness::new(GridOptions::default());
        harness.resolver.set_behavior(RendererKind::FullWidth, ResolveBehavior::Deferred);
        let mut manager = FullWidthManager::new(RendererKind::FullWidth);
        let p = params(&harness, RowNode::new("r"), Segment::FullWidth);
        {
            let mut dom = harness.dom.borrow_mut();
            manager.create(&harness.services, &mut dom, p);
            manager.teardown(&harness.services, &mut dom);
        }

        harness.flush();
        assert_eq!(harness.resolver.count("release:"), 0);

        let sent = harness.resolver.complete_next(&mut harness.dom.borrow_mut());
        assert!(matches!(sent, Some(Ok(()))));
        harness.flush();
        assert_eq!(harness.resolver.count("release:fullWidthCellRenderer"), 1);
        assert_eq!(harness.resolver.count("destroy:fullWidthCellRenderer"), 1);
        assert_eq!(harness.services.frames.pending_count(), 0);
    }

    #[test]
    fn deferred_renderer_attaches_on_poll() {
        let harness = Harness::new(GridOptions::default());
        harness.resolver.set_behavior(RendererKind::FullWidth, ResolveBehavior::Deferred);
        let mut manager = FullWidthManager::new(RendererKind::FullWidth);
        let p = params(&harness, RowNode::new("r"), Segment::FullWidth);
        let row_element = p.element;
        let mut dom = harness.dom.borrow_mut();

        assert_eq!(manager.create(&harness.services, &mut dom, p), CreateOutcome::Pending);
        assert!(manager.poll_deferred(&harness.services, &mut dom));

        assert!(harness.resolver.complete_next(&mut dom).is_some());
        assert!(!manager.poll_deferred(&harness.services, &mut dom));
        assert_eq!(dom.children(row_element).len(), 1);
        assert!(!manager.has_pending());
    }
}
