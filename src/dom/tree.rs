//! Element arena operations used by rows and cells.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use slotmap::{SecondaryMap, SlotMap};

use super::node::{NodeData, NodeId};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// The DOM shared between the grid host, every row controller and the cell
/// components they create. Single-threaded.
pub type SharedDom = Rc<RefCell<Dom>>;

/// The DOM-equivalent element tree, backed by a slotmap arena.
///
/// Elements are created detached and then appended under a parent. A detached
/// element stays alive in the arena until [`Dom::remove`] is called, so a cell
/// can be moved between containers or parked in a cache without losing state.
pub struct Dom {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
}

impl Dom {
    /// Create an empty DOM.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
        }
    }

    /// Create an empty DOM wrapped for sharing.
    pub fn shared() -> SharedDom {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Create a detached element.
    pub fn create(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        id
    }

    /// Create an element and append it as the last child of `parent`.
    pub fn create_child(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = self.create(data);
        self.append_child(parent, id);
        id
    }

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent first. Returns `false` if either element is gone.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return false;
        }
        self.detach(child);
        self.parent.insert(child, parent);
        if let Some(kids) = self.children.get_mut(parent) {
            kids.push(child);
        }
        true
    }

    /// Detach `child` from its parent. The element and its subtree stay in the
    /// arena. Returns `true` if the element had a parent.
    pub fn detach(&mut self, child: NodeId) -> bool {
        match self.parent.remove(child) {
            Some(parent_id) => {
                if let Some(siblings) = self.children.get_mut(parent_id) {
                    siblings.retain(|&c| c != child);
                }
                true
            }
            None => false,
        }
    }

    /// Reorder the children of `parent` so that the elements in `order` come
    /// first, in that sequence. Children not listed keep their relative order
    /// after the listed ones; entries that are not children of `parent` are
    /// ignored.
    ///
    /// Returns the number of children whose position changed.
    pub fn reorder_children(&mut self, parent: NodeId, order: &[NodeId]) -> usize {
        let Some(current) = self.children.get(parent) else {
            return 0;
        };
        let mut next: Vec<NodeId> = Vec::with_capacity(current.len());
        for id in order {
            if current.contains(id) && !next.contains(id) {
                next.push(*id);
            }
        }
        for id in current {
            if !next.contains(id) {
                next.push(*id);
            }
        }
        let moved = current
            .iter()
            .zip(next.iter())
            .filter(|(before, after)| before != after)
            .count();
        if moved > 0 {
            self.children.insert(parent, next);
        }
        moved
    }

    /// Remove an element and all its descendants.
    ///
    /// Returns the `NodeData` for the removed element, or `None` if it didn't
    /// exist (removing a stale id is a no-op).
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        if !self.nodes.contains_key(id) {
            return None;
        }
        self.detach(id);

        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        let mut removed_root_data = None;

        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                to_remove.extend(kids);
            }
            self.parent.remove(current);
            let data = self.nodes.remove(current);
            if current == id {
                removed_root_data = data;
            }
        }

        removed_root_data
    }

    /// Get the parent of an element, if it is attached.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of an element. Empty if it has none or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Immutable access to an element's data.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// Mutable access to an element's data.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    /// Number of elements in the arena, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}
