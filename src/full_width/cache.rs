//! Parked detail renderers.
//!
//! Destroying a detail row with `keep_detail_rows` parks its renderer here so
//! re-expanding the master restores the detail grid with its scroll state.

use std::collections::VecDeque;
use std::fmt;

use crate::column::Pinned;

use super::renderer::FullWidthRenderer;

/// Cache key: the detail row and the pin side it rendered into.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DetailKey {
    pub row_id: String,
    pub pinned: Option<Pinned>,
}

impl DetailKey {
    pub fn new(row_id: impl Into<String>, pinned: Option<Pinned>) -> Self {
        Self {
            row_id: row_id.into(),
            pinned,
        }
    }
}

/// Bounded store of detached detail renderers, oldest evicted first.
pub struct DetailRowCache {
    capacity: usize,
    entries: VecDeque<(DetailKey, Box<dyn FullWidthRenderer>)>,
}

impl DetailRowCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::new(),
        }
    }

    /// Park a renderer. Returns the renderers that no longer fit, plus any
    /// previous entry under the same key; the caller destroys them.
    #[must_use]
    pub fn insert(&mut self, key: DetailKey, renderer: Box<dyn FullWidthRenderer>) -> Vec<Box<dyn FullWidthRenderer>> {
        let mut evicted = Vec::new();
        if let Some(previous) = self.take(&key) {
            evicted.push(previous);
        }
        self.entries.push_back((key, renderer));
        while self.entries.len() > self.capacity {
            match self.entries.pop_front() {
                Some((_, renderer)) => evicted.push(renderer),
                None => break,
            }
        }
        evicted
    }

    /// Remove and return the renderer parked under `key`.
    pub fn take(&mut self, key: &DetailKey) -> Option<Box<dyn FullWidthRenderer>> {
        let position = self.entries.iter().position(|(k, _)| k == key)?;
        self.entries.remove(position).map(|(_, renderer)| renderer)
    }

    pub fn contains(&self, key: &DetailKey) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empty the cache, returning everything for destruction.
    pub fn drain(&mut self) -> Vec<Box<dyn FullWidthRenderer>> {
        self.entries.drain(..).map(|(_, renderer)| renderer).collect()
    }
}

impl fmt::Debug for DetailRowCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetailRowCache")
            .field("capacity", &self.capacity)
            .field("keys", &self.entries.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .finish()
    }
}
