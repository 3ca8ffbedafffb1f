//! Event bus contract and a queue-backed implementation.
//!
//! Rows only publish. Delivery to listeners belongs to the host, which drains
//! an [`EventQueue`] after the row work of a frame has finished so no listener
//! runs while a controller is mid-update.

use std::cell::RefCell;
use std::collections::VecDeque;

use super::message::GridEvent;

/// Publish side of the grid event bus.
pub trait EventBus {
    fn publish(&self, event: GridEvent);
}

/// Queue-based event bus.
///
/// Events are enqueued via `publish` and drained for delivery via `drain`.
#[derive(Debug, Default)]
pub struct EventQueue {
    queue: RefCell<VecDeque<GridEvent>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain all pending events in publish order. The queue is empty after.
    pub fn drain(&self) -> Vec<GridEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    /// Names of the pending events, without draining.
    pub fn pending_names(&self) -> Vec<&'static str> {
        self.queue.borrow().iter().map(GridEvent::name).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

impl EventBus for EventQueue {
    fn publish(&self, event: GridEvent) {
        tracing::trace!(target: crate::logging::targets::ROW, event = event.name(), "publish");
        self.queue.borrow_mut().push_back(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::message::RowEventRecord;
    use crate::row::RowNode;

    fn record(id: &str) -> RowEventRecord {
        RowEventRecord::from_row(&RowNode::new(id))
    }

    #[test]
    fn new_queue_is_empty() {
        let queue = EventQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.pending_count(), 0);
    }

    #[test]
    fn publish_and_drain_in_order() {
        let queue = EventQueue::new();
        queue.publish(GridEvent::RowEditingStarted(record("a")));
        queue.publish(GridEvent::RowValueChanged(record("a")));
        queue.publish(GridEvent::RowEditingStopped(record("a")));
        assert_eq!(
            queue.pending_names(),
            vec!["rowEditingStarted", "rowValueChanged", "rowEditingStopped"]
        );

        let events = queue.drain();
        assert_eq!(events.len(), 3);
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }
}
