//! Render-frame task queue.
//!
//! Rows never run their own timers. Deferred row work (initial cell creation,
//! coalesced reconciles, polling deferred renderers) is queued here and the
//! host runs it once per animation frame, lowest row index first, so the rows
//! nearest the top of the viewport paint first.
//!
//! Suppressing animation frames makes cell work synchronous, but polls for
//! deferred full-width renderers still land here: they wait on the resolver,
//! so the host keeps flushing frames in every mode.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::logging::targets;

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce()>;

struct FrameTask {
    row_index: usize,
    seq: u64,
    run: Task,
}

/// Shared frame-aligned task queue, plus a plain deferred queue standing in
/// for the host's zero-delay timeout.
pub struct AnimationFrameService {
    tasks: RefCell<Vec<FrameTask>>,
    next_frame: RefCell<Vec<FrameTask>>,
    deferred: RefCell<VecDeque<Task>>,
    seq: Cell<u64>,
}

impl AnimationFrameService {
    pub fn new() -> Self {
        Self {
            tasks: RefCell::new(Vec::new()),
            next_frame: RefCell::new(Vec::new()),
            deferred: RefCell::new(VecDeque::new()),
            seq: Cell::new(0),
        }
    }

    /// Queue a task for a later frame. Tasks for the same row index run in
    /// scheduling order.
    pub fn schedule(&self, row_index: usize, run: Task) {
        let seq = self.next_seq();
        self.tasks.borrow_mut().push(FrameTask { row_index, seq, run });
    }

    /// Queue a task for the next frame, never the one currently executing.
    /// Polls reschedule themselves this way so a flush always terminates.
    pub fn schedule_next_frame(&self, row_index: usize, run: Task) {
        let seq = self.next_seq();
        self.next_frame.borrow_mut().push(FrameTask { row_index, seq, run });
    }

    /// Run up to `max_tasks` queued tasks. Tasks queued with [`schedule`]
    /// while running are eligible in the same call; tasks queued with
    /// [`schedule_next_frame`] wait for the next call. Returns how many ran.
    ///
    /// [`schedule`]: Self::schedule
    /// [`schedule_next_frame`]: Self::schedule_next_frame
    pub fn execute_frame(&self, max_tasks: usize) -> usize {
        let promoted = std::mem::take(&mut *self.next_frame.borrow_mut());
        self.tasks.borrow_mut().extend(promoted);
        let mut ran = 0;
        while ran < max_tasks {
            // The borrow must end before the task runs: tasks schedule more work.
            let next = self.pop_next();
            match next {
                Some(task) => {
                    (task.run)();
                    ran += 1;
                }
                None => break,
            }
        }
        if ran > 0 {
            tracing::trace!(target: targets::FRAME, ran, remaining = self.pending_count(), "frame executed");
        }
        ran
    }

    /// Run queued tasks until the queue is empty.
    pub fn flush_all_frames(&self) -> usize {
        self.execute_frame(usize::MAX)
    }

    /// Queue work to run after the current update finishes.
    pub fn defer(&self, run: Task) {
        self.deferred.borrow_mut().push_back(run);
    }

    /// Run deferred work until none is left. Returns how many ran.
    pub fn run_deferred(&self) -> usize {
        let mut ran = 0;
        loop {
            let next = self.deferred.borrow_mut().pop_front();
            match next {
                Some(run) => {
                    run();
                    ran += 1;
                }
                None => break,
            }
        }
        ran
    }

    /// Tasks waiting for this frame or the next.
    pub fn pending_count(&self) -> usize {
        self.tasks.borrow().len() + self.next_frame.borrow().len()
    }

    pub fn pending_deferred_count(&self) -> usize {
        self.deferred.borrow().len()
    }

    fn next_seq(&self) -> u64 {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        seq
    }

    fn pop_next(&self) -> Option<FrameTask> {
        let mut tasks = self.tasks.borrow_mut();
        let position = tasks
            .iter()
            .enumerate()
            .min_by_key(|(_, task)| (task.row_index, task.seq))
            .map(|(position, _)| position)?;
        Some(tasks.remove(position))
    }
}

impl Default for AnimationFrameService {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AnimationFrameService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationFrameService")
            .field("pending", &self.pending_count())
            .field("deferred", &self.pending_deferred_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_c = Rc::clone(&log);
        let make = move |name: &'static str| -> Task {
            let log = Rc::clone(&log_c);
            Box::new(move || log.borrow_mut().push(name))
        };
        (log, make)
    }

    #[test]
    fn runs_lowest_row_index_first() {
        let frames = AnimationFrameService::new();
        let (log, task) = recorder();
        frames.schedule(5, task("five"));
        frames.schedule(1, task("one"));
        frames.schedule(3, task("three"));
        frames.schedule(1, task("one-again"));

        assert_eq!(frames.flush_all_frames(), 4);
        assert_eq!(*log.borrow(), vec!["one", "one-again", "three", "five"]);
        assert_eq!(frames.pending_count(), 0);
    }

    #[test]
    fn execute_frame_respects_budget() {
        let frames = AnimationFrameService::new();
        let (log, task) = recorder();
        frames.schedule(0, task("a"));
        frames.schedule(1, task("b"));
        frames.schedule(2, task("c"));

        assert_eq!(frames.execute_frame(2), 2);
        assert_eq!(frames.pending_count(), 1);
        assert_eq!(frames.execute_frame(2), 1);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn tasks_can_schedule_more_tasks() {
        let frames = Rc::new(AnimationFrameService::new());
        let (log, task) = recorder();
        let frames_c = Rc::clone(&frames);
        let follow_up = task("follow-up");
        frames.schedule(0, Box::new(move || frames_c.schedule(0, follow_up)));

        assert_eq!(frames.flush_all_frames(), 2);
        assert_eq!(*log.borrow(), vec!["follow-up"]);
    }

    #[test]
    fn next_frame_tasks_wait_one_flush() {
        let frames = Rc::new(AnimationFrameService::new());
        let (log, task) = recorder();
        let frames_c = Rc::clone(&frames);
        let later = task("later");
        frames.schedule(0, Box::new(move || frames_c.schedule_next_frame(0, later)));

        assert_eq!(frames.flush_all_frames(), 1);
        assert!(log.borrow().is_empty());
        assert_eq!(frames.pending_count(), 1);
        assert_eq!(frames.flush_all_frames(), 1);
        assert_eq!(*log.borrow(), vec!["later"]);
    }

    #[test]
    fn deferred_queue_runs_in_order() {
        let frames = AnimationFrameService::new();
        let (log, task) = recorder();
        frames.defer(task("first"));
        frames.defer(task("second"));
        assert_eq!(frames.pending_deferred_count(), 2);
        assert_eq!(frames.run_deferred(), 2);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
        assert_eq!(frames.run_deferred(), 0);
    }
}
