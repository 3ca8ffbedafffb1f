//! Second-pass callback queues for row entry/exit animation.
//!
//! A row that animates in paints once at its start state; its *create* second
//! pass then moves it to the final state on the next frame so the transition
//! plays. A row that animates out applies its exit state immediately; its
//! *remove* second pass tears the elements down once the animation had time to
//! run. One [`SecondPassDriver`] collects these from every row so the grid
//! runs a single timer instead of one per row.

use crate::controller::RowController;

use super::frame::Task;

/// The two second-pass queues owned by one row controller.
///
/// Both are drained-and-cleared on retrieval, so each action runs at most once.
#[derive(Default)]
pub struct SecondPassQueues {
    create: Vec<Task>,
    remove: Vec<Task>,
}

impl SecondPassQueues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_create(&mut self, task: Task) {
        self.create.push(task);
    }

    pub fn push_remove(&mut self, task: Task) {
        self.remove.push(task);
    }

    /// Take every queued create-second-pass action. Empty afterwards.
    pub fn take_create(&mut self) -> Vec<Task> {
        std::mem::take(&mut self.create)
    }

    /// Take every queued remove-second-pass action. Empty afterwards.
    pub fn take_remove(&mut self) -> Vec<Task> {
        std::mem::take(&mut self.remove)
    }

    pub fn pending_create(&self) -> usize {
        self.create.len()
    }

    pub fn pending_remove(&self) -> usize {
        self.remove.len()
    }
}

impl std::fmt::Debug for SecondPassQueues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecondPassQueues")
            .field("create", &self.create.len())
            .field("remove", &self.remove.len())
            .finish()
    }
}

/// Grid-wide collector that runs every row's second-pass actions.
///
/// Typical frame: rows are created or destroyed, the driver collects from
/// each, the browser-equivalent paints, then `run_create_pass` runs; after the
/// exit animation duration, `run_remove_pass` runs.
#[derive(Default)]
pub struct SecondPassDriver {
    create: Vec<Task>,
    remove: Vec<Task>,
}

impl SecondPassDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move both queues out of a row controller.
    pub fn collect_from(&mut self, row: &mut RowController) {
        self.create.extend(row.take_create_second_pass());
        self.remove.extend(row.take_remove_second_pass());
    }

    pub fn add_create(&mut self, tasks: Vec<Task>) {
        self.create.extend(tasks);
    }

    pub fn add_remove(&mut self, tasks: Vec<Task>) {
        self.remove.extend(tasks);
    }

    /// Run collected create actions. Returns how many ran.
    pub fn run_create_pass(&mut self) -> usize {
        run_all(std::mem::take(&mut self.create))
    }

    /// Run collected remove actions. Returns how many ran.
    pub fn run_remove_pass(&mut self) -> usize {
        run_all(std::mem::take(&mut self.remove))
    }

    pub fn has_pending(&self) -> bool {
        !self.create.is_empty() || !self.remove.is_empty()
    }
}

fn run_all(tasks: Vec<Task>) -> usize {
    let count = tasks.len();
    for task in tasks {
        task();
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn counting(counter: &Rc<RefCell<u32>>) -> Task {
        let counter = Rc::clone(counter);
        Box::new(move || *counter.borrow_mut() += 1)
    }

    #[test]
    fn new_queues_are_empty() {
        let mut queues = SecondPassQueues::new();
        assert_eq!(queues.pending_create(), 0);
        assert!(queues.take_create().is_empty());
        assert!(queues.take_remove().is_empty());
    }

    #[test]
    fn take_returns_everything_once() {
        let counter = Rc::new(RefCell::new(0));
        let mut queues = SecondPassQueues::new();
        queues.push_create(counting(&counter));
        queues.push_create(counting(&counter));
        queues.push_remove(counting(&counter));

        let create = queues.take_create();
        assert_eq!(create.len(), 2);
        assert!(queues.take_create().is_empty());
        assert_eq!(queues.pending_remove(), 1);

        let remove = queues.take_remove();
        assert_eq!(remove.len(), 1);
        assert!(queues.take_remove().is_empty());

        for task in create.into_iter().chain(remove) {
            task();
        }
        assert_eq!(*counter.borrow(), 3);
    }

    #[test]
    fn driver_runs_each_pass_once() {
        let counter = Rc::new(RefCell::new(0));
        let mut driver = SecondPassDriver::new();
        driver.add_create(vec![counting(&counter)]);
        driver.add_remove(vec![counting(&counter), counting(&counter)]);
        assert!(driver.has_pending());

        assert_eq!(driver.run_create_pass(), 1);
        assert_eq!(driver.run_create_pass(), 0);
        assert_eq!(driver.run_remove_pass(), 2);
        assert!(!driver.has_pending());
        assert_eq!(*counter.borrow(), 3);
    }
}
