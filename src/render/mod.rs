//! Deferred row work: frame task queue and second-pass animation queues.

pub mod frame;
pub mod second_pass;

pub use frame::{AnimationFrameService, Task};
pub use second_pass::{SecondPassDriver, SecondPassQueues};
