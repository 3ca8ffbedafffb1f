//! Headless testing support: fake collaborators, a grid harness and
//! snapshot helpers.
//!
//! Use the [`Harness`] to build row controllers against in-memory models.
//! Use [`dom_to_string`] to capture the rendered DOM as plain text for
//! snapshot-style assertions.

pub mod fakes;
pub mod harness;
pub mod snapshot;

pub use harness::Harness;
pub use snapshot::{children_to_string, dom_to_string};
