//! Row styling: class names, ARIA attributes and user style hooks.

pub mod attributes;
pub mod classes;
pub mod hooks;

pub use attributes::row_attributes;
pub use classes::{initial_classes, ClassContext};
pub use hooks::{AppliedHooks, RowStyle, RowStyleHooks};
