//! Tracing targets.
//!
//! gilt-grid logs through the `tracing` crate and never installs a
//! subscriber. Filter by subsystem with these targets, e.g.
//! `RUST_LOG=gilt_grid::reconcile=trace`.

/// Target names for log filtering.
pub mod targets {
    /// Row controller lifecycle, state changes and editing.
    pub const ROW: &str = "gilt_grid::row";
    /// Cell reconciliation reports.
    pub const RECONCILE: &str = "gilt_grid::reconcile";
    /// Full-width renderer resolution, refresh and teardown.
    pub const FULL_WIDTH: &str = "gilt_grid::full_width";
    /// Frame task queue.
    pub const FRAME: &str = "gilt_grid::frame";
    /// Row style and class hooks.
    pub const STYLE: &str = "gilt_grid::style";
}
