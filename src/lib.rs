//! # gilt-grid
//!
//! Row rendering for a virtualised data grid: one controller per visible row
//! that materialises its cells into pinned-left, center and pinned-right
//! containers, or a single full-width renderer, and keeps them in step with
//! the column, row and pagination models.
//!
//! ## Core Systems
//!
//! - **[`row`]**: Row data, row-type classification, vertical positioning
//! - **[`cell`]**: Cell contract, visible-cell registry, reconciliation
//! - **[`full_width`]**: Full-width renderer lifecycle and detail-row cache
//! - **[`controller`]**: The row controller and its state synchronisation
//! - **[`css`]**: Row classes, ARIA attributes, user style hooks
//! - **[`dom`]**: Slotmap-backed element arena rows render into
//! - **[`render`]**: Frame task queue and second-pass animation queues
//! - **[`event`]**: Grid events rows publish and notifications they consume
//! - **[`services`]**: Grid-wide collaborator contracts
//! - **[`testing`]**: Fakes, harness and snapshot helpers

// Foundation
pub mod column;
pub mod config;
pub mod dom;
pub mod error;
pub mod logging;
pub mod segment;

// Rows and cells
pub mod cell;
pub mod full_width;
pub mod row;

// Row controller
pub mod controller;
pub mod css;
pub mod event;
pub mod render;
pub mod services;

// Test support
pub mod testing;

pub use cell::{CellComp, CellFactory, CellParams, CellPosition};
pub use column::{Column, ColumnId, ColumnModel, ColumnRef, Pinned};
pub use config::{GridOptions, RowSelection};
pub use controller::{RowController, SharedRowController};
pub use error::{FullWidthError, StyleHookError};
pub use event::{EventBus, EventQueue, GridChange, GridEvent, MouseEvent, RowChange};
pub use full_width::{FullWidthRenderer, FullWidthResolver, RendererKind};
pub use row::{classify, ClassifyFlags, RowMode, RowNode, RowRef};
pub use segment::{RowContainers, Segment};
pub use services::{Collaborators, GridServices};
