//! Rows: data model, classification, vertical positioning.

pub mod mode;
pub mod node;
pub mod position;

pub use mode::{classify, ClassifyFlags, RowMode};
pub use node::{RowHighlight, RowNode, RowPosition, RowRef};
pub use position::PaginationModel;
