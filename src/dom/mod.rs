//! DOM arena: slotmap-backed element tree that row and cell components render into.

pub mod node;
pub mod tree;

pub use node::{NodeData, NodeId};
pub use tree::{Dom, SharedDom};
