//! Full-width rows: renderer contract, lifecycle manager, detail cache.

pub mod cache;
pub mod manager;
pub mod renderer;

pub use cache::{DetailKey, DetailRowCache};
pub use manager::{CreateOutcome, FullWidthManager};
pub use renderer::{FullWidthParams, FullWidthRenderer, FullWidthResolver, RendererKind, Resolved};
