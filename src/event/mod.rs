//! Events: inbound change notifications, outbound typed events, mouse input.

pub mod bus;
pub mod message;
pub mod mouse;
pub mod notify;

pub use bus::{EventBus, EventQueue};
pub use message::{GridEvent, RowEventRecord, RowMouseRecord};
pub use mouse::{MouseEvent, MouseEventKind};
pub use notify::{GridChange, RowChange};
