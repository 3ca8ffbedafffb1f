//! Full-width renderer contract and resolution.

use std::fmt;
use std::rc::Rc;

use tokio::sync::oneshot;

use crate::column::Pinned;
use crate::dom::{Dom, NodeId};
use crate::error::FullWidthError;
use crate::row::{RowMode, RowRef};
use crate::segment::Segment;
use crate::services::RowScope;

/// A single component spanning the whole row.
pub trait FullWidthRenderer {
    fn element(&self) -> NodeId;

    /// Refresh in place. `false` means the renderer cannot, and the row must
    /// be rebuilt.
    fn refresh(&mut self, _params: &FullWidthParams) -> bool {
        false
    }

    fn destroy(&mut self, dom: &mut Dom);
}

impl fmt::Debug for dyn FullWidthRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FullWidthRenderer").field("element", &self.element()).finish()
    }
}

/// Parameters a full-width renderer is built or refreshed with.
#[derive(Clone)]
pub struct FullWidthParams {
    pub row: RowRef,
    pub row_index: Option<usize>,
    /// Pin side of the segment being rendered; `None` for center and the
    /// dedicated full-width container.
    pub pinned: Option<Pinned>,
    pub segment: Segment,
    /// Row element in that segment; the renderer's element goes inside it.
    pub element: NodeId,
    pub scope: Option<Rc<dyn RowScope>>,
}

impl fmt::Debug for FullWidthParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FullWidthParams")
            .field("row", &self.row.borrow().id)
            .field("row_index", &self.row_index)
            .field("segment", &self.segment)
            .field("element", &self.element)
            .finish_non_exhaustive()
    }
}

/// Which renderer slot a full-width mode draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RendererKind {
    FullWidth,
    Loading,
    Group,
    Detail,
}

impl RendererKind {
    /// `None` for [`RowMode::Normal`].
    pub fn for_mode(mode: RowMode) -> Option<Self> {
        match mode {
            RowMode::Normal => None,
            RowMode::FullWidth => Some(RendererKind::FullWidth),
            RowMode::FullWidthLoading => Some(RendererKind::Loading),
            RowMode::FullWidthGroup => Some(RendererKind::Group),
            RowMode::FullWidthDetail => Some(RendererKind::Detail),
        }
    }

    /// Grid option key the renderer is configured under.
    pub fn key(self) -> &'static str {
        match self {
            RendererKind::FullWidth => "fullWidthCellRenderer",
            RendererKind::Loading => "loadingCellRenderer",
            RendererKind::Group => "groupRowRenderer",
            RendererKind::Detail => "detailCellRenderer",
        }
    }

    /// Built-in renderer used when nothing is configured. Custom full-width
    /// rows have none.
    pub fn default_name(self) -> Option<&'static str> {
        match self {
            RendererKind::FullWidth => None,
            RendererKind::Loading => Some("agLoadingCellRenderer"),
            RendererKind::Group => Some("agGroupRowRenderer"),
            RendererKind::Detail => Some("agDetailCellRenderer"),
        }
    }
}

/// A resolved renderer, now or later.
pub enum Resolved {
    Ready(Box<dyn FullWidthRenderer>),
    /// Resolves when the sender fires. If the row is gone by then, the
    /// renderer is handed to [`FullWidthResolver::release`].
    Deferred(oneshot::Receiver<Box<dyn FullWidthRenderer>>),
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolved::Ready(_) => f.write_str("Resolved::Ready"),
            Resolved::Deferred(_) => f.write_str("Resolved::Deferred"),
        }
    }
}

/// Looks up full-width renderers by kind and name.
pub trait FullWidthResolver {
    fn resolve(
        &self,
        dom: &mut Dom,
        params: &FullWidthParams,
        kind: RendererKind,
        name: Option<&str>,
    ) -> Result<Resolved, FullWidthError>;

    /// Take back a renderer that resolved for a row that no longer exists.
    fn release(&self, dom: &mut Dom, mut renderer: Box<dyn FullWidthRenderer>) {
        renderer.destroy(dom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_modes() {
        assert_eq!(RendererKind::for_mode(RowMode::Normal), None);
        assert_eq!(RendererKind::for_mode(RowMode::FullWidthLoading), Some(RendererKind::Loading));
        assert_eq!(RendererKind::for_mode(RowMode::FullWidthDetail), Some(RendererKind::Detail));
    }

    #[test]
    fn keys_and_default_names() {
        assert_eq!(RendererKind::Group.key(), "groupRowRenderer");
        assert_eq!(RendererKind::Group.default_name(), Some("agGroupRowRenderer"));
        assert_eq!(RendererKind::FullWidth.key(), "fullWidthCellRenderer");
        assert_eq!(RendererKind::FullWidth.default_name(), None);
    }
}
