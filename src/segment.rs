//! Segments: the physical containers a row projects into.

use crate::column::Pinned;
use crate::dom::NodeId;

/// One of the containers a row renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    Left,
    Center,
    Right,
    /// Dedicated container for full-width rows that are not embedded.
    FullWidth,
}

impl Segment {
    /// The cell-bearing segments, in the order rows build them.
    pub const CELL_SEGMENTS: [Segment; 3] = [Segment::Center, Segment::Left, Segment::Right];

    /// Segment a column with this pinned side belongs in.
    pub fn for_pinned(pinned: Option<Pinned>) -> Segment {
        match pinned {
            Some(Pinned::Left) => Segment::Left,
            Some(Pinned::Right) => Segment::Right,
            None => Segment::Center,
        }
    }

    /// Pinned side of the segment; `None` for center and full-width.
    pub fn pinned(self) -> Option<Pinned> {
        match self {
            Segment::Left => Some(Pinned::Left),
            Segment::Right => Some(Pinned::Right),
            Segment::Center | Segment::FullWidth => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Segment::Left => "left",
            Segment::Center => "center",
            Segment::Right => "right",
            Segment::FullWidth => "full-width",
        }
    }
}

/// Host containers a row appends its segment elements to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowContainers {
    pub left: NodeId,
    pub center: NodeId,
    pub right: NodeId,
    pub full_width: NodeId,
}

impl RowContainers {
    pub fn get(&self, segment: Segment) -> NodeId {
        match segment {
            Segment::Left => self.left,
            Segment::Center => self.center,
            Segment::Right => self.right,
            Segment::FullWidth => self.full_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinned_round_trip() {
        for segment in Segment::CELL_SEGMENTS {
            assert_eq!(Segment::for_pinned(segment.pinned()), segment);
        }
        assert_eq!(Segment::FullWidth.pinned(), None);
    }

    #[test]
    fn names() {
        assert_eq!(Segment::Left.name(), "left");
        assert_eq!(Segment::FullWidth.name(), "full-width");
    }
}
