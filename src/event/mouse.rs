//! Mouse events delivered to a row.

use std::str::FromStr;

/// Which mouse event a row is handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    Click,
    DoubleClick,
    MouseDown,
}

impl MouseEventKind {
    /// The DOM event name.
    pub fn name(self) -> &'static str {
        match self {
            MouseEventKind::Click => "click",
            MouseEventKind::DoubleClick => "dblclick",
            MouseEventKind::MouseDown => "mousedown",
        }
    }
}

/// Error for an unrecognised event name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown row mouse event `{0}`")]
pub struct UnknownMouseEvent(pub String);

impl FromStr for MouseEventKind {
    type Err = UnknownMouseEvent;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "click" => Ok(MouseEventKind::Click),
            "dblclick" => Ok(MouseEventKind::DoubleClick),
            "mousedown" => Ok(MouseEventKind::MouseDown),
            other => Err(UnknownMouseEvent(other.to_owned())),
        }
    }
}

/// Modifier state and routing flags of a mouse event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseEvent {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    /// Set once some grid component has consumed the event; rows ignore it.
    pub handled_by_grid: bool,
}

impl MouseEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ctrl on most platforms, meta (command) on Apple.
    pub fn multi_select_key(&self) -> bool {
        self.ctrl || self.meta
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn handled(mut self) -> Self {
        self.handled_by_grid = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names() {
        assert_eq!("click".parse::<MouseEventKind>(), Ok(MouseEventKind::Click));
        assert_eq!("dblclick".parse::<MouseEventKind>(), Ok(MouseEventKind::DoubleClick));
        assert_eq!("mousedown".parse::<MouseEventKind>(), Ok(MouseEventKind::MouseDown));
        assert_eq!(
            "wheel".parse::<MouseEventKind>(),
            Err(UnknownMouseEvent("wheel".into()))
        );
    }

    #[test]
    fn names_round_trip() {
        for kind in [MouseEventKind::Click, MouseEventKind::DoubleClick, MouseEventKind::MouseDown] {
            assert_eq!(kind.name().parse::<MouseEventKind>(), Ok(kind));
        }
    }

    #[test]
    fn multi_select_key() {
        assert!(!MouseEvent::new().multi_select_key());
        assert!(MouseEvent::new().with_ctrl().multi_select_key());
        assert!(MouseEvent::new().with_meta().multi_select_key());
        assert!(!MouseEvent::new().with_shift().multi_select_key());
    }
}
