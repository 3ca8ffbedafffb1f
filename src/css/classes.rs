//! Row CSS class names and the classes a row element starts with.

use crate::column::Pinned;
use crate::row::{RowHighlight, RowMode, RowNode};

pub const ROW: &str = "grid-row";
pub const FOCUS: &str = "grid-row-focus";
pub const NO_FOCUS: &str = "grid-row-no-focus";
pub const EVEN: &str = "grid-row-even";
pub const ODD: &str = "grid-row-odd";
pub const FIRST_ON_PAGE: &str = "grid-row-first";
pub const LAST_ON_PAGE: &str = "grid-row-last";
pub const SELECTED: &str = "grid-row-selected";
pub const GROUP: &str = "grid-row-group";
pub const EXPANDED: &str = "grid-row-group-expanded";
pub const CONTRACTED: &str = "grid-row-group-contracted";
pub const DRAGGING: &str = "grid-row-dragging";
pub const HIGHLIGHT_ABOVE: &str = "grid-row-highlight-above";
pub const HIGHLIGHT_BELOW: &str = "grid-row-highlight-below";
pub const LOADING: &str = "grid-row-loading";
pub const FULL_WIDTH: &str = "grid-full-width-row";
pub const FOOTER: &str = "grid-row-footer";
pub const PINNED_LEFT: &str = "grid-row-pinned-left";
pub const PINNED_RIGHT: &str = "grid-row-pinned-right";
pub const POSITION_ABSOLUTE: &str = "grid-row-position-absolute";
pub const OPACITY_ZERO: &str = "grid-opacity-zero";
pub const EDITING: &str = "grid-row-editing";
pub const NOT_EDITING: &str = "grid-row-not-editing";

const STATE_CLASSES: &[&str] = &[
    ROW,
    FOCUS,
    NO_FOCUS,
    EVEN,
    ODD,
    FIRST_ON_PAGE,
    LAST_ON_PAGE,
    SELECTED,
    GROUP,
    EXPANDED,
    CONTRACTED,
    DRAGGING,
    HIGHLIGHT_ABOVE,
    HIGHLIGHT_BELOW,
    LOADING,
    FULL_WIDTH,
    FOOTER,
    PINNED_LEFT,
    PINNED_RIGHT,
    POSITION_ABSOLUTE,
    OPACITY_ZERO,
    EDITING,
    NOT_EDITING,
];

const LEVEL_PREFIX: &str = "grid-row-level-";

/// Whether the row controller owns `class`. User hooks never take these away.
pub fn is_state_class(class: &str) -> bool {
    STATE_CLASSES.contains(&class) || is_level_class(class)
}

pub fn level_class(level: usize) -> String {
    format!("{LEVEL_PREFIX}{level}")
}

/// Whether `class` is a level class, whatever the level.
pub fn is_level_class(class: &str) -> bool {
    class.starts_with(LEVEL_PREFIX)
}

/// Even/odd class for a row index. Rows without an index get neither.
pub fn parity_class(row_index: Option<usize>) -> Option<&'static str> {
    row_index.map(|index| if index % 2 == 0 { EVEN } else { ODD })
}

pub fn highlight_class(highlight: RowHighlight) -> &'static str {
    match highlight {
        RowHighlight::Above => HIGHLIGHT_ABOVE,
        RowHighlight::Below => HIGHLIGHT_BELOW,
    }
}

/// Row state that is not stored on the row itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassContext {
    pub mode: RowMode,
    pub focused: bool,
    pub first_on_page: bool,
    pub last_on_page: bool,
    pub print_layout: bool,
    pub fade_in: bool,
    pub editing: bool,
}

/// Classes for a freshly created row element.
pub fn initial_classes(row: &RowNode, ctx: ClassContext) -> Vec<String> {
    let mut classes: Vec<&str> = vec![ROW];
    classes.push(if ctx.focused { FOCUS } else { NO_FOCUS });
    if ctx.fade_in {
        classes.push(OPACITY_ZERO);
    }
    if let Some(parity) = parity_class(row.row_index) {
        classes.push(parity);
    }
    if ctx.first_on_page {
        classes.push(FIRST_ON_PAGE);
    }
    if ctx.last_on_page {
        classes.push(LAST_ON_PAGE);
    }
    if ctx.mode.is_full_width() {
        classes.push(FULL_WIDTH);
    }
    if row.selected {
        classes.push(SELECTED);
    }
    if row.group {
        classes.push(GROUP);
    }
    if row.is_expandable() {
        classes.push(if row.expanded { EXPANDED } else { CONTRACTED });
    }
    if row.dragging {
        classes.push(DRAGGING);
    }
    if let Some(highlight) = row.highlighted {
        classes.push(highlight_class(highlight));
    }
    if row.stub {
        classes.push(LOADING);
    }
    if row.footer {
        classes.push(FOOTER);
    }
    match row.pinned {
        Some(Pinned::Left) => classes.push(PINNED_LEFT),
        Some(Pinned::Right) => classes.push(PINNED_RIGHT),
        None => {}
    }
    if !ctx.print_layout {
        classes.push(POSITION_ABSOLUTE);
    }
    classes.push(if ctx.editing { EDITING } else { NOT_EDITING });

    let mut owned: Vec<String> = classes.into_iter().map(str::to_string).collect();
    owned.push(level_class(row.level));
    owned
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx() -> ClassContext {
        ClassContext {
            mode: RowMode::Normal,
            focused: false,
            first_on_page: false,
            last_on_page: false,
            print_layout: false,
            fade_in: false,
            editing: false,
        }
    }

    #[test]
    fn plain_row_classes() {
        let row = RowNode::new("r").at_index(3);
        assert_eq!(
            initial_classes(&row, ctx()),
            vec![
                "grid-row",
                "grid-row-no-focus",
                "grid-row-odd",
                "grid-row-position-absolute",
                "grid-row-not-editing",
                "grid-row-level-0",
            ]
        );
    }

    #[test]
    fn group_row_classes() {
        let mut row = RowNode::new("g").at_index(0);
        row.group = true;
        row.expanded = true;
        row.level = 2;
        row.selected = true;
        let classes = initial_classes(
            &row,
            ClassContext {
                mode: RowMode::FullWidthGroup,
                focused: true,
                first_on_page: true,
                print_layout: true,
                ..ctx()
            },
        );
        for expected in [FOCUS, EVEN, FIRST_ON_PAGE, FULL_WIDTH, SELECTED, GROUP, EXPANDED, "grid-row-level-2"] {
            assert!(classes.iter().any(|c| c == expected), "missing {expected}");
        }
        assert!(!classes.iter().any(|c| c == POSITION_ABSOLUTE));
    }

    #[test]
    fn parity_and_level_helpers() {
        assert_eq!(parity_class(None), None);
        assert_eq!(parity_class(Some(4)), Some(EVEN));
        assert!(is_level_class(&level_class(7)));
        assert!(!is_level_class(GROUP));
        assert!(is_state_class(SELECTED));
        assert!(is_state_class("grid-row-level-3"));
        assert!(!is_state_class("warm"));
    }
}
