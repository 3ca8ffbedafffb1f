//! User row style and class hooks.
//!
//! Hooks are re-evaluated whenever row data changes. Classes and style
//! properties a hook stops returning are removed again, so the hook output is
//! always what the row shows. Classes the row controller manages itself are
//! never removed this way.

use crate::dom::{Dom, NodeId};
use crate::error::StyleHookError;
use crate::logging::targets;
use crate::row::RowNode;

use super::classes::is_state_class;

/// What a style hook returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowStyle {
    Pairs(Vec<(String, String)>),
    /// A raw style string. Not supported; ignored with a warning.
    Text(String),
}

/// Per-row style and class callbacks supplied by the grid user.
pub trait RowStyleHooks {
    fn row_style(&self, _row: &RowNode) -> Option<RowStyle> {
        None
    }

    fn row_classes(&self, _row: &RowNode) -> Vec<String> {
        Vec::new()
    }
}

/// Check a style hook result.
pub fn validate_style(style: RowStyle) -> Result<Vec<(String, String)>, StyleHookError> {
    match style {
        RowStyle::Text(text) => Err(StyleHookError::TextStyle(text)),
        RowStyle::Pairs(pairs) => {
            if pairs.iter().any(|(property, _)| property.trim().is_empty()) {
                return Err(StyleHookError::EmptyProperty);
            }
            Ok(pairs)
        }
    }
}

/// Split class hook output into usable classes and the rejected ones.
pub fn validate_classes(classes: Vec<String>) -> (Vec<String>, Vec<StyleHookError>) {
    let mut valid = Vec::new();
    let mut errors = Vec::new();
    for class in classes {
        if class.is_empty() {
            continue;
        }
        if class.chars().any(char::is_whitespace) {
            errors.push(StyleHookError::InvalidClass(class));
        } else {
            valid.push(class);
        }
    }
    (valid, errors)
}

/// What the hooks last applied to a row, so it can be taken back.
#[derive(Debug, Default)]
pub struct AppliedHooks {
    classes: Vec<String>,
    properties: Vec<String>,
}

impl AppliedHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate the hooks for `row` and write the result onto `elements`.
    pub fn apply(&mut self, dom: &mut Dom, elements: &[NodeId], hooks: &dyn RowStyleHooks, row: &RowNode) {
        let styles = match hooks.row_style(row).map(validate_style) {
            Some(Ok(pairs)) => pairs,
            Some(Err(err)) => {
                tracing::warn!(target: targets::STYLE, row = %row.id, "{err}");
                Vec::new()
            }
            None => Vec::new(),
        };
        let (classes, errors) = validate_classes(hooks.row_classes(row));
        for err in errors {
            tracing::warn!(target: targets::STYLE, row = %row.id, "{err}");
        }

        for &element in elements {
            let Some(data) = dom.get_mut(element) else {
                continue;
            };
            // Row state classes are kept in sync by the controller.
            for stale in self.classes.iter().filter(|c| !classes.contains(c) && !is_state_class(c)) {
                data.remove_class(stale);
            }
            for class in &classes {
                data.add_class(class);
            }
            for stale in self.properties.iter().filter(|p| !styles.iter().any(|(q, _)| q == *p)) {
                data.remove_style(stale);
            }
            for (property, value) in &styles {
                data.set_style(property, value.clone());
            }
        }

        self.classes = classes;
        self.properties = styles.into_iter().map(|(property, _)| property).collect();
    }

    /// Classes applied by the last evaluation.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}
