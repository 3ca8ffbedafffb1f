//! Snapshot rendering helpers.
//!
//! Turns a DOM subtree into indented plain text for snapshot tests. One line
//! per element: tag and classes, then attributes in brackets and inline
//! styles in braces. Children are indented two spaces.

use std::fmt::Write;

use crate::dom::{Dom, NodeData, NodeId};

/// Render `root` and everything below it.
///
/// # Examples
///
/// ```
/// use gilt_grid::dom::{Dom, NodeData};
/// use gilt_grid::testing::dom_to_string;
///
/// let mut dom = Dom::new();
/// let row = dom.create(NodeData::new("div").with_class("grid-row").with_attribute("row-id", "r1"));
/// dom.create_child(row, NodeData::new("div").with_class("grid-cell"));
/// assert_eq!(dom_to_string(&dom, row), "div.grid-row [row-id=r1]\n  div.grid-cell");
/// ```
pub fn dom_to_string(dom: &Dom, root: NodeId) -> String {
    let mut lines = Vec::new();
    write_node(dom, root, 0, &mut lines);
    lines.join("\n")
}

/// Render every child of `parent`, each as its own tree.
pub fn children_to_string(dom: &Dom, parent: NodeId) -> String {
    let mut lines = Vec::new();
    for &child in dom.children(parent) {
        write_node(dom, child, 0, &mut lines);
    }
    lines.join("\n")
}

fn write_node(dom: &Dom, id: NodeId, depth: usize, lines: &mut Vec<String>) {
    let Some(data) = dom.get(id) else {
        return;
    };
    lines.push(format!("{}{}", "  ".repeat(depth), describe(data)));
    for &child in dom.children(id) {
        write_node(dom, child, depth + 1, lines);
    }
}

fn describe(data: &NodeData) -> String {
    let mut line = data.tag.clone();
    for class in &data.classes {
        line.push('.');
        line.push_str(class);
    }
    if !data.attributes.is_empty() {
        let attributes: Vec<String> = data.attributes.iter().map(|(k, v)| format!("{k}={v}")).collect();
        // Writing to a String cannot fail.
        let _ = write!(line, " [{}]", attributes.join(" "));
    }
    if !data.styles.is_empty() {
        let styles: Vec<String> = data.styles.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        let _ = write!(line, " {{{}}}", styles.join("; "));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_elements_indent() {
        let mut dom = Dom::new();
        let root = dom.create(NodeData::new("div").with_class("body"));
        let row = dom.create_child(root, NodeData::new("div").with_classes(["grid-row", "grid-row-even"]));
        if let Some(data) = dom.get_mut(row) {
            data.set_style("height", "25px");
        }
        dom.create_child(row, NodeData::new("div").with_attribute("col-id", "a"));

        insta::assert_snapshot!(dom_to_string(&dom, root), @r"
        div.body
          div.grid-row.grid-row-even {height: 25px}
            div [col-id=a]
        ");
    }

    #[test]
    fn missing_root_renders_nothing() {
        let mut dom = Dom::new();
        let gone = dom.create(NodeData::new("div"));
        dom.remove(gone);
        assert_eq!(dom_to_string(&dom, gone), "");
    }

    #[test]
    fn children_render_as_siblings() {
        let mut dom = Dom::new();
        let parent = dom.create(NodeData::new("section"));
        dom.create_child(parent, NodeData::new("div").with_class("a"));
        dom.create_child(parent, NodeData::new("div").with_class("b"));
        assert_eq!(children_to_string(&dom, parent), "div.a\ndiv.b");
    }
}
