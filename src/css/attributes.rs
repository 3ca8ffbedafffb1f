//! Row element attributes: identity and ARIA state.

use crate::row::RowNode;

/// Attribute values for a row element. `None` means the attribute is removed.
pub fn row_attributes(row: &RowNode, header_row_count: usize) -> Vec<(&'static str, Option<String>)> {
    let index = row.row_index.map(|i| i.to_string());
    let aria_index = row.row_index.map(|i| (header_row_count + i + 1).to_string());
    let expanded = row.is_expandable().then(|| row.expanded.to_string());
    let selected = row.selectable.then(|| row.selected.to_string());
    vec![
        ("role", Some("row".to_string())),
        ("row-id", Some(row.id.clone())),
        ("row-index", index),
        ("aria-rowindex", aria_index),
        ("aria-selected", selected),
        ("aria-expanded", expanded),
        ("aria-level", Some((row.level + 1).to_string())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value<'a>(attrs: &'a [(&'static str, Option<String>)], name: &str) -> Option<&'a str> {
        attrs.iter().find(|(n, _)| *n == name).and_then(|(_, v)| v.as_deref())
    }

    #[test]
    fn aria_rowindex_counts_header_rows() {
        let attrs = row_attributes(&RowNode::new("r7").at_index(4), 2);
        assert_eq!(value(&attrs, "row-index"), Some("4"));
        assert_eq!(value(&attrs, "aria-rowindex"), Some("7"));
        assert_eq!(value(&attrs, "row-id"), Some("r7"));
        assert_eq!(value(&attrs, "aria-selected"), Some("false"));
        assert_eq!(value(&attrs, "aria-expanded"), None);
    }

    #[test]
    fn expandable_rows_report_expanded() {
        let mut row = RowNode::new("g");
        row.group = true;
        row.expanded = true;
        row.level = 1;
        let attrs = row_attributes(&row, 1);
        assert_eq!(value(&attrs, "aria-expanded"), Some("true"));
        assert_eq!(value(&attrs, "aria-level"), Some("2"));
        assert_eq!(value(&attrs, "row-index"), None);
    }
}
