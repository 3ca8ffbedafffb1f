//! Element types: NodeId, NodeData.

use std::collections::BTreeMap;

use slotmap::new_key_type;

new_key_type! {
    /// Unique identifier for a DOM element. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Data associated with a single DOM-equivalent element.
///
/// Classes keep insertion order so snapshot output is stable. Attributes and
/// inline styles are sorted by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeData {
    /// Element tag (e.g. "div", "cell").
    pub tag: String,
    /// CSS classes, deduplicated.
    pub classes: Vec<String>,
    /// Attributes such as `role`, `row-index` or `aria-*`.
    pub attributes: BTreeMap<String, String>,
    /// Inline style properties (`top`, `transform`, `height`, ...).
    pub styles: BTreeMap<String, String>,
}

impl NodeData {
    /// Create a new element with the given tag and no classes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Add a single CSS class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Add multiple CSS classes (builder).
    pub fn with_classes(mut self, classes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for class in classes {
            self = self.with_class(class);
        }
        self
    }

    /// Set an attribute (builder).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Check whether this element has a given CSS class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a CSS class. No-op if already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    /// Remove a CSS class. No-op if not present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Add the class when `on` is true, remove it otherwise.
    pub fn set_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// Read an attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        self.attributes.insert(name.to_owned(), value.into());
    }

    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    /// Read an inline style property.
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, property: &str, value: impl Into<String>) {
        self.styles.insert(property.to_owned(), value.into());
    }

    pub fn remove_style(&mut self, property: &str) {
        self.styles.remove(property);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults() {
        let data = NodeData::new("div");
        assert_eq!(data.tag, "div");
        assert!(data.classes.is_empty());
        assert!(data.attributes.is_empty());
        assert!(data.styles.is_empty());
    }

    #[test]
    fn builder_with_class_dedup() {
        let data = NodeData::new("div").with_class("grid-row").with_class("grid-row");
        assert_eq!(data.classes, vec!["grid-row"]);
    }

    #[test]
    fn builder_with_classes_keeps_order() {
        let data = NodeData::new("div").with_classes(["b", "a", "b"]);
        assert_eq!(data.classes, vec!["b", "a"]);
    }

    #[test]
    fn set_class_adds_and_removes() {
        let mut data = NodeData::new("div");
        data.set_class("grid-row-selected", true);
        data.set_class("grid-row-selected", true);
        assert_eq!(data.classes, vec!["grid-row-selected"]);
        data.set_class("grid-row-selected", false);
        assert!(!data.has_class("grid-row-selected"));
    }

    #[test]
    fn remove_class_noop() {
        let mut data = NodeData::new("div");
        data.remove_class("missing");
        assert!(data.classes.is_empty());
    }

    #[test]
    fn attributes_round_trip() {
        let mut data = NodeData::new("div").with_attribute("role", "row");
        assert_eq!(data.attribute("role"), Some("row"));
        data.set_attribute("aria-selected", "true");
        data.remove_attribute("role");
        assert_eq!(data.attribute("role"), None);
        assert_eq!(data.attribute("aria-selected"), Some("true"));
    }

    #[test]
    fn styles_overwrite() {
        let mut data = NodeData::new("div");
        data.set_style("top", "10px");
        data.set_style("top", "20px");
        assert_eq!(data.style("top"), Some("20px"));
        data.remove_style("top");
        assert_eq!(data.style("top"), None);
    }

    #[test]
    fn node_id_is_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<NodeId>();
    }
}
