//! Read-only navigation over a finished tree
//!
//! Traversal order is document order (pre-order, depth-first). A miss is
//! `None`/`Ok(None)`, never an error; the `_ns` operations error only when
//! the document was parsed without the `xmlns` option.

use crate::dom::node::{XmlElement, XmlNode};
use crate::error::Result;
use std::ops::ControlFlow;

impl XmlElement {
    /// Visit each element child in document order.
    ///
    /// Text, CData, and comment children are skipped, but `index` is the
    /// child's position within the full `children` list, which is also
    /// passed to the visitor. Returning `ControlFlow::Break(())` stops the
    /// iteration immediately.
    pub fn each_child<F>(&self, mut visitor: F)
    where
        F: FnMut(&XmlElement, usize, &[XmlNode]) -> ControlFlow<()>,
    {
        for (index, child) in self.children.iter().enumerate() {
            if let XmlNode::Element(element) = child {
                if visitor(element, index, &self.children).is_break() {
                    return;
                }
            }
        }
    }

    /// First element child with the given raw name.
    pub fn child_named(&self, name: &str) -> Option<&XmlElement> {
        self.children
            .iter()
            .filter_map(XmlNode::as_element)
            .find(|child| child.name == name)
    }

    /// Mutable variant of [`child_named`](Self::child_named).
    pub fn child_named_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
        self.children
            .iter_mut()
            .filter_map(XmlNode::as_element_mut)
            .find(|child| child.name == name)
    }

    /// First element child whose resolved `(local, uri)` matches.
    pub fn child_named_ns(&self, uri: &str, local: &str) -> Result<Option<&XmlElement>> {
        self.require_namespaced("child_named_ns")?;
        Ok(self
            .children
            .iter()
            .filter_map(XmlNode::as_element)
            .find(|child| child.matches_ns(uri, local)))
    }

    /// All element children with the given raw name, in document order.
    pub fn children_named(&self, name: &str) -> Vec<&XmlElement> {
        self.children
            .iter()
            .filter_map(XmlNode::as_element)
            .filter(|child| child.name == name)
            .collect()
    }

    /// All element children matching `(local, uri)`, in document order.
    pub fn children_named_ns(&self, uri: &str, local: &str) -> Result<Vec<&XmlElement>> {
        self.require_namespaced("children_named_ns")?;
        Ok(self
            .children
            .iter()
            .filter_map(XmlNode::as_element)
            .filter(|child| child.matches_ns(uri, local))
            .collect())
    }

    /// First element child carrying the attribute.
    ///
    /// With a value, the attribute must equal it. Without one, presence
    /// means key existence: an attribute whose value is the empty string
    /// counts as present.
    pub fn child_with_attribute(&self, name: &str, value: Option<&str>) -> Option<&XmlElement> {
        self.children
            .iter()
            .filter_map(XmlNode::as_element)
            .find(|child| match value {
                Some(value) => child.attr(name) == Some(value),
                None => child.attr(name).is_some(),
            })
    }

    /// Namespace-qualified variant of
    /// [`child_with_attribute`](Self::child_with_attribute).
    pub fn child_with_attribute_ns(
        &self,
        uri: &str,
        name: &str,
        value: Option<&str>,
    ) -> Result<Option<&XmlElement>> {
        self.require_namespaced("child_with_attribute_ns")?;
        for child in self.children.iter().filter_map(XmlNode::as_element) {
            let found = match value {
                Some(value) => child.attr_ns(uri, name)? == Some(value),
                None => child.has_attr_ns(uri, name)?,
            };
            if found {
                return Ok(Some(child));
            }
        }
        Ok(None)
    }

    /// All elements with the given raw name in the subtree, pre-order.
    pub fn descendants_named(&self, name: &str) -> Vec<&XmlElement> {
        let mut matches = Vec::new();
        self.collect_descendants(&mut matches, &|child| child.name == name);
        matches
    }

    /// All elements matching `(local, uri)` in the subtree, pre-order.
    pub fn descendants_named_ns(&self, uri: &str, local: &str) -> Result<Vec<&XmlElement>> {
        self.require_namespaced("descendants_named_ns")?;
        let mut matches = Vec::new();
        self.collect_descendants(&mut matches, &|child| child.matches_ns(uri, local));
        Ok(matches)
    }

    /// Walk a `.`-delimited path of child names from this element.
    ///
    /// Returns `None` at the first missing component.
    pub fn descendant_with_path(&self, path: &str) -> Option<&XmlElement> {
        let mut descendant = self;
        for component in path.split('.') {
            descendant = descendant.child_named(component)?;
        }
        Some(descendant)
    }

    /// Walk a `.`-delimited path of `(local, uri)` child names, one shared
    /// URI across all components.
    pub fn descendant_with_path_ns(&self, uri: &str, path: &str) -> Result<Option<&XmlElement>> {
        self.require_namespaced("descendant_with_path_ns")?;
        let mut descendant = self;
        for component in path.split('.') {
            match descendant.child_named_ns(uri, component)? {
                Some(next) => descendant = next,
                None => return Ok(None),
            }
        }
        Ok(Some(descendant))
    }

    /// Resolve a path and read the target's text value or an attribute.
    ///
    /// `"a.b"` yields the `value` of the descendant at `a.b`; `"a.b@attr"`
    /// yields that descendant's attribute instead. A missing descendant
    /// yields `None`.
    pub fn value_with_path(&self, path: &str) -> Option<&str> {
        let mut parts = path.split('@');
        let descendant_path = parts.next().unwrap_or("");
        let attribute = parts.next();

        let descendant = self.descendant_with_path(descendant_path)?;
        match attribute {
            Some(attribute) => descendant.attr(attribute),
            None => Some(descendant.value.as_str()),
        }
    }

    /// Namespace-qualified variant of
    /// [`value_with_path`](Self::value_with_path); the attribute is looked
    /// up by `(uri, name)`.
    pub fn value_with_path_ns(&self, uri: &str, path: &str) -> Result<Option<&str>> {
        self.require_namespaced("value_with_path_ns")?;
        let mut parts = path.split('@');
        let descendant_path = parts.next().unwrap_or("");
        let attribute = parts.next();

        let descendant = match self.descendant_with_path_ns(uri, descendant_path)? {
            Some(descendant) => descendant,
            None => return Ok(None),
        };
        match attribute {
            Some(attribute) => descendant.attr_ns(uri, attribute),
            None => Ok(Some(descendant.value.as_str())),
        }
    }

    fn matches_ns(&self, uri: &str, local: &str) -> bool {
        self.local_name() == Some(local) && self.namespace_uri() == Some(uri)
    }

    fn collect_descendants<'a>(
        &'a self,
        matches: &mut Vec<&'a XmlElement>,
        predicate: &dyn Fn(&XmlElement) -> bool,
    ) {
        for child in self.children.iter().filter_map(XmlNode::as_element) {
            if predicate(child) {
                matches.push(child);
            }
            child.collect_descendants(matches, predicate);
        }
    }
}
