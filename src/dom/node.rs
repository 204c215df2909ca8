//! Tree node model
//!
//! Nodes are owned recursively: an element holds its children directly, so a
//! finished tree can be navigated and borrowed without indirection.

use crate::dom::attributes::AttrTable;
use crate::dom::namespace::NsScope;
use crate::error::{Error, Result};
use crate::sax::Position;
use std::sync::Arc;

/// Type of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    CData,
    Comment,
}

/// A node of the document tree.
#[derive(Debug, Clone)]
pub enum XmlNode {
    Element(XmlElement),
    /// Raw character content, as written (no trimming).
    Text(String),
    /// CDATA content, stored without entity escaping.
    CData(String),
    /// Comment content.
    Comment(String),
}

impl XmlNode {
    /// The node's kind discriminant.
    pub fn kind(&self) -> NodeKind {
        match self {
            XmlNode::Element(_) => NodeKind::Element,
            XmlNode::Text(_) => NodeKind::Text,
            XmlNode::CData(_) => NodeKind::CData,
            XmlNode::Comment(_) => NodeKind::Comment,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, XmlNode::Element(_))
    }

    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlNode::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut XmlElement> {
        match self {
            XmlNode::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Character content of a non-element node.
    pub fn content(&self) -> Option<&str> {
        match self {
            XmlNode::Element(_) => None,
            XmlNode::Text(text) => Some(text),
            XmlNode::CData(data) => Some(data),
            XmlNode::Comment(comment) => Some(comment),
        }
    }
}

/// Namespace identity of an element parsed with the `xmlns` option.
#[derive(Debug, Clone)]
pub(crate) struct ElementNs {
    pub local: String,
    pub uri: String,
    pub scope: Arc<NsScope>,
}

/// An element node: tag name, attributes, children, accumulated text.
#[derive(Debug, Clone)]
pub struct XmlElement {
    /// Raw tag name as written, prefix included.
    pub name: String,
    /// Attributes in written order.
    pub attributes: AttrTable,
    /// Child nodes in document order.
    pub children: Vec<XmlNode>,
    /// Concatenation of direct Text and CData children, in document order.
    /// Content nested inside child elements is not included.
    pub value: String,
    /// Where the start tag was parsed.
    pub position: Position,
    pub(crate) ns: Option<ElementNs>,
}

impl XmlElement {
    pub(crate) fn new(name: String, attributes: AttrTable, position: Position) -> Self {
        XmlElement {
            name,
            attributes,
            children: Vec::new(),
            value: String::new(),
            position,
            ns: None,
        }
    }

    pub(crate) fn new_namespaced(
        name: String,
        attributes: AttrTable,
        position: Position,
        ns: ElementNs,
    ) -> Self {
        XmlElement {
            name,
            attributes,
            children: Vec::new(),
            value: String::new(),
            position,
            ns: Some(ns),
        }
    }

    /// Append a child, extending `value` for Text and CData nodes.
    pub(crate) fn append(&mut self, child: XmlNode) {
        match &child {
            XmlNode::Text(text) => self.value.push_str(text),
            XmlNode::CData(data) => self.value.push_str(data),
            _ => {}
        }
        self.children.push(child);
    }

    /// First child node, if any. Always agrees with `children`.
    pub fn first_child(&self) -> Option<&XmlNode> {
        self.children.first()
    }

    /// Last child node, if any. Always agrees with `children`.
    pub fn last_child(&self) -> Option<&XmlNode> {
        self.children.last()
    }

    /// Whether this element carries namespace metadata.
    pub fn is_namespaced(&self) -> bool {
        self.ns.is_some()
    }

    /// Local name (tag name without prefix); present in namespace mode.
    pub fn local_name(&self) -> Option<&str> {
        self.ns.as_ref().map(|ns| ns.local.as_str())
    }

    /// Resolved namespace URI; present in namespace mode. Elements in no
    /// namespace carry the empty string.
    pub fn namespace_uri(&self) -> Option<&str> {
        self.ns.as_ref().map(|ns| ns.uri.as_str())
    }

    pub(crate) fn require_namespaced(&self, operation: &'static str) -> Result<()> {
        if self.ns.is_some() {
            Ok(())
        } else {
            Err(Error::NamespaceUnsupported { operation })
        }
    }

    /// Attribute value by literal name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    /// Set an attribute by literal name.
    ///
    /// See [`AttrTable::set`] for the namespace-mode write rules.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let scope = self.ns.as_ref().map(|ns| Arc::clone(&ns.scope));
        self.attributes.set(name, value.into(), scope.as_deref());
    }

    /// Attribute value by `(uri, local)`. Requires namespace mode.
    pub fn attr_ns(&self, uri: &str, local: &str) -> Result<Option<&str>> {
        self.attributes.get_ns(uri, local)
    }

    /// Attribute presence by `(uri, local)`. Requires namespace mode.
    pub fn has_attr_ns(&self, uri: &str, local: &str) -> Result<bool> {
        self.attributes.has_ns(uri, local)
    }

    /// Set an attribute by `(uri, local)`. Requires namespace mode.
    ///
    /// The URI must have a prefix declared in the element's own scope;
    /// otherwise the write is a no-op.
    pub fn set_attr_ns(&mut self, uri: &str, local: &str, value: impl Into<String>) -> Result<()> {
        let scope = match self.ns.as_ref() {
            Some(ns) => Arc::clone(&ns.scope),
            None => {
                return Err(Error::NamespaceUnsupported {
                    operation: "set_attr_ns",
                })
            }
        };
        self.attributes.set_ns(uri, local, value.into(), &scope)
    }
}
