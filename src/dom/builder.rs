//! Event-driven tree construction
//!
//! The builder implements [`SaxHandler`] and owns its insertion-point stack
//! as an instance field, so concurrent or nested parses cannot interfere:
//! every parse gets its own builder.

use crate::dom::attributes::AttrTable;
use crate::dom::namespace::NsScope;
use crate::dom::node::{ElementNs, XmlElement, XmlNode};
use crate::error::{Error, Result};
use crate::sax::{OpenTag, Position, SaxHandler};
use std::sync::Arc;

/// Per-document parse options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Track namespace metadata on elements and attributes.
    pub xmlns: bool,
}

/// Builds the node tree from tokenizer events.
pub(crate) struct TreeBuilder {
    options: ParseOptions,
    /// Insertion-point stack: the innermost open element is last.
    stack: Vec<XmlElement>,
    /// Prefix scope per open element, innermost last; index 0 is the root
    /// scope. Only maintained in namespace mode.
    scopes: Vec<Arc<NsScope>>,
    root: Option<XmlElement>,
    doctype: String,
    seen_root: bool,
}

impl TreeBuilder {
    pub(crate) fn new(options: ParseOptions) -> Self {
        TreeBuilder {
            options,
            stack: Vec::new(),
            scopes: vec![NsScope::root()],
            root: None,
            doctype: String::new(),
            seen_root: false,
        }
    }

    /// Hand over the finished root element and accumulated doctype text.
    pub(crate) fn into_parts(self) -> Result<(XmlElement, String)> {
        match self.root {
            Some(root) => Ok((root, self.doctype)),
            // the tokenizer guarantees a root on a successful run
            None => Err(Error::Parse {
                message: "missing root element".to_string(),
                position: Position::default(),
            }),
        }
    }

    fn build_element(&mut self, tag: OpenTag, position: Position) -> XmlElement {
        if !self.options.xmlns {
            let mut attributes = AttrTable::plain();
            for attribute in &tag.attributes {
                attributes.set(&attribute.name, attribute.value.clone(), None);
            }
            return XmlElement::new(tag.name, attributes, position);
        }

        // Collect this tag's xmlns declarations before storing any attribute,
        // so resolution does not depend on attribute order.
        let declarations: Vec<(String, String)> = tag
            .attributes
            .iter()
            .filter_map(|attribute| {
                if attribute.name == "xmlns" {
                    Some((String::new(), attribute.value.clone()))
                } else {
                    attribute
                        .name
                        .strip_prefix("xmlns:")
                        .map(|prefix| (prefix.to_string(), attribute.value.clone()))
                }
            })
            .collect();

        let parent = self
            .scopes
            .last()
            .cloned()
            .unwrap_or_else(NsScope::root);
        let scope = if declarations.is_empty() {
            parent
        } else {
            NsScope::child(&parent, declarations)
        };
        self.scopes.push(Arc::clone(&scope));

        let (local, uri) = match tag.name.split_once(':') {
            Some((prefix, local)) => (
                local.to_string(),
                scope.resolve(prefix).unwrap_or("").to_string(),
            ),
            None => (
                tag.name.clone(),
                scope.resolve("").unwrap_or("").to_string(),
            ),
        };

        let mut attributes = AttrTable::namespaced();
        for attribute in &tag.attributes {
            attributes.set(&attribute.name, attribute.value.clone(), Some(&scope));
        }

        let ns = ElementNs {
            local,
            uri,
            scope,
        };
        XmlElement::new_namespaced(tag.name, attributes, position, ns)
    }
}

impl SaxHandler for TreeBuilder {
    fn open_tag(&mut self, tag: OpenTag, position: Position) -> Result<()> {
        let element = self.build_element(tag, position);
        self.seen_root = true;
        self.stack.push(element);
        Ok(())
    }

    fn close_tag(&mut self) -> Result<()> {
        if self.options.xmlns && self.scopes.len() > 1 {
            self.scopes.pop();
        }
        let Some(element) = self.stack.pop() else {
            return Ok(());
        };
        match self.stack.last_mut() {
            Some(parent) => parent.append(XmlNode::Element(element)),
            None => self.root = Some(element),
        }
        Ok(())
    }

    fn text(&mut self, chunk: &str) -> Result<()> {
        // content outside any element is document-level and carries nothing
        if let Some(element) = self.stack.last_mut() {
            element.append(XmlNode::Text(chunk.to_string()));
        }
        Ok(())
    }

    fn cdata(&mut self, chunk: &str) -> Result<()> {
        if let Some(element) = self.stack.last_mut() {
            element.append(XmlNode::CData(chunk.to_string()));
        }
        Ok(())
    }

    fn comment(&mut self, chunk: &str) -> Result<()> {
        if let Some(element) = self.stack.last_mut() {
            element.append(XmlNode::Comment(chunk.to_string()));
        }
        Ok(())
    }

    fn doctype(&mut self, chunk: &str, position: Position) -> Result<()> {
        if self.seen_root {
            return Err(Error::MisplacedDoctype { position });
        }
        self.doctype.push_str(chunk);
        Ok(())
    }
}
