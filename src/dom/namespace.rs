//! Namespace prefix scopes
//!
//! Scopes form a parent-linked chain shared between elements: an element
//! that declares nothing reuses its parent's scope handle, one that declares
//! prefixes gets a child scope holding only those declarations. Resolution
//! walks the chain at lookup time instead of flattening declarations down.

use std::sync::Arc;

/// Reserved namespace URI bound to the `xml` prefix.
pub const XML_URI: &str = "http://www.w3.org/XML/1998/namespace";
/// Reserved namespace URI bound to the `xmlns` prefix.
pub const XMLNS_URI: &str = "http://www.w3.org/2000/xmlns/";

/// One level of prefix-to-URI declarations.
///
/// The empty prefix records a default namespace (`xmlns="..."`).
#[derive(Debug)]
pub struct NsScope {
    declarations: Vec<(String, String)>,
    parent: Option<Arc<NsScope>>,
}

impl NsScope {
    /// Root scope with the reserved `xml` and `xmlns` prefixes pre-bound.
    pub(crate) fn root() -> Arc<Self> {
        Arc::new(NsScope {
            declarations: vec![
                ("xml".to_string(), XML_URI.to_string()),
                ("xmlns".to_string(), XMLNS_URI.to_string()),
            ],
            parent: None,
        })
    }

    /// New scope holding `declarations`, chained under `parent`.
    pub(crate) fn child(parent: &Arc<NsScope>, declarations: Vec<(String, String)>) -> Arc<Self> {
        Arc::new(NsScope {
            declarations,
            parent: Some(Arc::clone(parent)),
        })
    }

    /// Resolve a prefix through this scope and its ancestors.
    ///
    /// The nearest declaration wins. Pass the empty prefix to resolve the
    /// default namespace.
    pub fn resolve(&self, prefix: &str) -> Option<&str> {
        let mut scope = self;
        loop {
            if let Some((_, uri)) = scope
                .declarations
                .iter()
                .rev()
                .find(|(p, _)| p.as_str() == prefix)
            {
                return Some(uri);
            }
            scope = scope.parent.as_deref()?;
        }
    }

    /// Find a prefix mapped to `uri` among this scope's own declarations.
    ///
    /// Ancestors are not consulted: elements that declare nothing share
    /// their nearest declaring ancestor's scope handle, so that ancestor's
    /// declarations already count as their own.
    pub fn prefix_for(&self, uri: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, u)| !p.is_empty() && u.as_str() == uri)
            .map(|(p, _)| p.as_str())
    }

    /// This scope's own declarations, in written order.
    pub fn declarations(&self) -> &[(String, String)] {
        &self.declarations
    }
}
