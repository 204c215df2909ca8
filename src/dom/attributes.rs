//! Attribute storage
//!
//! Two layouts selected once per document: plain name/value pairs, or
//! namespace-aware triples addressable by `(uri, local)` as well as by the
//! literal name. Entries keep insertion order; names are unique, so a write
//! to an existing name updates the value in place.

use crate::dom::namespace::NsScope;
use crate::error::{Error, Result};

/// A plain attribute entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainAttr {
    pub name: String,
    pub value: String,
}

/// A namespace-aware attribute entry.
///
/// `name` is the literal key as written (`ns:title`); `local` and `uri` are
/// its resolved namespace identity. Bare names carry an empty `uri`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NsAttr {
    pub name: String,
    pub local: String,
    pub uri: String,
    pub value: String,
}

/// Ordered attribute table of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrTable {
    Plain(Vec<PlainAttr>),
    Namespaced(Vec<NsAttr>),
}

impl AttrTable {
    pub(crate) fn plain() -> Self {
        AttrTable::Plain(Vec::new())
    }

    pub(crate) fn namespaced() -> Self {
        AttrTable::Namespaced(Vec::new())
    }

    /// Whether this table tracks namespace metadata.
    pub fn is_namespaced(&self) -> bool {
        matches!(self, AttrTable::Namespaced(_))
    }

    /// Number of stored attributes.
    pub fn len(&self) -> usize {
        match self {
            AttrTable::Plain(entries) => entries.len(),
            AttrTable::Namespaced(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a value by the attribute's literal name.
    pub fn get(&self, name: &str) -> Option<&str> {
        match self {
            AttrTable::Plain(entries) => entries
                .iter()
                .find(|a| a.name == name)
                .map(|a| a.value.as_str()),
            AttrTable::Namespaced(entries) => entries
                .iter()
                .find(|a| a.name == name)
                .map(|a| a.value.as_str()),
        }
    }

    /// Write a value by literal name.
    ///
    /// An existing name keeps its position and namespace metadata; only the
    /// value changes. In namespace mode a new prefixed name resolves against
    /// `scope`, and the write is silently dropped when the prefix has no
    /// visible declaration — declarations may not be in view yet depending
    /// on attribute order, so this is not an error. A new bare name stores
    /// an empty URI.
    pub fn set(&mut self, name: &str, value: String, scope: Option<&NsScope>) {
        match self {
            AttrTable::Plain(entries) => {
                if let Some(existing) = entries.iter_mut().find(|a| a.name == name) {
                    existing.value = value;
                } else {
                    entries.push(PlainAttr {
                        name: name.to_string(),
                        value,
                    });
                }
            }
            AttrTable::Namespaced(entries) => {
                if let Some(existing) = entries.iter_mut().find(|a| a.name == name) {
                    existing.value = value;
                    return;
                }
                let entry = match name.split_once(':') {
                    Some((prefix, local)) => {
                        let uri = match scope.and_then(|s| s.resolve(prefix)) {
                            Some(uri) => uri.to_string(),
                            None => return,
                        };
                        NsAttr {
                            name: name.to_string(),
                            local: local.to_string(),
                            uri,
                            value,
                        }
                    }
                    None => NsAttr {
                        name: name.to_string(),
                        local: name.to_string(),
                        uri: String::new(),
                        value,
                    },
                };
                entries.push(entry);
            }
        }
    }

    /// Look up a value by `(uri, local)`.
    pub fn get_ns(&self, uri: &str, local: &str) -> Result<Option<&str>> {
        match self {
            AttrTable::Plain(_) => Err(Error::NamespaceUnsupported { operation: "attr_ns" }),
            AttrTable::Namespaced(entries) => Ok(entries
                .iter()
                .find(|a| a.local == local && a.uri == uri)
                .map(|a| a.value.as_str())),
        }
    }

    /// Check for an attribute by `(uri, local)`.
    pub fn has_ns(&self, uri: &str, local: &str) -> Result<bool> {
        match self {
            AttrTable::Plain(_) => Err(Error::NamespaceUnsupported {
                operation: "has_attr_ns",
            }),
            AttrTable::Namespaced(entries) => {
                Ok(entries.iter().any(|a| a.local == local && a.uri == uri))
            }
        }
    }

    /// Write a value by `(uri, local)`.
    ///
    /// The URI must have a prefix among `scope`'s own declarations; without
    /// one the write is a no-op.
    pub fn set_ns(&mut self, uri: &str, local: &str, value: String, scope: &NsScope) -> Result<()> {
        match self {
            AttrTable::Plain(_) => Err(Error::NamespaceUnsupported {
                operation: "set_attr_ns",
            }),
            AttrTable::Namespaced(entries) => {
                let Some(prefix) = scope.prefix_for(uri) else {
                    return Ok(());
                };
                let name = format!("{prefix}:{local}");
                if let Some(existing) = entries.iter_mut().find(|a| a.name == name) {
                    existing.value = value;
                } else {
                    entries.push(NsAttr {
                        name,
                        local: local.to_string(),
                        uri: uri.to_string(),
                        value,
                    });
                }
                Ok(())
            }
        }
    }

    /// Iterate entries as `(literal name, value)` in insertion order.
    pub fn iter(&self) -> AttrIter<'_> {
        match self {
            AttrTable::Plain(entries) => AttrIter::Plain(entries.iter()),
            AttrTable::Namespaced(entries) => AttrIter::Namespaced(entries.iter()),
        }
    }
}

/// Iterator over `(name, value)` pairs of an [`AttrTable`].
pub enum AttrIter<'a> {
    Plain(std::slice::Iter<'a, PlainAttr>),
    Namespaced(std::slice::Iter<'a, NsAttr>),
}

impl<'a> Iterator for AttrIter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            AttrIter::Plain(iter) => iter.next().map(|a| (a.name.as_str(), a.value.as_str())),
            AttrIter::Namespaced(iter) => iter.next().map(|a| (a.name.as_str(), a.value.as_str())),
        }
    }
}
