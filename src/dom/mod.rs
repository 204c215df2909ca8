//! Document tree: node model, attributes, namespaces, construction,
//! queries, and serialization.

pub mod attributes;
pub mod builder;
pub mod document;
pub mod namespace;
pub mod node;
pub mod query;
pub mod render;

pub use attributes::{AttrIter, AttrTable, NsAttr, PlainAttr};
pub use builder::ParseOptions;
pub use document::XmlDocument;
pub use namespace::NsScope;
pub use node::{NodeKind, XmlElement, XmlNode};
pub use render::RenderOptions;
