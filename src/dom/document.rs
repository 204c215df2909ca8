//! Parsed document entry point
//!
//! A document behaves as its root element: `XmlDocument` derefs to the root
//! `XmlElement`, so every query and serialization operation is available
//! directly on the document. Construction is all-or-nothing — a tokenizer
//! error surfaces immediately and no partial tree escapes.

use crate::core::tokenizer::Tokenizer;
use crate::dom::builder::{ParseOptions, TreeBuilder};
use crate::dom::node::XmlElement;
use crate::error::{Error, Result};
use std::ops::{Deref, DerefMut};

/// A parsed XML document: the root element plus document-level state.
#[derive(Debug, Clone)]
pub struct XmlDocument {
    root: XmlElement,
    doctype: String,
}

impl XmlDocument {
    /// Parse a document with default options.
    pub fn parse(xml: &str) -> Result<Self> {
        Self::parse_with_options(xml, ParseOptions::default())
    }

    /// Parse a document.
    ///
    /// The input is trimmed first; an empty or whitespace-only input is an
    /// [`Error::EmptyInput`]. Malformed XML surfaces as [`Error::Parse`]
    /// with the tokenizer's message and position.
    pub fn parse_with_options(xml: &str, options: ParseOptions) -> Result<Self> {
        let trimmed = xml.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut builder = TreeBuilder::new(options);
        Tokenizer::new(trimmed).run(&mut builder)?;
        let (root, doctype) = builder.into_parts()?;

        Ok(XmlDocument { root, doctype })
    }

    /// Accumulated DOCTYPE text; empty when the document has none.
    pub fn doctype(&self) -> &str {
        &self.doctype
    }

    /// The root element.
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// The root element, mutably.
    pub fn root_mut(&mut self) -> &mut XmlElement {
        &mut self.root
    }
}

impl Deref for XmlDocument {
    type Target = XmlElement;

    fn deref(&self) -> &XmlElement {
        &self.root
    }
}

impl DerefMut for XmlDocument {
    fn deref_mut(&mut self) -> &mut XmlElement {
        &mut self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::NodeKind;
    use crate::dom::render::RenderOptions;

    fn parse(xml: &str) -> XmlDocument {
        XmlDocument::parse(xml).unwrap()
    }

    fn parse_ns(xml: &str) -> XmlDocument {
        XmlDocument::parse_with_options(xml, ParseOptions { xmlns: true }).unwrap()
    }

    #[test]
    fn test_parse_simple() {
        let doc = parse("<hello>world</hello>");
        assert_eq!(doc.name, "hello");
        assert_eq!(doc.value, "world");
    }

    #[test]
    fn test_empty_input_errors() {
        assert_eq!(XmlDocument::parse("").unwrap_err(), Error::EmptyInput);
        assert_eq!(XmlDocument::parse("  ").unwrap_err(), Error::EmptyInput);
        assert_eq!(XmlDocument::parse("\n\t\n").unwrap_err(), Error::EmptyInput);
    }

    #[test]
    fn test_cdata_value() {
        let doc = parse("<hello><![CDATA[<world>]]></hello>");
        assert_eq!(doc.value, "<world>");
    }

    #[test]
    fn test_cdata_and_text_value() {
        let doc = parse("<hello>(<![CDATA[<world>]]>)</hello>");
        assert_eq!(doc.value, "(<world>)");
    }

    #[test]
    fn test_doctype_field() {
        let doc = parse("<!DOCTYPE HelloWorld><hello>world</hello>");
        assert_eq!(doc.doctype(), " HelloWorld");

        let doc = parse("<hello>world</hello>");
        assert_eq!(doc.doctype(), "");
    }

    #[test]
    fn test_doctype_after_root_errors() {
        let err = XmlDocument::parse("<hello><!DOCTYPE HelloWorld>world</hello>").unwrap_err();
        assert!(matches!(err, Error::MisplacedDoctype { .. }));
    }

    #[test]
    fn test_comment_does_not_affect_value() {
        let doc = parse("<hello><!-- World --></hello>");
        assert_eq!(doc.value, "");
        assert_eq!(doc.children.len(), 1);
        assert_eq!(doc.children[0].kind(), NodeKind::Comment);
    }

    #[test]
    fn test_comment_between_text() {
        let doc = parse("<hello>(<!-- World -->)</hello>");
        assert_eq!(doc.value, "()");
    }

    #[test]
    fn test_text_comment_cdata_interleaved() {
        let doc = parse("<hello>Hello<!-- , --> <![CDATA[<world>]]>!</hello>");
        assert_eq!(doc.value, "Hello <world>!");
    }

    #[test]
    fn test_child_element_content_not_in_value() {
        let doc = parse("<hello>hello, <world/>!</hello>");
        assert_eq!(doc.value, "hello, !");
    }

    #[test]
    fn test_content_around_root_is_discarded() {
        for xml in [
            "\n\n<hello>*</hello>",
            "<hello>*</hello>\n\n",
            "<?xml version=\"1.0\"?>\n\n<hello>*</hello>",
            "<?xml version=\"1.0\"?><hello>*</hello>\n\n",
            "<!-- hello --><hello>*</hello>",
            "<hello>*</hello><!-- world -->",
        ] {
            let doc = parse(xml);
            assert_eq!(doc.value, "*", "for {xml:?}");
            assert_eq!(doc.children.len(), 1, "for {xml:?}");
        }
    }

    #[test]
    fn test_malformed_input_errors() {
        let err = XmlDocument::parse("<hello><unclosed-tag></hello>").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_tag_locations() {
        let books = parse("<books><book title=\"Twilight\"/></books>");
        let book = books.child_named("book").unwrap();
        assert_eq!(book.attr("title"), Some("Twilight"));
        assert_eq!(book.position.start_tag_offset, 8);
        assert_eq!(book.position.line, 0);
        assert_eq!(book.position.column, 31);
        assert_eq!(book.position.offset, 31);
    }

    #[test]
    fn test_first_and_last_child() {
        let doc = parse("<root><a/>text<b/></root>");
        let first = doc.first_child().unwrap().as_element().unwrap();
        assert_eq!(first.name, "a");
        let last = doc.last_child().unwrap().as_element().unwrap();
        assert_eq!(last.name, "b");
    }

    #[test]
    fn test_namespace_metadata_on_elements() {
        let books = parse_ns(
            "<books xmlns:ns=\"http://example.com/books\"><ns:book ns:title=\"Twilight\"/></books>",
        );
        assert_eq!(books.local_name(), Some("books"));
        assert_eq!(books.namespace_uri(), Some(""));

        let book = books.child_named("ns:book").unwrap();
        assert_eq!(book.local_name(), Some("book"));
        assert_eq!(book.namespace_uri(), Some("http://example.com/books"));
        assert_eq!(
            book.attr_ns("http://example.com/books", "title").unwrap(),
            Some("Twilight")
        );
        assert!(book.has_attr_ns("http://example.com/books", "title").unwrap());
        assert!(!book.has_attr_ns("http://example.com/books", "author").unwrap());
    }

    #[test]
    fn test_set_attr_ns_and_serialize() {
        let mut books = parse_ns(
            "<books xmlns:ns=\"http://example.com/books\"><ns:book ns:title=\"Twilight\"/></books>",
        );

        let book = books.child_named_mut("ns:book").unwrap();
        book.set_attr_ns("http://example.com/books", "title", "New Moon")
            .unwrap();
        book.set_attr_ns("http://example.com/books", "author", "Stephenie Meyer")
            .unwrap();
        // no prefix for this URI in scope: silently dropped
        book.set_attr_ns("http://example.com/non-existent", "attr", "value")
            .unwrap();

        assert_eq!(
            book.render(&RenderOptions::default()),
            "<ns:book ns:title=\"New Moon\" ns:author=\"Stephenie Meyer\"/>"
        );
    }

    #[test]
    fn test_set_attr_plain_names_in_namespace_mode() {
        let mut books = parse_ns(
            "<books xmlns:ns=\"http://example.com/books\"><ns:book title=\"Twilight\"/></books>",
        );

        let book = books.child_named_mut("ns:book").unwrap();
        book.set_attr("title", "New Moon");
        book.set_attr("publicationDate", "2006-08-21");

        assert_eq!(
            book.render(&RenderOptions::default()),
            "<ns:book title=\"New Moon\" publicationDate=\"2006-08-21\"/>"
        );
    }

    #[test]
    fn test_set_attr_prefixed_names_in_namespace_mode() {
        let mut books = parse_ns(
            "<books xmlns:ns=\"http://example.com/books\"><ns:book ns:title=\"Twilight\"/></books>",
        );

        let book = books.child_named_mut("ns:book").unwrap();
        book.set_attr("non-existent:attr", "value");
        book.set_attr("ns:title", "New Moon");
        book.set_attr("ns:publicationDate", "2006-08-21");

        assert_eq!(
            book.render(&RenderOptions::default()),
            "<ns:book ns:title=\"New Moon\" ns:publicationDate=\"2006-08-21\"/>"
        );
    }

    #[test]
    fn test_documents_clone_independently() {
        let original = parse("<root><child/></root>");
        let mut copy = original.clone();
        copy.root_mut().set_attr("marker", "yes");
        assert_eq!(original.attr("marker"), None);
        assert_eq!(copy.attr("marker"), Some("yes"));
    }
}
