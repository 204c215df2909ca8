//! Error types for document construction and namespace-qualified access.

use crate::sax::Position;

/// Convenience `Result` alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or querying a document.
///
/// Query misses are not errors; lookups distinguish "not found" (`Ok(None)`)
/// from mode mismatches (`Err(NamespaceUnsupported)`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The input was empty or contained only whitespace.
    #[error("no XML content to parse")]
    EmptyInput,

    /// The tokenizer rejected the input as malformed.
    #[error("parse error at {position}: {message}")]
    Parse { message: String, position: Position },

    /// A namespace-qualified operation was invoked on a document parsed
    /// without the `xmlns` option.
    #[error("{operation} requires a document parsed with the xmlns option")]
    NamespaceUnsupported { operation: &'static str },

    /// A DOCTYPE declaration appeared after the root element opened.
    #[error("misplaced DOCTYPE declaration at {position}")]
    MisplacedDoctype { position: Position },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = Error::Parse {
            message: "unclosed tag <a>".to_string(),
            position: Position {
                line: 2,
                column: 7,
                offset: 30,
                start_tag_offset: 25,
            },
        };
        assert_eq!(err.to_string(), "parse error at line 2, column 7: unclosed tag <a>");
    }

    #[test]
    fn test_namespace_unsupported_display() {
        let err = Error::NamespaceUnsupported { operation: "attr_ns" };
        assert!(err.to_string().contains("attr_ns"));
        assert!(err.to_string().contains("xmlns"));
    }
}
