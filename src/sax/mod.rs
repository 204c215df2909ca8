//! Event-stream contract between the tokenizer and its consumers.

pub mod events;

pub use events::{OpenTag, Position, RawAttribute, SaxHandler};
