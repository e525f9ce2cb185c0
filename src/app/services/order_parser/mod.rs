//! Order report parsing service
//!
//! Turns fixed-format report text into structured records in a single pass,
//! driven by a [`FieldDictionary`](crate::app::services::field_dictionary::FieldDictionary).
//!
//! # Architecture
//!
//! - `header_matcher`: splits each line into header and free-text regions
//! - `object_builder`: raw header → value captures for one record, plus warnings
//! - `scanner`: the line state machine folding continuation lines into fields
//! - `cook`: classifies a finished capture and files it, nesting children
//! - `stats`: counters and the result type
//! - `parser`: the façade over strings, async readers, streams and files
//!
//! # Example
//!
//! ```
//! use order_parser::{FieldDictionary, OrderParser};
//!
//! let dictionary = FieldDictionary::from_json_str(
//!     r#"{"Order": {"fields": {"foo": "Foo:", "bar": "Bar:"}}}"#,
//! )?;
//! let parser = OrderParser::new(dictionary)?;
//!
//! let result = parser.parse_str("Foo: 1\nBar:\n two\n lines\n____\nFoo: 2")?;
//! assert_eq!(result.records.len(), 2);
//! assert_eq!(result.records[0].text("bar"), Some("two\n lines"));
//! # Ok::<(), order_parser::Error>(())
//! ```

pub mod cook;
pub mod header_matcher;
pub mod object_builder;
pub mod parser;
pub mod scanner;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use cook::{Filing, ObjectCook};
pub use header_matcher::{HeaderMatcher, StringRegion};
pub use object_builder::ObjectBuilder;
pub use parser::OrderParser;
pub use scanner::LineScanner;
pub use stats::{ParseResult, ParseStats};
