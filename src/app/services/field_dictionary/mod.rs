//! Field dictionary for order report parsing
//!
//! The dictionary is the only place report layouts are described. It maps
//! object types to the headers that identify them and to the processors that
//! turn a captured header value into record fields.
//!
//! ## Architecture
//!
//! - [`dictionary`] - Compiled lookups: headers, owning types, ownership rules
//! - [`processors`] - The closed set of field processors and their factory
//!
//! ## Usage
//!
//! ```rust
//! use order_parser::app::models::StructuredRecord;
//! use order_parser::app::services::field_dictionary::FieldDictionary;
//!
//! # fn example() -> order_parser::Result<()> {
//! let dictionary = FieldDictionary::from_json_str(r#"{"Order": {"fields": {"foo": "Foo:"}}}"#)?;
//! assert_eq!(dictionary.types_for_header("Foo:"), ["Order".to_string()]);
//!
//! let mut record = StructuredRecord::new();
//! dictionary.process(&mut record, "Order", "Foo:", "  3  ")?;
//! assert_eq!(record.text("foo"), Some("3"));
//! # Ok(())
//! # }
//! ```

pub mod dictionary;
pub mod processors;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use dictionary::FieldDictionary;
pub use processors::FieldProcessor;
