//! Data models for dictionary-driven report parsing
//!
//! This module contains the declarative dictionary definition supplied by the
//! caller and the structured records the parser produces from report text.

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// =============================================================================
// Dictionary Definition
// =============================================================================

/// Declarative field dictionary
///
/// Top-level keys are object type names, except for the reserved `options`
/// entry which carries parser-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DictionaryDefinition {
    /// Reserved parser options
    #[serde(default, skip_serializing_if = "DictionaryOptions::is_default")]
    pub options: DictionaryOptions,

    /// Object type definitions keyed by type name, in declaration order
    #[serde(flatten)]
    pub types: IndexMap<String, TypeDefinition>,
}

/// Parser options carried inside a dictionary
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DictionaryOptions {
    /// Regex matching a line that separates two records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_separator: Option<String>,
}

impl DictionaryOptions {
    fn is_default(&self) -> bool {
        self == &Self::default()
    }
}

/// Definition of one object type
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TypeDefinition {
    /// Semantic field name to exact header string, trimmed scalar policy
    #[serde(default)]
    pub fields: IndexMap<String, String>,

    /// Header string to the processor that handles it
    #[serde(default)]
    pub fields_by_header: IndexMap<String, ProcessorDefinition>,

    /// Rule nesting records of this type under a previously produced owner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub belongs_to: Option<OwnershipRule>,
}

/// Processor declaration: a kind name plus its options
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProcessorDefinition {
    /// Processor kind, e.g. `field_followed_by_table`
    pub processor: String,

    /// Remaining keys are processor options
    #[serde(flatten)]
    pub options: serde_json::Map<String, serde_json::Value>,
}

/// Ownership rule attaching a child record to its owner
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OwnershipRule {
    /// Field whose value must be equal on owner and child
    pub match_on: String,

    /// Array property on the owner receiving the child
    #[serde(rename = "as")]
    pub nest_as: String,
}

// =============================================================================
// Parsed Records
// =============================================================================

/// Named lists of non-fatal warnings attached to a record
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Meta(IndexMap<String, Vec<String>>);

impl Meta {
    /// Append a message to a warning channel, creating the channel if needed
    pub fn push(&mut self, channel: &str, message: impl Into<String>) {
        self.0
            .entry(channel.to_string())
            .or_default()
            .push(message.into());
    }

    /// Messages recorded on a channel
    pub fn get(&self, channel: &str) -> Option<&[String]> {
        self.0.get(channel).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of messages across all channels
    pub fn warning_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

/// One row of a reconstructed table, column header to cell
pub type TableRow = IndexMap<String, String>;

/// A contact parsed from a location block
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Contact {
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl Contact {
    /// A contact is only worth recording if either half is known
    pub fn is_present(&self) -> bool {
        self.name.is_some() || self.phone.is_some()
    }
}

/// Value held by a field of a structured record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Scalar text
    Text(String),
    /// Rows of an embedded table
    Table(Vec<TableRow>),
    /// Contacts from a location block
    Contacts(Vec<Contact>),
    /// Child records nested under their owner
    Records(Vec<StructuredRecord>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

/// Structured record produced from one raw capture
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StructuredRecord {
    /// Semantic field name to value, in processing order
    #[serde(flatten)]
    pub fields: IndexMap<String, FieldValue>,

    /// Warnings gathered while the record was scanned
    #[serde(rename = "_meta", skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,
}

impl StructuredRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value
    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) {
        self.fields.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Text value of a field, if it is scalar
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(FieldValue::as_text)
    }

    /// Child records nested under `field`
    pub fn children(&self, field: &str) -> &[StructuredRecord] {
        match self.fields.get(field) {
            Some(FieldValue::Records(children)) => children.as_slice(),
            _ => &[],
        }
    }

    /// Append a child record to the `field` array, creating it if absent
    pub fn push_child(&mut self, field: &str, child: StructuredRecord) -> Result<()> {
        match self.fields.entry(field.to_string()) {
            Entry::Vacant(entry) => {
                entry.insert(FieldValue::Records(vec![child]));
                Ok(())
            }
            Entry::Occupied(mut entry) => match entry.get_mut() {
                FieldValue::Records(children) => {
                    children.push(child);
                    Ok(())
                }
                _ => Err(Error::NestingConflict {
                    field: field.to_string(),
                }),
            },
        }
    }

    /// Drop `_meta` blocks from this record and every nested child
    pub fn strip_meta(&mut self) {
        self.meta = Meta::default();
        for value in self.fields.values_mut() {
            if let FieldValue::Records(children) = value {
                children.iter_mut().for_each(StructuredRecord::strip_meta);
            }
        }
    }

    /// Warnings on this record and its nested children
    pub fn warning_count(&self) -> usize {
        let nested: usize = self
            .fields
            .values()
            .filter_map(|value| match value {
                FieldValue::Records(children) => Some(children),
                _ => None,
            })
            .flatten()
            .map(StructuredRecord::warning_count)
            .sum();
        self.meta.warning_count() + nested
    }
}
