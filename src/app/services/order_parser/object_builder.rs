//! Raw capture accumulation for one record
//!
//! The builder only ever sees header strings and the text gathered under
//! them; which type the record is and what its fields mean is decided later
//! by the cook.

use indexmap::IndexMap;

use crate::app::models::Meta;
use crate::constants::IGNORED_TEXT;

/// Header → value captures for a record under construction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectBuilder {
    fields: IndexMap<String, String>,
    meta: Meta,
}

impl ObjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the value captured under `header`
    ///
    /// A header seen twice keeps the latest value; the replaced value is
    /// reported on the `ignored_text` channel.
    pub fn store(&mut self, header: &str, value: String) {
        if let Some(previous) = self.fields.insert(header.to_string(), value) {
            self.meta.push(
                IGNORED_TEXT,
                format!("Repeated value for '{}', '{}'", header, previous),
            );
        }
    }

    /// Record free text that no header claims, without its padding
    pub fn ignore_text(&mut self, text: &str) {
        self.meta.push(IGNORED_TEXT, text.trim());
    }

    /// True while no field has been stored; warnings alone do not count
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Captured headers, in first-seen order
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields.get(header).map(String::as_str)
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Hand the captures and warnings over once the record is complete
    pub fn into_parts(self) -> (IndexMap<String, String>, Meta) {
        (self.fields, self.meta)
    }
}
