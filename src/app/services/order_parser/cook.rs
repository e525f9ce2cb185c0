//! Classification and filing of completed captures
//!
//! A finished [`ObjectBuilder`] is classified by the headers it holds, turned
//! into a [`StructuredRecord`] through the dictionary's processors, and filed
//! either at the top level or under a previously produced owner.

use tracing::{debug, warn};

use super::object_builder::ObjectBuilder;
use crate::app::models::StructuredRecord;
use crate::app::services::field_dictionary::FieldDictionary;
use crate::{Error, Result};

/// Where a cooked record ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filing {
    /// Appended to the top-level output
    TopLevel,
    /// Nested under the top-level record at `owner_index`
    Attached { owner_index: usize },
    /// Discarded because no owner carries the matching value
    Dropped,
}

/// Turns captures into structured records and owns the output sequence
#[derive(Debug)]
pub struct ObjectCook<'d> {
    dictionary: &'d FieldDictionary,
    records: Vec<StructuredRecord>,
}

impl<'d> ObjectCook<'d> {
    pub fn new(dictionary: &'d FieldDictionary) -> Self {
        Self {
            dictionary,
            records: Vec::new(),
        }
    }

    /// Resolve the single type the captured headers point at
    ///
    /// Only headers claimed by exactly one type vote. Two votes for different
    /// types make the record ambiguous; no vote at all makes it
    /// uncategorizable. `line` is where the record ended and is carried in the
    /// error.
    pub fn classify(&self, builder: &ObjectBuilder, line: usize) -> Result<&'d str> {
        let dictionary = self.dictionary;
        let mut resolved: Option<&'d str> = None;

        for header in builder.headers() {
            let [candidate] = dictionary.types_for_header(header) else {
                continue;
            };

            match resolved {
                None => resolved = Some(candidate.as_str()),
                Some(current) if current == candidate => {}
                Some(current) => {
                    return Err(Error::AmbiguousRecord {
                        line,
                        header: header.to_string(),
                        resolved_type: current.to_string(),
                        conflicting_type: candidate.clone(),
                    });
                }
            }
        }

        resolved.ok_or_else(|| Error::UncategorizableRecord {
            line,
            headers: builder.headers().map(str::to_string).collect(),
        })
    }

    /// Classify, process and file one completed capture
    pub fn cook(&mut self, builder: ObjectBuilder, line: usize) -> Result<Filing> {
        let dictionary = self.dictionary;
        let type_name = self.classify(&builder, line)?;
        let (fields, meta) = builder.into_parts();

        let mut record = StructuredRecord::new();
        for (header, value) in &fields {
            dictionary.process(&mut record, type_name, header, value)?;
        }
        record.meta = meta;

        self.file(type_name, record)
    }

    fn file(&mut self, type_name: &str, record: StructuredRecord) -> Result<Filing> {
        let dictionary = self.dictionary;
        let Some(rule) = dictionary.owner_of(type_name) else {
            debug!("Filed {} record at top level", type_name);
            self.records.push(record);
            return Ok(Filing::TopLevel);
        };

        let Some(key) = record.text(&rule.match_on) else {
            warn!(
                "Dropping {} record: it has no '{}' value to find its owner by",
                type_name, rule.match_on
            );
            return Ok(Filing::Dropped);
        };

        let owner_index = self
            .records
            .iter()
            .position(|candidate| candidate.text(&rule.match_on) == Some(key));

        match owner_index {
            Some(owner_index) => {
                debug!(
                    "Nested {} record under '{}' of record {} ({} = {})",
                    type_name, rule.nest_as, owner_index, rule.match_on, key
                );
                self.records[owner_index].push_child(&rule.nest_as, record)?;
                Ok(Filing::Attached { owner_index })
            }
            None => {
                warn!(
                    "Dropping {} record: no earlier record has {} = '{}'",
                    type_name, rule.match_on, key
                );
                Ok(Filing::Dropped)
            }
        }
    }

    pub fn into_records(self) -> Vec<StructuredRecord> {
        self.records
    }
}
