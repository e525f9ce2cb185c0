//! Field dictionary lookups
//!
//! Wraps a [`DictionaryDefinition`] with the indexes the parser needs: which
//! headers exist, which types claim a header, how each type processes a
//! header, and which line separates two records.

use indexmap::IndexMap;
use regex::Regex;
use std::path::Path;
use tracing::{debug, trace};

use super::processors::FieldProcessor;
use crate::app::models::{DictionaryDefinition, OwnershipRule, StructuredRecord};
use crate::constants::DEFAULT_RECORD_SEPARATOR;
use crate::{Error, Result};

/// Compiled, read-only view over a dictionary definition
///
/// Every processor and the record separator are built at construction, so a
/// dictionary that loads successfully can not fail with a configuration error
/// later. The structure is immutable afterwards and can be shared between
/// concurrent parses.
#[derive(Debug, Clone)]
pub struct FieldDictionary {
    types: IndexMap<String, CompiledType>,
    header_index: IndexMap<String, Vec<String>>,
    record_separator: Regex,
}

/// Per-type handlers keyed by header
#[derive(Debug, Clone)]
struct CompiledType {
    handlers: IndexMap<String, FieldProcessor>,
    belongs_to: Option<OwnershipRule>,
}

impl FieldDictionary {
    /// Compile a definition, falling back to the built-in record separator
    pub fn new(definition: DictionaryDefinition) -> Result<Self> {
        Self::with_default_separator(definition, DEFAULT_RECORD_SEPARATOR)
    }

    /// Compile a definition with an explicit fallback record separator
    ///
    /// The dictionary's own `options.record_separator` wins over
    /// `default_separator`.
    pub fn with_default_separator(
        definition: DictionaryDefinition,
        default_separator: &str,
    ) -> Result<Self> {
        let separator_pattern = definition
            .options
            .record_separator
            .as_deref()
            .unwrap_or(default_separator);
        let record_separator = Regex::new(separator_pattern)
            .map_err(|e| Error::invalid_separator(separator_pattern, e))?;

        let mut types = IndexMap::new();
        let mut header_index: IndexMap<String, Vec<String>> = IndexMap::new();

        for (type_name, type_definition) in &definition.types {
            let mut handlers = IndexMap::new();

            for (header, processor) in &type_definition.fields_by_header {
                handlers.insert(
                    header.clone(),
                    FieldProcessor::from_definition(header, processor)?,
                );
            }

            // Plain fields take precedence over a processor on the same header
            for (field, header) in &type_definition.fields {
                handlers.insert(header.clone(), FieldProcessor::trimmed(field.as_str()));
            }

            for (header, processor) in &handlers {
                if header.is_empty() {
                    return Err(Error::configuration(format!(
                        "Type '{}' declares an empty header",
                        type_name
                    )));
                }
                trace!("{}: '{}' handled by {}", type_name, header, processor.kind());
                header_index
                    .entry(header.clone())
                    .or_default()
                    .push(type_name.clone());
            }

            types.insert(
                type_name.clone(),
                CompiledType {
                    handlers,
                    belongs_to: type_definition.belongs_to.clone(),
                },
            );
        }

        debug!(
            "Compiled dictionary: {} types, {} headers, separator '{}'",
            types.len(),
            header_index.len(),
            separator_pattern
        );

        Ok(Self {
            types,
            header_index,
            record_separator,
        })
    }

    /// Decode and compile a JSON dictionary
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::new(parse_definition_json(json, "<inline>")?)
    }

    /// Decode and compile a YAML dictionary
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Self::new(parse_definition_yaml(yaml, "<inline>")?)
    }

    /// Load a dictionary file with the built-in record separator as fallback
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::load(path, DEFAULT_RECORD_SEPARATOR)
    }

    /// Load a dictionary file; `.yaml`/`.yml` files are read as YAML, anything else as JSON
    pub fn load(path: &Path, default_separator: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read dictionary {}", path.display()),
                e,
            )
        })?;

        let source_name = path.display().to_string();
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let definition = if is_yaml {
            parse_definition_yaml(&content, &source_name)?
        } else {
            parse_definition_json(&content, &source_name)?
        };

        Self::with_default_separator(definition, default_separator)
    }

    /// Every header declared by any type
    pub fn all_headers(&self) -> impl Iterator<Item = &str> {
        self.header_index.keys().map(String::as_str)
    }

    /// Type names declaring `header`; empty when the header is unknown
    pub fn types_for_header(&self, header: &str) -> &[String] {
        self.header_index
            .get(header)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Headers claimed by more than one type, with their claimants
    pub fn ambiguous_headers(&self) -> Vec<(&str, &[String])> {
        self.header_index
            .iter()
            .filter(|(_, type_names)| type_names.len() > 1)
            .map(|(header, type_names)| (header.as_str(), type_names.as_slice()))
            .collect()
    }

    /// Ownership rule of `type_name`, if it nests under another record
    pub fn owner_of(&self, type_name: &str) -> Option<&OwnershipRule> {
        self.types
            .get(type_name)
            .and_then(|compiled| compiled.belongs_to.as_ref())
    }

    /// Processor handling `header` for `type_name`
    pub fn processor_for(&self, type_name: &str, header: &str) -> Result<&FieldProcessor> {
        let compiled = self
            .types
            .get(type_name)
            .ok_or_else(|| Error::unknown_type(type_name))?;

        compiled
            .handlers
            .get(header)
            .ok_or_else(|| Error::field_lookup(type_name, header))
    }

    /// Write the fields `type_name` derives from `header` into `target`
    pub fn process(
        &self,
        target: &mut StructuredRecord,
        type_name: &str,
        header: &str,
        value: &str,
    ) -> Result<()> {
        self.processor_for(type_name, header)?
            .apply(target, header, value)
    }

    /// Compiled record separator
    pub fn record_separator(&self) -> &Regex {
        &self.record_separator
    }

    /// Whether `line` closes the current record
    pub fn is_record_separator(&self, line: &str) -> bool {
        self.record_separator.is_match(line)
    }
}

fn parse_definition_json(json: &str, source_name: &str) -> Result<DictionaryDefinition> {
    serde_json::from_str(json).map_err(|e| Error::dictionary_format(source_name, e.to_string()))
}

fn parse_definition_yaml(yaml: &str, source_name: &str) -> Result<DictionaryDefinition> {
    serde_yaml::from_str(yaml).map_err(|e| Error::dictionary_format(source_name, e.to_string()))
}
