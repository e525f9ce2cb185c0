//! Field processors turning a raw header capture into record fields
//!
//! Processors are built once, when the dictionary is loaded, from the
//! `fields_by_header` declarations. Every required option is checked at that
//! point so a broken dictionary fails before any report text is read.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::app::models::{Contact, FieldValue, ProcessorDefinition, StructuredRecord, TableRow};
use crate::constants::location_labels::{
    CONTACT_NAME_PATTERN, CONTACT_PREFIX, SECONDARY_LOCATION, TELEPHONE_PATTERN,
};
use crate::constants::processor_kinds::{
    FIELD_FOLLOWED_BY_TABLE, PRIMARY_SECONDARY_LOCATION, TRIMMED,
};
use crate::constants::processor_options::{CONTACTS_FIELD, FIELD, NUM_COLUMNS, TABLE_FIELD};
use crate::{Error, Result};

static CONTACT_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(CONTACT_NAME_PATTERN).expect("contact name pattern"));

static TELEPHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(TELEPHONE_PATTERN).expect("telephone pattern"));

/// A configured field processor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldProcessor {
    /// Trimmed scalar stored under `field`
    Trimmed { field: String },

    /// Scalar on the first non-blank line, then a table of `num_columns` columns
    FieldFollowedByTable {
        field: String,
        table_field: String,
        num_columns: usize,
    },

    /// Location text and the contacts listed after it
    PrimarySecondaryLocation {
        field: String,
        contacts_field: String,
    },
}

impl FieldProcessor {
    /// Processor applying the trimmed scalar policy to `field`
    pub fn trimmed(field: impl Into<String>) -> Self {
        Self::Trimmed {
            field: field.into(),
        }
    }

    /// Build a processor from its dictionary declaration
    ///
    /// Unknown kinds and missing or malformed options are configuration
    /// errors naming the header the processor was declared for.
    pub fn from_definition(header: &str, definition: &ProcessorDefinition) -> Result<Self> {
        let options = ProcessorOptions {
            kind: &definition.processor,
            header,
            options: &definition.options,
        };

        match definition.processor.as_str() {
            TRIMMED => Ok(Self::Trimmed {
                field: options.required_str(FIELD)?,
            }),
            FIELD_FOLLOWED_BY_TABLE => Ok(Self::FieldFollowedByTable {
                field: options.required_str(FIELD)?,
                table_field: options.required_str(TABLE_FIELD)?,
                num_columns: options.required_count(NUM_COLUMNS)?,
            }),
            PRIMARY_SECONDARY_LOCATION => Ok(Self::PrimarySecondaryLocation {
                field: options.required_str(FIELD)?,
                contacts_field: options.required_str(CONTACTS_FIELD)?,
            }),
            other => Err(Error::unknown_processor(other, header)),
        }
    }

    /// Kind name as written in dictionaries
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Trimmed { .. } => TRIMMED,
            Self::FieldFollowedByTable { .. } => FIELD_FOLLOWED_BY_TABLE,
            Self::PrimarySecondaryLocation { .. } => PRIMARY_SECONDARY_LOCATION,
        }
    }

    /// Apply the processor to the value captured under `header`
    pub fn apply(&self, target: &mut StructuredRecord, header: &str, value: &str) -> Result<()> {
        match self {
            Self::Trimmed { field } => {
                target.insert(field.as_str(), FieldValue::Text(value.trim().to_string()));
            }
            Self::FieldFollowedByTable {
                field,
                table_field,
                num_columns,
            } => {
                let (scalar, rows) = split_field_and_table(header, value, *num_columns)?;
                target.insert(field.as_str(), FieldValue::Text(scalar));
                target.insert(table_field.as_str(), FieldValue::Table(rows));
            }
            Self::PrimarySecondaryLocation {
                field,
                contacts_field,
            } => {
                let (location, contacts) = split_location_and_contacts(value);
                target.insert(field.as_str(), FieldValue::Text(location));
                target.insert(contacts_field.as_str(), FieldValue::Contacts(contacts));
            }
        }
        Ok(())
    }
}

/// Option accessor reporting errors against the declaring header
struct ProcessorOptions<'a> {
    kind: &'a str,
    header: &'a str,
    options: &'a Map<String, Value>,
}

impl ProcessorOptions<'_> {
    fn required(&self, name: &str) -> Result<&Value> {
        self.options
            .get(name)
            .ok_or_else(|| Error::missing_option(self.kind, self.header, name))
    }

    fn required_str(&self, name: &str) -> Result<String> {
        match self.required(name)? {
            Value::String(text) if !text.trim().is_empty() => Ok(text.clone()),
            Value::String(_) => Err(Error::invalid_option(
                self.kind,
                self.header,
                name,
                "must not be empty",
            )),
            other => Err(Error::invalid_option(
                self.kind,
                self.header,
                name,
                format!("expected a string, found {}", other),
            )),
        }
    }

    fn required_count(&self, name: &str) -> Result<usize> {
        let value = self.required(name)?;
        value
            .as_u64()
            .filter(|count| *count > 0)
            .and_then(|count| usize::try_from(count).ok())
            .ok_or_else(|| {
                Error::invalid_option(
                    self.kind,
                    self.header,
                    name,
                    format!("expected a positive integer, found {}", value),
                )
            })
    }
}

/// Split a blob into its leading scalar and the table that follows
///
/// Table lines are laid out one cell per line: `num_columns` column headers,
/// then each row as `num_columns` consecutive cells.
fn split_field_and_table(
    header: &str,
    value: &str,
    num_columns: usize,
) -> Result<(String, Vec<TableRow>)> {
    let mut lines = value.lines().map(str::trim);
    let scalar = lines
        .by_ref()
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string();
    let cells: Vec<&str> = lines.filter(|line| !line.is_empty()).collect();

    if cells.len() % num_columns != 0 {
        return Err(Error::malformed_table(header, cells.len(), num_columns));
    }

    // A blob with no table lines at all yields no rows rather than underflowing
    if cells.is_empty() {
        return Ok((scalar, Vec::new()));
    }

    let (columns, data) = cells.split_at(num_columns);
    let rows = data
        .chunks(num_columns)
        .map(|row| {
            columns
                .iter()
                .zip(row)
                .map(|(column, cell)| (column.to_string(), cell.to_string()))
                .collect::<TableRow>()
        })
        .collect();

    Ok((scalar, rows))
}

/// Split a location blob into the location text and its contacts
fn split_location_and_contacts(value: &str) -> (String, Vec<Contact>) {
    let lines: Vec<&str> = value.lines().collect();

    let start = lines
        .iter()
        .position(|line| line.trim_start().starts_with(SECONDARY_LOCATION))
        .map_or(0, |label| label + 1);
    let body = &lines[start..];

    let contacts_start = body
        .iter()
        .position(|line| line.trim_start().starts_with(CONTACT_PREFIX))
        .unwrap_or(body.len());

    let location = body[..contacts_start].join("\n").trim().to_string();
    let contacts = parse_contacts(&body[contacts_start..]);

    (location, contacts)
}

/// Fold `Contact Name` / `Telephone` lines into contacts
fn parse_contacts(lines: &[&str]) -> Vec<Contact> {
    let mut contacts = Vec::new();
    let mut current = Contact::default();

    for line in lines {
        if let Some(captures) = CONTACT_NAME_REGEX.captures(line) {
            if current.is_present() {
                contacts.push(std::mem::take(&mut current));
            }
            current.name = non_empty(&captures[1]);
        } else if let Some(captures) = TELEPHONE_REGEX.captures(line) {
            // A second telephone line starts a contact without a name
            if current.phone.is_some() {
                contacts.push(std::mem::take(&mut current));
            }
            current.phone = non_empty(&captures[1]);
        }
    }

    if current.is_present() {
        contacts.push(current);
    }

    contacts
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
