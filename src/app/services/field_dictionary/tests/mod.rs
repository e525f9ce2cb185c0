//! Test fixtures for field dictionary testing
//!
//! Provides a representative order-form dictionary exercising every processor
//! kind and an ownership rule.

use serde_json::{Value, json};

use super::dictionary::FieldDictionary;
use crate::app::models::DictionaryDefinition;


/// Dictionary JSON for a work order with a nested suborder type
pub fn order_dictionary_json() -> Value {
    json!({
        "Order": {
            "fields": {
                "request_no": "Request No:",
                "requested_by": "Requested By:"
            },
            "fields_by_header": {
                "Equipment:": {
                    "processor": "field_followed_by_table",
                    "field": "equipment",
                    "table_field": "equipment_items",
                    "num_columns": 3
                },
                "Primary Location:": {
                    "processor": "primary_secondary_location",
                    "field": "secondary_location",
                    "contacts_field": "contacts"
                }
            }
        },
        "Suborder": {
            "fields": {
                "suborder_no": "Suborder No:",
                "request_no": "Parent Request:"
            },
            "belongs_to": { "match_on": "request_no", "as": "suborders" }
        }
    })
}

/// Compiled order dictionary
pub fn order_dictionary() -> FieldDictionary {
    let definition: DictionaryDefinition =
        serde_json::from_value(order_dictionary_json()).unwrap();
    FieldDictionary::new(definition).unwrap()
}

/// Compile a dictionary from an inline JSON value
pub fn dictionary_from(value: Value) -> crate::Result<FieldDictionary> {
    let definition: DictionaryDefinition = serde_json::from_value(value).unwrap();
    FieldDictionary::new(definition)
}
