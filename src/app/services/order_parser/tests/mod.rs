//! Test fixtures for order parser testing
//!
//! Small dictionaries for the scanner scenarios and a full work-order
//! dictionary with tables, locations and nested suborders.

use serde_json::{Value, json};

use super::parser::OrderParser;
use crate::app::services::field_dictionary::FieldDictionary;

// Test modules
mod cook_tests;
mod scanner_tests;

/// Compile a dictionary from an inline JSON value
pub fn dictionary(value: Value) -> FieldDictionary {
    FieldDictionary::new(serde_json::from_value(value).unwrap()).unwrap()
}

/// Parser over an inline JSON dictionary
pub fn parser(value: Value) -> OrderParser {
    OrderParser::new(dictionary(value)).unwrap()
}

/// Single `Order` type with a `foo` field under `Foo:`
pub fn foo_parser() -> OrderParser {
    parser(json!({ "Order": { "fields": { "foo": "Foo:" } } }))
}

/// Parent and child types linked through `foo`
pub fn ownership_dictionary() -> Value {
    json!({
        "Order": {
            "fields": { "foo": "Foo:", "request_no": "Request No:" }
        },
        "Suborder": {
            "fields": { "foo": "Parent Foo:", "bar": "Bar:" },
            "belongs_to": { "match_on": "foo", "as": "suborders" }
        }
    })
}

/// Work-order dictionary exercising every processor kind
pub fn work_order_dictionary() -> Value {
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
                    "num_columns": 2
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

/// A two-record work order report with one suborder
pub const WORK_ORDER_REPORT: &str = "\
Request No: R-1001   Requested By: Dana Park
Equipment: Lifting gear
Item
Qty
Crane
1
Sling
4
Primary Location: Dock Road
Secondary Location
Gate 4
Contact Name Lee Wong
Telephone 555-0100
________________
Suborder No: S-1   Parent Request: R-1001
________________
Request No: R-1002
";
