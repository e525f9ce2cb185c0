//! Tests for record classification and ownership filing

use serde_json::json;

use super::super::cook::{Filing, ObjectCook};
use super::super::object_builder::ObjectBuilder;
use super::{dictionary, ownership_dictionary, parser};
use crate::Error;

fn builder(captures: &[(&str, &str)]) -> ObjectBuilder {
    let mut builder = ObjectBuilder::new();
    for (header, value) in captures {
        builder.store(header, value.to_string());
    }
    builder
}

#[test]
fn test_classify_by_unique_header() {
    let dictionary = dictionary(ownership_dictionary());
    let cook = ObjectCook::new(&dictionary);

    assert_eq!(
        cook.classify(&builder(&[("Bar:", "x")]), 1).unwrap(),
        "Suborder"
    );
    assert_eq!(
        cook.classify(&builder(&[("Foo:", "1"), ("Request No:", "R")]), 1)
            .unwrap(),
        "Order"
    );
}

#[test]
fn test_shared_header_does_not_vote() {
    let dictionary = dictionary(json!({
        "Order": { "fields": { "note": "Note:", "foo": "Foo:" } },
        "Invoice": { "fields": { "note": "Note:", "bar": "Bar:" } }
    }));
    let cook = ObjectCook::new(&dictionary);

    assert_eq!(
        cook.classify(&builder(&[("Note:", "n"), ("Bar:", "b")]), 3)
            .unwrap(),
        "Invoice"
    );

    let error = cook.classify(&builder(&[("Note:", "n")]), 3).unwrap_err();
    assert!(matches!(
        error,
        Error::UncategorizableRecord { line: 3, ref headers } if headers == &["Note:".to_string()]
    ));
}

#[test]
fn test_conflicting_votes_are_ambiguous() {
    let dictionary = dictionary(ownership_dictionary());
    let cook = ObjectCook::new(&dictionary);

    let error = cook
        .classify(&builder(&[("Foo:", "1"), ("Bar:", "2")]), 9)
        .unwrap_err();

    assert!(matches!(
        error,
        Error::AmbiguousRecord { line: 9, ref header, ref resolved_type, ref conflicting_type }
            if header == "Bar:" && resolved_type == "Order" && conflicting_type == "Suborder"
    ));
    assert!(error.to_string().contains("line 9"));
}

#[test]
fn test_ambiguous_record_fails_the_parse() {
    let result = parser(ownership_dictionary()).parse_str("Foo: 1\nBar: 2");
    assert!(matches!(result, Err(Error::AmbiguousRecord { line: 2, .. })));
}

#[test]
fn test_child_attaches_to_matching_owner() {
    let result = parser(ownership_dictionary())
        .parse_str("Foo: A\n___\nFoo: B\n___\nParent Foo: B\nBar: first\n___\nParent Foo: B\nBar: second")
        .unwrap();

    assert_eq!(
        serde_json::to_value(&result.records).unwrap(),
        json!([
            { "foo": "A" },
            {
                "foo": "B",
                "suborders": [
                    { "foo": "B", "bar": "first" },
                    { "foo": "B", "bar": "second" }
                ]
            }
        ])
    );
    assert_eq!(result.stats.records_emitted, 2);
    assert_eq!(result.stats.children_attached, 2);
}

#[test]
fn test_child_without_owner_is_dropped() {
    let result = parser(ownership_dictionary())
        .parse_str("Foo: A\n___\nParent Foo: Z\nBar: orphan")
        .unwrap();

    assert_eq!(
        serde_json::to_value(&result.records).unwrap(),
        json!([{ "foo": "A" }])
    );
    assert_eq!(result.stats.children_dropped, 1);
    assert!(!result.stats.is_lossless());
}

#[test]
fn test_child_before_owner_is_dropped() {
    let result = parser(ownership_dictionary())
        .parse_str("Parent Foo: A\nBar: early\n___\nFoo: A")
        .unwrap();

    assert_eq!(result.records.len(), 1);
    assert!(result.records[0].children("suborders").is_empty());
    assert_eq!(result.stats.children_dropped, 1);
}

#[test]
fn test_child_missing_match_field_is_dropped() {
    let dictionary = dictionary(ownership_dictionary());
    let mut cook = ObjectCook::new(&dictionary);

    cook.cook(builder(&[("Foo:", "A")]), 1).unwrap();
    let filing = cook.cook(builder(&[("Bar:", "x")]), 3).unwrap();

    assert_eq!(filing, Filing::Dropped);
    assert_eq!(cook.into_records().len(), 1);
}

#[test]
fn test_first_matching_owner_wins() {
    let dictionary = dictionary(ownership_dictionary());
    let mut cook = ObjectCook::new(&dictionary);

    cook.cook(builder(&[("Foo:", "A"), ("Request No:", "1")]), 1)
        .unwrap();
    cook.cook(builder(&[("Foo:", "A"), ("Request No:", "2")]), 3)
        .unwrap();
    let filing = cook
        .cook(builder(&[("Parent Foo:", " A "), ("Bar:", "x")]), 5)
        .unwrap();

    assert_eq!(filing, Filing::Attached { owner_index: 0 });
    let records = cook.into_records();
    assert_eq!(records[0].children("suborders").len(), 1);
    assert!(records[1].children("suborders").is_empty());
}

#[test]
fn test_warnings_travel_with_record() {
    let dictionary = dictionary(ownership_dictionary());
    let mut cook = ObjectCook::new(&dictionary);

    let mut capture = builder(&[("Foo:", "A")]);
    capture.ignore_text("stray");
    cook.cook(capture, 2).unwrap();

    assert_eq!(cook.into_records()[0].meta.warning_count(), 1);
}

#[test]
fn test_header_of_other_type_is_lookup_error() {
    let dictionary = dictionary(json!({
        "Order": { "fields": { "foo": "Foo:", "note": "Note:" } },
        "Invoice": { "fields": { "note": "Note:", "bar": "Bar:" } },
        "Memo": { "fields": { "bar": "Bar:" } }
    }));
    let mut cook = ObjectCook::new(&dictionary);

    let error = cook
        .cook(builder(&[("Foo:", "1"), ("Bar:", "2")]), 4)
        .unwrap_err();
    assert!(matches!(
        error,
        Error::FieldLookup { ref type_name, ref header } if type_name == "Order" && header == "Bar:"
    ));
}
