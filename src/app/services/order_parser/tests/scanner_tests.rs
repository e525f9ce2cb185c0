//! Tests for the line scanner and multi-line accumulation

use serde_json::json;

use super::super::scanner::LineScanner;
use super::super::header_matcher::HeaderMatcher;
use super::{dictionary, foo_parser, parser};
use crate::constants::IGNORED_TEXT;

#[test]
fn test_header_with_trailing_space_on_same_line() {
    let parser = parser(json!({ "Order": { "fields": { "foo": "Foo: " } } }));
    let result = parser.parse_str("Foo: 3").unwrap();

    assert_eq!(
        serde_json::to_value(&result.records).unwrap(),
        json!([{ "foo": "3" }])
    );
}

#[test]
fn test_value_on_following_lines() {
    let result = foo_parser()
        .parse_str("Foo:\nLine 1\nLine 2\nLine 3\n")
        .unwrap();

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].text("foo"), Some("Line 1\nLine 2\nLine 3"));
}

#[test]
fn test_next_header_closes_open_field() {
    let parser = parser(json!({
        "Order": { "fields": { "fizz": "Fizz:", "buzz": "Buzz:" } }
    }));
    let result = parser
        .parse_str("Fizz: Line 1\nLine 2\n  Buzz:\nLine 3\nLine 4")
        .unwrap();

    assert_eq!(
        serde_json::to_value(&result.records).unwrap(),
        json!([{ "fizz": "Line 1\nLine 2", "buzz": "Line 3\nLine 4" }])
    );
}

#[test]
fn test_repeated_field_keeps_latest_value() {
    let result = foo_parser()
        .parse_str("Foo: 1\nFoo: 2\n____\nFoo: 3")
        .unwrap();

    assert_eq!(
        serde_json::to_value(&result.records).unwrap(),
        json!([
            { "foo": "2", "_meta": { "ignored_text": ["Repeated value for 'Foo:', ' 1\n'"] } },
            { "foo": "3" }
        ])
    );
    assert_eq!(result.stats.warnings, 1);
}

#[test]
fn test_free_text_only_record_is_discarded() {
    let result = foo_parser()
        .parse_str("nothing to see\n   \n____\nFoo: 1")
        .unwrap();

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].text("foo"), Some("1"));
    assert_eq!(result.stats.records_discarded, 1);
    assert_eq!(result.stats.records_emitted, 1);
}

#[test]
fn test_ignored_text_before_first_header() {
    let result = foo_parser().parse_str("Preamble  \nFoo: 1").unwrap();

    assert_eq!(
        result.records[0].meta.get(IGNORED_TEXT),
        Some(&["Preamble".to_string()][..])
    );
}

#[test]
fn test_blank_lines_without_open_field_are_silent() {
    let result = foo_parser().parse_str("\n   \n\nFoo: 1").unwrap();

    assert!(result.records[0].meta.is_empty());
    assert_eq!(result.stats.records_discarded, 0);
}

#[test]
fn test_separator_lines_only_produce_nothing() {
    let result = foo_parser().parse_str("____\n____\n\n____").unwrap();

    assert!(result.records.is_empty());
    assert_eq!(result.stats.lines_read, 4);
    assert_eq!(result.stats.records_discarded, 0);
}

#[test]
fn test_separator_must_fill_whole_line() {
    let result = foo_parser().parse_str("Foo: 1\n __ \nmore").unwrap();

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].text("foo"), Some("1\n __ \nmore"));
}

#[test]
fn test_records_never_merge_across_separator() {
    let parser = parser(json!({
        "Order": { "fields": { "foo": "Foo:", "bar": "Bar:" } }
    }));
    let result = parser.parse_str("Foo: 1\n_____\nBar: 2").unwrap();

    assert_eq!(
        serde_json::to_value(&result.records).unwrap(),
        json!([{ "foo": "1" }, { "bar": "2" }])
    );
}

#[test]
fn test_concatenated_inputs_parse_as_concatenation() {
    let parser = parser(json!({
        "Order": { "fields": { "foo": "Foo:", "bar": "Bar:" } }
    }));
    let first = "Foo: 1\nBar:\n  a\n  b";
    let second = "stray\nFoo: 2";

    let mut separate = parser.parse_str(first).unwrap().records;
    separate.extend(parser.parse_str(second).unwrap().records);
    let joined = parser
        .parse_str(&format!("{}\n___\n{}", first, second))
        .unwrap()
        .records;

    assert_eq!(joined, separate);
}

#[test]
fn test_custom_separator_from_dictionary() {
    let parser = parser(json!({
        "options": { "record_separator": "^-{3,}$" },
        "Order": { "fields": { "foo": "Foo:" } }
    }));
    let result = parser.parse_str("Foo: 1\n____\n---\nFoo: 2").unwrap();

    assert_eq!(result.records.len(), 2);
    assert_eq!(result.records[0].text("foo"), Some("1\n____"));
}

#[test]
fn test_scanner_counts_lines() {
    let dictionary = dictionary(json!({ "Order": { "fields": { "foo": "Foo:" } } }));
    let matcher = HeaderMatcher::new(dictionary.all_headers()).unwrap();
    let mut scanner = LineScanner::new(&dictionary, &matcher);

    for line in ["Foo: a", "b", "____", "Foo: c"] {
        scanner.feed_line(line).unwrap();
    }
    assert_eq!(scanner.stats().lines_read, 4);
    assert_eq!(scanner.stats().records_emitted, 1);

    let result = scanner.finish().unwrap();
    assert_eq!(result.stats.records_emitted, 2);
    assert_eq!(result.records[0].text("foo"), Some("a\nb"));
}
