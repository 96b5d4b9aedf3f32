//! Contract tests for the DOM-backed reference cursor.

use docpath::{DocumentError, DocumentReader, DomDocumentReader, EventType};
use serde_json::json;

#[test]
fn event_sequence_with_context() {
    let doc = json!({"a": 1, "b": {"c": "x"}, "d": [true, null]});
    let mut reader = DomDocumentReader::new(&doc);

    assert_eq!(reader.next().expect("ok"), Some(EventType::StartMap));
    assert!(reader.in_map());
    assert_eq!(reader.field_name().expect("in map"), None);

    assert_eq!(reader.next().expect("ok"), Some(EventType::Long));
    assert_eq!(reader.field_name().expect("in map"), Some("a"));
    assert_eq!(reader.get_long().expect("long"), 1);

    assert_eq!(reader.next().expect("ok"), Some(EventType::StartMap));
    assert_eq!(reader.field_name().expect("in map"), Some("b"));

    assert_eq!(reader.next().expect("ok"), Some(EventType::String));
    assert_eq!(reader.field_name().expect("in map"), Some("c"));
    assert_eq!(reader.get_string().expect("string"), "x");

    assert_eq!(reader.next().expect("ok"), Some(EventType::EndMap));

    assert_eq!(reader.next().expect("ok"), Some(EventType::StartArray));
    assert_eq!(reader.field_name().expect("in map"), Some("d"));

    assert_eq!(reader.next().expect("ok"), Some(EventType::Boolean));
    assert!(!reader.in_map());
    assert_eq!(reader.array_index().expect("in array"), 0);
    assert!(reader.get_boolean().expect("boolean"));

    assert_eq!(reader.next().expect("ok"), Some(EventType::Null));
    assert_eq!(reader.array_index().expect("in array"), 1);

    assert_eq!(reader.next().expect("ok"), Some(EventType::EndArray));
    assert_eq!(reader.next().expect("ok"), Some(EventType::EndMap));
    assert_eq!(reader.next().expect("ok"), None);
    // exhausted stays exhausted
    assert_eq!(reader.next().expect("ok"), None);
    assert_eq!(reader.current_event(), None);
}

#[test]
fn numbers_map_to_long_or_double() {
    let doc = json!({"i": 42, "neg": -7, "f": 2.25});
    let mut reader = DomDocumentReader::new(&doc);
    reader.next().expect("start");

    assert_eq!(reader.next().expect("ok"), Some(EventType::Double));
    assert_eq!(reader.get_double().expect("double"), 2.25);
    assert_eq!(reader.next().expect("ok"), Some(EventType::Long));
    assert_eq!(reader.get_long().expect("long"), 42);
    assert_eq!(reader.next().expect("ok"), Some(EventType::Long));
    assert_eq!(reader.get_long().expect("long"), -7);
}

#[test]
fn state_errors_outside_valid_context() {
    let doc = json!({"a": [1]});
    let mut reader = DomDocumentReader::new(&doc);

    // before the first next()
    assert!(matches!(
        reader.field_name(),
        Err(DocumentError::State(_))
    ));
    assert!(matches!(reader.get_long(), Err(DocumentError::State(_))));

    reader.next().expect("start map");
    // in a map, array_index is a state error
    assert!(matches!(reader.array_index(), Err(DocumentError::State(_))));

    reader.next().expect("start array");
    reader.next().expect("element");
    // in an array, field_name is a state error
    assert!(matches!(reader.field_name(), Err(DocumentError::State(_))));

    // drain the document; context queries then fail
    while reader.next().expect("ok").is_some() {}
    assert!(matches!(reader.get_long(), Err(DocumentError::State(_))));
}

#[test]
fn typed_getter_mismatch_keeps_cursor_usable() {
    let doc = json!({"a": "text", "b": 3});
    let mut reader = DomDocumentReader::new(&doc);
    reader.next().expect("start");
    reader.next().expect("a");

    let err = reader.get_long().expect_err("wrong kind");
    assert!(matches!(
        err,
        DocumentError::TypeMismatch {
            expected: EventType::Long,
            actual: Some(EventType::String),
        }
    ));
    // the failed getter does not invalidate the cursor
    assert_eq!(reader.get_string().expect("string"), "text");
    assert_eq!(reader.next().expect("ok"), Some(EventType::Long));
    assert_eq!(reader.get_long().expect("long"), 3);
}

#[test]
fn skip_children_jumps_over_subtrees() {
    let doc = json!({"a": {"deep": {"deeper": [1, 2, 3]}}, "b": 9});
    let mut reader = DomDocumentReader::new(&doc);
    reader.next().expect("start");

    assert_eq!(reader.next().expect("ok"), Some(EventType::StartMap));
    assert_eq!(reader.field_name().expect("in map"), Some("a"));
    reader.skip_children().expect("skippable");
    assert_eq!(reader.current_event(), Some(EventType::EndMap));

    assert_eq!(reader.next().expect("ok"), Some(EventType::Long));
    assert_eq!(reader.field_name().expect("in map"), Some("b"));

    // a no-op on scalars
    reader.skip_children().expect("no-op");
    assert_eq!(reader.current_event(), Some(EventType::Long));
}

#[test]
fn non_map_root_is_a_decoding_error() {
    for doc in [json!([1, 2]), json!("scalar"), json!(1)] {
        let mut reader = DomDocumentReader::new(&doc);
        assert!(matches!(
            reader.next(),
            Err(DocumentError::Decoding(_))
        ));
    }
}
