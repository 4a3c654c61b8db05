use jv_core::{Error, JsonValue, Locator, Payload, Source};
use serde_json::{Value, json};
use std::cell::RefCell;
use std::rc::Rc;
use test_case::test_case;

#[test]
fn filter_is_an_ordered_subsequence_and_does_not_mutate() {
    let v = JsonValue::new("[9, 2, 7, 4, 5, 6]").unwrap();
    let before = v.payload().clone();
    let big = v.filter(|e| e.as_f64().is_some_and(|n| n > 4.0));
    assert_eq!(big, Payload::Sequence(vec![json!(9), json!(7), json!(5), json!(6)]));
    assert_eq!(v.payload(), &before);
}

#[test_case("[]", "[]"; "empty")]
#[test_case("[5,6,7]", "[5,6,7]"; "all match")]
#[test_case("[1,2,3]", "[]"; "none match")]
#[test_case("[5,1,5,9,1,5]", "[5,5,9,5]"; "duplicates keep order")]
#[test_case(r#"[8,"x",null,6,[9]]"#, "[8,6]"; "mixed kinds")]
fn filter_keeps_matching_subsequence(input: &str, expected: &str) {
    let v = JsonValue::new(input).unwrap();
    let before = v.payload().clone();
    let kept = v.filter(|e| e.as_f64().is_some_and(|n| n > 4.0));
    assert_eq!(Value::from(kept), serde_json::from_str::<Value>(expected).unwrap());
    assert_eq!(v.payload(), &before);
}

#[test]
fn find_all_indexes_on_mapping_returns_every_matching_key() {
    let v = JsonValue::new(r#"{"a":1,"b":"x","c":3,"d":null}"#).unwrap();
    let nums = v.find_all_indexes(|e| e.value().is_number());
    assert_eq!(nums, Some(vec![Locator::Key("a".into()), Locator::Key("c".into())]));
    assert_eq!(v.find_all_indexes(|e| e.value().is_boolean()), None);
}

#[test]
fn text_round_trip_is_deep_equal() {
    let original = json!({
        "name": "widget",
        "tags": ["a", "b"],
        "dims": {"w": 1.5, "h": -2, "ok": true},
        "none": null
    });
    let v = JsonValue::new(original.clone()).unwrap();
    let text = v.to_text().unwrap();
    let again = JsonValue::new(text).unwrap();
    assert_eq!(again.into_value(), original);
}

#[test]
fn push_concatenates_sequences() {
    let mut v = JsonValue::new(json!([1, 2])).unwrap();
    v.push(json!([3, 4])).unwrap();
    assert_eq!(v.into_value(), json!([1, 2, 3, 4]));
}

#[test]
fn push_merges_mappings_with_overwrite() {
    let mut v = JsonValue::new(json!({"a": 1})).unwrap();
    v.push(json!({"b": 2})).unwrap();
    assert_eq!(Value::from(&v), json!({"a": 1, "b": 2}));

    let mut w = JsonValue::new(json!({"a": 1})).unwrap();
    w.push(json!({"a": 2})).unwrap();
    assert_eq!(w.into_value(), json!({"a": 2}));
}

// Reproduces the shifted even-count positions: for [1,2,3,4] the slots are 2 and 3, not 1 and 2.
#[test]
fn median_even_count_uses_shifted_positions() {
    let v = JsonValue::new("[1,2,3,4]").unwrap();
    assert_eq!(v.median(|e| e.as_f64()), vec![Some(3.0), Some(4.0)]);
}

#[test]
fn construction_paths() {
    assert!(matches!(JsonValue::new("not json"), Err(Error::Parse(_))));

    let empty = JsonValue::new("").unwrap();
    assert_eq!(empty.payload(), &Payload::Empty);
    assert!(!empty.is_sequence() && !empty.is_mapping());

    let adopted = JsonValue::new(vec![json!(1), json!(2), json!(3)]).unwrap();
    assert_eq!(adopted.payload(), &Payload::Sequence(vec![json!(1), json!(2), json!(3)]));
    assert_eq!(JsonValue::new(Source::Structured(json!([1, 2, 3]))).unwrap().len(), 3);
}

// Known quirk: only syntax errors propagate from construction. Text that parses to a
// scalar (and a structured scalar) silently leaves the payload unset.
#[test]
fn construction_swallows_non_syntax_failures() {
    let scalar_text = JsonValue::new("42").unwrap();
    assert_eq!(scalar_text.payload(), &Payload::Empty);
    let scalar_value = JsonValue::new(json!("str")).unwrap();
    assert_eq!(scalar_value.payload(), &Payload::Empty);
}

#[test]
fn condense_map_on_mapping() {
    let v = JsonValue::new(r#"{"a":1,"b":2,"c":3}"#).unwrap();

    let err = v
        .condense_map(|e| if e.key() == Some("b") { Some(json!([1])) } else { Some(json!({"k": 0})) })
        .unwrap_err();
    assert!(matches!(err, Error::MergeShapeConflict(jv_core::JsonKind::Array)));

    let kept = v
        .condense_map(|e| match (e.key(), e.value().as_i64()) {
            (Some("b"), _) => None,
            (Some(k), Some(n)) => Some(json!({ k: n * 2 })),
            _ => None,
        })
        .unwrap();
    assert_eq!(Value::from(kept), json!({"a": 2, "c": 6}));
}

#[test]
fn find_indexes_2d_on_sequence() {
    let v = JsonValue::new(r#"[1,"a",2,"b"]"#).unwrap();
    let mut preds: Vec<jv_core::Predicate<'_>> = vec![
        Box::new(|e: jv_core::Entry<'_>| e.value().is_string()),
        Box::new(|e: jv_core::Entry<'_>| e.value().is_array()),
    ];
    assert_eq!(
        v.find_indexes_2d(&mut preds),
        vec![Some(vec![Locator::Position(1), Locator::Position(3)]), None]
    );
}

#[test]
fn chained_mutation_and_printing() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let out = Rc::clone(&seen);
    let mut v = JsonValue::new(r#"{"count":1}"#)
        .unwrap()
        .with_sink(Rc::new(move |v: &Value| out.borrow_mut().push(v.to_string())));

    v.push(json!({"extra": true}))
        .unwrap()
        .replace_with(&Locator::from("count"), |cur| json!(cur.and_then(Value::as_i64).unwrap_or(0) + 1))
        .unwrap()
        .print(Some(&Locator::from("count")))
        .print(None);

    assert_eq!(*seen.borrow(), vec!["2".to_string(), r#"{"count":2,"extra":true}"#.to_string()]);
}

#[test]
fn numeric_context_yields_raw_payload() {
    let v: JsonValue = "[1,2]".parse().unwrap();
    assert_eq!(v.value_of(), &Payload::Sequence(vec![json!(1), json!(2)]));
    assert_eq!(format!("{}", v), "[1,2]");
}
