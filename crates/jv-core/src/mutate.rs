use crate::error::{Error, Result};
use crate::payload::{JsonKind, Locator, Payload};
use crate::value::JsonValue;
use log::debug;
use serde_json::Value;

impl JsonValue {
    /// Add to the payload in place.
    ///
    /// - sequence + array: concatenate
    /// - mapping + object: merge, incoming keys overwrite
    /// - sequence + anything else: append as one element
    /// - mapping + array/null: accepted and ignored (same JSON "object" family)
    /// - otherwise: `Error::TypeMismatch`
    pub fn push(&mut self, addition: Value) -> Result<&mut Self> {
        match (&mut self.payload, addition) {
            (Payload::Sequence(items), Value::Array(more)) => items.extend(more),
            (Payload::Mapping(map), Value::Object(more)) => map.extend(more),
            (Payload::Sequence(items), other) => items.push(other),
            (Payload::Mapping(_), other @ (Value::Array(_) | Value::Null)) => {
                debug!("push of {} onto a mapping ignored", JsonKind::of(&other));
            }
            (payload, other) => {
                return Err(Error::TypeMismatch { payload: payload.kind(), addition: JsonKind::of(&other) });
            }
        }
        Ok(self)
    }

    /// Overwrite the entry at `at` with `value`.
    pub fn replace(&mut self, at: &Locator, value: Value) -> Result<&mut Self> {
        self.replace_with(at, |_| value)
    }

    /// Overwrite the entry at `at` with `transform(current)`.
    ///
    /// A missing key is inserted. Position `len` appends; anything further out is
    /// `Error::InvalidArgument`.
    pub fn replace_with<F>(&mut self, at: &Locator, transform: F) -> Result<&mut Self>
    where
        F: FnOnce(Option<&Value>) -> Value,
    {
        match (&mut self.payload, at) {
            (Payload::Sequence(items), Locator::Position(i)) => {
                if *i > items.len() {
                    return Err(Error::invalid(format!(
                        "position {} is past the end of a sequence of {}",
                        i,
                        items.len()
                    )));
                }
                let next = transform(items.get(*i));
                match items.get_mut(*i) {
                    Some(slot) => *slot = next,
                    None => items.push(next),
                }
            }
            (Payload::Mapping(map), Locator::Key(k)) => {
                let next = transform(map.get(k));
                map.insert(k.clone(), next);
            }
            (Payload::Empty, _) => return Err(Error::invalid("cannot replace into an unset payload")),
            (payload, at) => {
                return Err(Error::invalid(format!("locator {:?} does not address an {}", at, payload.kind())));
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, JsonKind, JsonValue, Locator};
    use serde_json::json;

    #[test]
    fn push_appends_scalar_to_sequence() {
        let mut v = JsonValue::new("[1]").unwrap();
        v.push(json!("x")).unwrap().push(json!({"k": 1})).unwrap();
        assert_eq!(v.to_text().as_deref(), Some(r#"[1,"x",{"k":1}]"#));
    }

    #[test]
    fn push_scalar_onto_mapping_is_a_mismatch() {
        let mut v = JsonValue::new(r#"{"a":1}"#).unwrap();
        let err = v.push(json!(3)).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { payload: JsonKind::Object, addition: JsonKind::Number }));
    }

    #[test_log::test]
    fn push_array_onto_mapping_is_ignored() {
        let mut v = JsonValue::new(r#"{"a":1}"#).unwrap();
        v.push(json!([1, 2])).unwrap().push(json!(null)).unwrap();
        assert_eq!(v.to_text().as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn push_onto_unset_payload_fails() {
        let mut v = JsonValue::empty();
        assert!(matches!(
            v.push(json!([1])),
            Err(Error::TypeMismatch { payload: JsonKind::Absent, addition: JsonKind::Array })
        ));
    }

    #[test]
    fn replace_with_sees_current_value() {
        let mut v = JsonValue::new(r#"{"n":2}"#).unwrap();
        v.replace_with(&Locator::from("n"), |cur| json!(cur.and_then(|c| c.as_i64()).unwrap_or(0) * 5))
            .unwrap();
        assert_eq!(v.get(&Locator::from("n")), Some(&json!(10)));
    }

    #[test]
    fn replace_inserts_missing_key_and_appends_at_end() {
        let mut m = JsonValue::new(r#"{"a":1}"#).unwrap();
        m.replace(&Locator::from("b"), json!(2)).unwrap();
        assert_eq!(m.to_text().as_deref(), Some(r#"{"a":1,"b":2}"#));

        let mut s = JsonValue::new("[0]").unwrap();
        s.replace(&Locator::Position(1), json!(9)).unwrap();
        assert_eq!(s.to_text().as_deref(), Some("[0,9]"));
    }

    #[test]
    fn replace_rejects_far_position() {
        let mut s = JsonValue::new("[0]").unwrap();
        for far in [2, 4_000_000_000, usize::MAX] {
            assert!(matches!(s.replace(&Locator::Position(far), json!(1)), Err(Error::InvalidArgument(_))));
        }
        let mut called = false;
        let res = s.replace_with(&Locator::Position(usize::MAX), |_| {
            called = true;
            json!(1)
        });
        assert!(res.is_err());
        assert!(!called);
        assert_eq!(s.to_text().as_deref(), Some("[0]"));
    }

    #[test]
    fn replace_rejects_wrong_locator_shape() {
        let mut s = JsonValue::new("[0]").unwrap();
        assert!(matches!(s.replace(&Locator::from("a"), json!(1)), Err(Error::InvalidArgument(_))));
        let mut e = JsonValue::empty();
        assert!(matches!(e.replace(&Locator::Position(0), json!(1)), Err(Error::InvalidArgument(_))));
    }
}
