// Detached transforms: each returns a fresh `Payload` and leaves `self` untouched.
use crate::error::{Error, Result};
use crate::payload::{Entry, JsonKind, Payload};
use crate::value::JsonValue;
use serde_json::{Map, Value};

impl JsonValue {
    /// Entries satisfying `pred`, same shape and order as the payload.
    pub fn filter<F>(&self, mut pred: F) -> Payload
    where
        F: FnMut(Entry<'_>) -> bool,
    {
        let mut out = self.payload.empty_like();
        for e in self.payload.entries() {
            if !pred(e) {
                continue;
            }
            match (&mut out, e) {
                (Payload::Sequence(items), Entry::Element { value, .. }) => items.push(value.clone()),
                (Payload::Mapping(map), Entry::Field { key, value, .. }) => {
                    map.insert(key.to_string(), value.clone());
                }
                _ => {}
            }
        }
        out
    }

    /// Apply `transform` to every entry.
    ///
    /// Sequences keep one slot per element; `None` becomes a `null` placeholder.
    /// Mappings merge each returned object into the result (later keys win);
    /// `None` becomes `{key: null}` and any non-object result is stored as `{key: result}`.
    pub fn map<F>(&self, mut transform: F) -> Payload
    where
        F: FnMut(Entry<'_>) -> Option<Value>,
    {
        match &self.payload {
            Payload::Empty => Payload::Empty,
            Payload::Sequence(_) => Payload::Sequence(
                self.payload.entries().map(|e| transform(e).unwrap_or(Value::Null)).collect(),
            ),
            Payload::Mapping(_) => {
                let mut out = Map::new();
                for e in self.payload.entries() {
                    let key = e.key().unwrap_or_default().to_string();
                    match transform(e) {
                        Some(Value::Object(entries)) => out.extend(entries),
                        Some(other) => {
                            out.insert(key, other);
                        }
                        None => {
                            out.insert(key, Value::Null);
                        }
                    }
                }
                Payload::Mapping(out)
            }
        }
    }

    /// Like `map`, but entries whose transform yields `None` are dropped.
    ///
    /// For mappings every result must be an object to merge in; `null` merges nothing,
    /// anything else fails with `Error::MergeShapeConflict`.
    pub fn condense_map<F>(&self, mut transform: F) -> Result<Payload>
    where
        F: FnMut(Entry<'_>) -> Option<Value>,
    {
        match &self.payload {
            Payload::Empty => Ok(Payload::Empty),
            Payload::Sequence(_) => Ok(Payload::Sequence(
                self.payload.entries().filter_map(|e| transform(e)).collect(),
            )),
            Payload::Mapping(_) => {
                let mut out = Map::new();
                for e in self.payload.entries() {
                    match transform(e) {
                        None | Some(Value::Null) => {}
                        Some(Value::Object(entries)) => out.extend(entries),
                        Some(other) => return Err(Error::MergeShapeConflict(JsonKind::of(&other))),
                    }
                }
                Ok(Payload::Mapping(out))
            }
        }
    }

    /// Run `action` on every entry, for side effects.
    pub fn for_each<F>(&self, action: F) -> &Self
    where
        F: FnMut(Entry<'_>),
    {
        self.payload.entries().for_each(action);
        self
    }
}
