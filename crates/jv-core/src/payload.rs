// Shapes shared by every operation:
// - `Payload`: the tagged container owned by a `JsonValue` (empty, sequence, mapping).
// - `Entry`: what a callback sees for one element/field.
// - `Locator`: a position in a sequence or a key in a mapping.
// - `JsonKind`: coarse classification used in error messages.
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind { Absent, Null, Bool, Number, String, Object, Array }

impl JsonKind {
    pub fn of(v: &Value) -> Self {
        match v {
            Value::Null => JsonKind::Null,
            Value::Bool(_) => JsonKind::Bool,
            Value::Number(_) => JsonKind::Number,
            Value::String(_) => JsonKind::String,
            Value::Object(_) => JsonKind::Object,
            Value::Array(_) => JsonKind::Array,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JsonKind::Absent => "absent",
            JsonKind::Null => "null",
            JsonKind::Bool => "boolean",
            JsonKind::Number => "number",
            JsonKind::String => "string",
            JsonKind::Object => "object",
            JsonKind::Array => "array",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value owned by a `JsonValue`.
///
/// Once set it is always a sequence or a mapping; scalars never live here.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Payload {
    #[default]
    Empty,
    Sequence(Vec<Value>),
    Mapping(Map<String, Value>),
}

impl Payload {
    /// Adopt an already structured value. Scalars are handed back unchanged.
    pub fn from_value(v: Value) -> Result<Self, Value> {
        match v {
            Value::Array(items) => Ok(Payload::Sequence(items)),
            Value::Object(map) => Ok(Payload::Mapping(map)),
            other => Err(other),
        }
    }

    pub fn kind(&self) -> JsonKind {
        match self {
            Payload::Empty => JsonKind::Absent,
            Payload::Sequence(_) => JsonKind::Array,
            Payload::Mapping(_) => JsonKind::Object,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        match self {
            Payload::Empty => 0,
            Payload::Sequence(items) => items.len(),
            Payload::Mapping(map) => map.len(),
        }
    }

    pub fn get(&self, at: &Locator) -> Option<&Value> {
        match (self, at) {
            (Payload::Sequence(items), Locator::Position(i)) => items.get(*i),
            (Payload::Mapping(map), Locator::Key(k)) => map.get(k),
            _ => None,
        }
    }

    /// Same shape, no entries.
    pub(crate) fn empty_like(&self) -> Self {
        match self {
            Payload::Empty => Payload::Empty,
            Payload::Sequence(_) => Payload::Sequence(Vec::new()),
            Payload::Mapping(_) => Payload::Mapping(Map::new()),
        }
    }

    /// Visit every entry in container order.
    pub(crate) fn entries(&self) -> Box<dyn Iterator<Item = Entry<'_>> + '_> {
        match self {
            Payload::Empty => Box::new(std::iter::empty()),
            Payload::Sequence(items) => Box::new(items.iter().enumerate().map(move |(position, value)| {
                Entry::Element { value, position, container: items }
            })),
            Payload::Mapping(map) => Box::new(map.iter().map(move |(key, value)| Entry::Field {
                key,
                value,
                container: map,
            })),
        }
    }
}

impl From<Payload> for Value {
    fn from(p: Payload) -> Self {
        match p {
            Payload::Empty => Value::Null,
            Payload::Sequence(items) => Value::Array(items),
            Payload::Mapping(map) => Value::Object(map),
        }
    }
}

impl From<&Payload> for Value {
    fn from(p: &Payload) -> Self {
        p.clone().into()
    }
}

/// Where an entry lives: a position in a sequence or a key in a mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    Position(usize),
    Key(String),
}

impl Locator {
    /// Falsy locators (`0`, `""`) address the whole payload when printing.
    pub fn is_truthy(&self) -> bool {
        match self {
            Locator::Position(i) => *i != 0,
            Locator::Key(k) => !k.is_empty(),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Position(i) => write!(f, "{}", i),
            Locator::Key(k) => f.write_str(k),
        }
    }
}

impl FromStr for Locator {
    type Err = std::convert::Infallible;

    // Digits address a position, anything else is a key
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<usize>() {
            Ok(i) => Locator::Position(i),
            Err(_) => Locator::Key(s.to_string()),
        })
    }
}

impl From<usize> for Locator {
    fn from(i: usize) -> Self { Locator::Position(i) }
}

impl From<&str> for Locator {
    fn from(k: &str) -> Self { Locator::Key(k.to_string()) }
}

impl From<String> for Locator {
    fn from(k: String) -> Self { Locator::Key(k) }
}

/// One element or field handed to a callback.
///
/// Sequences produce `Element` (value, position, whole sequence); mappings produce
/// `Field` (key, value, whole mapping).
#[derive(Debug, Clone, Copy)]
pub enum Entry<'a> {
    Element { value: &'a Value, position: usize, container: &'a [Value] },
    Field { key: &'a str, value: &'a Value, container: &'a Map<String, Value> },
}

impl<'a> Entry<'a> {
    pub fn value(&self) -> &'a Value {
        match self {
            Entry::Element { value, .. } | Entry::Field { value, .. } => value,
        }
    }

    pub fn locator(&self) -> Locator {
        match self {
            Entry::Element { position, .. } => Locator::Position(*position),
            Entry::Field { key, .. } => Locator::Key((*key).to_string()),
        }
    }

    pub fn position(&self) -> Option<usize> {
        match self {
            Entry::Element { position, .. } => Some(*position),
            Entry::Field { .. } => None,
        }
    }

    pub fn key(&self) -> Option<&'a str> {
        match self {
            Entry::Element { .. } => None,
            Entry::Field { key, .. } => Some(key),
        }
    }

    /// Number view of the value, for selectors.
    pub fn as_f64(&self) -> Option<f64> {
        self.value().as_f64()
    }
}
