use crate::error::{Error, Result};
use crate::payload::{JsonKind, Locator, Payload};
use crate::sink::{Sink, default_sink};
use log::{debug, trace};
use serde_json::error::Category;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// What a `JsonValue` can be built from: JSON text or an already structured value.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Text(String),
    Structured(Value),
}

impl From<&str> for Source {
    fn from(s: &str) -> Self { Source::Text(s.to_string()) }
}

impl From<String> for Source {
    fn from(s: String) -> Self { Source::Text(s) }
}

impl From<Value> for Source {
    fn from(v: Value) -> Self { Source::Structured(v) }
}

impl From<Vec<Value>> for Source {
    fn from(items: Vec<Value>) -> Self { Source::Structured(Value::Array(items)) }
}

impl From<Map<String, Value>> for Source {
    fn from(map: Map<String, Value>) -> Self { Source::Structured(Value::Object(map)) }
}

/// Owner of a single JSON sequence or mapping.
///
/// Mutators (`push`, `replace`, `set`) edit the payload in place and return `&mut Self`
/// for chaining; transforms (`filter`, `map`, `condense_map`) hand back a new `Payload`.
#[derive(Clone)]
pub struct JsonValue {
    pub(crate) payload: Payload,
    sink: Sink,
}

impl JsonValue {
    /// Build from text or a structured value.
    ///
    /// Empty text leaves the payload unset. Malformed text fails with `Error::Parse`.
    /// Other failures (non-syntax serde errors, scalar results) are swallowed and
    /// leave the payload unset as well.
    pub fn new(source: impl Into<Source>) -> Result<Self> {
        let payload = match source.into() {
            Source::Structured(v) => Payload::from_value(v).unwrap_or_else(|scalar| {
                debug!("ignoring structured {} source, payload left unset", JsonKind::of(&scalar));
                Payload::Empty
            }),
            Source::Text(text) if text.is_empty() => Payload::Empty,
            Source::Text(text) => match serde_json::from_str::<Value>(&text) {
                Ok(v) => Payload::from_value(v).unwrap_or_else(|scalar| {
                    debug!("text parsed to {}, payload left unset", JsonKind::of(&scalar));
                    Payload::Empty
                }),
                Err(e) => match e.classify() {
                    Category::Syntax | Category::Eof => return Err(Error::Parse(e)),
                    Category::Data | Category::Io => {
                        debug!("suppressed parse failure during construction: {}", e);
                        Payload::Empty
                    }
                },
            },
        };
        Ok(Self { payload, sink: default_sink() })
    }

    pub fn empty() -> Self {
        Self { payload: Payload::Empty, sink: default_sink() }
    }

    pub fn with_sink(mut self, sink: Sink) -> Self {
        self.sink = sink;
        self
    }

    /// Replace the payload. Unlike construction, every failure propagates.
    pub fn set(&mut self, buffer: impl Into<Source>) -> Result<&mut Self> {
        let v = match buffer.into() {
            Source::Text(text) => serde_json::from_str::<Value>(&text).map_err(Error::Parse)?,
            Source::Structured(v) => v,
        };
        self.payload = Payload::from_value(v).map_err(|scalar| {
            Error::invalid(format!("expected an array or object, got {}", JsonKind::of(&scalar)))
        })?;
        Ok(self)
    }

    /// Compact JSON text of the payload; `None` while unset.
    pub fn to_text(&self) -> Option<String> {
        match &self.payload {
            Payload::Empty => None,
            Payload::Sequence(items) => serde_json::to_string(items).ok(),
            Payload::Mapping(map) => serde_json::to_string(map).ok(),
        }
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self.payload, Payload::Sequence(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self.payload, Payload::Mapping(_))
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Raw payload, for numeric contexts. No attempt is made to give it a number.
    pub fn value_of(&self) -> &Payload {
        &self.payload
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }

    pub fn into_value(self) -> Value {
        self.payload.into()
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn get(&self, at: &Locator) -> Option<&Value> {
        self.payload.get(at)
    }

    /// RFC 6901 lookup below the payload, e.g. `/0/name`.
    ///
    /// The payload is not itself a `Value`, so the whole-document pointer `""`
    /// yields `None`; use `payload()` for that. Tokens below the first one are
    /// resolved by `serde_json::Value::pointer`.
    pub fn pointer(&self, ptr: &str) -> Option<&Value> {
        let rest = ptr.strip_prefix('/')?;
        let (head, tail) = match rest.find('/') {
            Some(pos) => (&rest[..pos], &rest[pos..]),
            None => (rest, ""),
        };
        let head = head.replace("~1", "/").replace("~0", "~");
        let at = match &self.payload {
            Payload::Mapping(_) => Locator::Key(head),
            _ => head.parse::<Locator>().ok()?,
        };
        self.payload.get(&at)?.pointer(tail)
    }

    /// Send one element (when `at` is given and truthy) or the whole payload to the sink.
    pub fn print(&self, at: Option<&Locator>) -> &Self {
        match at.filter(|l| l.is_truthy()) {
            Some(l) => (self.sink)(self.payload.get(l).unwrap_or(&Value::Null)),
            None => (self.sink)(&Value::from(&self.payload)),
        }
        self
    }

    /// Swap the print sink; `None` restores the stderr default.
    pub fn set_sink(&mut self, sink: Option<Sink>) -> &mut Self {
        trace!("print sink {}", if sink.is_some() { "replaced" } else { "reset" });
        self.sink = sink.unwrap_or_else(default_sink);
        self
    }
}

impl Default for JsonValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonValue").field("payload", &self.payload).finish_non_exhaustive()
    }
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Some(s) => f.write_str(&s),
            None => Ok(()),
        }
    }
}

impl FromStr for JsonValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl From<Vec<Value>> for JsonValue {
    fn from(items: Vec<Value>) -> Self {
        Self { payload: Payload::Sequence(items), sink: default_sink() }
    }
}

impl From<Map<String, Value>> for JsonValue {
    fn from(map: Map<String, Value>) -> Self {
        Self { payload: Payload::Mapping(map), sink: default_sink() }
    }
}

impl From<&JsonValue> for Value {
    fn from(v: &JsonValue) -> Self {
        Value::from(&v.payload)
    }
}
