use serde_json::Value;
use std::rc::Rc;

/// Output strategy used by `JsonValue::print`.
pub type Sink = Rc<dyn Fn(&Value)>;

/// Writes compact JSON text to stderr.
pub fn default_sink() -> Sink {
    Rc::new(|v: &Value| eprintln!("{}", v))
}
