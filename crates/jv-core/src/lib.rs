//! jv-core: a small data-manipulation wrapper around one JSON value
//!
//! This crate focuses on a small, well-factored surface:
//! - `JsonValue` owns a single sequence or mapping (or nothing yet)
//! - Search (`find_index`, `find_all_indexes`, `find_indexes_2d`) and aggregation
//!   (`average`, `median`) driven by callbacks
//! - Detached transforms (`filter`, `map`, `condense_map`) and in-place edits
//!   (`push`, `replace`, `replace_with`, `set`)
//! - Text round-trip through serde_json and a pluggable print sink
//!
//! Callbacks see the same `Entry` shape for both containers, so one closure
//! can serve sequences and mappings alike.
pub mod aggregate;
pub mod error;
pub mod mutate;
pub mod payload;
pub mod search;
pub mod sink;
pub mod transform;
pub mod value;

pub use error::{Error, Result};
pub use payload::{Entry, JsonKind, Locator, Payload};
pub use search::Predicate;
pub use sink::{Sink, default_sink};
pub use value::{JsonValue, Source};

// Element values are plain serde_json values
pub use serde_json::{Map, Value};
