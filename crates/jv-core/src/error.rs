use crate::payload::JsonKind;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by `JsonValue` operations.
///
/// Everything here propagates straight to the caller; nothing is retried.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Malformed JSON text handed to construction or `set`
    #[error("malformed JSON text: {0}")]
    Parse(#[source] serde_json::Error),

    /// Wrong-shaped argument (e.g. a scalar given to `set`, or a key used on a sequence)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// `push` of a value whose kind cannot join the current payload
    #[error("type mismatch: cannot push {addition} onto {payload}")]
    TypeMismatch { payload: JsonKind, addition: JsonKind },

    /// `condense_map` produced something that cannot be merged into a mapping
    #[error("ObjockeyError: cannot merge {0} into a mapping")]
    MergeShapeConflict(JsonKind),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}
