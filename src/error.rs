//! The two recoverable failure kinds.
//!
//! Neither is ever fatal: a `DecodeError` means "start with an empty tracked
//! set", a `NoOpError` means "leave the tracked set as it is". Numeric input
//! has no error kind at all because it is normalized, never rejected.

/// Persisted state that could not be parsed.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed timezone state: {0}")]
    Json(#[from] serde_json::Error),
}

/// An operation that had nothing to act on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoOpError {
    #[error("no timezone selected")]
    EmptyName,
    #[error("no tracked timezone named '{0}'")]
    UnknownName(String),
    #[error("'{0}' is not in the timezone catalog")]
    NotInCatalog(String),
    #[error("index {index} out of range for {len} timezones")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("'{0}' is not a time option")]
    UnknownTime(String),
}
