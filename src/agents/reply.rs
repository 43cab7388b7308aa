//! Reply parsing for text-producing providers.
//!
//! A usable reply is a JSON object with an integer `selection` inside
//! `[0, len)`. Models often wrap the object in prose, so the outermost
//! `{ ... }` span is cut out before parsing.

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplyError {
    #[error("reply contains no JSON object")]
    NoJson,

    #[error("malformed JSON: {0}")]
    Malformed(String),

    #[error("reply has no integer selection")]
    MissingSelection,

    #[error("selection {selection} outside 0..{len}")]
    OutOfRange { selection: i64, len: usize },
}

impl ReplyError {
    /// The reply parsed but named a choice that does not exist.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, ReplyError::OutOfRange { .. })
    }
}

/// The span from the first `{` to the last `}`, if any.
#[must_use]
pub fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Parse the selected index out of a reply to a request with `len` choices.
pub fn parse_selection(text: &str, len: usize) -> Result<usize, ReplyError> {
    let json = extract_json(text).ok_or(ReplyError::NoJson)?;
    let value: Value = serde_json::from_str(json).map_err(|e| ReplyError::Malformed(e.to_string()))?;

    let selection = value
        .get("selection")
        .and_then(Value::as_i64)
        .ok_or(ReplyError::MissingSelection)?;

    usize::try_from(selection)
        .ok()
        .filter(|&index| index < len)
        .ok_or(ReplyError::OutOfRange { selection, len })
}
