//! Ordered validation-error accumulation.
//!
//! Request bodies are checked field by field and every failing rule pushes a
//! human-readable message. The order of the messages is part of the API
//! contract, so [`ValidationErrors`] is a plain ordered list rather than a
//! per-field map.
//!
//! ```ignore
//! let mut errors = ValidationErrors::new();
//! if non_blank(input.title.as_ref()).is_none() {
//!     errors.push("Title is required");
//! }
//! ```

use serde::Serialize;
use serde_json::Value;

/// Ordered list of validation messages. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    messages: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

impl<S: Into<String>> FromIterator<S> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            messages: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// The trimmed string content of a field, if it is a non-blank JSON string.
///
/// Missing, `null`, non-string and whitespace-only values all yield `None`.
pub fn non_blank(value: Option<&Value>) -> Option<&str> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
        _ => None,
    }
}

/// Whether a field is missing or explicitly `null`.
pub fn is_absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// An integral JSON number as `i64`.
///
/// Accepts both `2020` and `2020.0`; rejects fractional numbers, strings and
/// every other JSON type.
pub fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        _ => None,
    }
}

/// A string field kept verbatim; anything else becomes `None`.
pub fn optional_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}
