use std::collections::HashMap;
use std::ops::RangeInclusive;

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::HttpError;

pub const INVALID_ID_FORMAT: &str = "Invalid ID format";
pub const INVALID_QUERY_FORMAT: &str = "Invalid query parameter format";
pub const INVALID_JSON_BODY: &str = "Invalid JSON body";

/// Error type for path and query parameter parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamError {
    pub name: String,
    pub message: &'static str,
}

impl ParamError {
    fn query(name: &str) -> Self {
        Self {
            name: name.to_string(),
            message: INVALID_QUERY_FORMAT,
        }
    }
}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.name)
    }
}

impl std::error::Error for ParamError {}

impl From<ParamError> for HttpError {
    fn from(err: ParamError) -> Self {
        HttpError::InvalidParameter(err.message.to_string())
    }
}

/// Parse a resource id from a path segment.
///
/// Only plain ASCII digits forming a value `>= 1` are accepted: no sign,
/// whitespace, or fractional part.
pub fn parse_id(raw: &str) -> Result<i64, ParamError> {
    let invalid = || ParamError {
        name: "id".to_string(),
        message: INVALID_ID_FORMAT,
    };
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match raw.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(invalid()),
    }
}

/// Unwrap a JSON body extracted as `Result<Json<T>, JsonRejection>`.
///
/// A missing, malformed or non-object body becomes `Invalid JSON body`.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, HttpError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!(%rejection, "Rejected request body");
            Err(HttpError::InvalidParameter(INVALID_JSON_BODY.to_string()))
        }
    }
}

/// Parse a query string into key-value pairs.
pub fn parse_query_string(query: Option<&str>) -> Vec<(String, String)> {
    match query {
        Some(q) => form_urlencoded::parse(q.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect(),
        None => Vec::new(),
    }
}

/// Decoded query parameters with typed, range-checked accessors.
///
/// When a key repeats, the first occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    values: HashMap<String, String>,
}

impl QueryParams {
    pub fn parse(query: Option<&str>) -> Self {
        let mut values = HashMap::new();
        for (key, value) in parse_query_string(query) {
            values.entry(key).or_insert(value);
        }
        Self { values }
    }

    pub fn raw(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Free text filter. Empty values count as absent.
    pub fn text(&self, name: &str) -> Option<String> {
        self.raw(name)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    /// An optional integer that must fall inside `range` when present.
    pub fn int_in(&self, name: &str, range: RangeInclusive<i64>) -> Result<Option<i64>, ParamError> {
        let Some(raw) = self.raw(name) else {
            return Ok(None);
        };
        let value = parse_query_int(raw).ok_or_else(|| ParamError::query(name))?;
        if range.contains(&value) {
            Ok(Some(value))
        } else {
            Err(ParamError::query(name))
        }
    }
}

fn parse_query_int(raw: &str) -> Option<i64> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
