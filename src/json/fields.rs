//! Typed field readers
//!
//! Each reader fails with [`Error::MalformedResponse`] naming the field when
//! the member is missing or has the wrong type.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};

/// Read a string member
pub fn text<'a>(obj: &'a JsonObject, field: &str) -> Result<&'a str> {
    match member(obj, field)? {
        JsonValue::String(s) => Ok(s),
        other => Err(mistyped(field, "a string", other)),
    }
}

/// Read an optional string member; `null` counts as absent
pub fn optional_text<'a>(obj: &'a JsonObject, field: &str) -> Option<&'a str> {
    obj.get(field).and_then(JsonValue::as_str)
}

/// Read a non-negative integer member
pub fn number(obj: &JsonObject, field: &str) -> Result<u64> {
    let value = member(obj, field)?;
    value
        .as_u64()
        .ok_or_else(|| mistyped(field, "a non-negative integer", value))
}

/// Read a boolean member
pub fn boolean(obj: &JsonObject, field: &str) -> Result<bool> {
    let value = member(obj, field)?;
    value.as_bool().ok_or_else(|| mistyped(field, "a boolean", value))
}

/// Read a nested object member
pub fn object<'a>(obj: &'a JsonObject, field: &str) -> Result<&'a JsonObject> {
    let value = member(obj, field)?;
    value
        .as_object()
        .ok_or_else(|| mistyped(field, "an object", value))
}

/// Unwrap a record that must be an object
pub fn into_object(value: JsonValue) -> Result<JsonObject> {
    match value {
        JsonValue::Object(map) => Ok(map),
        other => Err(mistyped("$", "an object", &other)),
    }
}

/// Convert a dotted path (`$.a.b` or `a.b`) into a JSON pointer (`/a/b`)
pub fn pointer(path: &str) -> String {
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() || path == "$" {
        return String::new();
    }
    path.split('.')
        .map(|part| part.replace('~', "~0").replace('/', "~1"))
        .fold(String::new(), |mut acc, part| {
            acc.push('/');
            acc.push_str(&part);
            acc
        })
}

/// Look up a value by dotted path
pub fn lookup<'a>(value: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    value.pointer(&pointer(path))
}

/// Short name of a JSON value's type, for diagnostics
pub fn kind_of(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

fn member<'a>(obj: &'a JsonObject, field: &str) -> Result<&'a JsonValue> {
    match obj.get(field) {
        None | Some(JsonValue::Null) => Err(Error::malformed(field, "missing")),
        Some(value) => Ok(value),
    }
}

fn mistyped(field: &str, expected: &str, actual: &JsonValue) -> Error {
    Error::malformed(
        field,
        format!("expected {expected}, got {}", kind_of(actual)),
    )
}
