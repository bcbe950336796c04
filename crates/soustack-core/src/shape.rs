//! Narrowing helpers over untyped JSON values.
//!
//! Recipes arrive as `serde_json::Value` and are never deserialized into
//! structs: the validator must keep collecting violations after a local
//! shape failure, so each expected shape gets an explicit narrowing
//! function returning `Option` instead of a conversion that would bail on
//! the first mismatch.

use serde_json::{Map, Value};

/// Narrow a value to an object. `serde_json`'s tagged union already
/// guarantees an `Object` is not an array.
pub fn as_object(value: &Value) -> Option<&Map<String, Value>> {
    value.as_object()
}

/// Narrow a value to an array slice.
pub fn as_array(value: &Value) -> Option<&[Value]> {
    value.as_array().map(Vec::as_slice)
}

/// Narrow a value to a non-empty string. Whitespace-only strings do not
/// count as content.
pub fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.trim().is_empty())
}

/// Narrow an object field to a non-empty string. Absent fields and
/// non-string or blank values all narrow to `None`.
pub fn field_str<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object.get(key).and_then(non_empty_str)
}
