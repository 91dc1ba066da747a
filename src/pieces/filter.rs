//! # Filter Values
//!
//! Coerces raw query-string values into typed JSON values and evaluates
//! name/value equality filters against a piece. Which filter names are
//! allowed at all is decided upstream by the query builder's allow-list.

use serde_json::Value;

use super::piece::Piece;

/// Coerce a raw query-string value into a typed JSON value.
///
/// `null`, booleans, and numbers are recognized; anything else is a string.
pub fn coerce(raw: &str) -> Value {
    if raw == "null" {
        return Value::Null;
    }
    if raw == "true" {
        return Value::Bool(true);
    }
    if raw == "false" {
        return Value::Bool(false);
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(n) = raw.parse::<f64>() {
        if let Some(num) = serde_json::Number::from_f64(n) {
            return Value::Number(num);
        }
    }
    Value::String(raw.to_string())
}

/// Check whether a piece satisfies a single equality filter.
///
/// `id` and `trashed` address the piece's own structure; any other name
/// addresses a content field. A missing field only matches a `null` filter.
pub fn matches(piece: &Piece, name: &str, value: &Value) -> bool {
    match name {
        "id" => value.as_str() == Some(piece.id.as_str()),
        "trashed" => value.as_bool() == Some(piece.trashed),
        _ => match piece.get(name) {
            Some(field) => field == value,
            None => value.is_null(),
        },
    }
}
