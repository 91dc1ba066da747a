//! # Piece Entity
//!
//! A piece is a schema-open content document. The only structure this crate
//! relies on is the `id` and the soft-delete `trashed` flag; everything else
//! lives in the open field map and round-trips untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A content piece managed by a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    /// Stable identifier, laundered on every inbound path.
    pub id: String,

    /// Soft-delete flag. Trashed pieces stay stored but leave public listings.
    #[serde(default)]
    pub trashed: bool,

    /// Schema-defined content fields, passed through as-is.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Piece {
    /// Create a new piece with a fresh id and the given fields.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            trashed: false,
            fields,
        }
    }

    /// Create a piece with a caller-chosen id (tests and fixtures).
    pub fn with_id(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            trashed: false,
            fields,
        }
    }

    /// Read a content field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Write a content field, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_piece_is_not_trashed() {
        let piece = Piece::new(Map::new());
        assert!(!piece.trashed);
        assert!(!piece.id.is_empty());
    }

    #[test]
    fn test_fields_flatten_on_the_wire() {
        let mut fields = Map::new();
        fields.insert("title".to_string(), json!("Hello"));
        let piece = Piece::with_id("p1", fields);

        let wire = serde_json::to_value(&piece).unwrap();
        assert_eq!(wire["id"], "p1");
        assert_eq!(wire["trashed"], false);
        assert_eq!(wire["title"], "Hello");
        assert!(wire.get("fields").is_none());
    }

    #[test]
    fn test_deserialize_defaults_trashed() {
        let piece: Piece = serde_json::from_value(json!({
            "id": "p2",
            "title": "No flag"
        }))
        .unwrap();
        assert!(!piece.trashed);
        assert_eq!(piece.get("title"), Some(&json!("No flag")));
    }
}
