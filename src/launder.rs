//! # Input Laundering
//!
//! Converts untrusted request values into typed, safe values. The only
//! laundering this crate needs is for piece identifiers.

/// Longest identifier accepted from a caller.
const MAX_ID_LEN: usize = 100;

/// Launder a raw path identifier.
///
/// Accepts non-empty ASCII alphanumerics plus `_` and `-`, up to
/// [`MAX_ID_LEN`] bytes. Anything else (path traversal, separators,
/// whitespace) is rejected with `None`.
pub fn id(raw: &str) -> Option<String> {
    if raw.is_empty() || raw.len() > MAX_ID_LEN {
        return None;
    }
    if raw
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        Some(raw.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_well_formed_ids() {
        assert_eq!(id("abc123").as_deref(), Some("abc123"));
        assert_eq!(id("a_b-c").as_deref(), Some("a_b-c"));
        assert!(id(&uuid::Uuid::new_v4().to_string()).is_some());
    }

    #[test]
    fn test_rejects_traversal_and_separators() {
        assert!(id("../etc").is_none());
        assert!(id("a/b").is_none());
        assert!(id("a b").is_none());
        assert!(id("a.b").is_none());
    }

    #[test]
    fn test_rejects_empty_and_oversized() {
        assert!(id("").is_none());
        assert!(id(&"x".repeat(MAX_ID_LEN + 1)).is_none());
        assert!(id(&"x".repeat(MAX_ID_LEN)).is_some());
    }
}
