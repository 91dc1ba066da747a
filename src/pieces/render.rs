//! # Annotation & Rendering
//!
//! Two stages of the read pipeline after materialization: the annotator
//! decorates pieces with derived display fields (resolved URLs), then the
//! renderer projects each piece into its public response representation.
//! Annotation takes pieces by unique `&mut` ownership; rendering borrows
//! them read-only afterwards.

use std::future::Future;

use serde_json::{json, Value};
use thiserror::Error;

use crate::auth::Caller;

use super::piece::Piece;

/// Rendering failures
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("render failed: {0}")]
    Failed(String),
}

/// Attaches derived display fields to pieces.
pub trait Annotator: Send + Sync {
    /// Decorate every piece in the slice in place.
    fn annotate(&self, collection: &str, pieces: &mut [Piece]);

    /// Decorate a single piece.
    fn annotate_one(&self, collection: &str, piece: &mut Piece) {
        self.annotate(collection, std::slice::from_mut(piece));
    }
}

/// Annotator that resolves each piece's public URL into `_url`.
pub struct UrlAnnotator {
    base: String,
}

impl UrlAnnotator {
    /// `base` is the API prefix the collection routers are nested under.
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl Annotator for UrlAnnotator {
    fn annotate(&self, collection: &str, pieces: &mut [Piece]) {
        for piece in pieces {
            let url = format!("{}/{}/{}", self.base, collection, piece.id);
            piece.set("_url", json!(url));
        }
    }
}

/// Projects a piece into its response representation. May be asynchronous
/// and may fail; must be deterministic for identical input.
pub trait Renderer: Send + Sync + 'static {
    fn render(
        &self,
        caller: &Caller,
        collection: &str,
        piece: &Piece,
    ) -> impl Future<Output = Result<Value, RenderError>> + Send;
}

/// Renderer that serializes the piece as-is, annotations included.
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    async fn render(
        &self,
        _caller: &Caller,
        _collection: &str,
        piece: &Piece,
    ) -> Result<Value, RenderError> {
        serde_json::to_value(piece).map_err(|e| RenderError::Failed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    #[test]
    fn test_url_annotation() {
        let annotator = UrlAnnotator::new("/api/v1");
        let mut pieces = vec![Piece::with_id("p1", Map::new())];
        annotator.annotate("articles", &mut pieces);
        assert_eq!(pieces[0].get("_url"), Some(&json!("/api/v1/articles/p1")));
    }

    #[tokio::test]
    async fn test_json_renderer_is_deterministic() {
        let mut fields = Map::new();
        fields.insert("title".to_string(), json!("Hello"));
        let piece = Piece::with_id("p1", fields);
        let caller = Caller::anonymous();

        let first = JsonRenderer.render(&caller, "articles", &piece).await.unwrap();
        let second = JsonRenderer.render(&caller, "articles", &piece).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first["title"], "Hello");
        assert_eq!(first["id"], "p1");
    }
}
