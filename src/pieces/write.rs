//! # Write Pipelines
//!
//! The convert-insert-refresh and convert-update-refresh operations the
//! create and update endpoints delegate to. Conversion rejects non-object
//! bodies and strips reserved fields; refresh re-fetches the stored piece so
//! the response reflects exactly what was persisted, then annotates and
//! renders it.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::api::context::RequestContext;

use super::piece::Piece;
use super::render::{Annotator, RenderError, Renderer};
use super::store::{PieceStore, StoreError};

/// Fields the caller may not supply; the pipeline owns them.
const RESERVED_FIELDS: [&str; 4] = ["id", "trashed", "createdAt", "updatedAt"];

/// Write pipeline failures
#[derive(Debug, Error)]
pub enum WriteError {
    /// The request body failed conversion
    #[error("invalid piece body: {0}")]
    Invalid(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Converts request input into persisted pieces and returns their rendered
/// form. Atomic from the caller's perspective: any failure leaves no
/// partially-created piece behind.
pub trait WritePipeline: Send + Sync + 'static {
    fn convert_and_insert(
        &self,
        ctx: &RequestContext,
    ) -> impl Future<Output = Result<Value, WriteError>> + Send;

    fn convert_and_update(
        &self,
        ctx: &RequestContext,
    ) -> impl Future<Output = Result<Value, WriteError>> + Send;
}

/// Store-backed pipeline shared by the create and update endpoints.
pub struct StoreWriter<R: Renderer> {
    store: Arc<PieceStore>,
    annotator: Arc<dyn Annotator>,
    renderer: Arc<R>,
}

impl<R: Renderer> StoreWriter<R> {
    pub fn new(store: Arc<PieceStore>, annotator: Arc<dyn Annotator>, renderer: Arc<R>) -> Self {
        Self {
            store,
            annotator,
            renderer,
        }
    }

    /// Validate the body and strip reserved fields.
    fn convert(ctx: &RequestContext) -> Result<Map<String, Value>, WriteError> {
        let body = ctx
            .body
            .as_ref()
            .ok_or_else(|| WriteError::Invalid("missing body".to_string()))?;
        let object = body
            .as_object()
            .ok_or_else(|| WriteError::Invalid("body must be a JSON object".to_string()))?;

        Ok(object
            .iter()
            .filter(|(name, _)| !RESERVED_FIELDS.contains(&name.as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect())
    }

    /// Re-fetch, annotate, and render the persisted piece.
    async fn refresh(&self, ctx: &RequestContext, id: &str) -> Result<Value, WriteError> {
        let mut piece = self
            .store
            .get(id)?
            .ok_or_else(|| StoreError::Missing(id.to_string()))?;
        self.annotator
            .annotate_one(self.store.collection(), &mut piece);
        let rendered = self
            .renderer
            .render(&ctx.caller, self.store.collection(), &piece)
            .await?;
        Ok(rendered)
    }
}

impl<R: Renderer> WritePipeline for StoreWriter<R> {
    async fn convert_and_insert(&self, ctx: &RequestContext) -> Result<Value, WriteError> {
        let mut fields = Self::convert(ctx)?;
        fields.insert("createdAt".to_string(), json!(Utc::now().to_rfc3339()));

        let piece = Piece::new(fields);
        let id = piece.id.clone();
        self.store.insert(piece)?;
        self.refresh(ctx, &id).await
    }

    async fn convert_and_update(&self, ctx: &RequestContext) -> Result<Value, WriteError> {
        let existing = ctx
            .piece
            .as_ref()
            .ok_or_else(|| WriteError::Invalid("no piece attached to the request".to_string()))?;
        let fields = Self::convert(ctx)?;

        self.store.apply(&existing.id, |piece| {
            for (name, value) in fields {
                piece.set(name, value);
            }
            piece.set("updatedAt", json!(Utc::now().to_rfc3339()));
        })?;
        self.refresh(ctx, &existing.id).await
    }
}
