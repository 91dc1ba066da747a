//! # Collection Endpoints
//!
//! The orchestrator for one collection's REST surface. Read endpoints run
//! sanitize → authorize/query → materialize → annotate → render → respond;
//! write endpoints run sanitize → mutate → re-fetch → respond. Every
//! asynchronous step is sequenced explicitly and the first failure aborts
//! the rest of the pipeline.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::auth::{Caller, PermissionOracle, RoleOracle};
use crate::config::EndpointConfig;
use crate::launder;
use crate::observability::Logger;
use crate::pieces::{
    Annotator, JsonRenderer, PieceStore, Renderer, StoreTrashHooks, StoreWriter, TrashHooks,
    UrlAnnotator, WritePipeline,
};

use super::context::RequestContext;
use super::errors::{ApiError, ApiResult};
use super::query::QueryBuilder;
use super::response::ListResponse;

/// Orchestrator for one collection, holding direct references to its
/// collaborators. Constructed once at startup; shared read-only by every
/// request to the collection.
pub struct PiecesApi<R, H, W>
where
    R: Renderer,
    H: TrashHooks,
    W: WritePipeline,
{
    config: EndpointConfig,
    store: Arc<PieceStore>,
    oracle: Arc<dyn PermissionOracle>,
    annotator: Arc<dyn Annotator>,
    renderer: Arc<R>,
    hooks: H,
    writer: W,
}

/// The default collaborator assembly.
pub type DefaultPiecesApi = PiecesApi<JsonRenderer, StoreTrashHooks, StoreWriter<JsonRenderer>>;

impl DefaultPiecesApi {
    /// Wire up the store-backed default collaborators for a collection.
    /// `base` is the API prefix, used to resolve annotation URLs.
    pub fn with_defaults(config: EndpointConfig, store: Arc<PieceStore>, base: &str) -> Self {
        let annotator: Arc<dyn Annotator> = Arc::new(UrlAnnotator::new(base));
        let renderer = Arc::new(JsonRenderer);
        let hooks = StoreTrashHooks::new(Arc::clone(&store));
        let writer = StoreWriter::new(
            Arc::clone(&store),
            Arc::clone(&annotator),
            Arc::clone(&renderer),
        );
        Self::new(
            config,
            store,
            Arc::new(RoleOracle),
            annotator,
            renderer,
            hooks,
            writer,
        )
    }
}

impl<R, H, W> PiecesApi<R, H, W>
where
    R: Renderer,
    H: TrashHooks,
    W: WritePipeline,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: EndpointConfig,
        store: Arc<PieceStore>,
        oracle: Arc<dyn PermissionOracle>,
        annotator: Arc<dyn Annotator>,
        renderer: Arc<R>,
        hooks: H,
        writer: W,
    ) -> Self {
        Self {
            config,
            store,
            oracle,
            annotator,
            renderer,
            hooks,
            writer,
        }
    }

    /// The collection's API path segment.
    pub fn route_name(&self) -> &str {
        self.config.route_name()
    }

    /// Whether this collection is exposed at all.
    pub fn enabled(&self) -> bool {
        self.config.enabled
    }

    /// Build a request context from transport-level inputs.
    pub fn request_context(
        &self,
        headers: &HeaderMap,
        query: HashMap<String, String>,
    ) -> RequestContext {
        RequestContext::new(Caller::from_headers(headers)).with_query(query)
    }

    /// The axum router for this collection, or an empty router when the
    /// endpoint is disabled.
    pub fn router(self: &Arc<Self>) -> Router {
        if !self.config.enabled {
            return Router::new();
        }
        Router::new()
            .route(
                "/",
                get(list_pieces::<R, H, W>).post(create_piece::<R, H, W>),
            )
            .route(
                "/:id",
                get(get_piece::<R, H, W>)
                    .put(update_piece::<R, H, W>)
                    .delete(trash_piece::<R, H, W>),
            )
            .with_state(Arc::clone(self))
    }

    fn query_builder(&self) -> QueryBuilder<'_> {
        QueryBuilder::new(&self.store, &self.config, self.oracle.as_ref())
    }

    /// Read-many: count, materialize the page, annotate, render in order.
    pub async fn list(&self, ctx: &RequestContext) -> ApiResult<ListResponse> {
        let cursor = self.query_builder().build_cursor(ctx);

        let state = cursor.count().await?;
        let mut pieces = cursor.to_list().await?;
        self.annotator.annotate(&self.config.collection, &mut pieces);

        // Rendering is strictly sequential: a renderer may keep
        // order-sensitive shared state (caches), so a later piece must not
        // start before the previous one finishes.
        let mut results = Vec::with_capacity(pieces.len());
        for piece in &pieces {
            let rendered = self
                .renderer
                .render(&ctx.caller, &self.config.collection, piece)
                .await?;
            results.push(rendered);
        }

        Ok(ListResponse {
            total: state.total,
            pages: state.pages,
            per_page: state.per_page,
            results,
        })
    }

    /// Read-one. Distinguishes bad-request (unparsable id, no query runs),
    /// not-found, and internal failure; the fetch failure is the one place
    /// this crate logs for operators.
    pub async fn get_one(&self, ctx: &RequestContext, raw_id: &str) -> ApiResult<Value> {
        let id = launder::id(raw_id).ok_or(ApiError::BadRequest)?;

        let found = self
            .query_builder()
            .build_cursor(ctx)
            .with_id(&id)
            .to_one()
            .await
            .map_err(|err| {
                let request_id = ctx.request_id.to_string();
                let detail = err.to_string();
                Logger::error(
                    "PIECE_FETCH_FAILED",
                    &[
                        ("collection", self.config.collection.as_str()),
                        ("error", detail.as_str()),
                        ("piece_id", id.as_str()),
                        ("request_id", request_id.as_str()),
                    ],
                );
                ApiError::from(err)
            })?;

        let mut piece = found.ok_or(ApiError::NotFound)?;
        self.annotator.annotate_one(&self.config.collection, &mut piece);
        let rendered = self
            .renderer
            .render(&ctx.caller, &self.config.collection, &piece)
            .await?;
        Ok(rendered)
    }

    /// Create: delegate conversion, insertion, and refresh to the write
    /// pipeline and map its outcome.
    pub async fn create(&self, ctx: &RequestContext) -> ApiResult<Value> {
        Ok(self.writer.convert_and_insert(ctx).await?)
    }

    /// Update: fetch the piece through the edit scope first, attach it to
    /// the context, only then convert. Converting against a piece that does
    /// not exist, or that the caller cannot edit, must never happen.
    pub async fn update(&self, mut ctx: RequestContext, raw_id: &str) -> ApiResult<Value> {
        let id = launder::id(raw_id).unwrap_or_default();

        let found = self
            .query_builder()
            .build_edit_cursor(&ctx)
            .with_id(&id)
            .to_one()
            .await?;
        let piece = found.ok_or(ApiError::NotFound)?;

        ctx.piece = Some(piece);
        Ok(self.writer.convert_and_update(&ctx).await?)
    }

    /// Soft delete through the three-phase hook pipeline. The id is
    /// laundered once up front and handed to the hooks even when malformed;
    /// every failure, not-found included, collapses into the generic error.
    pub async fn trash(&self, ctx: &RequestContext, raw_id: &str) -> ApiResult<Value> {
        let id = launder::id(raw_id).unwrap_or_default();

        self.hooks.before_trash(&ctx.caller, &id).await?;
        self.hooks.trash(&ctx.caller, &id).await?;
        self.hooks.after_trash(&ctx.caller, &id).await?;

        Ok(json!({}))
    }
}

async fn list_pieces<R: Renderer, H: TrashHooks, W: WritePipeline>(
    State(api): State<Arc<PiecesApi<R, H, W>>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Json<ListResponse>, ApiError> {
    let ctx = api.request_context(&headers, query);
    api.list(&ctx).await.map(Json)
}

async fn get_piece<R: Renderer, H: TrashHooks, W: WritePipeline>(
    State(api): State<Arc<PiecesApi<R, H, W>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let ctx = api.request_context(&headers, HashMap::new());
    api.get_one(&ctx, &id).await.map(Json)
}

async fn create_piece<R: Renderer, H: TrashHooks, W: WritePipeline>(
    State(api): State<Arc<PiecesApi<R, H, W>>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let ctx = api.request_context(&headers, HashMap::new()).with_body(body);
    api.create(&ctx).await.map(Json)
}

async fn update_piece<R: Renderer, H: TrashHooks, W: WritePipeline>(
    State(api): State<Arc<PiecesApi<R, H, W>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let ctx = api.request_context(&headers, HashMap::new()).with_body(body);
    api.update(ctx, &id).await.map(Json)
}

async fn trash_piece<R: Renderer, H: TrashHooks, W: WritePipeline>(
    State(api): State<Arc<PiecesApi<R, H, W>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let ctx = api.request_context(&headers, HashMap::new());
    api.trash(&ctx, &id).await.map(Json)
}
