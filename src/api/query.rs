//! # Query Builder
//!
//! Turns a request context into a permission-scoped, pagination-bounded
//! cursor. Pure configuration: no I/O happens here, and malformed inputs
//! are normalized rather than rejected.

use std::sync::Arc;

use crate::auth::PermissionOracle;
use crate::config::EndpointConfig;
use crate::pieces::{filter, Cursor, PieceStore, Visibility};

use super::context::RequestContext;

/// Pagination parameters recognized on the query string. These are never
/// treated as filters.
const PER_PAGE_PARAM: &str = "perPage";
const PAGE_PARAM: &str = "page";

/// Builds read- and edit-scoped cursors for one collection.
pub struct QueryBuilder<'a> {
    store: &'a Arc<PieceStore>,
    config: &'a EndpointConfig,
    oracle: &'a dyn PermissionOracle,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(
        store: &'a Arc<PieceStore>,
        config: &'a EndpointConfig,
        oracle: &'a dyn PermissionOracle,
    ) -> Self {
        Self {
            store,
            config,
            oracle,
        }
    }

    /// Build the read cursor for this request.
    ///
    /// Visibility is `manage` when the caller holds edit permission on the
    /// collection, else `public`. Query-string filters outside the
    /// allow-list are silently ignored; the allow-list is a security
    /// boundary, not a validation step. The page size is forced to the
    /// configured cap when absent, zero, or above it.
    pub fn build_cursor(&self, ctx: &RequestContext) -> Cursor {
        let visibility = if self.can_edit(ctx) {
            Visibility::Manage
        } else {
            Visibility::Public
        };

        let mut cursor = self.store.find(visibility);
        for (name, raw) in &ctx.query {
            if name == PER_PAGE_PARAM || name == PAGE_PARAM {
                continue;
            }
            if self.config.is_safe_filter(name) {
                cursor = cursor.filter(name.clone(), filter::coerce(raw));
            }
        }

        cursor
            .per_page(self.effective_per_page(ctx))
            .page(requested_page(ctx))
    }

    /// Build the edit-scoped cursor of the update path. Enforces write
    /// permission, not just read visibility: callers without edit permission
    /// get a cursor that matches nothing.
    pub fn build_edit_cursor(&self, ctx: &RequestContext) -> Cursor {
        if self.can_edit(ctx) {
            self.store.find(Visibility::Manage)
        } else {
            Cursor::none(Arc::clone(self.store))
        }
    }

    fn can_edit(&self, ctx: &RequestContext) -> bool {
        self.oracle.can_edit(&ctx.caller, &self.config.collection)
    }

    fn effective_per_page(&self, ctx: &RequestContext) -> usize {
        let max = self.config.max_per_page;
        match ctx
            .query
            .get(PER_PAGE_PARAM)
            .and_then(|raw| raw.parse::<usize>().ok())
        {
            Some(n) if n >= 1 && n <= max => n,
            _ => max,
        }
    }
}

fn requested_page(ctx: &RequestContext) -> usize {
    ctx.query
        .get(PAGE_PARAM)
        .and_then(|raw| raw.parse::<usize>().ok())
        .filter(|&n| n >= 1)
        .unwrap_or(1)
}
