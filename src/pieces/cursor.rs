//! # Cursor
//!
//! Lazily-configured query over one collection. Building a cursor performs
//! no I/O; filters, id restriction, and pagination only configure it. The
//! async terminals (`count`, `to_list`, `to_one`) execute against the store.

use std::sync::Arc;

use serde_json::Value;

use super::filter;
use super::piece::Piece;
use super::store::{PieceStore, StoreResult};

/// Fallback page size when a cursor is never given one explicitly.
const DEFAULT_PER_PAGE: usize = 50;

/// Query scoping mode.
///
/// `Public` excludes trashed pieces unconditionally; `Manage` is the
/// edit-capable view and sees everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Manage,
}

/// Resolved pagination state, produced by [`Cursor::count`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// Total pieces matching the cursor across all pages
    pub total: usize,
    /// Total pages at the cursor's page size
    pub pages: usize,
    /// Effective page size
    pub per_page: usize,
}

/// A composable, lazily-executed query over a piece collection.
#[derive(Clone)]
pub struct Cursor {
    store: Arc<PieceStore>,
    visibility: Visibility,
    filters: Vec<(String, Value)>,
    id: Option<String>,
    per_page: usize,
    page: usize,
    void: bool,
}

impl Cursor {
    pub fn new(store: Arc<PieceStore>, visibility: Visibility) -> Self {
        Self {
            store,
            visibility,
            filters: Vec::new(),
            id: None,
            per_page: DEFAULT_PER_PAGE,
            page: 1,
            void: false,
        }
    }

    /// A cursor over the store that matches nothing. Used when a caller holds
    /// no permission for the scope being queried.
    pub fn none(store: Arc<PieceStore>) -> Self {
        Self {
            void: true,
            ..Self::new(store, Visibility::Manage)
        }
    }

    /// Chain an equality filter onto the cursor.
    pub fn filter(mut self, name: impl Into<String>, value: Value) -> Self {
        self.filters.push((name.into(), value));
        self
    }

    /// Restrict the cursor to exactly one id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the page size. Zero is normalized to one.
    pub fn per_page(mut self, n: usize) -> Self {
        self.per_page = n.max(1);
        self
    }

    /// Set the page number (1-based). Zero is normalized to one.
    pub fn page(mut self, n: usize) -> Self {
        self.page = n.max(1);
        self
    }

    /// The cursor's configured page size.
    pub fn per_page_value(&self) -> usize {
        self.per_page
    }

    /// Count matching pieces and resolve pagination state.
    pub async fn count(&self) -> StoreResult<PageState> {
        let total = self.matching()?.len();
        Ok(PageState {
            total,
            pages: total.div_ceil(self.per_page),
            per_page: self.per_page,
        })
    }

    /// Materialize the configured page of matching pieces, in store order.
    pub async fn to_list(&self) -> StoreResult<Vec<Piece>> {
        let matching = self.matching()?;
        // A huge page number yields an empty page, never a wrapped offset.
        let offset = (self.page - 1).saturating_mul(self.per_page);
        Ok(matching
            .into_iter()
            .skip(offset)
            .take(self.per_page)
            .collect())
    }

    /// Materialize at most one matching piece.
    pub async fn to_one(&self) -> StoreResult<Option<Piece>> {
        Ok(self.matching()?.into_iter().next())
    }

    fn matching(&self) -> StoreResult<Vec<Piece>> {
        if self.void {
            return Ok(Vec::new());
        }
        let pieces = self.store.snapshot()?;
        Ok(pieces
            .into_iter()
            .filter(|p| self.visibility == Visibility::Manage || !p.trashed)
            .filter(|p| self.id.as_deref().map_or(true, |id| p.id == id))
            .filter(|p| {
                self.filters
                    .iter()
                    .all(|(name, value)| filter::matches(p, name, value))
            })
            .collect())
    }
}
