//! # Piece Store
//!
//! In-memory document store backing a single collection. This plays the
//! "external store" role: cursors execute against it, the write pipelines
//! persist through it, and the trash hook flips the soft-delete flag here.
//! Insertion order is preserved so listings stay deterministic.

use std::sync::{Arc, RwLock};

use thiserror::Error;

use super::cursor::{Cursor, Visibility};
use super::piece::Piece;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failures
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A writer panicked while holding the lock
    #[error("piece store lock poisoned")]
    Poisoned,

    /// No piece with the given id exists in this collection
    #[error("no piece with id {0}")]
    Missing(String),
}

/// In-memory store for one collection of pieces
pub struct PieceStore {
    collection: String,
    docs: RwLock<Vec<Piece>>,
}

impl PieceStore {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            docs: RwLock::new(Vec::new()),
        }
    }

    /// The collection this store holds
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Start a lazy cursor over this store with the given visibility mode.
    pub fn find(self: &Arc<Self>, visibility: Visibility) -> Cursor {
        Cursor::new(Arc::clone(self), visibility)
    }

    /// Copy out every stored piece, in insertion order.
    pub fn snapshot(&self) -> StoreResult<Vec<Piece>> {
        let docs = self.docs.read().map_err(|_| StoreError::Poisoned)?;
        Ok(docs.clone())
    }

    /// Persist a new piece.
    pub fn insert(&self, piece: Piece) -> StoreResult<()> {
        let mut docs = self.docs.write().map_err(|_| StoreError::Poisoned)?;
        docs.push(piece);
        Ok(())
    }

    /// Fetch a piece by id, trashed or not.
    pub fn get(&self, id: &str) -> StoreResult<Option<Piece>> {
        let docs = self.docs.read().map_err(|_| StoreError::Poisoned)?;
        Ok(docs.iter().find(|p| p.id == id).cloned())
    }

    /// Mutate a stored piece in place, returning the updated copy.
    pub fn apply<F>(&self, id: &str, mutate: F) -> StoreResult<Piece>
    where
        F: FnOnce(&mut Piece),
    {
        let mut docs = self.docs.write().map_err(|_| StoreError::Poisoned)?;
        let piece = docs
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::Missing(id.to_string()))?;
        mutate(piece);
        Ok(piece.clone())
    }

    /// Flip the soft-delete flag. The piece stays stored.
    pub fn trash(&self, id: &str) -> StoreResult<()> {
        self.apply(id, |piece| piece.trashed = true).map(|_| ())
    }
}
