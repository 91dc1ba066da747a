//! # Trash Lifecycle Hooks
//!
//! Soft deletion runs through three phases in a fixed order:
//! `before_trash`, `trash`, `after_trash`. A phase error stops the
//! pipeline; later phases never run. The before/after phases exist as
//! extension points and default to no-ops.

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;

use crate::auth::Caller;

use super::store::{PieceStore, StoreError};

/// Failures raised by a lifecycle phase
#[derive(Debug, Clone, Error)]
pub enum HookError {
    /// A hook rejected or failed the operation
    #[error("trash phase failed: {0}")]
    Phase(String),

    /// The store refused the deletion
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Three-phase soft-delete lifecycle.
///
/// All three phases receive the same laundered id, unchanged.
pub trait TrashHooks: Send + Sync + 'static {
    fn before_trash(
        &self,
        caller: &Caller,
        id: &str,
    ) -> impl Future<Output = Result<(), HookError>> + Send;

    fn trash(
        &self,
        caller: &Caller,
        id: &str,
    ) -> impl Future<Output = Result<(), HookError>> + Send;

    fn after_trash(
        &self,
        caller: &Caller,
        id: &str,
    ) -> impl Future<Output = Result<(), HookError>> + Send;
}

/// Default hooks: no-op before/after, store-backed trash phase.
pub struct StoreTrashHooks {
    store: Arc<PieceStore>,
}

impl StoreTrashHooks {
    pub fn new(store: Arc<PieceStore>) -> Self {
        Self { store }
    }
}

impl TrashHooks for StoreTrashHooks {
    async fn before_trash(&self, _caller: &Caller, _id: &str) -> Result<(), HookError> {
        Ok(())
    }

    async fn trash(&self, _caller: &Caller, id: &str) -> Result<(), HookError> {
        self.store.trash(id)?;
        Ok(())
    }

    async fn after_trash(&self, _caller: &Caller, _id: &str) -> Result<(), HookError> {
        Ok(())
    }
}
