//! # Pieces Domain
//!
//! The content-piece collection model: the entity itself, the in-memory
//! store, the lazy query cursor, the annotation/rendering seams, the trash
//! lifecycle hooks, and the write pipelines the HTTP surface delegates to.

pub mod cursor;
pub mod filter;
pub mod hooks;
pub mod piece;
pub mod render;
pub mod store;
pub mod write;

pub use cursor::{Cursor, PageState, Visibility};
pub use hooks::{HookError, StoreTrashHooks, TrashHooks};
pub use piece::Piece;
pub use render::{Annotator, JsonRenderer, RenderError, Renderer, UrlAnnotator};
pub use store::{PieceStore, StoreError, StoreResult};
pub use write::{StoreWriter, WriteError, WritePipeline};
