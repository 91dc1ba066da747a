//! # HTTP API
//!
//! The REST surface over piece collections: error taxonomy, response
//! shapes, the per-request context, the query builder, the endpoint
//! orchestrator, and server assembly.

pub mod context;
pub mod errors;
pub mod query;
pub mod response;
pub mod routes;
pub mod server;

pub use context::RequestContext;
pub use errors::{ApiError, ApiResult, ErrorBody};
pub use query::QueryBuilder;
pub use response::ListResponse;
pub use routes::{DefaultPiecesApi, PiecesApi};
pub use server::ApiServer;
